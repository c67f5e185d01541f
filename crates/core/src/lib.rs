pub mod money;
pub mod period;
pub mod summary;
pub mod transaction;

pub use money::Money;
pub use period::{Boundary, DateRange, StatementPeriod};
pub use summary::{StatementSummary, Summarizer, TotalsSummarizer};
pub use transaction::{CardType, ForeignExchange, Side, StatementTransaction, UnknownCardType};
