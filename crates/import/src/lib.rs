//! Statement text → transactions.
//!
//! [`StatementParser`] walks page text line by line, sorting each line into
//! boilerplate, statement-period information, transaction rows and
//! description fragments, then fills in missing years from the statement
//! period. Institution differences live entirely in [`StatementProfile`].

pub mod amount;
pub mod assembler;
pub mod buffer;
pub mod filter;
pub mod matcher;
pub mod period;
pub mod pipeline;
pub mod profile;
pub mod year;

pub use amount::normalize_amount;
pub use assembler::{Extraction, LineClass, ParseOptions, ParserState, ScanState, StatementParser};
pub use matcher::{LineMatch, LineMatcher};
pub use period::{PeriodLine, PeriodTracker};
pub use pipeline::{parse_document, ErrorReport, ParsedStatement};
pub use profile::{DateStyle, LineShape, ProfileError, StatementProfile, BUILTIN_PROFILES};
pub use year::LineDate;
