use serde::{Deserialize, Serialize};

use super::money::Money;
use super::transaction::StatementTransaction;

/// Aggregate figures over a parsed transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSummary {
    pub total_debit: Money,
    pub total_credit: Money,
    /// `total_credit - total_debit`; negative when more was spent than repaid.
    pub net: Money,
    pub count: usize,
}

/// Computes the summary attached to a parse result.
pub trait Summarizer {
    fn summarize(&self, transactions: &[StatementTransaction]) -> StatementSummary;
}

/// Plain debit/credit totals.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalsSummarizer;

impl Summarizer for TotalsSummarizer {
    fn summarize(&self, transactions: &[StatementTransaction]) -> StatementSummary {
        let total_debit = transactions
            .iter()
            .map(|t| t.debit)
            .fold(Money::zero(), |a, b| a + b);
        let total_credit = transactions
            .iter()
            .map(|t| t.credit)
            .fold(Money::zero(), |a, b| a + b);

        StatementSummary {
            total_debit,
            total_credit,
            net: total_credit - total_debit,
            count: transactions.len(),
        }
    }
}
