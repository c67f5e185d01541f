use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::money::Money;

/// Which column of the statement an amount lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Debit,
    Credit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Credit,
    Debit,
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardType::Credit => write!(f, "credit"),
            CardType::Debit => write!(f, "debit"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Unknown card type: '{0}'")]
pub struct UnknownCardType(pub String);

impl std::str::FromStr for CardType {
    type Err = UnknownCardType;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit" => Ok(CardType::Credit),
            "debit" => Ok(CardType::Debit),
            other => Err(UnknownCardType(other.to_string())),
        }
    }
}

/// Original-currency details of a foreign-currency line. Informational only:
/// debit, credit and amount are always in the home currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignExchange {
    pub fx_currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub fx_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub fx_rate: Decimal,
}

/// One movement read off a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementTransaction {
    pub transaction_date: NaiveDate,
    pub description: String,
    pub debit: Money,
    pub credit: Money,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Money>,
    pub bank: String,
    pub card_type: CardType,
    #[serde(flatten)]
    pub fx: Option<ForeignExchange>,
}

impl StatementTransaction {
    /// Build a record with `amount` on `side` and an exact zero on the other.
    pub fn new(
        transaction_date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        side: Side,
        bank: impl Into<String>,
        card_type: CardType,
    ) -> Self {
        let (debit, credit) = match side {
            Side::Debit => (amount, Money::zero()),
            Side::Credit => (Money::zero(), amount),
        };
        StatementTransaction {
            transaction_date,
            description: description.into().trim().to_string(),
            debit,
            credit,
            amount,
            balance: None,
            bank: bank.into(),
            card_type,
            fx: None,
        }
    }

    pub fn with_balance(mut self, balance: Money) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn with_fx(mut self, fx: ForeignExchange) -> Self {
        self.fx = Some(fx);
        self
    }

    pub fn side(&self) -> Side {
        // Zero-amount records (unparseable amounts) read as debit.
        if self.credit.is_zero() {
            Side::Debit
        } else {
            Side::Credit
        }
    }

    pub fn is_credit(&self) -> bool {
        self.side() == Side::Credit
    }
}
