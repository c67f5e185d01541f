use folio_core::CardType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A transaction line grammar. A profile lists the shapes it uses in the
/// order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineShape {
    /// `date description CCY amount [CR] - balance [CR]`
    Domestic,
    /// `date FCY fx_amount fx_rate home_amount [CR]`
    ForeignCurrency,
    /// `[posting_date] date description amount [CR]`
    SingleAmount,
}

/// How dates are printed on transaction lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    /// `14 AUG`; the year is inferred from the statement period.
    DayMonthName,
    /// `15/08/2025`
    DayMonthYearSlash,
}

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to parse profile TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Unknown bank: '{0}'")]
    UnknownBank(String),
    #[error("Profile '{0}' has no line shapes")]
    NoShapes(String),
    #[error("Invalid currency code: '{0}'")]
    InvalidCurrency(String),
    #[error("Invalid line pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Everything institution-specific the engine needs to read a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementProfile {
    pub id: String,
    pub bank: String,
    pub card_type: CardType,
    /// Home currency code printed on domestic lines.
    pub currency: String,
    pub date_style: DateStyle,
    pub shapes: Vec<LineShape>,
    /// Lines containing any of these (case-insensitive) are dropped outright.
    #[serde(default)]
    pub skip_keywords: Vec<String>,
    /// Buffered description fragments containing any of these are page
    /// noise and get discarded instead of attached.
    #[serde(default)]
    pub drop_hints: Vec<String>,
    /// A transaction whose description contains one of these is a credit.
    #[serde(default)]
    pub credit_keywords: Vec<String>,
    /// Labels introducing a one-line `<date> to <date>` statement period.
    #[serde(default = "default_period_labels")]
    pub period_labels: Vec<String>,
}

fn default_period_labels() -> Vec<String> {
    vec!["statement period".to_string()]
}

pub const BUILTIN_PROFILES: &[&str] = &["emirates_islamic", "rakbank"];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl StatementProfile {
    pub fn from_toml(toml_content: &str) -> Result<Self, ProfileError> {
        let profile: StatementProfile = toml::from_str(toml_content)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Look up a built-in profile. Case, spaces, dashes and underscores in
    /// `id` are ignored, so `"Emirates Islamic"` and `"emirates-islamic"`
    /// both work.
    pub fn builtin(id: &str) -> Result<Self, ProfileError> {
        let key: String = id
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "emiratesislamic" | "ei" => Ok(Self::emirates_islamic()),
            "rakbank" | "rak" => Ok(Self::rakbank()),
            _ => Err(ProfileError::UnknownBank(id.to_string())),
        }
    }

    /// Credit card statements with `14 AUG  12 AUG  MERCHANT  100.00[CR]` rows
    /// and the period given as separate From/To markers.
    pub fn emirates_islamic() -> Self {
        StatementProfile {
            id: "emirates_islamic".to_string(),
            bank: "Emirates Islamic".to_string(),
            card_type: CardType::Credit,
            currency: "AED".to_string(),
            date_style: DateStyle::DayMonthName,
            shapes: vec![LineShape::SingleAmount],
            skip_keywords: strings(&[
                "opening balance",
                "primary card no",
                "rewards summary",
                "cashback",
                "card limit",
                "minimum payment due",
                "payment due date",
                "profit/other charges",
                "current balance",
                "profit reversal",
                "finance charges",
            ]),
            drop_hints: strings(&[
                "posting date",
                "transaction details",
                "statement date",
                "card number",
                "page no",
            ]),
            credit_keywords: strings(&["payment received"]),
            period_labels: default_period_labels(),
        }
    }

    /// Credit card statements with AED lines carrying a running balance and
    /// separate foreign-currency lines.
    pub fn rakbank() -> Self {
        StatementProfile {
            id: "rakbank".to_string(),
            bank: "RAKBANK".to_string(),
            card_type: CardType::Credit,
            currency: "AED".to_string(),
            date_style: DateStyle::DayMonthYearSlash,
            shapes: vec![LineShape::Domestic, LineShape::ForeignCurrency],
            skip_keywords: strings(&[
                "opening balance",
                "closing balance",
                "available credit",
                "minimum payment due",
                "payment due date",
                "credit limit",
            ]),
            drop_hints: strings(&[
                "your credit card statement",
                "statement period",
                "product name",
                "card number",
                "page[",
            ]),
            credit_keywords: strings(&["payment", "refund"]),
            period_labels: default_period_labels(),
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.shapes.is_empty() {
            return Err(ProfileError::NoShapes(self.id.clone()));
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ProfileError::InvalidCurrency(self.currency.clone()));
        }
        Ok(())
    }
}
