use std::path::Path;

use chrono::NaiveDate;
use folio_core::{CardType, StatementSummary, StatementTransaction, Summarizer};
use folio_pdf::{DocumentError, DocumentSource};
use serde::{Deserialize, Serialize};

use crate::assembler::{Extraction, StatementParser};

/// The full result of reading one statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedStatement {
    pub bank: String,
    pub card_type: CardType,
    pub summary: StatementSummary,
    pub transactions: Vec<StatementTransaction>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

/// A document failure in the `{ "error": ... }` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
}

impl From<&DocumentError> for ErrorReport {
    fn from(e: &DocumentError) -> Self {
        ErrorReport { error: e.to_string() }
    }
}

impl ParsedStatement {
    pub fn from_extraction<S: Summarizer + ?Sized>(
        parser: &StatementParser,
        extraction: Extraction,
        summarizer: &S,
    ) -> Self {
        let profile = parser.profile();
        ParsedStatement {
            bank: profile.bank.clone(),
            card_type: profile.card_type,
            summary: summarizer.summarize(&extraction.transactions),
            transactions: extraction.transactions,
            from_date: extraction.period.from_date,
            to_date: extraction.period.to_date,
        }
    }
}

/// Orchestrates: open document → walk pages → summarize.
///
/// A failure from `source` is returned untouched and nothing else runs.
pub fn parse_document<D, S>(
    source: &D,
    path: &Path,
    password: Option<&str>,
    parser: &StatementParser,
    summarizer: &S,
) -> Result<ParsedStatement, DocumentError>
where
    D: DocumentSource + ?Sized,
    S: Summarizer + ?Sized,
{
    let pages = source.open(path, password)?;
    tracing::debug!(
        "Parsing {} page(s) of {} with profile '{}'",
        pages.len(),
        path.display(),
        parser.profile().id
    );
    let extraction = parser.parse_pages(&pages);
    Ok(ParsedStatement::from_extraction(parser, extraction, summarizer))
}
