use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Document is encrypted and no password was given")]
    PasswordRequired,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Corrupt or unreadable document: {0}")]
    Corrupt(String),
    #[error("Unsupported document: {0}")]
    Unsupported(String),
}

/// Extracted text of one page, in reading order as the backend produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub text: String,
}

impl Page {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self { number, text: text.into() }
    }

    /// Number pages 1..=n in the given order.
    pub fn sequence<I, S>(texts: I) -> Vec<Page>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(i, t)| Page::new(i + 1, t))
            .collect()
    }
}

/// Abstraction over a statement document backend.
/// Implementations open the file at `path` (decrypting with `password` when
/// needed) and return its per-page text.
pub trait DocumentSource: Send + Sync {
    fn open(&self, path: &Path, password: Option<&str>) -> Result<Vec<Page>, DocumentError>;
}

// ── Mock source (always available, used for tests) ────────────────────────────

/// Returns preset pages, or a preset failure, regardless of the path.
pub struct MockSource {
    outcome: MockOutcome,
}

enum MockOutcome {
    Pages(Vec<Page>),
    WrongPassword,
    Corrupt(String),
}

impl MockSource {
    pub fn with_pages<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { outcome: MockOutcome::Pages(Page::sequence(texts)) }
    }

    /// Fails like a document opened with the wrong password.
    pub fn wrong_password() -> Self {
        Self { outcome: MockOutcome::WrongPassword }
    }

    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self { outcome: MockOutcome::Corrupt(reason.into()) }
    }
}

impl DocumentSource for MockSource {
    fn open(&self, _path: &Path, _password: Option<&str>) -> Result<Vec<Page>, DocumentError> {
        match &self.outcome {
            MockOutcome::Pages(pages) => Ok(pages.clone()),
            MockOutcome::WrongPassword => Err(DocumentError::IncorrectPassword),
            MockOutcome::Corrupt(reason) => Err(DocumentError::Corrupt(reason.clone())),
        }
    }
}
