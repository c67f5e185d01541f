use std::path::Path;

use crate::source::{DocumentError, DocumentSource, Page};

/// Page separator written by `pdftotext` and most text dumpers.
pub const FORM_FEED: char = '\x0c';

/// Reads statement text that was already extracted to a UTF-8 file.
/// Pages are split on form feeds; a file without any is a single page.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFileSource;

impl TextFileSource {
    pub fn split_pages(text: &str) -> Vec<Page> {
        let mut parts: Vec<&str> = text.split(FORM_FEED).collect();
        // pdftotext terminates the last page with a form feed too.
        if parts.len() > 1 && parts.last().is_some_and(|p| p.trim().is_empty()) {
            parts.pop();
        }
        Page::sequence(parts)
    }
}

impl DocumentSource for TextFileSource {
    fn open(&self, path: &Path, _password: Option<&str>) -> Result<Vec<Page>, DocumentError> {
        if !path.exists() {
            return Err(DocumentError::NotFound(path.display().to_string()));
        }
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| DocumentError::Corrupt(format!("not UTF-8 text: {e}")))?;
        let pages = Self::split_pages(&text);
        tracing::debug!("Read {} page(s) from {}", pages.len(), path.display());
        Ok(pages)
    }
}
