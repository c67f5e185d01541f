use std::path::Path;

use crate::source::{DocumentError, DocumentSource, Page};

// ── PDF backend (optional, gated behind `pdf` feature) ────────────────────────

#[cfg(feature = "pdf")]
pub mod pdf_backend {
    use super::*;

    /// Per-page text through `pdf-extract`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct PdfSource;

    impl DocumentSource for PdfSource {
        fn open(&self, path: &Path, password: Option<&str>) -> Result<Vec<Page>, DocumentError> {
            if !path.exists() {
                return Err(DocumentError::NotFound(path.display().to_string()));
            }
            let texts = match password {
                Some(pw) => pdf_extract::extract_text_by_pages_encrypted(path, pw),
                None => pdf_extract::extract_text_by_pages(path),
            }
            .map_err(|e| classify_error(&e.to_string(), password.is_some()))?;

            tracing::debug!("Extracted {} page(s) from {}", texts.len(), path.display());
            Ok(Page::sequence(texts))
        }
    }

    fn classify_error(message: &str, had_password: bool) -> DocumentError {
        let low = message.to_lowercase();
        if low.contains("password") || low.contains("decrypt") || low.contains("encrypt") {
            if had_password {
                DocumentError::IncorrectPassword
            } else {
                DocumentError::PasswordRequired
            }
        } else {
            DocumentError::Corrupt(message.to_string())
        }
    }
}

/// Picks a backend from the file extension: `.pdf` goes to the PDF backend
/// (when built with the `pdf` feature), everything else is read as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoSource;

impl AutoSource {
    fn is_pdf(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
    }
}

impl DocumentSource for AutoSource {
    fn open(&self, path: &Path, password: Option<&str>) -> Result<Vec<Page>, DocumentError> {
        if Self::is_pdf(path) {
            #[cfg(feature = "pdf")]
            return pdf_backend::PdfSource.open(path, password);
            #[cfg(not(feature = "pdf"))]
            return Err(DocumentError::Unsupported(format!(
                "{}: PDF support not built in, rebuild with the `pdf` feature or pass extracted text",
                path.display()
            )));
        }
        crate::text::TextFileSource.open(path, password)
    }
}
