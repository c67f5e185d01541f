pub mod extract;
pub mod source;
pub mod text;

pub use extract::AutoSource;
#[cfg(feature = "pdf")]
pub use extract::pdf_backend::PdfSource;
pub use source::{DocumentError, DocumentSource, MockSource, Page};
pub use text::TextFileSource;
