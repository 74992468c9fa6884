pub mod scan;
pub mod text;

pub use scan::{scan_document, scan_text, ScanError, DOCUMENT_DESCRIPTION_PLACEHOLDER};
pub use text::{ExtractError, MockTextSource, PdfTextSource, TextSource};
