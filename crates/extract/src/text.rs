use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to parse PDF file. Ensure it is a valid PDF document")]
    Pdf(#[from] lopdf::Error),
}

/// Abstraction over paged-document text extraction.
/// Implementations take the raw file bytes and return one string per page.
pub trait TextSource: Send + Sync {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError>;
}

// ── PDF backend ───────────────────────────────────────────────────────────────

/// lopdf-backed extraction. Pages are walked in order and each page is
/// fully extracted before the next begins.
pub struct PdfTextSource;

impl TextSource for PdfTextSource {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        let doc = lopdf::Document::load_mem(bytes)?;
        let mut pages = Vec::new();
        for (&page_num, _) in doc.get_pages().iter() {
            // Pages without a text layer (scans) contribute nothing.
            if let Ok(text) = doc.extract_text(&[page_num]) {
                pages.push(text);
            } else {
                tracing::debug!(page_num, "no text layer on page");
            }
        }
        Ok(pages)
    }
}

// ── Mock backend (used for scanner tests) ─────────────────────────────────────

/// Returns pre-set page texts, so the transaction scanner can be tested
/// without PDF fixtures.
pub struct MockTextSource {
    pub pages: Vec<String>,
}

impl MockTextSource {
    pub fn new<S: Into<String>>(pages: impl IntoIterator<Item = S>) -> Self {
        Self { pages: pages.into_iter().map(Into::into).collect() }
    }
}

impl TextSource for MockTextSource {
    fn page_texts(&self, _bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        Ok(self.pages.clone())
    }
}
