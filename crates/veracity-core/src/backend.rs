use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open document: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
}

/// Trait for document text extraction backends.
///
/// Implementors provide the low-level per-page text; the extraction
/// pipeline (page concatenation, empty/garbled detection) lives in the
/// `veracity-pdf` crate's `TextExtractor`. A backend is constructed
/// explicitly at startup and handed to the extractor; there is no
/// ambient global setup.
pub trait DocumentBackend: Send + Sync {
    /// Extract the text of every page, in natural reading order.
    ///
    /// Each returned string is one page, with the page's text items
    /// already joined by single spaces. Must not mutate the input.
    fn page_texts(&self, data: &[u8]) -> Result<Vec<String>, BackendError>;
}
