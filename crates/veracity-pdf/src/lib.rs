use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use veracity_core::{BackendError, DocumentBackend, SelectedDocument};

#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The document could not be opened or parsed at all.
    #[error("could not read the document: {0}")]
    Unreadable(String),
    /// The document opened fine but yielded no usable text. A scanned
    /// all-image document and a garbled one are indistinguishable at
    /// this layer; both surface as this single condition.
    #[error("could not extract any text from the document")]
    Empty,
}

impl From<ExtractionError> for veracity_core::AnalysisError {
    fn from(err: ExtractionError) -> Self {
        veracity_core::AnalysisError::new(err.to_string())
    }
}

/// Turns an uploaded document into one linear string.
///
/// The backend yields per-page text (items within a page already joined
/// by single spaces); pages are concatenated here in natural reading
/// order, separated by newlines. The backend is injected at construction
/// rather than configured through any module-level global.
#[derive(Clone)]
pub struct TextExtractor {
    backend: Arc<dyn DocumentBackend>,
}

impl TextExtractor {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self { backend }
    }

    /// Extract the document's text.
    ///
    /// Never returns an empty string: a result with no usable characters
    /// is [`ExtractionError::Empty`]. Read-only with respect to the
    /// input; no size limit is enforced here.
    pub fn extract(&self, document: &SelectedDocument) -> Result<String, ExtractionError> {
        let pages = self
            .backend
            .page_texts(&document.data)
            .map_err(|e| match e {
                BackendError::OpenError(msg) | BackendError::ExtractionError(msg) => {
                    ExtractionError::Unreadable(msg)
                }
            })?;

        let text = pages.join("\n");
        if !has_usable_text(&text) {
            debug!(name = %document.name, pages = pages.len(), "extraction yielded no usable text");
            return Err(ExtractionError::Empty);
        }

        debug!(name = %document.name, pages = pages.len(), chars = text.len(), "text extracted");
        Ok(text)
    }
}

/// A document counts as having text only if at least one character is
/// neither whitespace nor a control character. Double-encoded or garbled
/// extractions that produce control-character soup fail this check and
/// collapse into the same `Empty` condition as a scan.
fn has_usable_text(text: &str) -> bool {
    text.chars().any(|c| !c.is_whitespace() && !c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend returning canned pages.
    struct FakeBackend {
        pages: Vec<&'static str>,
    }

    impl DocumentBackend for FakeBackend {
        fn page_texts(&self, _data: &[u8]) -> Result<Vec<String>, BackendError> {
            Ok(self.pages.iter().map(|p| p.to_string()).collect())
        }
    }

    /// Backend that cannot open anything.
    struct BrokenBackend;

    impl DocumentBackend for BrokenBackend {
        fn page_texts(&self, _data: &[u8]) -> Result<Vec<String>, BackendError> {
            Err(BackendError::OpenError("bad xref table".into()))
        }
    }

    fn doc() -> SelectedDocument {
        SelectedDocument {
            name: "resume.pdf".to_string(),
            data: vec![0x25, 0x50, 0x44, 0x46],
        }
    }

    fn extractor(pages: Vec<&'static str>) -> TextExtractor {
        TextExtractor::new(Arc::new(FakeBackend { pages }))
    }

    #[test]
    fn pages_are_joined_with_newlines_in_order() {
        let text = extractor(vec!["first page", "second page", "third page"])
            .extract(&doc())
            .unwrap();
        assert_eq!(text, "first page\nsecond page\nthird page");
    }

    #[test]
    fn single_non_whitespace_character_is_enough() {
        let text = extractor(vec!["   ", "x", ""]).extract(&doc()).unwrap();
        assert_eq!(text, "   \nx\n");
    }

    #[test]
    fn whitespace_only_document_fails_empty() {
        let err = extractor(vec!["   ", "\t \n"]).extract(&doc()).unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));
    }

    #[test]
    fn zero_pages_fails_empty() {
        let err = extractor(vec![]).extract(&doc()).unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));
    }

    #[test]
    fn control_character_soup_fails_empty() {
        let err = extractor(vec!["\u{0}\u{1}\u{2}", "\u{7f}\u{8}"])
            .extract(&doc())
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));
    }

    #[test]
    fn unparseable_document_fails_unreadable() {
        let err = TextExtractor::new(Arc::new(BrokenBackend))
            .extract(&doc())
            .unwrap_err();
        match err {
            ExtractionError::Unreadable(msg) => assert_eq!(msg, "bad xref table"),
            other => panic!("expected Unreadable, got {other:?}"),
        }
    }

    #[test]
    fn extraction_maps_to_a_single_user_facing_message() {
        let err = veracity_core::AnalysisError::from(ExtractionError::Empty);
        assert_eq!(err.message, "could not extract any text from the document");
    }
}
