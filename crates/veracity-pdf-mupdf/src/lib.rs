use mupdf::{Document, TextPageFlags};

use veracity_core::{BackendError, DocumentBackend};

/// MuPDF-based implementation of [`DocumentBackend`].
///
/// This crate is the sole AGPL island — it isolates the mupdf dependency
/// (which is AGPL-3.0) so that non-PDF code paths do not transitively
/// depend on it.
///
/// Pages are visited in increasing order and each page's lines are
/// joined with single spaces, so the extractor sees one flat text item
/// stream per page. Uploaded resumes arrive as in-memory bytes, so the
/// document is opened from a byte slice rather than a path.
#[derive(Debug, Default, Clone, Copy)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentBackend for MupdfBackend {
    fn page_texts(&self, data: &[u8]) -> Result<Vec<String>, BackendError> {
        let document =
            Document::from_bytes(data, "pdf").map_err(|e| BackendError::OpenError(e.to_string()))?;

        let mut pages_text = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            let mut items: Vec<String> = Vec::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    let line_text = line_text.trim();
                    if !line_text.is_empty() {
                        items.push(line_text.to_string());
                    }
                }
            }
            pages_text.push(items.join(" "));
        }

        Ok(pages_text)
    }
}
