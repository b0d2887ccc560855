use std::sync::Mutex;

use veracity_core::{AnalysisSession, ScoringClient};
use veracity_pdf::TextExtractor;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub extractor: TextExtractor,
    pub client: ScoringClient,
    /// The one shared mutable resource of the pipeline. All writes go
    /// through generation-checked transitions; handlers never hold the
    /// lock across an await point.
    pub session: Mutex<AnalysisSession>,
}

impl AppState {
    pub fn new(extractor: TextExtractor, client: ScoringClient) -> Self {
        Self {
            extractor,
            client,
            session: Mutex::new(AnalysisSession::new()),
        }
    }
}
