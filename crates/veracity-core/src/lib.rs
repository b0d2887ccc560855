use serde::Serialize;

pub mod backend;
pub mod client;
pub mod config;
pub mod normalize;
pub mod session;

// Re-export for convenience
pub use backend::{BackendError, DocumentBackend};
pub use client::{RequestError, ScoringClient};
pub use config::Config;
pub use normalize::{NormalizeError, normalize};
pub use session::{AnalysisSession, Attempt, Phase};

/// A document picked by the user: the raw bytes plus a display name.
///
/// Owned by the UI session from selection until it is replaced or an
/// analysis attempt starts. Never mutated by the pipeline.
#[derive(Debug, Clone)]
pub struct SelectedDocument {
    pub name: String,
    pub data: Vec<u8>,
}

/// The request body sent to the scoring service.
///
/// Constructed once per analysis attempt; the text is the sole payload
/// field.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringRequest {
    #[serde(rename = "resumeText")]
    pub resume_text: String,
}

/// The canonical report, regardless of which raw response shape the
/// scoring service returned.
///
/// `red_flags` and `recommendations` are flat, ordered lists of plain
/// findings with the leading bullet glyph already stripped. Markdown
/// emphasis inside a finding is left intact for rich rendering. A report
/// is derived fresh per attempt and replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedReport {
    /// Risk score as reported by the service, nominally 0–100. Not
    /// clamped here: out-of-range values pass through to the renderer.
    pub risk_score: f64,
    pub red_flags: Vec<String>,
    pub recommendations: Vec<String>,
}

/// A single user-facing failure message for the current attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisError {
    pub message: String,
}

impl AnalysisError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<RequestError> for AnalysisError {
    fn from(err: RequestError) -> Self {
        AnalysisError::new(err.to_string())
    }
}

impl From<NormalizeError> for AnalysisError {
    fn from(err: NormalizeError) -> Self {
        AnalysisError::new(err.to_string())
    }
}
