use tracing::debug;

use crate::{AnalysisError, NormalizedReport, SelectedDocument};

/// Where the current analysis attempt is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// No attempt running. A document may or may not be selected.
    Idle,
    Extracting,
    Submitting,
    /// Terminal for the attempt; replaced wholesale by the next one.
    Result(NormalizedReport),
    /// Terminal for the attempt.
    Failed(AnalysisError),
}

/// Token identifying one analyze invocation.
///
/// Stage completions carry their token back; a completion whose
/// generation no longer matches the session's is stale and is discarded
/// instead of overwriting a newer attempt's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt(u64);

/// The state machine behind the report view.
///
/// Idle → Extracting → Submitting → Result | Failed. This is the only
/// shared mutable piece of the pipeline; every write goes through a
/// transition below, and every attempt-scoped transition checks its
/// [`Attempt`] token first. A second analyze trigger while an attempt is
/// running is a no-op — the one policy applied everywhere.
#[derive(Debug)]
pub struct AnalysisSession {
    phase: Phase,
    generation: u64,
    document: Option<SelectedDocument>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            generation: 0,
            document: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn document(&self) -> Option<&SelectedDocument> {
        self.document.as_ref()
    }

    /// True while an attempt is between `begin` and its terminal phase.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Extracting | Phase::Submitting)
    }

    /// Replace the pending document.
    ///
    /// Allowed while `Idle` and from the terminal phases (where it also
    /// resets the view to `Idle`, discarding the old report or error).
    /// Refused while an attempt is running.
    pub fn select_document(&mut self, document: SelectedDocument) -> bool {
        if self.is_busy() {
            return false;
        }
        debug!(name = %document.name, "document selected");
        self.document = Some(document);
        self.phase = Phase::Idle;
        true
    }

    /// Start a new analysis attempt.
    ///
    /// Requires a selected document. From `Idle`, `Result`, or `Failed`
    /// this moves to `Extracting`, bumps the generation, and hands back
    /// the attempt token plus a copy of the document to analyze. While
    /// an attempt is already running this is a no-op and returns `None`.
    pub fn begin(&mut self) -> Option<(Attempt, SelectedDocument)> {
        if self.is_busy() {
            return None;
        }
        let document = self.document.clone()?;
        self.generation += 1;
        self.phase = Phase::Extracting;
        debug!(generation = self.generation, name = %document.name, "analysis started");
        Some((Attempt(self.generation), document))
    }

    /// Extraction succeeded with non-empty text; move to `Submitting`.
    pub fn advance_to_submitting(&mut self, attempt: Attempt) -> bool {
        if !self.is_current(attempt) || self.phase != Phase::Extracting {
            return false;
        }
        self.phase = Phase::Submitting;
        true
    }

    /// Normalization succeeded; publish the report.
    pub fn complete(&mut self, attempt: Attempt, report: NormalizedReport) -> bool {
        if !self.is_current(attempt) || self.phase != Phase::Submitting {
            debug!(?attempt, "discarding stale or out-of-phase result");
            return false;
        }
        self.phase = Phase::Result(report);
        true
    }

    /// Any stage failed; publish the error.
    pub fn fail(&mut self, attempt: Attempt, error: AnalysisError) -> bool {
        if !self.is_current(attempt) || !self.is_busy() {
            debug!(?attempt, "discarding stale or out-of-phase failure");
            return false;
        }
        self.phase = Phase::Failed(error);
        true
    }

    fn is_current(&self, attempt: Attempt) -> bool {
        attempt.0 == self.generation
    }
}
