use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

use veracity_core::{AnalysisError, SelectedDocument, normalize};
use veracity_pdf::TextExtractor;

use crate::models::{ErrorJson, ReportJson};
use crate::state::AppState;
use crate::upload;

/// Run one analysis attempt: extract → submit → normalize, strictly
/// sequential. The session transitions are the only shared-state writes
/// and each carries the attempt token, so a superseded attempt can never
/// overwrite a newer one.
pub async fn analyze(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    let document = match upload::parse_multipart(multipart).await {
        Ok(document) => document,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
    };

    // Select and begin under one lock so two concurrent uploads cannot
    // interleave between the two steps.
    let (attempt, document) = {
        let mut session = state.session.lock().unwrap_or_else(|e| e.into_inner());
        if !session.select_document(document) {
            return busy_response();
        }
        match session.begin() {
            Some(started) => started,
            None => return busy_response(),
        }
    };

    info!(name = %document.name, bytes = document.data.len(), "analyzing uploaded resume");
    let document_name = document.name.clone();

    let text = match extract_blocking(state.extractor.clone(), document).await {
        Ok(text) => text,
        Err(error) => {
            warn!(name = %document_name, %error, "extraction failed");
            fail(&state, attempt, error.clone());
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, error.message);
        }
    };

    state
        .session
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .advance_to_submitting(attempt);

    let raw = match state.client.submit(&text).await {
        Ok(raw) => raw,
        Err(err) => {
            warn!(%err, "scoring request failed");
            let error = AnalysisError::from(err);
            fail(&state, attempt, error.clone());
            return error_response(StatusCode::BAD_GATEWAY, error.message);
        }
    };

    let report = match normalize(&raw) {
        Ok(report) => report,
        Err(err) => {
            warn!(%err, "scoring response failed normalization");
            let error = AnalysisError::from(err);
            fail(&state, attempt, error.clone());
            return error_response(StatusCode::BAD_GATEWAY, error.message);
        }
    };

    let json = ReportJson::from(&report);
    state
        .session
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .complete(attempt, report);

    Json(json).into_response()
}

/// Extract the document's text using blocking I/O (MuPDF is not async).
async fn extract_blocking(
    extractor: TextExtractor,
    document: SelectedDocument,
) -> Result<String, AnalysisError> {
    tokio::task::spawn_blocking(move || {
        extractor
            .extract(&document)
            .map_err(AnalysisError::from)
    })
    .await
    .map_err(|e| AnalysisError::new(format!("extraction task error: {}", e)))?
}

fn fail(state: &AppState, attempt: veracity_core::Attempt, error: AnalysisError) {
    state
        .session
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .fail(attempt, error);
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorJson { error })).into_response()
}

fn busy_response() -> Response {
    error_response(
        StatusCode::CONFLICT,
        "An analysis is already in progress".to_string(),
    )
}
