use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::{Config, ScoringRequest};

#[derive(Error, Debug)]
pub enum RequestError {
    /// DNS, connection, or timeout failure before a status was received.
    #[error("could not reach the scoring service: {0}")]
    Network(#[source] reqwest::Error),
    /// Non-2xx status. The message prefers a server-provided
    /// `{"error": ...}` string over the generic fallback.
    #[error("{message}")]
    Http { status: u16, message: String },
    /// 2xx response whose body was not valid JSON.
    #[error("scoring service returned an unreadable response")]
    MalformedResponse,
}

/// Client for the scoring service.
///
/// One POST per analysis attempt, blocking the caller until the complete
/// response (or failure) arrives. No retries, no backoff, no
/// cancellation — a second attempt requires the user to re-trigger the
/// analysis.
pub struct ScoringClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ScoringClient {
    pub fn new(config: &Config) -> Result<Self, RequestError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RequestError::Network)?;
        Ok(Self {
            http,
            endpoint: config.scoring_url.clone(),
        })
    }

    /// Submit extracted resume text and return the raw JSON body.
    ///
    /// The body is passed through unvalidated; shape validation is the
    /// normalizer's job.
    pub async fn submit(&self, resume_text: &str) -> Result<Value, RequestError> {
        debug!(endpoint = %self.endpoint, chars = resume_text.len(), "submitting resume text");

        let request = ScoringRequest {
            resume_text: resume_text.to_string(),
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(RequestError::Network)?;

        let status = resp.status();
        if !status.is_success() {
            let message = error_message(resp).await.unwrap_or_else(|| {
                format!("scoring service returned HTTP {}", status.as_u16())
            });
            return Err(RequestError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await.map_err(RequestError::Network)?;
        serde_json::from_str(&body).map_err(|_| RequestError::MalformedResponse)
    }
}

/// Pull the server-provided `{"error": ...}` string out of a failure
/// body, if there is one. Non-JSON and empty bodies yield `None`.
async fn error_message(resp: reqwest::Response) -> Option<String> {
    let body: Value = resp.json().await.ok()?;
    body.get("error")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
