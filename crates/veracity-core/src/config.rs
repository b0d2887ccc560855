use std::time::Duration;

/// Default scoring endpoint for local development.
pub const DEFAULT_SCORING_URL: &str = "http://127.0.0.1:9090/process";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Runtime configuration, sourced from environment variables with
/// sensible defaults. Binaries call `dotenvy::dotenv()` before this so a
/// local `.env` file works too.
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the scoring service's POST endpoint.
    pub scoring_url: String,
    /// Timeout applied to the single scoring request. Expiry fails the
    /// attempt; nothing is retried.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring_url: DEFAULT_SCORING_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Build a config from `VERACITY_SCORING_URL` and
    /// `VERACITY_TIMEOUT_SECS`, falling back to defaults for anything
    /// unset or unparseable.
    pub fn from_env() -> Self {
        let scoring_url = std::env::var("VERACITY_SCORING_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SCORING_URL.to_string());

        let timeout_secs = std::env::var("VERACITY_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            scoring_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn with_scoring_url(mut self, url: impl Into<String>) -> Self {
        self.scoring_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
