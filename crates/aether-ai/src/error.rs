use thiserror::Error;

/// Failure talking to the generative backend. Never retried.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by backend: {body}")]
    RateLimited { body: String },

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("backend response contained no message content")]
    EmptyResponse,
}

/// No JSON object could be recovered from the backend's text.
#[derive(Debug, Error)]
#[error("could not parse JSON from response: {preview}...")]
pub struct ParseError {
    /// At most the first 200 characters of the raw text.
    pub preview: String,
}

/// Everything that can push a formulation request onto the fallback path.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generative backend not configured")]
    NotConfigured,

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{stage} response has mistyped fields: {source}")]
    Decode {
        stage: &'static str,
        source: serde_json::Error,
    },
}

impl GenerationError {
    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotConfigured => "not_configured",
            Self::Backend(BackendError::RateLimited { .. }) => "rate_limited",
            Self::Backend(_) => "backend",
            Self::Parse(_) => "parse",
            Self::Decode { .. } => "decode",
        }
    }
}
