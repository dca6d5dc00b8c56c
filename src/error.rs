use thiserror::Error;
use tracing::{error, warn};

/// Failures of a single metadata lookup. None of these reach the card; the
/// resolver turns every one of them into a fallback preview.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Metadata request failed: {0}")]
    Network(String),

    #[error("Metadata request timed out: {0}")]
    Timeout(String),

    #[error("Metadata service returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Failed to parse metadata response: {0}")]
    Parse(String),

    #[error("Invalid metadata endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl ResolveError {
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ResolveError::Timeout(e.to_string())
        } else if let Some(status) = e.status() {
            ResolveError::Http {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else if e.is_decode() {
            ResolveError::Parse(e.to_string())
        } else {
            ResolveError::Network(e.to_string())
        }
    }

    pub fn log(&self, url: &str) {
        match self {
            ResolveError::Network(e) => {
                warn!(url = %url, error = %e, "Metadata request failed");
            }
            ResolveError::Timeout(e) => {
                warn!(url = %url, error = %e, "Metadata request timed out");
            }
            ResolveError::Http { status, message } => {
                warn!(
                    url = %url,
                    status = %status,
                    error = %message,
                    "Metadata service returned an error status"
                );
            }
            ResolveError::Parse(e) => {
                warn!(url = %url, error = %e, "Metadata response could not be parsed");
            }
            ResolveError::InvalidEndpoint(e) => {
                error!(url = %url, error = %e, "Metadata endpoint is misconfigured");
            }
        }
    }
}
