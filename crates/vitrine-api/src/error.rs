use std::time::Duration;

use thiserror::Error;

/// Top-level error type for the `vitrine-api` crate.
///
/// Covers every way a catalog request can fail: reaching the endpoint,
/// the HTTP status, and the shape of the JSON body. `vitrine-core` maps
/// these into its fetch taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request exceeded the configured transport timeout.
    #[error("Request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Status ──────────────────────────────────────────────────────
    /// Non-success HTTP status, with a preview of the response body.
    #[error("Catalog endpoint returned HTTP {status}")]
    Status { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// The body was not a JSON array of product records.
    #[error("Malformed catalog payload: {message}")]
    Payload { message: String, body: String },

    /// The body was a valid, but empty, array.
    #[error("Catalog endpoint returned no products")]
    EmptyCatalog,
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// HTTP status code, when the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Status {
            status: 503,
            body: String::new(),
        };
        assert!(err.is_transient());
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn client_errors_are_not_transient() {
        let err = Error::Status {
            status: 404,
            body: String::new(),
        };
        assert!(!err.is_transient());
        assert!(!Error::EmptyCatalog.is_transient());
    }

    #[test]
    fn timeouts_are_transient() {
        assert!(
            Error::Timeout {
                timeout: Duration::from_secs(5)
            }
            .is_transient()
        );
    }
}
