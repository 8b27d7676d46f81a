// ── Core error types ──
//
// `FetchError` is the product-source failure taxonomy. It never escapes the
// product store: `ProductStore::load` turns every variant into the fallback
// path and only reports it through `CatalogOrigin`. `CoreError` covers the
// few operations that can genuinely fail for a caller.

use std::time::Duration;

use thiserror::Error;

use crate::model::ProductId;

/// Why a product source could not deliver a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The source could not be reached (DNS, refused connection, TLS, ...).
    #[error("catalog source unreachable: {reason}")]
    Transport { reason: String },

    /// The source did not answer within the fetch timeout.
    #[error("catalog fetch timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// The source answered with a non-success HTTP status.
    #[error("catalog source returned HTTP {status}")]
    Status { status: u16 },

    /// The response was not a well-formed, non-empty product list.
    #[error("malformed catalog payload: {message}")]
    Payload { message: String },

    /// The store was configured not to contact the source at all.
    #[error("offline mode: catalog source not contacted")]
    Offline,
}

impl FetchError {
    pub(crate) fn payload(message: impl Into<String>) -> Self {
        Self::Payload {
            message: message.into(),
        }
    }
}

impl From<vitrine_api::Error> for FetchError {
    fn from(err: vitrine_api::Error) -> Self {
        match err {
            // The limit is unknown here, so there is no duration to report.
            vitrine_api::Error::Transport(ref e) if e.is_timeout() => FetchError::Transport {
                reason: format!("request timed out: {e}"),
            },
            vitrine_api::Error::Transport(e) => FetchError::Transport {
                reason: e.to_string(),
            },
            vitrine_api::Error::InvalidUrl(e) => FetchError::Transport {
                reason: format!("invalid URL: {e}"),
            },
            vitrine_api::Error::ClientBuild(reason) => FetchError::Transport { reason },
            vitrine_api::Error::Timeout { timeout } => FetchError::Timeout { timeout },
            vitrine_api::Error::Status { status, body: _ } => FetchError::Status { status },
            vitrine_api::Error::Payload { message, body: _ } => FetchError::Payload { message },
            vitrine_api::Error::EmptyCatalog => FetchError::payload("catalog is empty"),
        }
    }
}

/// Unified error type for caller-facing core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Product not found: {id}")]
    ProductNotFound { id: ProductId },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },
}

impl From<vitrine_api::Error> for CoreError {
    fn from(err: vitrine_api::Error) -> Self {
        match err {
            vitrine_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            other => CoreError::Api {
                status: other.status(),
                message: other.to_string(),
            },
        }
    }
}
