//! Error types for the catalog client and session.
//!
//! # Design
//! Callers mostly need to know one thing: did the network fail, or did the
//! payload not match the schema? `CatalogError::kind` answers that. The
//! individual variants keep enough detail (status code, body, timeout) to
//! log or display a useful message.

use std::time::Duration;

use thiserror::Error;

/// Errors returned by `CatalogClient` and `CatalogSession`.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("network error: {reason}")]
    Network { reason: String },

    /// The server answered with something other than 200.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The fetch did not complete within the configured timeout.
    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },

    /// The caller cancelled the fetch before it completed.
    #[error("request cancelled")]
    Cancelled,

    /// The response body could not be decoded into the film schema.
    #[error("decode failed: {reason}")]
    Decode { reason: String },

    /// A favorite was requested for an id that is not in the held catalog.
    #[error("unknown film id: {id}")]
    UnknownFilm { id: String },
}

/// Coarse classification of a `CatalogError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport, status, timeout or cancellation failure.
    Network,
    /// Schema mismatch or malformed payload.
    Decode,
    /// The caller passed an argument the session cannot act on.
    Usage,
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Network { .. }
            | CatalogError::Status { .. }
            | CatalogError::Timeout { .. }
            | CatalogError::Cancelled => ErrorKind::Network,
            CatalogError::Decode { .. } => ErrorKind::Decode,
            CatalogError::UnknownFilm { .. } => ErrorKind::Usage,
        }
    }

    #[cfg(any(feature = "reqwest", test))]
    pub(crate) fn network(err: impl std::fmt::Display) -> Self {
        CatalogError::Network {
            reason: err.to_string(),
        }
    }

    pub(crate) fn decode(err: impl std::fmt::Display) -> Self {
        CatalogError::Decode {
            reason: err.to_string(),
        }
    }
}
