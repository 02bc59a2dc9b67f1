//! Error types for the record API boundary and the reconciliation core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure shapes produced by a record API client.
///
/// A closed set of tagged variants, so retry classification is a match on
/// the variant rather than a runtime inspection of the error's concrete
/// type. All variants are serializable for structured error reporting.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ApiError {
    /// The API itself answered with a non-success status payload.
    ///
    /// The request reached the API and was rejected; retrying cannot help.
    #[error("API status {status}: {message}")]
    Status {
        /// Status discriminant reported by the API (e.g. `"ERROR"`).
        status: String,
        /// Error message reported alongside the status.
        message: String,
    },

    /// The HTTP layer answered with a server fault code.
    ///
    /// The record API reports rate limiting as a plain 503, which is the
    /// one fault code retried by default.
    #[error("HTTP {code}: {message}")]
    ServerFault {
        /// Numeric HTTP status code.
        code: u16,
        /// Response body (truncated) or transport detail.
        message: String,
    },

    /// Transport-level failure: connect, timeout, body read, or an
    /// undecodable response.
    #[error("transport error: {detail}")]
    Transport {
        /// Error details.
        detail: String,
    },
}

/// Convenience alias for results at the record API boundary.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Terminal outcomes of the retry executor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetryError {
    /// The failure was classified terminal; no further attempts were made.
    #[error("cannot be retried: {0}")]
    Terminal(ApiError),

    /// Every configured attempt failed.
    #[error("after {attempts} attempts, last error: {last}")]
    Exhausted {
        /// Number of attempts performed.
        attempts: u32,
        /// The failure observed on the final attempt.
        last: ApiError,
    },

    /// The cancellation token fired during a backoff wait or an attempt.
    #[error("operation cancelled")]
    Cancelled,
}

/// Errors raised by the record reconciler before or after API calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// The stored identifier is not a decimal integer. No API call is
    /// attempted for the operation.
    #[error("record id '{id}' is not numeric: {detail}")]
    InvalidRecordId {
        /// The offending identifier as stored.
        id: String,
        /// Rendered parse failure.
        detail: String,
    },

    /// Update and Delete require an assigned identifier.
    #[error("record has no assigned id")]
    MissingId,

    /// The underlying API call failed through the retry executor.
    #[error(transparent)]
    Retry(#[from] RetryError),
}

impl ReconcileError {
    /// Whether the error comes from operator input rather than the remote
    /// API. Input errors are logged at `warn`, API failures at `error`.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidRecordId { .. } | Self::MissingId)
    }
}

/// Validation error for record API key material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// A required credential field is missing entirely.
    #[error("missing credential field: {0}")]
    Missing(&'static str),

    /// A credential field is present but empty or whitespace-only.
    #[error("credential field must not be empty: {0}")]
    Empty(&'static str),
}
