//! Error types.

use thiserror::Error;

/// Crate result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by credential resolution and transport dispatch.
///
/// These never cross the public operation boundary directly; the gateway
/// folds them into a fault envelope before returning.
#[derive(Debug, Error)]
pub enum Error {
    /// The session carries no token at all.
    #[error("no session token present")]
    MissingToken,

    /// The session token is malformed, expired, or failed verification.
    /// Carries the verifier's message verbatim; it becomes the fault
    /// envelope message unchanged.
    #[error("{0}")]
    InvalidToken(String),

    /// Transport failure reported by a non-reqwest transport (mocks,
    /// alternative backends). Rendered verbatim, like [`Error::InvalidToken`].
    #[error("{0}")]
    Transport(String),

    /// An error occurred while performing HTTP requests.
    #[cfg(feature = "transport-reqwest")]
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// JSON encoding/decoding error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
