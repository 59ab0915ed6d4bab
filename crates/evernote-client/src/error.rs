//! Error surface of the client.

use evernote_core::content::ContentError;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors returned by client operations.
///
/// Precondition failures are detected before any request is built or sent.
/// Every other variant surfaces a remote failure unchanged; the client does
/// not retry and does not distinguish transient from permanent failures.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required argument was empty or absent.
    #[error("missing required argument: {0}")]
    Precondition(&'static str),

    /// The service answered with a non-success status.
    #[error("service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// The request never completed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The credential endpoint answered something unparseable.
    #[error("malformed credential response: {0}")]
    Credentials(String),

    /// The note-content builder rejected the draft.
    #[error(transparent)]
    Content(#[from] ContentError),
}
