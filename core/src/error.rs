//! Error types for the inventory API client.
//!
//! `NotFound` and `Rejected` get dedicated variants because callers act on
//! them: a stale id or a message to show the user. Anything else the server
//! answers lands in `HttpError` with the raw status and body.

use thiserror::Error;

/// Errors returned by `InventoryClient` parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: no product with that id.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400 with a message meant for the user, such as
    /// `Nome inválido`.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The server returned any other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
