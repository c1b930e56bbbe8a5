//! Error types for the library API client.
//!
//! # Design
//! Every non-2xx response lands in `Http` with nothing but the status code;
//! error bodies are never read. The remaining variants cover failures that
//! happen before or after an HTTP exchange.

use thiserror::Error;

/// Errors returned by `ApiClient` and `Transport` implementations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside 200..=299.
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// The request never produced a response (connection refused, DNS, TLS).
    #[error("transport failed: {0}")]
    Transport(String),

    /// A successful response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A write payload could not be form-encoded.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The HTTP status carried by `Http`, `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status } => Some(*status),
            _ => None,
        }
    }
}
