//! Error types for the school API client.
//!
//! # Design
//! Validation failures get their own variant because they are raised before
//! any request exists and are shown verbatim. Every other failure (status,
//! transport, JSON) renders behind an `Erro: ` prefix at the display layer.

use thiserror::Error;

/// Errors produced while building, executing or parsing an API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A required input was empty; no request was built.
    #[error("{0}")]
    Validation(String),

    /// The server answered with a non-2xx status.
    #[error("Erro {status}: {status_text}")]
    Status { status: u16, status_text: String },

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("{0}")]
    Transport(String),

    /// A 2xx response body was not valid JSON.
    #[error("invalid JSON in response: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("could not serialize request: {0}")]
    Serialization(String),
}
