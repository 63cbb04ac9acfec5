//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the screen distinguishes "the
//! item is gone" from "the server returned an unexpected status." Every other
//! non-2xx response lands in `Server` with the raw status and body.
//! `Validation` is raised locally, before any request is built.

use thiserror::Error;

/// Errors returned by `TodoClient`, `TodoScreen` and transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected locally; no request was issued.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The server returned 404: the todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// HTTP status associated with the error, if one was received.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}
