//! API error types

use thiserror::Error;

use crate::models::PayloadError;

/// Failure talking to the remote API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    /// The server answered with `success: false`
    #[error("{message}")]
    Rejected {
        message: String,
        status: Option<u16>,
        errors: Vec<String>,
    },

    #[error("Failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{entity} with id {id} not found")]
    NotFound { entity: String, id: String },

    #[error("Invalid record: {0}")]
    Payload(#[from] PayloadError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    UnexpectedResponse(String),

    #[error("Request failed after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        source: Box<ApiError>,
    },
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP status attached to the failure, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Rejected { status, .. } => *status,
            ApiError::Exhausted { source, .. } => source.status_code(),
            _ => None,
        }
    }

    /// Whether sending the same request again may succeed: server errors and
    /// network failures are retryable, client errors are not
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(e) => match e.status() {
                Some(status) => status.is_server_error(),
                None => !e.is_builder(),
            },
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Extra error strings the server sent with a rejection
    pub fn errors(&self) -> &[String] {
        match self {
            ApiError::Rejected { errors, .. } => errors,
            ApiError::Exhausted { source, .. } => source.errors(),
            _ => &[],
        }
    }
}
