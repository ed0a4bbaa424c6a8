use thiserror::Error;

/// API-specific errors for secom-api
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Core domain error: {0}")]
    Core(#[from] secom_core::CoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Not found (404): {message}")]
    NotFound { message: String },

    #[error("HTTP error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request error: {0}")]
    Request(reqwest::Error),

    #[error("Response decode error: {0}")]
    Decode(reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HttpError {
    /// Status code carried by this error, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::NotFound { .. } => Some(404),
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
