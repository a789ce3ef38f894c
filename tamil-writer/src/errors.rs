use crate::completion::GenerationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

/// Warning shown when the title or description is left blank
pub const MISSING_FIELDS_WARNING: &str = "தயவு செய்து தலைப்பு மற்றும் விளக்கத்தை உள்ளிடவும்!";

#[derive(ThisError, Debug)]
pub enum Error {
    /// Rejected user input; no completion was attempted
    #[error("{message}")]
    Validation { message: String },

    /// The completion service failed for this request
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Page or document template failed to render
    #[error("Template rendering failed: {0}")]
    Template(#[from] minijinja::Error),

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation { message: message.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::Generation(GenerationError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            Error::Generation(_) => StatusCode::BAD_GATEWAY,
            Error::Template(_) | Error::Internal { .. } | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation { message } => message.clone(),
            // The underlying cause is shown so the user can decide whether to resubmit
            Error::Generation(e) => format!("பிழை: {e}"),
            Error::Template(_) | Error::Internal { .. } | Error::Other(_) => "Internal server error".to_string(),
        }
    }

    /// Log at a level matching who is at fault
    pub fn log(&self) {
        match self {
            Error::Template(_) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Generation(_) => {
                tracing::warn!("Generation failed: {}", self);
            }
            Error::Validation { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.log();
        (self.status_code(), self.user_message()).into_response()
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;
