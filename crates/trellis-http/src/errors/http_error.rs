//! HTTP server error types
//!
//! Failures of the serving surface: bootstrapping the application, binding
//! the listener and running the accept loop. Failures of a single request
//! never surface here; the dispatcher turns them into responses.

use crate::bootstrap::BootstrapError;
use thiserror::Error;

/// Result type for HTTP operations
pub type HttpResult<T> = Result<T, HttpError>;

/// HTTP server errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Server startup failed: {message}")]
    StartupFailed { message: String },

    #[error("Bootstrap failed: {0}")]
    Bootstrap(#[from] BootstrapError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HttpError {
    /// Create a startup error
    pub fn startup<T: Into<String>>(message: T) -> Self {
        HttpError::StartupFailed {
            message: message.into(),
        }
    }
}
