use thiserror::Error;
use trellis_core::{ConfigError, CoreError};

/// Errors raised while turning a module into a running application
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
}

impl BootstrapError {
    /// Check if the error comes from dependency resolution
    pub fn is_resolution(&self) -> bool {
        matches!(self, BootstrapError::Core(error) if error.is_resolution())
    }
}

pub type BootstrapResult<T> = Result<T, BootstrapError>;
