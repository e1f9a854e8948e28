use thiserror::Error;

/// Core error type for the trellis framework
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unresolved dependency for '{component}' at position {position}: {dependency}")]
    UnresolvedDependency {
        component: String,
        position: usize,
        dependency: String,
    },

    #[error("Component '{component}' is registered as a provider but is not marked injectable")]
    NotInjectable { component: String },

    #[error("Failed to construct '{component}': {message}")]
    Construction { component: String, message: String },
}

impl CoreError {
    /// Create a new unresolved dependency error
    pub fn unresolved_dependency(
        component: impl Into<String>,
        position: usize,
        dependency: impl Into<String>,
    ) -> Self {
        Self::UnresolvedDependency {
            component: component.into(),
            position,
            dependency: dependency.into(),
        }
    }

    /// Create a new not-injectable error
    pub fn not_injectable(component: impl Into<String>) -> Self {
        Self::NotInjectable {
            component: component.into(),
        }
    }

    /// Create a new construction error
    pub fn construction(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Construction {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Attribute a failed constructor to `component`. Resolution failures
    /// already name their component and pass through unchanged.
    pub fn in_construction_of(self, component: &str) -> Self {
        match self {
            error @ (Self::UnresolvedDependency { .. }
            | Self::NotInjectable { .. }
            | Self::Construction { .. }) => error,
            error => Self::construction(component, error.to_string()),
        }
    }

    /// Check if the error comes from dependency resolution
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedDependency { .. } | Self::NotInjectable { .. }
        )
    }
}

/// Failure raised by a controller method while handling a request
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    Internal { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HandlerError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the failure is attributable to the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::BadRequest { .. })
    }
}

impl From<CoreError> for HandlerError {
    fn from(error: CoreError) -> Self {
        Self::internal(error.to_string())
    }
}
