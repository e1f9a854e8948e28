//! # Structured Logging
//!
//! `tracing` subscriber setup for trellis applications, with presets for
//! production (JSON), development (pretty text) and tests (errors only).

use std::io;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::routing::RouteTable;

/// Logging configuration for trellis applications
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "warn")
    pub level: String,
    /// Enable JSON structured logging (vs plain text)
    pub json_format: bool,
    /// Enable pretty printing for development
    pub pretty_print: bool,
    /// Environment filter (e.g. "trellis_http=debug,tower_http=info")
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_print: false,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Create production logging configuration
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            json_format: true,
            pretty_print: false,
            env_filter: Some("info,tower_http=warn,axum=warn".to_string()),
        }
    }

    /// Create development logging configuration
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
            pretty_print: true,
            env_filter: Some("debug,tower_http=debug,axum=info,hyper=info".to_string()),
        }
    }

    /// Create test logging configuration (minimal output)
    pub fn test() -> Self {
        Self {
            level: "error".to_string(),
            json_format: false,
            pretty_print: false,
            env_filter: Some("error".to_string()),
        }
    }

    /// Set environment filter
    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    fn filter_directives(&self) -> &str {
        self.env_filter.as_deref().unwrap_or(&self.level)
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. Installing twice
/// returns an error instead of panicking.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.filter_directives())?,
    };

    if config.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stdout).json())
            .try_init()?;
    } else if config.pretty_print {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stdout).pretty())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stdout))
            .try_init()?;
    }

    tracing::info!(
        level = %config.level,
        format = if config.json_format { "json" } else { "text" },
        "Structured logging initialized"
    );
    Ok(())
}

/// Log the listening confirmation
pub fn log_startup_info(address: &str, routes: usize) {
    tracing::info!(
        framework = trellis_core::FRAMEWORK_NAME,
        version = trellis_core::VERSION,
        pid = std::process::id(),
        routes,
        "Application is listening on {}",
        address
    );
}

/// Log the mounted routes, one `[VERB] path` line each
pub fn log_route_table(routes: &RouteTable) {
    for route in routes.iter() {
        tracing::info!(
            controller = route.controller(),
            handler = route.handler_name(),
            "[{}] {}",
            route.method(),
            route.path()
        );
    }
}

/// Log application shutdown
pub fn log_shutdown_info() {
    tracing::info!(framework = trellis_core::FRAMEWORK_NAME, "Application shut down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(LoggingConfig::production().json_format);
        assert!(LoggingConfig::development().pretty_print);
        assert_eq!(LoggingConfig::test().filter_directives(), "error");
        assert_eq!(LoggingConfig::default().filter_directives(), "info");
        assert_eq!(
            LoggingConfig::default()
                .with_env_filter("trellis_http=trace")
                .filter_directives(),
            "trellis_http=trace"
        );
    }
}
