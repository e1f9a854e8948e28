//! HTTP server configuration
//!
//! Listening address, request limits and the request-matching switches,
//! loaded through the trellis-core configuration trait.

use super::defaults::HttpDefaults;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use trellis_core::config::get_env_or_default;
use trellis_core::{AppConfigTrait, ConfigError, ResolutionPolicy};

/// HTTP server specific configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Interface to bind
    pub host: String,
    /// Port used by the binary entry point
    pub port: u16,
    /// Maximum request body size in bytes
    pub max_request_size: usize,
    /// Per-handler timeout in milliseconds; `None` waits indefinitely
    pub handler_timeout_ms: Option<u64>,
    /// Match routes against the path without its query string
    pub strip_query_string: bool,
    /// Treat `/users/` and `/users` as the same path
    pub normalize_trailing_slash: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
    /// How unresolved constructor dependencies are handled at bootstrap
    pub resolution: ResolutionPolicy,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: HttpDefaults::HOST.to_string(),
            port: HttpDefaults::PORT,
            max_request_size: HttpDefaults::MAX_REQUEST_SIZE,
            handler_timeout_ms: None,
            strip_query_string: HttpDefaults::STRIP_QUERY_STRING,
            normalize_trailing_slash: HttpDefaults::NORMALIZE_TRAILING_SLASH,
            enable_tracing: HttpDefaults::ENABLE_TRACING,
            resolution: ResolutionPolicy::default(),
        }
    }
}

impl AppConfigTrait for HttpConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation_failed("Host must not be empty"));
        }

        if self.max_request_size == 0 {
            return Err(ConfigError::validation_failed(
                "Maximum request size must be greater than 0",
            ));
        }

        if self.handler_timeout_ms == Some(0) {
            return Err(ConfigError::validation_failed(
                "Handler timeout must be greater than 0 when set",
            ));
        }

        Ok(())
    }

    fn from_env() -> Result<Self, ConfigError> {
        let host = get_env_or_default("HTTP_HOST", HttpDefaults::HOST)?;

        let port = parse_env(
            "HTTP_PORT",
            "port",
            &HttpDefaults::PORT.to_string(),
            "valid port number",
        )?;

        let max_request_size = parse_env(
            "HTTP_MAX_REQUEST_SIZE",
            "max_request_size",
            &HttpDefaults::MAX_REQUEST_SIZE.to_string(),
            "valid number of bytes",
        )?;

        let handler_timeout = parse_env::<u64>(
            "HTTP_HANDLER_TIMEOUT_MS",
            "handler_timeout_ms",
            &HttpDefaults::HANDLER_TIMEOUT_MS.to_string(),
            "valid number of milliseconds",
        )?;

        let strip_query_string = parse_env(
            "HTTP_STRIP_QUERY_STRING",
            "strip_query_string",
            &HttpDefaults::STRIP_QUERY_STRING.to_string(),
            "true or false",
        )?;

        let normalize_trailing_slash = parse_env(
            "HTTP_NORMALIZE_TRAILING_SLASH",
            "normalize_trailing_slash",
            &HttpDefaults::NORMALIZE_TRAILING_SLASH.to_string(),
            "true or false",
        )?;

        let enable_tracing = parse_env(
            "HTTP_ENABLE_TRACING",
            "enable_tracing",
            &HttpDefaults::ENABLE_TRACING.to_string(),
            "true or false",
        )?;

        let resolution =
            get_env_or_default("HTTP_RESOLUTION", "lenient")?.parse::<ResolutionPolicy>()?;

        let config = HttpConfig {
            host,
            port,
            max_request_size,
            handler_timeout_ms: (handler_timeout > 0).then_some(handler_timeout),
            strip_query_string,
            normalize_trailing_slash,
            enable_tracing,
            resolution,
        };
        config.validate()?;
        Ok(config)
    }
}

impl HttpConfig {
    /// Get the handler timeout as Duration
    pub fn handler_timeout(&self) -> Option<Duration> {
        self.handler_timeout_ms.map(Duration::from_millis)
    }

    /// `host:port` for the given port
    pub fn bind_address(&self, port: u16) -> String {
        format!("{}:{}", self.host, port)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_max_request_size(mut self, bytes: usize) -> Self {
        self.max_request_size = bytes;
        self
    }

    pub fn with_strip_query_string(mut self, enabled: bool) -> Self {
        self.strip_query_string = enabled;
        self
    }

    pub fn with_normalize_trailing_slash(mut self, enabled: bool) -> Self {
        self.normalize_trailing_slash = enabled;
        self
    }

    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }

    pub fn with_resolution(mut self, resolution: ResolutionPolicy) -> Self {
        self.resolution = resolution;
        self
    }
}

fn parse_env<T: FromStr>(
    key: &str,
    field: &str,
    default: &str,
    expected: &str,
) -> Result<T, ConfigError> {
    get_env_or_default(key, default)?
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidValue {
            field: field.to_string(),
            value: env::var(key).unwrap_or_default(),
            expected: expected.to_string(),
        })
}
