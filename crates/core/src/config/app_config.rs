use std::env;

use crate::config::ConfigError;

/// Configuration loaded from the process environment
pub trait AppConfigTrait: Sized {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self, ConfigError>;

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Read `key`, falling back to `default` when unset.
/// A value that is not valid unicode is an error rather than a silent default.
pub fn get_env_or_default(key: &str, default: &str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(value),
        Err(env::VarError::NotPresent) => Ok(default.to_string()),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::environment_error(format!(
            "{} contains invalid unicode",
            key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_value_overrides_default() {
        env::set_var("TRELLIS_TEST_VALUE", "from-env");
        assert_eq!(get_env_or_default("TRELLIS_TEST_VALUE", "fallback").unwrap(), "from-env");

        env::remove_var("TRELLIS_TEST_VALUE");
        assert_eq!(get_env_or_default("TRELLIS_TEST_VALUE", "fallback").unwrap(), "fallback");
    }
}
