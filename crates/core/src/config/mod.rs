pub mod app_config;
pub mod validation;

pub use app_config::{get_env_or_default, AppConfigTrait};
pub use validation::ConfigError;
