use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// What the container does with a constructor dependency it cannot satisfy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionPolicy {
    /// Pass an absent argument and let the component decide
    #[default]
    Lenient,
    /// Fail bootstrap; providers must also carry the injectable marker
    Strict,
}

impl ResolutionPolicy {
    pub fn is_strict(&self) -> bool {
        matches!(self, ResolutionPolicy::Strict)
    }
}

impl FromStr for ResolutionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(ResolutionPolicy::Lenient),
            "strict" => Ok(ResolutionPolicy::Strict),
            _ => Err(ConfigError::invalid_value("resolution", s, "lenient or strict")),
        }
    }
}

impl fmt::Display for ResolutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionPolicy::Lenient => f.write_str("lenient"),
            ResolutionPolicy::Strict => f.write_str("strict"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!("Strict".parse::<ResolutionPolicy>().unwrap(), ResolutionPolicy::Strict);
        assert_eq!(ResolutionPolicy::default(), ResolutionPolicy::Lenient);
        assert!(matches!(
            "eager".parse::<ResolutionPolicy>(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
