use std::env;
use std::error;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const RATE_LIMIT_VAR: &str = "MAPS_RATE_LIMIT_PER_MINUTE";
pub const PROXY_VAR: &str = "MAPS_PROXY";
pub const TIMEOUT_VAR: &str = "MAPS_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub enum ConfigError {
    /// The named setting is required but absent.
    ConfigurationMissing(&'static str),
    InvalidValue { name: &'static str, value: String },
    /// The HTTP client could not be built from the settings.
    ClientSetup(String),
}

impl error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::ConfigurationMissing(name) => {
                write!(f, "Missing configuration: {} is not set.", name)
            }
            ConfigError::InvalidValue { name, value } => {
                write!(f, "Invalid value for {}: '{}'", name, value)
            }
            ConfigError::ClientSetup(why) => write!(f, "Could not set up the maps client: {}", why),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsApiCredentials {
    pub api_key: String,
    pub rate_limit_per_minute: Option<u64>,
    pub proxy: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl MapsApiCredentials {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            rate_limit_per_minute: None,
            proxy: None,
            timeout_secs: None,
        }
    }

    pub fn env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the settings through `lookup`, so that the environment is not the
    /// only possible source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::ConfigurationMissing(API_KEY_VAR))?;

        Ok(Self {
            api_key,
            rate_limit_per_minute: parse_optional(&lookup, RATE_LIMIT_VAR)?,
            proxy: lookup(PROXY_VAR),
            timeout_secs: parse_optional(&lookup, TIMEOUT_VAR)?,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

fn parse_optional<F>(lookup: &F, name: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(
        vars: &[(&'static str, &'static str)],
    ) -> impl Fn(&'static str) -> Option<String> {
        let vars: HashMap<_, _> = vars.iter().cloned().collect();
        move |name| vars.get(name).map(|value| value.to_string())
    }

    #[test]
    fn missing_api_key_is_reported() {
        let result = MapsApiCredentials::from_lookup(lookup_in(&[]));
        assert!(matches!(
            result,
            Err(ConfigError::ConfigurationMissing(API_KEY_VAR))
        ));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let result = MapsApiCredentials::from_lookup(lookup_in(&[(API_KEY_VAR, "  ")]));
        assert!(matches!(result, Err(ConfigError::ConfigurationMissing(_))));
    }

    #[test]
    fn optional_settings_are_parsed() {
        let credentials = MapsApiCredentials::from_lookup(lookup_in(&[
            (API_KEY_VAR, "secret"),
            (RATE_LIMIT_VAR, "50"),
            (TIMEOUT_VAR, "3"),
        ]))
        .unwrap();
        assert_eq!(credentials.api_key, "secret");
        assert_eq!(credentials.rate_limit_per_minute, Some(50));
        assert_eq!(credentials.proxy, None);
        assert_eq!(credentials.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let result = MapsApiCredentials::from_lookup(lookup_in(&[
            (API_KEY_VAR, "secret"),
            (RATE_LIMIT_VAR, "many"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: RATE_LIMIT_VAR, .. })
        ));
    }
}
