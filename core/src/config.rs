//! Client configuration.
//!
//! Loaded from the environment (`STUDENTS_API_URL`,
//! `STUDENTS_API_TIMEOUT_SECS`) or deserialized from any serde source.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const BASE_URL_VAR: &str = "STUDENTS_API_URL";
pub const TIMEOUT_VAR: &str = "STUDENTS_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Whole-request timeout. `None` leaves the transport's default in place.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup. Unset or blank
    /// variables fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let present = |name: &str| lookup(name).filter(|v: &String| !v.trim().is_empty());

        if let Some(url) = present(BASE_URL_VAR) {
            config.base_url = url.trim().to_string();
        }
        if let Some(raw) = present(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidVar {
                    name: TIMEOUT_VAR,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
            config.timeout_secs = Some(secs);
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn from_env_falls_back_when_unset() {
        std::env::remove_var(BASE_URL_VAR);
        std::env::remove_var(TIMEOUT_VAR);
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn reads_url_and_timeout() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://records.example.edu/api"),
            (TIMEOUT_VAR, " 15 "),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://records.example.edu/api");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn blank_values_fall_back() {
        let config =
            ClientConfig::from_lookup(lookup(&[(BASE_URL_VAR, "  "), (TIMEOUT_VAR, "")])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidVar {
                name: TIMEOUT_VAR,
                ..
            }
        ));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"timeout_secs":5}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, Some(5));
    }
}
