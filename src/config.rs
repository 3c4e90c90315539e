//! Explanation service configuration.
//!
//! Settings come from defaults, then the environment, then (for the CLI)
//! command-line flags:
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `API_KEY` | Service credential | unset (explanations fall back) |
//! | `BULB_LAB_MODEL` | Model name | `gemini-3-flash-preview` |
//! | `BULB_LAB_ENDPOINT` | API base URL | Gemini v1beta |

use std::time::Duration;

/// Environment variable holding the service credential.
pub const API_KEY_VAR: &str = "API_KEY";

/// Environment variable overriding the model name.
pub const MODEL_VAR: &str = "BULB_LAB_MODEL";

/// Environment variable overriding the API base URL.
pub const ENDPOINT_VAR: &str = "BULB_LAB_ENDPOINT";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Configuration for the explanation service.
#[derive(Clone)]
pub struct ExplainerConfig {
    /// Service credential; `None` means explanations use the fallback text.
    pub api_key: Option<String>,
    /// Model to ask.
    pub model: String,
    /// API base URL without a trailing slash.
    pub endpoint: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for ExplainerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// Hand-written so the credential never ends up in logs
impl std::fmt::Debug for ExplainerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplainerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ExplainerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read overrides through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();
        config.api_key = non_empty(API_KEY_VAR);
        if let Some(model) = non_empty(MODEL_VAR) {
            config.model = model;
        }
        if let Some(endpoint) = non_empty(ENDPOINT_VAR) {
            config.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        config
    }

    /// Set the credential. Blank strings count as unset.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = if key.trim().is_empty() { None } else { Some(key) };
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the sampling temperature.
    ///
    /// Higher values give more varied wording between requests.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a credential is available.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
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
    fn test_defaults() {
        let config = ExplainerConfig::new();
        assert!(!config.has_credential());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!((config.temperature - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ExplainerConfig::from_lookup(lookup(&[
            ("API_KEY", "secret"),
            ("BULB_LAB_MODEL", "other-model"),
            ("BULB_LAB_ENDPOINT", "http://localhost:8080/v1/"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "other-model");
        assert_eq!(config.endpoint, "http://localhost:8080/v1");
    }

    #[test]
    fn test_blank_key_is_missing() {
        let config = ExplainerConfig::from_lookup(lookup(&[("API_KEY", "  ")]));
        assert!(!config.has_credential());
        assert!(!ExplainerConfig::new().with_api_key("").has_credential());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ExplainerConfig::new().with_api_key("hunter2");
        let printed = format!("{config:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("<redacted>"));
    }
}
