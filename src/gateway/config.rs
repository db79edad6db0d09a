//! Configuration for the backend gateway.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::gateway::error::{GatewayError, GatewayResult};

/// Default backend base URL.
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Environment variable overriding the backend base URL.
const BASE_URL_ENV: &str = "PARLANCE_API_BASE_URL";

/// Configuration for the HTTP gateway.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Backend base URL.
    pub base_url: String,
    /// Request timeout.
    #[serde(with = "duration_serde")]
    pub request_timeout: Duration,
    /// Connection timeout.
    #[serde(with = "duration_serde")]
    pub connect_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl GatewayConfig {
    /// Create a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with the base URL taken from `PARLANCE_API_BASE_URL`
    /// when set, falling back to the default localhost backend.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new().with_base_url(base_url)
    }

    /// Set the backend base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse or a timeout is zero.
    pub fn validate(&self) -> GatewayResult<()> {
        Url::parse(&self.base_url)?;
        if self.request_timeout.is_zero() {
            return Err(GatewayError::Config(
                "request_timeout must be > 0".to_string(),
            ));
        }
        if self.connect_timeout.is_zero() {
            return Err(GatewayError::Config(
                "connect_timeout must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Serde module for Duration serialization.
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GatewayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_config_builder() {
        let config = GatewayConfig::new()
            .with_base_url("https://api.example.test")
            .with_request_timeout(Duration::from_secs(60));
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, "https://api.example.test");
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_bad_base_url_is_rejected() {
        let config = GatewayConfig::new().with_base_url("not a url");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = GatewayConfig::new().with_request_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
