//! Client configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.neuredge.dev";
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_SECS: f64 = 1.0;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_retry_delay() -> f64 {
    DEFAULT_RETRY_DELAY_SECS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Immutable settings for one client instance.
///
/// Can be loaded from YAML:
///
/// ```yaml
/// api_key: sk-live-...
/// base_url: https://api.neuredge.dev
/// max_retries: 3
/// retry_delay: 1.0
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total number of attempts per logical request (at least one is always made).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base backoff in seconds; attempt `n` waits `retry_delay * 2^n`.
    #[serde(default = "default_retry_delay")]
    pub retry_delay: f64,
    /// Per-attempt HTTP timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            proxy_url: None,
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(yaml)
            .map_err(|e| Error::invalid_request(format!("Invalid client config: {}", e)))?;
        config.validate()
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::invalid_request(format!(
                "Failed to read client config {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Check invariants and normalize the base URL (trailing `/` stripped).
    pub fn validate(mut self) -> Result<Self> {
        if self.api_key.trim().is_empty() {
            return Err(Error::invalid_request("api_key must not be empty"));
        }

        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            Error::invalid_request(format!("Invalid base_url '{}': {}", self.base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::invalid_request(format!(
                "base_url must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();

        if Duration::try_from_secs_f64(self.retry_delay).is_err() {
            return Err(Error::invalid_request(format!(
                "retry_delay must be a non-negative, representable number of seconds, got {}",
                self.retry_delay
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_request("timeout_secs must be positive"));
        }
        Ok(self)
    }

    /// Values rejected by [`validate`](Self::validate) map to zero.
    pub fn retry_delay_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.retry_delay).unwrap_or_default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .field("timeout_secs", &self.timeout_secs)
            .field("proxy_url", &self.proxy_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;

    #[test]
    fn test_yaml_defaults() {
        let cfg = ClientConfig::from_yaml_str("api_key: test-key\n").unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.retry_delay, 1.0);
        assert_eq!(cfg.timeout_secs, 30);
        assert!(cfg.proxy_url.is_none());
    }

    #[test]
    fn test_yaml_overrides_and_trailing_slash() {
        let yaml = "api_key: k\nbase_url: http://localhost:8787/\nmax_retries: 5\nretry_delay: 0.25\n";
        let cfg = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.base_url, "http://localhost:8787");
        assert_eq!(cfg.max_retries, 5);
        assert_eq!(cfg.retry_delay_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_validation_failures() {
        let err = ClientConfig::new("  ").validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);

        let mut cfg = ClientConfig::new("k");
        cfg.base_url = "ftp://example.com".into();
        tokio_test::assert_err!(cfg.validate());

        let mut cfg = ClientConfig::new("k");
        cfg.retry_delay = -1.0;
        tokio_test::assert_err!(cfg.validate());

        let mut cfg = ClientConfig::new("k");
        cfg.retry_delay = f64::NAN;
        tokio_test::assert_err!(cfg.validate());

        let mut cfg = ClientConfig::new("k");
        cfg.retry_delay = 1e20;
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);

        let mut cfg = ClientConfig::new("k");
        cfg.retry_delay = f64::INFINITY;
        tokio_test::assert_err!(cfg.validate());

        let mut cfg = ClientConfig::new("k");
        cfg.retry_delay = 0.0;
        tokio_test::assert_ok!(cfg.validate());

        tokio_test::assert_err!(ClientConfig::from_yaml_str("base_url: http://x\n"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let out = format!("{:?}", ClientConfig::new("secret-key"));
        assert!(!out.contains("secret-key"));
        assert!(out.contains("<redacted>"));
    }
}
