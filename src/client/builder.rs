use crate::client::config::ClientConfig;
use crate::client::core::NeuredgeClient;
use crate::transport::{HttpTransport, Transport};
use crate::{Error, Result};
use keyring::Entry;
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

const KEYRING_SERVICE: &str = "neuredge";
const KEYRING_USER: &str = "api_key";

/// Builder for [`NeuredgeClient`].
///
/// Every setting not given explicitly falls back to its `NEUREDGE_*`
/// environment variable, then to the built-in default. The API key is looked up
/// explicitly, then in the OS keyring (service `neuredge`), then in
/// `NEUREDGE_API_KEY`.
pub struct NeuredgeClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    max_retries: Option<u32>,
    retry_delay: Option<f64>,
    timeout_secs: Option<u64>,
    proxy_url: Option<String>,
    use_keyring: bool,
    /// Replace the HTTP transport (primarily for tests).
    transport: Option<Arc<dyn Transport>>,
}

impl NeuredgeClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            max_retries: None,
            retry_delay: None,
            timeout_secs: None,
            proxy_url: None,
            use_keyring: true,
            transport: None,
        }
    }

    /// Start from a complete config; environment variables are not consulted
    /// for fields it sets.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            api_key: Some(config.api_key),
            base_url: Some(config.base_url),
            max_retries: Some(config.max_retries),
            retry_delay: Some(config.retry_delay),
            timeout_secs: Some(config.timeout_secs),
            proxy_url: config.proxy_url,
            ..Self::new()
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Total attempts per request; `0` still makes one attempt.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Base backoff in seconds.
    pub fn retry_delay(mut self, seconds: f64) -> Self {
        self.retry_delay = Some(seconds);
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    pub fn proxy_url(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }

    /// Skip the OS keyring when resolving the API key.
    pub fn without_keyring(mut self) -> Self {
        self.use_keyring = false;
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Resolve and validate the effective configuration without building.
    pub fn resolve_config(&self) -> Result<ClientConfig> {
        let api_key = self
            .api_key
            .clone()
            .or_else(|| self.keyring_api_key())
            .or_else(|| env_string("NEUREDGE_API_KEY"))
            .ok_or_else(|| {
                Error::invalid_request(
                    "No API key: pass one explicitly, store it in the keyring, or set NEUREDGE_API_KEY",
                )
            })?;

        let mut config = ClientConfig::new(api_key);
        if let Some(base_url) = self.base_url.clone().or_else(|| env_string("NEUREDGE_BASE_URL")) {
            config.base_url = base_url;
        }
        if let Some(max_retries) = resolve(self.max_retries, "NEUREDGE_MAX_RETRIES")? {
            config.max_retries = max_retries;
        }
        if let Some(retry_delay) = resolve(self.retry_delay, "NEUREDGE_RETRY_DELAY_SECS")? {
            config.retry_delay = retry_delay;
        }
        if let Some(timeout_secs) = resolve(self.timeout_secs, "NEUREDGE_HTTP_TIMEOUT_SECS")? {
            config.timeout_secs = timeout_secs;
        }
        config.proxy_url = self.proxy_url.clone().or_else(|| env_string("NEUREDGE_PROXY_URL"));

        config.validate()
    }

    pub fn build(self) -> Result<NeuredgeClient> {
        let config = self.resolve_config()?;
        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new(&config)?),
        };
        Ok(NeuredgeClient::with_transport(config, transport))
    }

    fn keyring_api_key(&self) -> Option<String> {
        if !self.use_keyring {
            return None;
        }
        let entry = Entry::new(KEYRING_SERVICE, KEYRING_USER).ok()?;
        match entry.get_password() {
            Ok(key) if !key.trim().is_empty() => Some(key),
            Ok(_) => None,
            Err(e) => {
                debug!(error = %e, "no API key in keyring");
                None
            }
        }
    }
}

impl Default for NeuredgeClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn env_string(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Explicit value, else the parsed environment variable.
fn resolve<T: FromStr>(explicit: Option<T>, var: &str) -> Result<Option<T>> {
    if explicit.is_some() {
        return Ok(explicit);
    }
    match env_string(var) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::invalid_request(format!("Invalid value for {}: '{}'", var, raw))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;

    #[test]
    fn test_explicit_settings_win() {
        let cfg = NeuredgeClientBuilder::new()
            .api_key("k")
            .base_url("http://localhost:9000/")
            .max_retries(5)
            .retry_delay(0.5)
            .timeout_secs(7)
            .without_keyring()
            .resolve_config()
            .unwrap();
        assert_eq!(cfg.api_key, "k");
        assert_eq!(cfg.base_url, "http://localhost:9000");
        assert_eq!(cfg.max_retries, 5);
        assert_eq!(cfg.retry_delay, 0.5);
        assert_eq!(cfg.timeout_secs, 7);
    }

    #[test]
    fn test_from_config_round_trips() {
        let mut original = ClientConfig::new("k");
        original.max_retries = 1;
        let cfg = NeuredgeClientBuilder::from_config(original.clone())
            .resolve_config()
            .unwrap();
        assert_eq!(cfg.api_key, original.api_key);
        assert_eq!(cfg.max_retries, 1);
        assert_eq!(cfg.base_url, original.base_url);
    }

    #[test]
    fn test_resolve_prefers_explicit() {
        assert_eq!(resolve(Some(3u32), "NEUREDGE_TEST_UNSET_VAR").unwrap(), Some(3));
        assert_eq!(resolve::<u32>(None, "NEUREDGE_TEST_UNSET_VAR").unwrap(), None);
    }

    #[test]
    fn test_invalid_base_url_fails_build() {
        let err = NeuredgeClientBuilder::new()
            .api_key("k")
            .base_url("not a url")
            .without_keyring()
            .build()
            .err()
            .unwrap();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[test]
    fn test_oversized_retry_delay_fails_build() {
        let err = NeuredgeClientBuilder::new()
            .api_key("k")
            .retry_delay(1e20)
            .without_keyring()
            .build()
            .err()
            .unwrap();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(err.status_code, 0);
    }
}
