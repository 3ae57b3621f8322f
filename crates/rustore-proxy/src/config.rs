//! Proxy configuration.

use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use rustore_client::{ClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default listen address, matching the port the proxy has always used.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:12700";

/// Environment variable pointing at an alternate config file.
pub const CONFIG_ENV: &str = "RUSTORE_PROXY_CONFIG";

const CONFIG_FILE: &str = "rustore-proxy.toml";

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Socket address the proxy listens on.
    pub listen: String,

    /// Base URL of the backend the proxy forwards to.
    pub upstream_url: String,

    /// User agent reported upstream. Defaults to the client's own.
    pub user_agent: Option<String>,

    /// Outbound request timeout in seconds. Unset leaves the transport
    /// default in place.
    pub timeout_secs: Option<u64>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            upstream_url: DEFAULT_BASE_URL.to_string(),
            user_agent: None,
            timeout_secs: None,
        }
    }
}

impl ProxyConfig {
    /// Loads the config from `$RUSTORE_PROXY_CONFIG`, or
    /// `rustore-proxy.toml` in the working directory.
    pub fn load() -> Result<Self> {
        let path = match env::var(CONFIG_ENV) {
            Ok(path) => PathBuf::from(path),
            Err(_) => PathBuf::from(CONFIG_FILE),
        };
        Self::load_from(&path)
    }

    /// Reads a config file, falling back to defaults when it is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Client settings derived from this config.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig {
            base_url: self.upstream_url.clone(),
            ..ClientConfig::default()
        };
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        config.timeout = self.timeout_secs.map(Duration::from_secs);
        config
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = ProxyConfig::load_from(Path::new("/nonexistent/rustore-proxy.toml")).unwrap();
        assert_eq!(config.listen, DEFAULT_LISTEN);
        assert_eq!(config.upstream_url, DEFAULT_BASE_URL);
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn test_partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listen = \"0.0.0.0:8080\"").unwrap();
        writeln!(file, "timeout_secs = 15").unwrap();

        let config = ProxyConfig::load_from(file.path()).unwrap();
        assert_eq!(config.listen, "0.0.0.0:8080");
        assert_eq!(config.timeout_secs, Some(15));
        assert_eq!(config.upstream_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listen = [1, 2, 3]").unwrap();

        assert!(ProxyConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_client_config_carries_overrides() {
        let config = ProxyConfig {
            upstream_url: "http://localhost:9999".to_string(),
            user_agent: Some("rustore-proxy-test/1.0".to_string()),
            timeout_secs: Some(30),
            ..ProxyConfig::default()
        };

        let client_config = config.client_config();
        assert_eq!(client_config.base_url, "http://localhost:9999");
        assert_eq!(client_config.user_agent, "rustore-proxy-test/1.0");
        assert_eq!(client_config.timeout, Some(Duration::from_secs(30)));
    }
}
