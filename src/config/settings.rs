//! Settings structures for Holocron-RS configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (HOLOCRON_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("HOLOCRON_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("HOLOCRON_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("HOLOCRON_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("HOLOCRON_API_BASE_URL") {
            self.upstream.api_base_url = val;
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug mode
    pub debug: bool,
    /// Instance name displayed in UI
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "Holocron".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Base URL for the instance
    pub base_url: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8888,
            bind_address: "127.0.0.1".to_string(),
            base_url: None,
        }
    }
}

/// Settings for outgoing requests to the catalog service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamSettings {
    /// Base URL of the catalog API
    pub api_base_url: String,
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Connection pool size per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy configuration
    pub proxies: ProxySettings,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://www.swapi.tech/api".to_string(),
            request_timeout: crate::DEFAULT_TIMEOUT as f64,
            pool_maxsize: 10,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings for outgoing requests
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProxySettings {
    /// Proxy for all protocols
    pub all: Option<String>,
    /// HTTP-only proxy
    pub http: Option<String>,
    /// HTTPS-only proxy
    pub https: Option<String>,
}
