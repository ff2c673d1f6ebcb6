//! Service settings
//!
//! Provides settings loading from environment variables, a TOML file
//! and command-line overrides. Calculator documents are not settings; they
//! are handled by [`crate::resolver`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// Helper functions for serde defaults
fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    crate::utils::version::user_agent()
}

fn default_local_config_path() -> PathBuf {
    PathBuf::from("calc-sliders.json")
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_seat_rate() -> f64 {
    crate::savings::DEFAULT_SEAT_RATE
}

// Duration serialization module
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Main settings for the calculator service
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Server configuration
    #[serde(default)]
    pub server: ServerSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Outbound HTTP configuration
    #[serde(default)]
    pub network: NetworkSettings,
    /// Calculator configuration sources
    #[serde(default)]
    pub calculator: CalculatorSettings,
}

fn default_host() -> String {
    "::".to_string()
}

fn default_port() -> u16 {
    4417
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout duration
    #[serde(with = "duration_secs", default = "default_timeout")]
    pub timeout: Duration,
    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
    /// Log line format (text, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Network and proxy configuration for the remote document fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// HTTPS proxy URL
    #[serde(default)]
    pub https_proxy: Option<String>,
    /// HTTP proxy URL
    #[serde(default)]
    pub http_proxy: Option<String>,
    /// All protocols proxy URL
    #[serde(default)]
    pub all_proxy: Option<String>,
    /// Remote fetch timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Where calculator configuration comes from and how long it lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorSettings {
    /// Bundled slider document
    #[serde(default = "default_local_config_path")]
    pub local_config_path: PathBuf,
    /// File backing the persisted remote-URL option
    #[serde(default)]
    pub options_path: Option<PathBuf>,
    /// Explicit remote document URL; wins over every other source
    #[serde(default)]
    pub remote_url: Option<String>,
    /// Lifetime of the merged configuration in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Monthly per-seat price
    #[serde(default = "default_seat_rate")]
    pub seat_rate: f64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout: default_timeout(),
            enable_cors: default_true(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            verbose: false,
            format: default_log_format(),
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            https_proxy: None,
            http_proxy: None,
            all_proxy: None,
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            local_config_path: default_local_config_path(),
            options_path: None,
            remote_url: None,
            cache_ttl_secs: default_cache_ttl_secs(),
            seat_rate: default_seat_rate(),
        }
    }
}

impl CalculatorSettings {
    /// Cache lifetime as a `Duration`
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Options file path, defaulting to the platform config directory
    pub fn options_path(&self) -> PathBuf {
        if let Some(path) = &self.options_path {
            return path.clone();
        }
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("atera-compact-calculator")
            .join("options.json")
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from environment variables on top of defaults
    pub fn from_env() -> crate::Result<Self> {
        Self::default().merge_with_env()
    }

    /// Load settings from configuration file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::config("file", &format!("Failed to read config file: {}", e))
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| {
            crate::Error::config("file", &format!("Failed to parse config file: {}", e))
        })?;

        Ok(settings)
    }

    /// Apply environment variable overrides; unset variables leave values alone
    pub fn merge_with_env(mut self) -> crate::Result<Self> {
        if let Ok(host) = std::env::var("ATERA_CALC_SERVER_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("ATERA_CALC_SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| crate::Error::config("port", &format!("Invalid port: {}", e)))?;
        }

        if let Ok(path) = std::env::var("ATERA_CALC_LOCAL_CONFIG") {
            self.calculator.local_config_path = PathBuf::from(path);
        }

        if let Ok(ttl) = std::env::var("ATERA_CALC_CACHE_TTL") {
            self.calculator.cache_ttl_secs = ttl.parse().map_err(|e| {
                crate::Error::config("cache_ttl_secs", &format!("Invalid TTL: {}", e))
            })?;
        }

        if let Ok(rate) = std::env::var("ATERA_CALC_SEAT_RATE") {
            self.calculator.seat_rate = rate.parse().map_err(|e| {
                crate::Error::config("seat_rate", &format!("Invalid seat rate: {}", e))
            })?;
        }

        if let Ok(proxy) = std::env::var("HTTPS_PROXY") {
            self.network.https_proxy = Some(proxy);
        }
        if let Ok(proxy) = std::env::var("HTTP_PROXY") {
            self.network.http_proxy = Some(proxy);
        }
        if let Ok(proxy) = std::env::var("ALL_PROXY") {
            self.network.all_proxy = Some(proxy);
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(verbose) = std::env::var("VERBOSE") {
            self.logging.verbose = verbose.parse().unwrap_or(false);
        }

        Ok(self)
    }

    /// Get effective proxy URL based on priority
    pub fn get_proxy_url(&self) -> Option<String> {
        self.network
            .https_proxy
            .as_ref()
            .or(self.network.http_proxy.as_ref())
            .or(self.network.all_proxy.as_ref())
            .cloned()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        if self.server.port == 0 {
            return Err(crate::Error::config(
                "port",
                "Invalid server port: cannot be 0",
            ));
        }

        if self.server.timeout.is_zero() {
            return Err(crate::Error::config(
                "timeout",
                "Invalid server timeout: cannot be 0",
            ));
        }

        if self.calculator.cache_ttl_secs == 0 {
            return Err(crate::Error::config(
                "cache_ttl_secs",
                "Invalid cache TTL: cannot be 0",
            ));
        }

        if !self.calculator.seat_rate.is_finite() || self.calculator.seat_rate < 0.0 {
            return Err(crate::Error::config(
                "seat_rate",
                &format!("Invalid seat rate: {}", self.calculator.seat_rate),
            ));
        }

        if self.network.request_timeout == 0 {
            return Err(crate::Error::config(
                "request_timeout",
                "Invalid request timeout: cannot be 0",
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(crate::Error::config(
                    "log_level",
                    &format!("Invalid log level: {}", self.logging.level),
                ));
            }
        }

        match self.logging.format.as_str() {
            "text" | "compact" => {}
            other => {
                return Err(crate::Error::config(
                    "log_format",
                    &format!("Invalid log format: {}", other),
                ));
            }
        }

        for (name, proxy_url) in [
            ("https_proxy", &self.network.https_proxy),
            ("http_proxy", &self.network.http_proxy),
            ("all_proxy", &self.network.all_proxy),
        ]
        .iter()
        {
            if let Some(url_str) = proxy_url
                && let Err(e) = url::Url::parse(url_str)
            {
                return Err(crate::Error::config(
                    *name,
                    &format!("Invalid proxy URL '{}': {}", url_str, e),
                ));
            }
        }

        Ok(())
    }
}
