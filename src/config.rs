//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::backend::ClientConfig;
use crate::dashboard::{EmptyFleet, FleetError, FleetSource, Location, StaticFleet};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub location: Location,

    #[serde(default)]
    pub fleet: FleetConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub frontend: FrontendConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the dashboard feeds
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Base URL for the generic JSON GET/POST helpers
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Request timeout; unset means no timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_base() -> String {
    "https://weather-backend-8r87.onrender.com/".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            api_base: default_api_base(),
            request_timeout_secs: None,
        }
    }
}

/// Where the fleet monitor gets its vessels
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FleetConfig {
    /// JSON file with an array of vessels; unset means an empty fleet
    pub file: Option<PathBuf>,
}

/// View-model service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8083
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Front end that navigation targets are resolved against
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrontendConfig {
    pub url: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("seastate").join("config.toml")),
            Some(PathBuf::from("/etc/seastate/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Backend overrides
        if let Some(url) = lookup("SEASTATE_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Some(api_base) = lookup("SEASTATE_API_BASE") {
            self.backend.api_base = api_base;
        }
        if let Some(timeout) = lookup("SEASTATE_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.backend.request_timeout_secs = Some(secs);
            }
        }

        // Location overrides
        if let Some(city) = lookup("SEASTATE_CITY") {
            self.location.city = city;
        }
        if let Some(lat) = lookup("SEASTATE_LATITUDE") {
            if let Ok(lat) = lat.parse() {
                self.location.latitude = lat;
            }
        }
        if let Some(lon) = lookup("SEASTATE_LONGITUDE") {
            if let Ok(lon) = lon.parse() {
                self.location.longitude = lon;
            }
        }

        if let Some(file) = lookup("SEASTATE_FLEET_FILE") {
            self.fleet.file = Some(PathBuf::from(file));
        }

        // API overrides
        if let Some(host) = lookup("SEASTATE_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("SEASTATE_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Some(url) = lookup("SEASTATE_FRONTEND_URL") {
            self.frontend.url = Some(url);
        }

        // Logging overrides
        if let Some(level) = lookup("SEASTATE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SEASTATE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Settings for the feed client
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.backend.url.clone(),
            request_timeout_ms: self.backend.request_timeout_secs.map(|s| s * 1000),
        }
    }

    /// Fleet named by `[fleet] file`, or an empty fleet
    pub fn fleet_source(&self) -> Result<Arc<dyn FleetSource>, FleetError> {
        match &self.fleet.file {
            Some(path) => Ok(Arc::new(StaticFleet::from_file(path)?)),
            None => Ok(Arc::new(EmptyFleet)),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# SeaState Configuration
#
# Environment variables override these settings:
# - SEASTATE_BACKEND_URL
# - SEASTATE_API_BASE
# - SEASTATE_REQUEST_TIMEOUT_SECS
# - SEASTATE_CITY, SEASTATE_LATITUDE, SEASTATE_LONGITUDE
# - SEASTATE_FLEET_FILE
# - SEASTATE_API_HOST, SEASTATE_API_PORT
# - SEASTATE_FRONTEND_URL
# - SEASTATE_LOG_LEVEL, SEASTATE_LOG_FORMAT

[backend]
# Base URL of the weather, marine and alerts endpoints
url = "http://localhost:8000"

# Base URL for generic GET/POST requests
api_base = "https://weather-backend-8r87.onrender.com/"

# Request timeout in seconds (unset: wait indefinitely)
# request_timeout_secs = 30

[location]
# City for the weather feed
city = "London"

# Coordinates for the marine feed
latitude = 51.5074
longitude = -0.1278

[fleet]
# JSON file with the vessels to monitor (unset: empty fleet)
# file = "/etc/seastate/fleet.json"

[api]
# View-model service host
host = "0.0.0.0"

# View-model service port
port = 8083

[frontend]
# Front end that navigation paths are joined to
# url = "http://localhost:5173"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.url, "http://localhost:8000");
        assert!(config.backend.request_timeout_secs.is_none());
        assert_eq!(config.location.city, "London");
        assert!(config.fleet.file.is_none());
        assert_eq!(config.api.addr(), "0.0.0.0:8083");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.backend.url, "http://localhost:8000");
        assert_eq!(config.location.latitude, 51.5074);
        assert_eq!(config.location.longitude, -0.1278);
        assert_eq!(config.api.port, 8083);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [location]
            city = "Hamburg"

            [backend]
            url = "https://weather.example.org"
            request_timeout_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.location.city, "Hamburg");
        assert_eq!(config.location.latitude, 51.5074);
        assert_eq!(config.backend.api_base, default_api_base());

        let client = config.client_config();
        assert_eq!(client.base_url, "https://weather.example.org");
        assert_eq!(client.request_timeout_ms, Some(10_000));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[fleet]\nfile = \"/tmp/fleet.json\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.fleet.file, Some(PathBuf::from("/tmp/fleet.json")));
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/nonexistent/seastate.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nport = \"not a port\"").unwrap();
        match Config::load(file.path()) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SEASTATE_BACKEND_URL", "http://10.0.0.5:9000"),
            ("SEASTATE_CITY", "Oslo"),
            ("SEASTATE_LATITUDE", "59.91"),
            ("SEASTATE_LONGITUDE", "not-a-number"),
            ("SEASTATE_API_PORT", "9100"),
            ("SEASTATE_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.backend.url, "http://10.0.0.5:9000");
        assert_eq!(config.location.city, "Oslo");
        assert_eq!(config.location.latitude, 59.91);
        assert_eq!(config.location.longitude, -0.1278);
        assert_eq!(config.api.port, 9100);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_fleet_source() {
        let config = Config::default();
        assert!(config.fleet_source().unwrap().vessels().is_empty());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "name": "Northern Star", "type": "Cargo", "status": "Optimal",
                "speed": "14.2 knots", "weather": {{"wind": 12.5, "temp": 18.0}}}}]"#
        )
        .unwrap();

        let mut config = Config::default();
        config.fleet.file = Some(file.path().to_path_buf());
        let vessels = config.fleet_source().unwrap().vessels();
        assert_eq!(vessels.len(), 1);
        assert_eq!(vessels[0].name, "Northern Star");

        config.fleet.file = Some(PathBuf::from("/nonexistent/fleet.json"));
        assert!(matches!(config.fleet_source(), Err(FleetError::Io { .. })));
    }
}
