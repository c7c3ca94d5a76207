//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::service::HttpConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Events API connection
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: self.request_timeout_secs.saturating_mul(1000),
        }
    }
}

/// Where the CLI keeps the signed-in session
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_file")]
    pub file: String,
}

fn default_session_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("eventhub").join("session.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./eventhub_session.json".to_string())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
        }
    }
}

impl SessionConfig {
    /// Session file path with a leading `~` expanded to the home directory
    pub fn path(&self) -> PathBuf {
        expand_home(&self.file)
    }
}

fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return PathBuf::from(path),
    };

    match dirs::home_dir() {
        Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(path),
    }
}

/// Presentation settings
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Pause between a successful registration and the dashboard
    #[serde(default = "default_redirect_delay")]
    pub redirect_delay_ms: u64,
}

fn default_redirect_delay() -> u64 {
    2000
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: default_redirect_delay(),
        }
    }
}

impl DisplayConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
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
    "warn".to_string()
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
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

    /// Load from an explicit path, the default locations, or the environment.
    ///
    /// An explicit path must load; a broken file in a default location is
    /// skipped with a warning.
    pub fn load_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            let config = Self::load_with_env(path)?;
            tracing::debug!("Loaded config from {:?}", path);
            return Ok(config);
        }

        let config_paths = [
            dirs::config_dir().map(|p| p.join("eventhub").join("config.toml")),
            Some(PathBuf::from("./eventhub.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Ok(Self::from_env())
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // API overrides
        if let Some(url) = var("EVENTHUB_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = var("EVENTHUB_API_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.api.request_timeout_secs = secs;
            }
        }

        if let Some(file) = var("EVENTHUB_SESSION_FILE") {
            self.session.file = file;
        }

        if let Some(delay) = var("EVENTHUB_REDIRECT_DELAY_MS") {
            if let Ok(ms) = delay.parse() {
                self.display.redirect_delay_ms = ms;
            }
        }

        // Logging overrides
        if let Some(level) = var("EVENTHUB_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("EVENTHUB_LOG_FORMAT") {
            self.logging.format = format;
        }
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
    r#"# EventHub Configuration
#
# Environment variables override these settings:
# - EVENTHUB_API_URL
# - EVENTHUB_API_TIMEOUT
# - EVENTHUB_SESSION_FILE
# - EVENTHUB_REDIRECT_DELAY_MS
# - EVENTHUB_LOG_LEVEL
# - EVENTHUB_LOG_FORMAT

[api]
# Events API base URL
base_url = "http://localhost:5000"

# Request timeout in seconds
request_timeout_secs = 10

[session]
# File holding the signed-in session; a leading ~ is expanded.
# Defaults to the platform data directory (eventhub/session.json).
# file = "~/.local/share/eventhub/session.json"

[display]
# Pause after a successful registration before showing the dashboard (ms)
redirect_delay_ms = 2000

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.http_config().request_timeout_ms, 10_000);
        assert_eq!(config.display.redirect_delay(), Duration::from_secs(2));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"https://events.example.com\"\n\n[display]\nredirect_delay_ms = 0\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "https://events.example.com");
        assert_eq!(config.api.request_timeout_secs, 10);
        assert_eq!(config.display.redirect_delay_ms, 0);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.display.redirect_delay_ms, 2000);
    }

    #[test]
    fn test_generated_config_session_path_resolves() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        let path = config.session.path();

        assert!(!path.starts_with("~"));
        assert_eq!(path, SessionConfig::default().path());
    }

    #[test]
    fn test_session_path_expands_home() {
        let config = SessionConfig {
            file: "~/.local/share/eventhub/session.json".to_string(),
        };

        match dirs::home_dir() {
            Some(home) => {
                assert_eq!(
                    config.path(),
                    home.join(".local/share/eventhub/session.json")
                );
                assert!(config.path().is_absolute());
            }
            None => assert_eq!(config.path(), PathBuf::from(&config.file)),
        }

        // Only a leading home marker is expanded
        let config = SessionConfig {
            file: "data/~user/session.json".to_string(),
        };
        assert_eq!(config.path(), PathBuf::from("data/~user/session.json"));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("EVENTHUB_API_URL", "http://api.test"),
            ("EVENTHUB_API_TIMEOUT", "3"),
            ("EVENTHUB_SESSION_FILE", "/tmp/s.json"),
            ("EVENTHUB_REDIRECT_DELAY_MS", "not-a-number"),
            ("EVENTHUB_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://api.test");
        assert_eq!(config.api.request_timeout_secs, 3);
        assert_eq!(config.session.file, "/tmp/s.json");
        // Unparseable values leave the setting alone
        assert_eq!(config.display.redirect_delay_ms, 2000);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            Config::load_default(Some(&dir.path().join("missing.toml"))),
            Err(ConfigError::Io { .. })
        ));
    }
}
