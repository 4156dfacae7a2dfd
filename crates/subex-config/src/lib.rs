use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

pub const CONFIG_FILENAME: &str = "subex.toml";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse subex.toml: {0}")]
    Parse(String),
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Full `subex.toml` configuration.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct SubexConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Subtitle extraction server connection.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// `base_url = "http://media.local:8000"`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Extraction runs ffmpeg server-side, so this is
    /// generous by default.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Interactive behavior timings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UiConfig {
    /// Quiet period before a search or filter input is acted on.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Delay before a flash alert hides itself. `0` keeps alerts up.
    #[serde(default = "default_alert_dismiss_ms")]
    pub alert_dismiss_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_alert_dismiss_ms() -> u64 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            alert_dismiss_ms: default_alert_dismiss_ms(),
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl UiConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// `None` when alerts should stay up.
    pub fn alert_dismiss(&self) -> Option<Duration> {
        (self.alert_dismiss_ms > 0).then(|| Duration::from_millis(self.alert_dismiss_ms))
    }
}

/// Load `subex.toml` from the given directory.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but cannot be read or parsed.
pub fn load(project_root: &Path) -> Result<Option<SubexConfig>, ConfigError> {
    let path = project_root.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(None);
    }
    load_file(&path).map(Some)
}

/// Load and validate a config file at an explicit path.
pub fn load_file(path: &Path) -> Result<SubexConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<SubexConfig, ConfigError> {
    let config: SubexConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

/// Check a config built or changed outside [`parse`], e.g. after a
/// command-line override.
pub fn validate(config: &SubexConfig) -> Result<(), ConfigError> {
    let base_url = config.server.base_url.trim();
    if base_url.is_empty() {
        return Err(ConfigError::Validation(
            "[server] base_url must not be empty".to_string(),
        ));
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "[server] base_url '{base_url}' must start with http:// or https://"
        )));
    }

    if config.server.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "[server] timeout_secs must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
