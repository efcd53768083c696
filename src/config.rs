use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR: &str = "ttrpg-notes";
const ENV_PREFIX: &str = "TTRPG_NOTES_";

/// Configuration failures. The binary reports them and falls back to
/// defaults.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Load(#[from] figment::Error),

    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub tui: TuiConfig,
}

/// Notes service connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    /// Seconds between background connectivity checks.
    pub connectivity_interval_secs: u64,
}

/// Timings and sizes for on-screen feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub notice_secs: u64,
    pub highlight_ms: u64,
    pub preview_chars: usize,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 30,
            connectivity_interval_secs: 30,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notice_secs: 4,
            highlight_ms: 2000,
            preview_chars: 150,
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 50 }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connectivity_interval(&self) -> Duration {
        Duration::from_secs(self.connectivity_interval_secs)
    }
}

impl TuiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/ttrpg-notes/config.toml` and
    /// `TTRPG_NOTES_*` environment variables.
    /// Returns `Default` if loading fails or the result is invalid.
    pub fn load() -> Self {
        let path = Self::config_path();
        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("Loaded config (file: {})", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Layer defaults, the TOML file at `path` (if present) and the
    /// environment, then validate.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.api.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.api.base_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        let positive = [
            ("api.request_timeout_secs", self.api.request_timeout_secs),
            ("api.connectivity_interval_secs", self.api.connectivity_interval_secs),
            ("ui.notice_secs", self.ui.notice_secs),
            ("ui.highlight_ms", self.ui.highlight_ms),
            ("tui.tick_rate_ms", self.tui.tick_rate_ms),
        ];
        if let Some((field, _)) = positive.into_iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Zero { field });
        }
        if self.ui.preview_chars == 0 {
            return Err(ConfigError::Zero {
                field: "ui.preview_chars",
            });
        }

        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
