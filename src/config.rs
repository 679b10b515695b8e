use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Application-level constants
pub const APP_NAME: &str = "VitalWatch";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const CONFIG_FILE: &str = "monitor.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Get the application data directory
/// ~/VitalWatch/ on all platforms. Falls back to the working directory when
/// no home directory can be resolved.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

pub fn config_path() -> PathBuf {
    app_data_dir().join(CONFIG_FILE)
}

pub fn default_log_filter() -> &'static str {
    "vitalwatch_lib=info"
}

/// Install the global fmt subscriber. `RUST_LOG` wins over `filter`.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .try_init();

    tracing::info!("{} starting v{}", APP_NAME, APP_VERSION);
}

/// Tunables for the monitor, trend and device feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Readings kept in each user's live history.
    pub history_window: usize,
    /// Readings considered when computing a trend.
    pub trend_window: usize,
    /// Relative change below which a trend is stable (0.05 = 5%).
    pub trend_tolerance: f64,
    pub sync_interval_ms: u64,
    pub sync_duration_ms: u64,
    pub nutrition_window_days: u32,
    pub log_filter: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            history_window: 20,
            trend_window: 5,
            trend_tolerance: 0.05,
            sync_interval_ms: 3000,
            sync_duration_ms: 15_000,
            nutrition_window_days: 7,
            log_filter: default_log_filter().to_string(),
        }
    }
}

impl MonitorConfig {
    /// Read a JSON config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Load from `config_path()`, or defaults when the file is absent or
    /// unreadable.
    pub fn load_or_default() -> Self {
        Self::load_from_or_default(&config_path())
    }

    fn load_from_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid monitor config");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
