//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default series parameters.
    pub series: SeriesDefaults,

    /// Default stream parameters.
    pub stream: StreamDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default series parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesDefaults {
    /// Number of samples retained in the window.
    pub capacity: usize,

    /// Components per sample (1 = scalar).
    pub dimension: usize,

    /// Filter algorithm name ("ewma", "sma", or "passthrough").
    ///
    /// Resolved once at series construction; an unrecognized name is a
    /// configuration error, not a deferred runtime failure.
    pub filter_alg: String,

    /// Fixed EWMA weight. `None` auto-computes from the fill level.
    pub ewma_weight: Option<f64>,

    /// Whether the filtered view is recomputed on every insert.
    pub auto_filter: bool,
}

/// Default stream parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamDefaults {
    /// Sample polling rate (Hz).
    pub sample_rate_hz: u32,

    /// Snapshot channel depth before the dispatcher applies backpressure.
    pub channel_depth: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "sensorwin=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            series: SeriesDefaults::default(),
            stream: StreamDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SeriesDefaults {
    fn default() -> Self {
        Self {
            capacity: 50,
            dimension: 1,
            filter_alg: "ewma".to_string(),
            ewma_weight: None,
            auto_filter: true,
        }
    }
}

impl Default for StreamDefaults {
    fn default() -> Self {
        Self {
            sample_rate_hz: 60,
            channel_depth: 64,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("sensorwin").join("config.json")
}
