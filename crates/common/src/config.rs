//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default split parameters.
    pub export: ExportDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Usage telemetry configuration.
    pub telemetry: TelemetryConfig,
}

/// Default split parameters, used when the caller does not override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDefaults {
    /// Default row count.
    pub rows: u32,

    /// Default column count.
    pub columns: u32,

    /// File extension for panel artifacts.
    pub artifact_extension: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "panelsplit=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

/// Usage telemetry configuration.
///
/// Telemetry is an explicit value threaded into the pipeline at
/// construction; nothing reads it as ambient global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether usage events are recorded at all.
    pub enabled: bool,

    /// Event log file. `None` uses the standard data location.
    pub log_file: Option<PathBuf>,

    /// Marks events produced by internal/test users.
    pub test_user: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            export: ExportDefaults::default(),
            logging: LoggingConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            rows: 2,
            columns: 2,
            artifact_extension: "pdf".to_string(),
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

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_file: None,
            test_user: false,
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
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("panelsplit").join("config.json")
}

/// Standard data directory for telemetry and other run artifacts.
pub fn data_dir() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("panelsplit")
}
