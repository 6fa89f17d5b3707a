//! Error types shared across PanelSplit crates.

use std::path::PathBuf;

/// Top-level error type for PanelSplit operations.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// Input rejected before any document mutation or file write.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Crop or artifact-write failure for a specific cell. Not retried.
    #[error("Export error: {message}")]
    Export { message: String },

    /// Snapshot capture/restore failure. Fatal for the whole run.
    #[error("Host state error: {message}")]
    HostState { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using SplitError.
pub type SplitResult<T> = Result<T, SplitError>;

impl SplitError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export {
            message: msg.into(),
        }
    }

    pub fn host_state(msg: impl Into<String>) -> Self {
        Self::HostState {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Short label for log lines and telemetry fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Export { .. } => "export",
            Self::HostState { .. } => "host-state",
            Self::Config { .. } => "config",
            Self::FileNotFound { .. } => "file-not-found",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Other(_) => "other",
        }
    }
}
