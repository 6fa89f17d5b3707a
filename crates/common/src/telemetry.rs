//! Usage telemetry line log.
//!
//! Events are appended to a local log file as pipe-delimited lines:
//!
//! ```text
//! timestamp | [EventType] | hostVersion | scriptVersion | testUserFlag | ...eventFields
//! ```
//!
//! `Script-Usage-End` lines append `rows | columns | totalPanels |
//! timeTakenSeconds`. The format is consumed by downstream ingestion and
//! must stay field-compatible. Recording is best-effort: failures are
//! logged and never fail the caller.

use std::io::Write;
use std::path::PathBuf;

use crate::config::{data_dir, TelemetryConfig};

/// Timestamp layout used for log lines, e.g. `Fri Apr 04 2025 23:48:30 GMT+05:30`.
const TIMESTAMP_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%:z";

/// A single usage event.
#[derive(Debug, Clone, PartialEq)]
pub enum UsageEvent {
    /// Tool started.
    Startup,

    /// A split run began. Carries the canvas size as `WxH`.
    UsageStart { canvas: String },

    /// A split run completed successfully.
    UsageEnd {
        rows: u32,
        columns: u32,
        total_panels: u64,
        time_taken_secs: f64,
    },

    /// A run failed with the given message.
    Error { message: String },
}

impl UsageEvent {
    /// Bracketed event label written into the log line.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Startup => "Script-Startup",
            Self::UsageStart { .. } => "Script-Usage-Start",
            Self::UsageEnd { .. } => "Script-Usage-End",
            Self::Error { .. } => "Script-Error",
        }
    }

    fn extra_fields(&self) -> Vec<String> {
        match self {
            Self::Startup => vec![],
            Self::UsageStart { canvas } => vec![sanitize(canvas)],
            Self::UsageEnd {
                rows,
                columns,
                total_panels,
                time_taken_secs,
            } => vec![
                rows.to_string(),
                columns.to_string(),
                total_panels.to_string(),
                format!("{time_taken_secs:.3}"),
            ],
            Self::Error { message } => vec![sanitize(message)],
        }
    }
}

/// Appends usage events to the telemetry log.
///
/// A disabled recorder is a no-op; construct one wherever telemetry is
/// optional rather than branching at every call site.
#[derive(Debug, Clone)]
pub struct TelemetryRecorder {
    /// `None` means recording is disabled.
    path: Option<PathBuf>,
    host_version: String,
    script_version: String,
    test_user: bool,
}

impl TelemetryRecorder {
    /// A recorder that drops every event.
    pub fn disabled() -> Self {
        Self {
            path: None,
            host_version: String::new(),
            script_version: String::new(),
            test_user: false,
        }
    }

    /// Build a recorder from configuration and the host engine's version string.
    pub fn from_config(config: &TelemetryConfig, host_version: impl Into<String>) -> Self {
        if !config.enabled {
            return Self::disabled();
        }
        let path = config
            .log_file
            .clone()
            .unwrap_or_else(|| data_dir().join("usage.log"));
        Self {
            path: Some(path),
            host_version: host_version.into(),
            script_version: env!("CARGO_PKG_VERSION").to_string(),
            test_user: config.test_user,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    /// Append one event. Never fails; I/O problems are logged and dropped.
    pub fn record(&self, event: &UsageEvent) {
        let Some(path) = &self.path else {
            return;
        };
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        let line = self.format_line(&timestamp, event);
        if let Err(e) = append_line(path, &line) {
            tracing::warn!(error = %e, path = %path.display(), "Failed to record telemetry event");
        }
    }

    fn format_line(&self, timestamp: &str, event: &UsageEvent) -> String {
        let mut fields = vec![
            timestamp.to_string(),
            format!("[{}]", event.label()),
            sanitize(&self.host_version),
            sanitize(&self.script_version),
            self.test_user.to_string(),
        ];
        fields.extend(event.extra_fields());
        fields.join(" | ")
    }
}

fn append_line(path: &PathBuf, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    writeln!(file, "{line}")
}

/// Free-text fields must not break the pipe-delimited layout.
fn sanitize(value: &str) -> String {
    value.replace(['|', '\n', '\r'], " ")
}
