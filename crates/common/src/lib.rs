//! PanelSplit Common Utilities
//!
//! Shared infrastructure for all PanelSplit crates:
//! - Error types and result aliases
//! - Configuration loading
//! - Tracing/logging initialization
//! - Usage telemetry line log

pub mod config;
pub mod error;
pub mod logging;
pub mod telemetry;

pub use config::*;
pub use error::*;
