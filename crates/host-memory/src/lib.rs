//! PanelSplit Memory Host
//!
//! An in-memory editing engine standing in for a proprietary raster host.
//! Documents model dimensions, layers, guides, and history states with real
//! restore semantics; exports are written as minimal single-page PDFs whose
//! page geometry matches the crop. Fault injection hooks let pipeline
//! failure paths be driven deterministically from tests and tools.

pub mod artifact;
pub mod document;

pub use document::{FaultPlan, MemoryDocument};

/// Version string reported as the host version in telemetry.
pub const ENGINE_VERSION: &str = "memory/0.1";
