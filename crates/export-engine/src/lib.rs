//! PanelSplit Export Engine
//!
//! Drives a full split run against a host document:
//!
//! ```text
//! source document ──▶ Validate (saved, grid, output dir)
//!                          │
//!                          ▼
//!                     Duplicate ──▶ guides ──▶ unlock/flatten ──▶ baseline
//!                          │
//!                          ▼
//!                 ┌── for each cell, row-major ──┐
//!                 │  crop ▶ export Panel_<n>     │
//!                 │  restore baseline            │
//!                 └──────────────────────────────┘
//!                          │
//!                          ▼
//!                Completed / Aborted (working copy discarded)
//! ```
//!
//! The loop is strictly sequential: the working document is a single shared
//! mutable resource and the baseline restore is the only undo mechanism.

pub mod exporter;
pub mod guides;
pub mod run;
pub mod snapshot;

pub use run::{ProgressCallback, RunProgress, RunResult, RunState, SplitJob, SplitRun};
