//! Per-cell panel export.

use std::path::{Path, PathBuf};

use panelsplit_common::error::{SplitError, SplitResult};
use panelsplit_grid_core::planner::Cell;
use panelsplit_host_core::{FormatProfile, HostDocument};

/// Deterministic artifact file name for a 1-based panel index.
///
/// Consumers depend on this numbering to recover the row-major panel
/// order, so it is part of the external contract.
pub fn artifact_name(index: u32, extension: &str) -> String {
    format!("Panel_{index}.{extension}")
}

/// Result of exporting a single cell.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// 1-based panel index in row-major order.
    pub index: u32,
    pub cell: Cell,
    pub path: PathBuf,
}

/// Crop the working document to `cell` and write the panel artifact.
///
/// Mutates the document's dimensions and content; the caller must restore
/// the baseline before reusing the document for another cell. Failures are
/// not retried.
pub fn export_cell(
    doc: &mut dyn HostDocument,
    cell: &Cell,
    output_dir: &Path,
    index: u32,
    profile: &FormatProfile,
) -> SplitResult<ExportOutcome> {
    if !(cell.left < cell.right && cell.top < cell.bottom) {
        return Err(SplitError::export(format!(
            "degenerate crop bounds for panel {index}: [{}, {}, {}, {}]",
            cell.left, cell.top, cell.right, cell.bottom
        )));
    }

    let path = output_dir.join(artifact_name(index, &profile.extension));
    doc.crop(cell.left, cell.top, cell.right, cell.bottom)?;
    doc.export_to(&path, profile)?;

    tracing::debug!(
        panel = index,
        row = cell.row,
        col = cell.col,
        path = %path.display(),
        "Panel exported"
    );

    Ok(ExportOutcome {
        index,
        cell: *cell,
        path,
    })
}
