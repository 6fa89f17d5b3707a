//! Grid partition planning.
//!
//! Coordinates are real-valued canvas units with `(0, 0)` at the top-left.
//! Cut coordinates are computed by exact division of the full extent, never
//! by accumulating a pre-rounded per-cell size, so the right/bottom edges
//! always land exactly on the canvas extent.

use panelsplit_common::error::{SplitError, SplitResult};
use serde::{Deserialize, Serialize};

/// Number of rows and columns to split a canvas into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: u32,
    pub columns: u32,
}

impl GridSpec {
    /// Create a spec, rejecting zero rows or columns.
    pub fn new(rows: u32, columns: u32) -> SplitResult<Self> {
        let spec = Self { rows, columns };
        spec.validate()?;
        Ok(spec)
    }

    /// Both counts must be at least 1.
    pub fn validate(&self) -> SplitResult<()> {
        if self.rows < 1 || self.columns < 1 {
            return Err(SplitError::validation(format!(
                "grid must have at least 1 row and 1 column (got {}x{})",
                self.rows, self.columns
            )));
        }
        Ok(())
    }

    /// Total number of cells the grid produces.
    pub fn cell_count(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.columns)
    }
}

/// One rectangular sub-region of the canvas.
///
/// Always a strict sub-rectangle: `left < right`, `top < bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Zero-based row index (outer iteration order).
    pub row: u32,
    /// Zero-based column index (inner iteration order).
    pub col: u32,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Cell {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// The full ordered cut-coordinate sets for a planned grid.
///
/// `row_cuts` runs `0 = b0 < b1 < … < bR = height`; `col_cuts` runs
/// `0 = c0 < c1 < … < cC = width`. Cell `(i, j)` spans
/// `[col_cuts[j], col_cuts[j+1]] × [row_cuts[i], row_cuts[i+1]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundaries {
    pub row_cuts: Vec<f64>,
    pub col_cuts: Vec<f64>,
}

impl Boundaries {
    /// Compute the cut coordinates for a canvas and grid spec.
    pub fn compute(width: f64, height: f64, spec: &GridSpec) -> SplitResult<Self> {
        spec.validate()?;
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(SplitError::validation(format!(
                "canvas dimensions must be positive finite values (got {width}x{height})"
            )));
        }

        let bounds = Self {
            row_cuts: cut_coordinates(height, spec.rows),
            col_cuts: cut_coordinates(width, spec.columns),
        };

        // Adjacent cuts can collide only when the canvas extent is too
        // small for the requested count to be representable.
        if !strictly_increasing(&bounds.row_cuts) || !strictly_increasing(&bounds.col_cuts) {
            return Err(SplitError::validation(format!(
                "canvas {width}x{height} is too small to split into {}x{} cells",
                spec.rows, spec.columns
            )));
        }

        Ok(bounds)
    }

    /// Materialize the cells in row-major order: all columns of row 0,
    /// then row 1, and so on.
    pub fn cells(&self) -> Vec<Cell> {
        let rows = self.row_cuts.len() - 1;
        let cols = self.col_cuts.len() - 1;
        let mut cells = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                cells.push(Cell {
                    row: i as u32,
                    col: j as u32,
                    left: self.col_cuts[j],
                    top: self.row_cuts[i],
                    right: self.col_cuts[j + 1],
                    bottom: self.row_cuts[i + 1],
                });
            }
        }
        cells
    }
}

/// Plan the full cell list for a canvas.
///
/// Deterministic: identical inputs always yield bit-identical output.
pub fn plan(width: f64, height: f64, spec: &GridSpec) -> SplitResult<Vec<Cell>> {
    Boundaries::compute(width, height, spec).map(|bounds| bounds.cells())
}

/// `extent * i / parts` for i in `0..=parts`, with both endpoints pinned
/// exactly to `0` and `extent`.
fn cut_coordinates(extent: f64, parts: u32) -> Vec<f64> {
    (0..=parts)
        .map(|i| {
            if i == parts {
                extent
            } else {
                extent * f64::from(i) / f64::from(parts)
            }
        })
        .collect()
}

fn strictly_increasing(cuts: &[f64]) -> bool {
    cuts.windows(2).all(|pair| pair[0] < pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_matches_expected_boundaries() {
        let spec = GridSpec::new(2, 2).unwrap();
        let bounds = Boundaries::compute(1000.0, 800.0, &spec).unwrap();
        assert_eq!(bounds.row_cuts, vec![0.0, 400.0, 800.0]);
        assert_eq!(bounds.col_cuts, vec![0.0, 500.0, 1000.0]);

        let cells = bounds.cells();
        assert_eq!(cells.len(), 4);
        // Row-major: Panel_1 is top-left, Panel_2 top-right.
        assert_eq!(
            cells[0],
            Cell {
                row: 0,
                col: 0,
                left: 0.0,
                top: 0.0,
                right: 500.0,
                bottom: 400.0
            }
        );
        assert_eq!(
            cells[1],
            Cell {
                row: 0,
                col: 1,
                left: 500.0,
                top: 0.0,
                right: 1000.0,
                bottom: 400.0
            }
        );
        assert_eq!(
            cells[2],
            Cell {
                row: 1,
                col: 0,
                left: 0.0,
                top: 400.0,
                right: 500.0,
                bottom: 800.0
            }
        );
        assert_eq!(
            cells[3],
            Cell {
                row: 1,
                col: 1,
                left: 500.0,
                top: 400.0,
                right: 1000.0,
                bottom: 800.0
            }
        );
    }

    #[test]
    fn single_cell_covers_the_whole_canvas() {
        let spec = GridSpec::new(1, 1).unwrap();
        let cells = plan(1234.5, 678.9, &spec).unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].left, 0.0);
        assert_eq!(cells[0].top, 0.0);
        assert_eq!(cells[0].right, 1234.5);
        assert_eq!(cells[0].bottom, 678.9);
    }

    #[test]
    fn zero_rows_or_columns_are_rejected() {
        assert!(GridSpec::new(0, 2).is_err());
        assert!(GridSpec::new(2, 0).is_err());
        let spec = GridSpec { rows: 0, columns: 3 };
        assert!(plan(100.0, 100.0, &spec).is_err());
    }

    #[test]
    fn non_positive_canvas_is_rejected() {
        let spec = GridSpec::new(2, 2).unwrap();
        assert!(plan(0.0, 100.0, &spec).is_err());
        assert!(plan(100.0, -1.0, &spec).is_err());
        assert!(plan(f64::NAN, 100.0, &spec).is_err());
    }

    #[test]
    fn outer_boundaries_are_exact_even_for_awkward_divisions() {
        // 1000 / 3 is not representable; the final cut must still be 1000.
        let spec = GridSpec::new(3, 7).unwrap();
        let bounds = Boundaries::compute(1000.0, 997.0, &spec).unwrap();
        assert_eq!(*bounds.col_cuts.first().unwrap(), 0.0);
        assert_eq!(*bounds.col_cuts.last().unwrap(), 1000.0);
        assert_eq!(*bounds.row_cuts.first().unwrap(), 0.0);
        assert_eq!(*bounds.row_cuts.last().unwrap(), 997.0);
    }

    #[test]
    fn planning_twice_is_bit_identical() {
        let spec = GridSpec::new(7, 11).unwrap();
        let a = plan(1920.0, 1080.0, &spec).unwrap();
        let b = plan(1920.0, 1080.0, &spec).unwrap();
        assert_eq!(a.len(), b.len());
        for (left, right) in a.iter().zip(&b) {
            assert_eq!(left.left.to_bits(), right.left.to_bits());
            assert_eq!(left.top.to_bits(), right.top.to_bits());
            assert_eq!(left.right.to_bits(), right.right.to_bits());
            assert_eq!(left.bottom.to_bits(), right.bottom.to_bits());
        }
    }

    #[test]
    fn degenerate_tiny_canvas_is_rejected() {
        // Adjacent cuts collapse in f64 for the smallest subnormal extent.
        let tiny = f64::from_bits(1);
        let spec = GridSpec::new(1, 3).unwrap();
        assert!(plan(tiny, 100.0, &spec).is_err());
    }
}
