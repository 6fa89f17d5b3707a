//! Guide placement planning.
//!
//! Guides mirror the computed cut boundaries as host-visible cut lines.
//! The four canvas-edge guides come first, then the interior cuts, so a
//! host that sorts by coordinate reconstructs exactly the boundary sets.

use panelsplit_grid_core::planner::Boundaries;
use panelsplit_host_core::GuideLine;

/// Guide lines for a planned grid: outer edges, then interior cuts.
pub fn guide_plan(bounds: &Boundaries) -> Vec<GuideLine> {
    let height = *bounds.row_cuts.last().unwrap_or(&0.0);
    let width = *bounds.col_cuts.last().unwrap_or(&0.0);

    let mut guides = Vec::with_capacity(bounds.row_cuts.len() + bounds.col_cuts.len());
    guides.push(GuideLine::horizontal(0.0));
    guides.push(GuideLine::horizontal(height));
    guides.push(GuideLine::vertical(0.0));
    guides.push(GuideLine::vertical(width));

    for &cut in interior(&bounds.row_cuts) {
        guides.push(GuideLine::horizontal(cut));
    }
    for &cut in interior(&bounds.col_cuts) {
        guides.push(GuideLine::vertical(cut));
    }
    guides
}

fn interior(cuts: &[f64]) -> &[f64] {
    if cuts.len() <= 2 {
        &[]
    } else {
        &cuts[1..cuts.len() - 1]
    }
}
