use panelsplit_grid_core::planner::{plan, Boundaries, GridSpec};
use proptest::prelude::*;

fn spec(rows: u32, columns: u32) -> GridSpec {
    GridSpec { rows, columns }
}

proptest! {
    #[test]
    fn produces_exactly_rows_times_columns_cells(
        rows in 1u32..=16,
        columns in 1u32..=16,
        width in 1.0f64..10_000.0,
        height in 1.0f64..10_000.0,
    ) {
        let cells = plan(width, height, &spec(rows, columns)).unwrap();
        prop_assert_eq!(cells.len() as u64, u64::from(rows) * u64::from(columns));
    }

    #[test]
    fn cells_tile_the_canvas_exactly(
        rows in 1u32..=12,
        columns in 1u32..=12,
        width in 1.0f64..10_000.0,
        height in 1.0f64..10_000.0,
    ) {
        let grid = spec(rows, columns);
        let cells = plan(width, height, &grid).unwrap();

        for cell in &cells {
            // Strict sub-rectangle of the canvas.
            prop_assert!(cell.left < cell.right);
            prop_assert!(cell.top < cell.bottom);
            prop_assert!(cell.left >= 0.0 && cell.right <= width);
            prop_assert!(cell.top >= 0.0 && cell.bottom <= height);

            // Neighbors share edges exactly: no gaps, no overlap.
            let idx = (cell.row * columns + cell.col) as usize;
            if cell.col + 1 < columns {
                prop_assert_eq!(cell.right.to_bits(), cells[idx + 1].left.to_bits());
            }
            if cell.row + 1 < rows {
                let below = &cells[idx + columns as usize];
                prop_assert_eq!(cell.bottom.to_bits(), below.top.to_bits());
            }
        }

        // First column starts at 0, last column ends at width; same for rows.
        for cell in cells.iter().filter(|c| c.col == 0) {
            prop_assert_eq!(cell.left, 0.0);
        }
        for cell in cells.iter().filter(|c| c.col == columns - 1) {
            prop_assert_eq!(cell.right, width);
        }
        for cell in cells.iter().filter(|c| c.row == 0) {
            prop_assert_eq!(cell.top, 0.0);
        }
        for cell in cells.iter().filter(|c| c.row == rows - 1) {
            prop_assert_eq!(cell.bottom, height);
        }
    }

    #[test]
    fn cell_boundaries_follow_the_closed_form(
        rows in 1u32..=12,
        columns in 1u32..=12,
        width in 1.0f64..10_000.0,
        height in 1.0f64..10_000.0,
    ) {
        let cells = plan(width, height, &spec(rows, columns)).unwrap();
        for cell in &cells {
            if cell.col > 0 {
                let expected = width * f64::from(cell.col) / f64::from(columns);
                prop_assert_eq!(cell.left.to_bits(), expected.to_bits());
            }
            if cell.row > 0 {
                let expected = height * f64::from(cell.row) / f64::from(rows);
                prop_assert_eq!(cell.top.to_bits(), expected.to_bits());
            }
        }
    }

    #[test]
    fn emission_order_is_row_major(
        rows in 1u32..=12,
        columns in 1u32..=12,
    ) {
        let cells = plan(640.0, 480.0, &spec(rows, columns)).unwrap();
        for (idx, cell) in cells.iter().enumerate() {
            prop_assert_eq!(cell.row, idx as u32 / columns);
            prop_assert_eq!(cell.col, idx as u32 % columns);
        }
    }

    #[test]
    fn planning_is_deterministic(
        rows in 1u32..=12,
        columns in 1u32..=12,
        width in 1.0f64..10_000.0,
        height in 1.0f64..10_000.0,
    ) {
        let grid = spec(rows, columns);
        let first = Boundaries::compute(width, height, &grid).unwrap();
        let second = Boundaries::compute(width, height, &grid).unwrap();
        let bits = |cuts: &[f64]| cuts.iter().map(|c| c.to_bits()).collect::<Vec<_>>();
        prop_assert_eq!(bits(&first.row_cuts), bits(&second.row_cuts));
        prop_assert_eq!(bits(&first.col_cuts), bits(&second.col_cuts));
    }
}
