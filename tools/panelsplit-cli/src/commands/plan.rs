//! Show the grid plan for a canvas.

use panelsplit_grid_core::planner::{Boundaries, Cell, GridSpec};

#[derive(serde::Serialize)]
struct PlanOutput<'a> {
    width: f64,
    height: f64,
    rows: u32,
    columns: u32,
    row_cuts: &'a [f64],
    col_cuts: &'a [f64],
    cells: &'a [Cell],
}

pub fn run(width: f64, height: f64, rows: u32, columns: u32, json: bool) -> anyhow::Result<()> {
    let spec = GridSpec::new(rows, columns)?;
    let bounds = Boundaries::compute(width, height, &spec)?;
    let cells = bounds.cells();

    if json {
        let output = PlanOutput {
            width,
            height,
            rows,
            columns,
            row_cuts: &bounds.row_cuts,
            col_cuts: &bounds.col_cuts,
            cells: &cells,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Canvas: {width}x{height}");
    println!(
        "Grid: {rows} rows x {columns} columns ({} panels)",
        spec.cell_count()
    );
    println!("Row cuts: {:?}", bounds.row_cuts);
    println!("Column cuts: {:?}", bounds.col_cuts);
    println!();
    for (idx, cell) in cells.iter().enumerate() {
        println!(
            "  Panel_{}: [{:.2}, {:.2}] -> [{:.2}, {:.2}]  ({:.2} x {:.2})",
            idx + 1,
            cell.left,
            cell.top,
            cell.right,
            cell.bottom,
            cell.width(),
            cell.height()
        );
    }

    Ok(())
}
