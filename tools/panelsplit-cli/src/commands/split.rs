//! Run a split against the in-memory engine.

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::Ordering;

use panelsplit_common::config::AppConfig;
use panelsplit_common::telemetry::{TelemetryRecorder, UsageEvent};
use panelsplit_export_engine::run::{ProgressCallback, SplitJob, SplitRun};
use panelsplit_grid_core::planner::GridSpec;
use panelsplit_host_core::FormatProfile;
use panelsplit_host_memory::{MemoryDocument, ENGINE_VERSION};

pub async fn run(
    width: f64,
    height: f64,
    rows: Option<u32>,
    columns: Option<u32>,
    output: PathBuf,
    background_layer: bool,
) -> anyhow::Result<()> {
    let config = AppConfig::load();
    let rows = rows.unwrap_or(config.export.rows);
    let columns = columns.unwrap_or(config.export.columns);
    let total = u64::from(rows) * u64::from(columns);

    println!("Splitting {width}x{height} canvas into {rows}x{columns} panels");
    println!("  Output: {}", output.display());
    println!();

    let telemetry = TelemetryRecorder::from_config(&config.telemetry, ENGINE_VERSION);
    telemetry.record(&UsageEvent::Startup);

    let mut source = MemoryDocument::new(width, height);
    if background_layer {
        source = source.with_background_layer();
    }

    let job = SplitJob {
        grid: GridSpec { rows, columns },
        output_dir: output.clone(),
        profile: FormatProfile::pdf_panel()
            .with_extension(config.export.artifact_extension.clone()),
    };

    let progress: ProgressCallback = Box::new(|p| {
        print!("\r  Panel {}/{} exported  ", p.exported, p.total);
        let _ = std::io::stdout().flush();
    });

    let mut split_run = SplitRun::new(job)
        .with_telemetry(telemetry)
        .with_progress(progress);

    let stop = split_run.stop_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop.store(true, Ordering::SeqCst);
        }
    });

    println!("Press Ctrl+C to cancel between panels...");
    let result = tokio::task::spawn_blocking(move || split_run.execute(&source)).await?;
    println!();

    if let Some(failure) = result.failure {
        println!(
            "Split aborted after {} of {total} panels; finished panels remain in {}",
            result.exported,
            output.display()
        );
        return Err(failure.into());
    }

    if result.cancelled {
        println!(
            "Split cancelled: {} of {total} panels exported to {}",
            result.exported,
            output.display()
        );
    } else {
        println!(
            "Split complete: {} panels exported to {} in {:.2}s",
            result.exported,
            output.display(),
            result.elapsed.as_secs_f64()
        );
    }

    Ok(())
}
