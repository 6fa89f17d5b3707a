//! Split run orchestration.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use panelsplit_common::error::{SplitError, SplitResult};
use panelsplit_common::telemetry::{TelemetryRecorder, UsageEvent};
use panelsplit_grid_core::planner::{Boundaries, GridSpec};
use panelsplit_host_core::{FormatProfile, HostDocument};

use crate::exporter;
use crate::guides::guide_plan;
use crate::snapshot::Baseline;

/// Configuration for one split run.
#[derive(Debug, Clone)]
pub struct SplitJob {
    /// Row and column counts.
    pub grid: GridSpec,

    /// Directory panel artifacts are written into.
    pub output_dir: PathBuf,

    /// Artifact format settings.
    pub profile: FormatProfile,
}

/// States of a split run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Run created but not started.
    Idle,
    /// Checking inputs; nothing has been mutated or written.
    Validating,
    /// Duplicating, placing guides, flattening, capturing the baseline.
    Preparing,
    /// Iterating cells and writing artifacts.
    Exporting,
    /// Every cell exported.
    Completed,
    /// Stopped early: validation failure, export/host error, or cancel.
    Aborted,
}

/// Progress report delivered between cells.
#[derive(Debug, Clone)]
pub struct RunProgress {
    /// Panels exported so far.
    pub exported: u64,
    /// Total panels the run will attempt.
    pub total: u64,
    pub state: RunState,
}

/// Progress callback for split runs.
pub type ProgressCallback = Box<dyn Fn(RunProgress) + Send>;

/// Final outcome of a split run.
#[derive(Debug)]
pub struct RunResult {
    /// `Completed` or `Aborted`.
    pub state: RunState,

    /// Cells for which an export was attempted.
    pub attempted: u64,

    /// Artifacts actually written; these files remain on disk even when
    /// the run aborted later.
    pub exported: u64,

    /// Wall time from the start of Preparing to the end of Exporting.
    pub elapsed: Duration,

    /// First failure, if any. The run stops at the failing cell.
    pub failure: Option<SplitError>,

    /// Whether a cooperative cancel ended the run between cells.
    pub cancelled: bool,

    /// Paths written, in row-major panel order.
    pub artifacts: Vec<PathBuf>,
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        self.state == RunState::Completed
    }
}

#[derive(Default)]
struct LoopState {
    total: u64,
    attempted: u64,
    exported: u64,
    cancelled: bool,
    artifacts: Vec<PathBuf>,
}

/// A split run that coordinates validation, preparation, and the export loop.
pub struct SplitRun {
    job: SplitJob,
    state: RunState,
    stop_flag: Arc<AtomicBool>,
    telemetry: TelemetryRecorder,
    progress: Option<ProgressCallback>,
}

impl SplitRun {
    /// Create a run with telemetry disabled and no progress reporting.
    pub fn new(job: SplitJob) -> Self {
        Self {
            job,
            state: RunState::Idle,
            stop_flag: Arc::new(AtomicBool::new(false)),
            telemetry: TelemetryRecorder::disabled(),
            progress: None,
        }
    }

    /// Attach a telemetry recorder. Threaded in explicitly; the run never
    /// consults ambient global state.
    pub fn with_telemetry(mut self, recorder: TelemetryRecorder) -> Self {
        self.telemetry = recorder;
        self
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Get a clone of the stop flag for cooperative cancellation.
    /// Cancellation is observed between cells, never mid-export.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Drive the full pipeline against `source`.
    ///
    /// The source document is never mutated; all work happens on a
    /// duplicate that is discarded on every outcome. Errors are reported
    /// through the returned [`RunResult`], never swallowed.
    pub fn execute(&mut self, source: &dyn HostDocument) -> RunResult {
        self.state = RunState::Validating;
        tracing::info!(
            rows = self.job.grid.rows,
            columns = self.job.grid.columns,
            output = %self.job.output_dir.display(),
            "Validating split job"
        );

        let bounds = match self.validate(source) {
            Ok(bounds) => bounds,
            Err(failure) => return self.abort_before_start(failure),
        };

        let (width, height) = source.dimensions();
        self.telemetry.record(&UsageEvent::UsageStart {
            canvas: format!("{width}x{height}"),
        });

        self.state = RunState::Preparing;
        let started = Instant::now();
        let mut loop_state = LoopState::default();

        let mut working = match source.duplicate() {
            Ok(doc) => doc,
            Err(failure) => return self.finish(loop_state, Some(failure), started.elapsed()),
        };

        let failure = self
            .run_pipeline(working.as_mut(), &bounds, &mut loop_state)
            .err();
        let elapsed = started.elapsed();

        // Discarded on success, partial success, and abort alike.
        working.close_discarding();

        self.finish(loop_state, failure, elapsed)
    }

    /// All checks run before any document mutation or file write.
    fn validate(&self, source: &dyn HostDocument) -> SplitResult<Boundaries> {
        if !source.is_saved() {
            return Err(SplitError::validation(
                "source document has unsaved changes; save it before splitting",
            ));
        }
        self.job.grid.validate()?;
        validate_output_dir(&self.job.output_dir)?;

        let (width, height) = source.dimensions();
        Boundaries::compute(width, height, &self.job.grid)
    }

    fn run_pipeline(
        &mut self,
        doc: &mut dyn HostDocument,
        bounds: &Boundaries,
        loop_state: &mut LoopState,
    ) -> SplitResult<()> {
        doc.remove_all_guides()?;
        for guide in guide_plan(bounds) {
            doc.add_guide(guide.orientation, guide.coordinate)?;
        }

        let baseline = Baseline::prepare(doc)?;
        let cells = bounds.cells();
        loop_state.total = cells.len() as u64;
        tracing::info!(
            panels = loop_state.total,
            "Working document prepared, baseline captured"
        );

        self.state = RunState::Exporting;
        for (idx, cell) in cells.iter().enumerate() {
            if self.stop_flag.load(Ordering::SeqCst) {
                tracing::info!(
                    exported = loop_state.exported,
                    "Cancellation observed between cells"
                );
                loop_state.cancelled = true;
                return Ok(());
            }

            let index = idx as u32 + 1;
            loop_state.attempted += 1;
            let outcome = exporter::export_cell(
                doc,
                cell,
                &self.job.output_dir,
                index,
                &self.job.profile,
            )?;
            loop_state.exported += 1;
            loop_state.artifacts.push(outcome.path);

            // Every cell starts from the identical flattened baseline.
            baseline.restore(doc)?;
            self.report_progress(loop_state);
        }
        Ok(())
    }

    fn abort_before_start(&mut self, failure: SplitError) -> RunResult {
        self.state = RunState::Aborted;
        tracing::error!(error = %failure, "Split job rejected during validation");
        self.telemetry.record(&UsageEvent::Error {
            message: format!("{}: {failure}", failure.kind()),
        });
        RunResult {
            state: RunState::Aborted,
            attempted: 0,
            exported: 0,
            elapsed: Duration::ZERO,
            failure: Some(failure),
            cancelled: false,
            artifacts: Vec::new(),
        }
    }

    fn finish(
        &mut self,
        loop_state: LoopState,
        failure: Option<SplitError>,
        elapsed: Duration,
    ) -> RunResult {
        let completed =
            failure.is_none() && !loop_state.cancelled && loop_state.exported == loop_state.total;
        self.state = if completed {
            RunState::Completed
        } else {
            RunState::Aborted
        };

        if let Some(failure) = &failure {
            tracing::error!(
                error = %failure,
                exported = loop_state.exported,
                attempted = loop_state.attempted,
                "Split run aborted; already-written panels remain on disk"
            );
            self.telemetry.record(&UsageEvent::Error {
                message: format!("{}: {failure}", failure.kind()),
            });
        } else if completed {
            tracing::info!(
                panels = loop_state.exported,
                elapsed_secs = elapsed.as_secs_f64(),
                "Split run completed"
            );
            self.telemetry.record(&UsageEvent::UsageEnd {
                rows: self.job.grid.rows,
                columns: self.job.grid.columns,
                total_panels: loop_state.exported,
                time_taken_secs: elapsed.as_secs_f64(),
            });
        } else {
            tracing::info!(exported = loop_state.exported, "Split run cancelled");
        }

        RunResult {
            state: self.state,
            attempted: loop_state.attempted,
            exported: loop_state.exported,
            elapsed,
            failure,
            cancelled: loop_state.cancelled,
            artifacts: loop_state.artifacts,
        }
    }

    fn report_progress(&self, loop_state: &LoopState) {
        if let Some(callback) = &self.progress {
            callback(RunProgress {
                exported: loop_state.exported,
                total: loop_state.total,
                state: self.state,
            });
        }
    }
}

/// The output directory must exist and be writable before the run starts.
/// Checked by metadata only, so validation stays free of side effects.
fn validate_output_dir(dir: &Path) -> SplitResult<()> {
    let metadata = std::fs::metadata(dir).map_err(|_| {
        SplitError::validation(format!(
            "output directory {} does not exist",
            dir.display()
        ))
    })?;
    if !metadata.is_dir() {
        return Err(SplitError::validation(format!(
            "output path {} is not a directory",
            dir.display()
        )));
    }
    if metadata.permissions().readonly() {
        return Err(SplitError::validation(format!(
            "output directory {} is not writable",
            dir.display()
        )));
    }
    Ok(())
}
