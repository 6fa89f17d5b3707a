//! Baseline snapshot discipline.
//!
//! The baseline is captured once, after the working document has been
//! flattened to a single composited layer, and restored after every panel
//! export. Restores must be lossless: the wrapper fingerprints the document
//! at capture time and verifies dimensions, layer count, and guide
//! placement after each restore. Any fidelity loss is fatal for the run.

use panelsplit_common::error::{SplitError, SplitResult};
use panelsplit_host_core::{GuideLine, HostDocument, StateToken};

/// A captured baseline plus the fingerprint used to verify restores.
#[derive(Debug, Clone)]
pub struct Baseline {
    token: StateToken,
    width: f64,
    height: f64,
    layer_count: usize,
    guides: Vec<GuideLine>,
}

impl Baseline {
    /// One-time preparation: unlock a locked background layer, flatten,
    /// and capture the restore token.
    pub fn prepare(doc: &mut dyn HostDocument) -> SplitResult<Self> {
        if let Some(layer) = doc.bottom_layer() {
            if doc.is_background_layer(layer) {
                tracing::debug!("Unlocking background layer before flatten");
                doc.unlock(layer)?;
            }
        }
        doc.flatten()?;

        let token = doc.capture_state().map_err(as_host_state)?;
        let (width, height) = doc.dimensions();
        Ok(Self {
            token,
            width,
            height,
            layer_count: doc.layer_count(),
            guides: doc.guides(),
        })
    }

    /// Reset the document to the baseline and verify fidelity.
    pub fn restore(&self, doc: &mut dyn HostDocument) -> SplitResult<()> {
        doc.restore_state(self.token).map_err(as_host_state)?;
        self.verify(doc)
    }

    fn verify(&self, doc: &dyn HostDocument) -> SplitResult<()> {
        let (width, height) = doc.dimensions();
        if width != self.width || height != self.height {
            return Err(SplitError::host_state(format!(
                "restore lost dimensions: expected {}x{}, got {width}x{height}",
                self.width, self.height
            )));
        }
        if doc.layer_count() != self.layer_count {
            return Err(SplitError::host_state(format!(
                "restore lost layers: expected {}, got {}",
                self.layer_count,
                doc.layer_count()
            )));
        }
        if doc.guides() != self.guides {
            return Err(SplitError::host_state("restore lost guide placement"));
        }
        Ok(())
    }
}

/// Capture/restore problems are host-state failures whatever the host
/// reported them as.
fn as_host_state(err: SplitError) -> SplitError {
    match err {
        host_state @ SplitError::HostState { .. } => host_state,
        other => SplitError::host_state(format!("snapshot operation failed: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelsplit_host_core::GuideOrientation;
    use panelsplit_host_memory::{FaultPlan, MemoryDocument};

    #[test]
    fn prepare_unlocks_flattens_and_fingerprints() {
        let mut doc = MemoryDocument::new(1000.0, 800.0).with_background_layer();
        doc.add_guide(GuideOrientation::Vertical, 500.0).unwrap();

        let baseline = Baseline::prepare(&mut doc).unwrap();
        assert_eq!(doc.layer_count(), 1);

        doc.crop(0.0, 0.0, 500.0, 400.0).unwrap();
        baseline.restore(&mut doc).unwrap();
        assert_eq!(doc.dimensions(), (1000.0, 800.0));
        assert_eq!(doc.guides().len(), 1);
    }

    #[test]
    fn restore_fidelity_loss_is_a_host_state_error() {
        let mut doc = MemoryDocument::new(1000.0, 800.0).with_faults(FaultPlan {
            drop_guides_on_restore: true,
            ..FaultPlan::default()
        });
        doc.add_guide(GuideOrientation::Horizontal, 400.0).unwrap();

        let baseline = Baseline::prepare(&mut doc).unwrap();
        let err = baseline.restore(&mut doc).unwrap_err();
        assert!(matches!(err, SplitError::HostState { .. }));
    }

    #[test]
    fn capture_failure_is_a_host_state_error() {
        let mut doc = MemoryDocument::new(100.0, 100.0).with_faults(FaultPlan {
            fail_capture: true,
            ..FaultPlan::default()
        });
        let err = Baseline::prepare(&mut doc).unwrap_err();
        assert!(matches!(err, SplitError::HostState { .. }));
    }
}
