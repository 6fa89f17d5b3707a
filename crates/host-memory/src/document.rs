//! In-memory host document.

use std::collections::HashMap;
use std::path::Path;

use panelsplit_common::error::{SplitError, SplitResult};
use panelsplit_host_core::{
    FormatProfile, GuideLine, GuideOrientation, HostDocument, LayerRef, StateToken,
};

use crate::artifact;

#[derive(Debug, Clone, PartialEq)]
struct Layer {
    name: String,
    background: bool,
    locked: bool,
}

/// Everything a history state has to reproduce.
#[derive(Debug, Clone, PartialEq)]
struct DocState {
    width: f64,
    height: f64,
    layers: Vec<Layer>,
    guides: Vec<GuideLine>,
}

/// Deterministic failure injection for exercising pipeline error paths.
///
/// The plan is carried into duplicates, so a fault configured on a source
/// document fires on the working copy the pipeline derives from it.
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    /// 1-based export call that fails with an export error.
    pub fail_export_on: Option<u32>,

    /// 1-based restore call that fails outright.
    pub fail_restore_on: Option<u32>,

    /// Restores succeed but silently lose guide placement (fidelity loss).
    pub drop_guides_on_restore: bool,

    /// State capture fails outright.
    pub fail_capture: bool,
}

/// An in-memory raster document.
///
/// Layers are stored bottom-first; a fresh document has a single unlocked
/// layer and counts as saved.
#[derive(Debug)]
pub struct MemoryDocument {
    width: f64,
    height: f64,
    saved: bool,
    layers: Vec<Layer>,
    guides: Vec<GuideLine>,
    states: HashMap<u64, DocState>,
    next_token: u64,
    export_calls: u32,
    restore_calls: u32,
    faults: FaultPlan,
    closed: bool,
}

impl MemoryDocument {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            saved: true,
            layers: vec![Layer {
                name: "Layer 1".to_string(),
                background: false,
                locked: false,
            }],
            guides: Vec::new(),
            states: HashMap::new(),
            next_token: 1,
            export_calls: 0,
            restore_calls: 0,
            faults: FaultPlan::default(),
            closed: false,
        }
    }

    /// Add a locked background layer below the existing layers.
    pub fn with_background_layer(mut self) -> Self {
        self.layers.insert(
            0,
            Layer {
                name: "Background".to_string(),
                background: true,
                locked: true,
            },
        );
        self
    }

    /// Mark the document as having unsaved changes.
    pub fn mark_unsaved(mut self) -> Self {
        self.saved = false;
        self
    }

    pub fn with_faults(mut self, faults: FaultPlan) -> Self {
        self.faults = faults;
        self
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of export calls issued against this document.
    pub fn export_calls(&self) -> u32 {
        self.export_calls
    }

    fn ensure_open(&self) -> SplitResult<()> {
        if self.closed {
            return Err(SplitError::host_state("document has been closed"));
        }
        Ok(())
    }

    fn snapshot(&self) -> DocState {
        DocState {
            width: self.width,
            height: self.height,
            layers: self.layers.clone(),
            guides: self.guides.clone(),
        }
    }
}

impl HostDocument for MemoryDocument {
    fn dimensions(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn is_saved(&self) -> bool {
        self.saved
    }

    fn duplicate(&self) -> SplitResult<Box<dyn HostDocument>> {
        self.ensure_open()?;
        Ok(Box::new(Self {
            width: self.width,
            height: self.height,
            // A duplicate has never been written to disk.
            saved: false,
            layers: self.layers.clone(),
            guides: self.guides.clone(),
            states: HashMap::new(),
            next_token: 1,
            export_calls: 0,
            restore_calls: 0,
            faults: self.faults.clone(),
            closed: false,
        }))
    }

    fn add_guide(&mut self, orientation: GuideOrientation, coordinate: f64) -> SplitResult<()> {
        self.ensure_open()?;
        self.guides.push(GuideLine {
            orientation,
            coordinate,
        });
        Ok(())
    }

    fn remove_all_guides(&mut self) -> SplitResult<()> {
        self.ensure_open()?;
        self.guides.clear();
        Ok(())
    }

    fn guides(&self) -> Vec<GuideLine> {
        self.guides.clone()
    }

    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn bottom_layer(&self) -> Option<LayerRef> {
        if self.layers.is_empty() {
            None
        } else {
            Some(LayerRef(0))
        }
    }

    fn is_background_layer(&self, layer: LayerRef) -> bool {
        self.layers.get(layer.0).is_some_and(|l| l.background)
    }

    fn unlock(&mut self, layer: LayerRef) -> SplitResult<()> {
        self.ensure_open()?;
        let layer = self
            .layers
            .get_mut(layer.0)
            .ok_or_else(|| SplitError::host_state("unlock: no such layer"))?;
        layer.locked = false;
        layer.background = false;
        Ok(())
    }

    fn flatten(&mut self) -> SplitResult<()> {
        self.ensure_open()?;
        if self.layers.iter().any(|l| l.locked) {
            return Err(SplitError::host_state(
                "cannot flatten: a locked layer is present",
            ));
        }
        self.layers = vec![Layer {
            name: "Flattened".to_string(),
            background: false,
            locked: false,
        }];
        self.saved = false;
        Ok(())
    }

    fn capture_state(&mut self) -> SplitResult<StateToken> {
        self.ensure_open()?;
        if self.faults.fail_capture {
            return Err(SplitError::host_state("simulated state capture failure"));
        }
        let token = StateToken(self.next_token);
        self.next_token += 1;
        self.states.insert(token.0, self.snapshot());
        Ok(token)
    }

    fn restore_state(&mut self, token: StateToken) -> SplitResult<()> {
        self.ensure_open()?;
        self.restore_calls += 1;
        if self.faults.fail_restore_on == Some(self.restore_calls) {
            return Err(SplitError::host_state(format!(
                "simulated restore failure on restore #{}",
                self.restore_calls
            )));
        }
        let state = self
            .states
            .get(&token.0)
            .ok_or_else(|| SplitError::host_state("restore: unknown state token"))?
            .clone();
        self.width = state.width;
        self.height = state.height;
        self.layers = state.layers;
        self.guides = state.guides;
        if self.faults.drop_guides_on_restore {
            self.guides.clear();
        }
        Ok(())
    }

    fn crop(&mut self, left: f64, top: f64, right: f64, bottom: f64) -> SplitResult<()> {
        self.ensure_open()?;
        if !(left < right && top < bottom) {
            return Err(SplitError::export(format!(
                "degenerate crop bounds [{left}, {top}, {right}, {bottom}]"
            )));
        }
        if left < 0.0 || top < 0.0 || right > self.width || bottom > self.height {
            return Err(SplitError::export(format!(
                "crop bounds [{left}, {top}, {right}, {bottom}] exceed canvas {}x{}",
                self.width, self.height
            )));
        }
        self.width = right - left;
        self.height = bottom - top;
        self.saved = false;
        Ok(())
    }

    fn export_to(&mut self, path: &Path, profile: &FormatProfile) -> SplitResult<()> {
        self.ensure_open()?;
        self.export_calls += 1;
        if self.faults.fail_export_on == Some(self.export_calls) {
            return Err(SplitError::export(format!(
                "simulated export failure on export #{}",
                self.export_calls
            )));
        }
        artifact::write_pdf(path, self.width, self.height, profile).map_err(|e| {
            SplitError::export(format!("failed to write {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "Artifact written");
        Ok(())
    }

    fn close_discarding(&mut self) {
        self.closed = true;
        self.states.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_returns_document_to_captured_state() {
        let mut doc = MemoryDocument::new(1000.0, 800.0);
        doc.add_guide(GuideOrientation::Horizontal, 400.0).unwrap();
        doc.flatten().unwrap();
        let token = doc.capture_state().unwrap();

        doc.crop(0.0, 0.0, 500.0, 400.0).unwrap();
        assert_eq!(doc.dimensions(), (500.0, 400.0));

        doc.restore_state(token).unwrap();
        assert_eq!(doc.dimensions(), (1000.0, 800.0));
        assert_eq!(doc.guides().len(), 1);
        assert_eq!(doc.layer_count(), 1);
    }

    #[test]
    fn duplicate_is_independent_and_unsaved() {
        let source = MemoryDocument::new(640.0, 480.0);
        let mut working = source.duplicate().unwrap();
        working.crop(0.0, 0.0, 320.0, 240.0).unwrap();

        assert_eq!(source.dimensions(), (640.0, 480.0));
        assert!(source.is_saved());
        assert_eq!(working.dimensions(), (320.0, 240.0));
        assert!(!working.is_saved());
    }

    #[test]
    fn locked_background_blocks_flatten_until_unlocked() {
        let mut doc = MemoryDocument::new(100.0, 100.0).with_background_layer();
        assert_eq!(doc.layer_count(), 2);
        assert!(doc.flatten().is_err());

        let bottom = doc.bottom_layer().unwrap();
        assert!(doc.is_background_layer(bottom));
        doc.unlock(bottom).unwrap();
        doc.flatten().unwrap();
        assert_eq!(doc.layer_count(), 1);
    }

    #[test]
    fn crop_rejects_degenerate_and_out_of_bounds_rectangles() {
        let mut doc = MemoryDocument::new(100.0, 100.0);
        assert!(doc.crop(50.0, 0.0, 50.0, 100.0).is_err());
        assert!(doc.crop(0.0, 0.0, 150.0, 100.0).is_err());
        assert_eq!(doc.dimensions(), (100.0, 100.0));
    }

    #[test]
    fn export_fault_fires_on_the_designated_call() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = MemoryDocument::new(100.0, 100.0).with_faults(FaultPlan {
            fail_export_on: Some(2),
            ..FaultPlan::default()
        });
        let profile = FormatProfile::pdf_panel();

        assert!(doc.export_to(&dir.path().join("a.pdf"), &profile).is_ok());
        assert!(doc.export_to(&dir.path().join("b.pdf"), &profile).is_err());
        assert!(doc.export_to(&dir.path().join("c.pdf"), &profile).is_ok());
    }

    #[test]
    fn closed_document_rejects_further_operations() {
        let mut doc = MemoryDocument::new(100.0, 100.0);
        doc.close_discarding();
        assert!(doc.is_closed());
        assert!(doc.flatten().is_err());
        assert!(doc.duplicate().is_err());
    }
}
