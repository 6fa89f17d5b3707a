//! PanelSplit host core contracts.
//!
//! This crate defines the capability surface the export pipeline requires
//! from a host editing engine, without coupling to a concrete engine. Any
//! engine that can duplicate, flatten, crop, snapshot, and export a raster
//! document can stand behind [`HostDocument`].

use std::path::Path;

use panelsplit_common::error::SplitResult;
use serde::{Deserialize, Serialize};

/// Orientation of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideOrientation {
    Horizontal,
    Vertical,
}

/// A host-visible cut line at a canvas coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    pub orientation: GuideOrientation,
    pub coordinate: f64,
}

impl GuideLine {
    pub fn horizontal(coordinate: f64) -> Self {
        Self {
            orientation: GuideOrientation::Horizontal,
            coordinate,
        }
    }

    pub fn vertical(coordinate: f64) -> Self {
        Self {
            orientation: GuideOrientation::Vertical,
            coordinate,
        }
    }
}

/// Opaque reference to a layer within a host document.
///
/// Only valid for the document that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerRef(pub usize);

/// Opaque restore token minted by [`HostDocument::capture_state`].
///
/// Only valid for the document that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateToken(pub u64);

/// Raster encoding used inside an exported artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RasterEncoding {
    Jpeg,
    Zip,
}

/// Output artifact format settings.
///
/// The panel profile is fixed; only the artifact extension varies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatProfile {
    /// PDF compatibility level (major, minor).
    pub compatibility: (u8, u8),

    /// Raster encoding for page content.
    pub encoding: RasterEncoding,

    /// JPEG quality on the host's 0–12 scale.
    pub jpeg_quality: u8,

    /// Keep layers in the artifact.
    pub layers: bool,

    /// Keep the artifact re-editable by the host.
    pub preserve_editing: bool,

    /// Open the artifact for viewing after save.
    pub view_after_save: bool,

    /// File extension used for artifact naming.
    pub extension: String,
}

impl FormatProfile {
    /// The fixed profile panels are exported with: PDF 1.4, JPEG-encoded
    /// content at maximum quality, flattened, not re-editable.
    pub fn pdf_panel() -> Self {
        Self {
            compatibility: (1, 4),
            encoding: RasterEncoding::Jpeg,
            jpeg_quality: 12,
            layers: false,
            preserve_editing: false,
            view_after_save: false,
            extension: "pdf".to_string(),
        }
    }

    /// Same profile with a different artifact extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// Capability surface the export pipeline requires from a host document.
///
/// The pipeline owns exactly one working document at a time and issues
/// strictly sequential, blocking calls against it. Implementations do not
/// need to be thread-safe.
pub trait HostDocument {
    /// Canvas width and height in canvas units.
    fn dimensions(&self) -> (f64, f64);

    /// Whether the document is in a saved state.
    fn is_saved(&self) -> bool;

    /// Create an independent working copy of this document.
    fn duplicate(&self) -> SplitResult<Box<dyn HostDocument>>;

    fn add_guide(&mut self, orientation: GuideOrientation, coordinate: f64) -> SplitResult<()>;

    fn remove_all_guides(&mut self) -> SplitResult<()>;

    /// Current guides in insertion order.
    fn guides(&self) -> Vec<GuideLine>;

    fn layer_count(&self) -> usize;

    /// The bottom-most layer, if the document has any layers.
    fn bottom_layer(&self) -> Option<LayerRef>;

    fn is_background_layer(&self, layer: LayerRef) -> bool;

    /// Unlock a background layer so the document can be flattened.
    fn unlock(&mut self, layer: LayerRef) -> SplitResult<()>;

    /// Composite all layers into a single layer.
    fn flatten(&mut self) -> SplitResult<()>;

    fn capture_state(&mut self) -> SplitResult<StateToken>;

    fn restore_state(&mut self, token: StateToken) -> SplitResult<()>;

    /// Crop the document to the given rectangle, mutating its dimensions
    /// and content in place.
    fn crop(&mut self, left: f64, top: f64, right: f64, bottom: f64) -> SplitResult<()>;

    /// Write the current document content to `path` using `profile`.
    fn export_to(&mut self, path: &Path, profile: &FormatProfile) -> SplitResult<()>;

    /// Discard the document without persisting changes.
    fn close_discarding(&mut self);
}
