//! Editor tunables.

use crate::error::{EditorError, EditorResult};
use crate::geometry::GRID_SIZE;
use crate::history::MAX_UNDO_HISTORY;
use crate::tools::MIN_DRAW_EXTENT;
use crate::transform::MIN_RESIZE_EXTENT;
use crate::viewport::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use serde::{Deserialize, Serialize};

/// Limits and step sizes used by [`crate::Editor`]. Missing JSON fields keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum number of undo steps kept.
    pub history_limit: usize,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom change of one zoom-in/zoom-out step.
    pub zoom_step: f64,
    pub grid_size: f64,
    /// Draw gestures below this width or height are discarded.
    pub min_draw_extent: f64,
    /// Resizes that reach this width or height are rejected.
    pub min_resize_extent: f64,
    /// Offset applied to duplicated elements, on both axes.
    pub duplicate_offset: f64,
    /// Spacing of the diagonal cascade where new artboards are placed.
    pub artboard_cascade: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: MAX_UNDO_HISTORY,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            grid_size: GRID_SIZE,
            min_draw_extent: MIN_DRAW_EXTENT,
            min_resize_extent: MIN_RESIZE_EXTENT,
            duplicate_offset: 20.0,
            artboard_cascade: 50.0,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EditorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EditorResult<()> {
        if self.history_limit == 0 {
            return Err(EditorError::Config("historyLimit must be at least 1".into()));
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(EditorError::Config(format!(
                "zoom range [{}, {}] is invalid",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.grid_size <= 0.0 {
            return Err(EditorError::Config("gridSize must be positive".into()));
        }
        Ok(())
    }
}
