//! Viewport module for the pan/zoom camera transform.

use crate::geometry::clamp;
use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest zoom factor reachable through [`Viewport::zoom_by`].
pub const MIN_ZOOM: f64 = 0.1;
/// Largest zoom factor reachable through [`Viewport::zoom_by`].
pub const MAX_ZOOM: f64 = 5.0;
/// Zoom increment used by the zoom-in/zoom-out shortcuts.
pub const ZOOM_STEP: f64 = 0.1;

/// Camera transform mapping canvas space onto the screen.
///
/// `screen = canvas * zoom + offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Horizontal pan, in screen pixels.
    pub offset_x: f64,
    /// Vertical pan, in screen pixels.
    pub offset_y: f64,
    /// Scale factor.
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Partial viewport update; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportUpdate {
    pub offset_x: Option<f64>,
    pub offset_y: Option<f64>,
    pub zoom: Option<f64>,
}

impl Viewport {
    /// Create a viewport at the origin with 100% zoom.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pan offset as a vector.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }

    /// Affine transform converting canvas coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset()) * Affine::scale(self.zoom)
    }

    /// Affine transform converting screen coordinates to canvas coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset())
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        Point::new(
            (screen_point.x - self.offset_x) / self.zoom,
            (screen_point.y - self.offset_y) / self.zoom,
        )
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        Point::new(
            canvas_point.x * self.zoom + self.offset_x,
            canvas_point.y * self.zoom + self.offset_y,
        )
    }

    /// Scale a screen-space drag delta into canvas units.
    pub fn screen_delta_to_canvas(&self, delta: Vec2) -> Vec2 {
        delta / self.zoom
    }

    /// Shallow-merge the provided fields. Zoom is not clamped here.
    pub fn apply(&mut self, update: ViewportUpdate) {
        if let Some(x) = update.offset_x {
            self.offset_x = x;
        }
        if let Some(y) = update.offset_y {
            self.offset_y = y;
        }
        if let Some(zoom) = update.zoom {
            self.zoom = zoom;
        }
    }

    /// Add `delta` to the zoom factor, clamped to `[min_zoom, max_zoom]`.
    pub fn zoom_by(&mut self, delta: f64, min_zoom: f64, max_zoom: f64) {
        self.zoom = clamp(self.zoom + delta, min_zoom, max_zoom);
    }

    /// Pan by a screen-space delta. No bounds.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Reset to the origin at 100% zoom.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::new();
        assert_eq!(viewport.offset(), Vec2::ZERO);
        assert!((viewport.zoom - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_canvas_with_offset_and_zoom() {
        let viewport = Viewport {
            offset_x: 50.0,
            offset_y: 100.0,
            zoom: 2.0,
        };
        let canvas = viewport.screen_to_canvas(Point::new(150.0, 300.0));
        assert!((canvas.x - 50.0).abs() < f64::EPSILON);
        assert!((canvas.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let viewport = Viewport {
            offset_x: 30.0,
            offset_y: -20.0,
            zoom: 1.5,
        };
        for &(x, y) in &[(123.0, 456.0), (-10.5, 0.25), (0.0, 0.0), (1e6, -1e6)] {
            let original = Point::new(x, y);
            let back = viewport.screen_to_canvas(viewport.canvas_to_screen(original));
            assert!((back.x - original.x).abs() < 1e-6);
            assert!((back.y - original.y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_affine_matches_point_conversion() {
        let viewport = Viewport {
            offset_x: 12.0,
            offset_y: 7.0,
            zoom: 0.5,
        };
        let p = Point::new(40.0, -8.0);
        let via_affine = viewport.transform() * p;
        let direct = viewport.canvas_to_screen(p);
        assert!((via_affine.x - direct.x).abs() < 1e-10);
        assert!((via_affine.y - direct.y).abs() < 1e-10);
        let back = viewport.inverse_transform() * via_affine;
        assert!((back.x - p.x).abs() < 1e-10);
        assert!((back.y - p.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut viewport = Viewport::new();
        viewport.zoom_by(-100.0, MIN_ZOOM, MAX_ZOOM);
        assert!((viewport.zoom - MIN_ZOOM).abs() < f64::EPSILON);
        viewport.zoom_by(1000.0, MIN_ZOOM, MAX_ZOOM);
        assert!((viewport.zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_does_not_clamp() {
        let mut viewport = Viewport::new();
        viewport.apply(ViewportUpdate {
            zoom: Some(12.0),
            ..Default::default()
        });
        assert!((viewport.zoom - 12.0).abs() < f64::EPSILON);
        assert!((viewport.offset_x).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan() {
        let mut viewport = Viewport::new();
        viewport.pan(10.0, 20.0);
        viewport.pan(-5.0, 5.0);
        assert!((viewport.offset_x - 5.0).abs() < f64::EPSILON);
        assert!((viewport.offset_y - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_delta_ignores_offset() {
        let viewport = Viewport {
            offset_x: 300.0,
            offset_y: -40.0,
            zoom: 4.0,
        };
        assert_eq!(viewport.screen_delta_to_canvas(Vec2::new(20.0, -8.0)), Vec2::new(5.0, -2.0));
    }
}
