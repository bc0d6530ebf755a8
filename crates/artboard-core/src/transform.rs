//! Resize handles and move/resize policy for the transform overlay.

use crate::element::Element;
use crate::id::ElementId;
use crate::viewport::Viewport;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Handle size in screen pixels.
pub const HANDLE_SIZE: f64 = 8.0;
/// Handle hit tolerance in screen pixels, measured from the handle center.
pub const HANDLE_HIT_TOLERANCE: f64 = 6.0;
/// A resize leaving either side at or below this extent is rejected.
pub const MIN_RESIZE_EXTENT: f64 = 10.0;

/// One of the eight resize handles around an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NW,
        ResizeHandle::N,
        ResizeHandle::NE,
        ResizeHandle::E,
        ResizeHandle::SE,
        ResizeHandle::S,
        ResizeHandle::SW,
        ResizeHandle::W,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeHandle::N => "n",
            ResizeHandle::S => "s",
            ResizeHandle::E => "e",
            ResizeHandle::W => "w",
            ResizeHandle::NE => "ne",
            ResizeHandle::NW => "nw",
            ResizeHandle::SE => "se",
            ResizeHandle::SW => "sw",
        }
    }

    /// CSS cursor shown while hovering the handle.
    pub fn cursor(&self) -> &'static str {
        match self {
            ResizeHandle::N | ResizeHandle::S => "ns-resize",
            ResizeHandle::E | ResizeHandle::W => "ew-resize",
            ResizeHandle::NE | ResizeHandle::SW => "nesw-resize",
            ResizeHandle::NW | ResizeHandle::SE => "nwse-resize",
        }
    }

    fn moves_left(&self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::NW | ResizeHandle::SW)
    }

    fn moves_right(&self) -> bool {
        matches!(self, ResizeHandle::E | ResizeHandle::NE | ResizeHandle::SE)
    }

    fn moves_top(&self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::NE | ResizeHandle::NW)
    }

    fn moves_bottom(&self) -> bool {
        matches!(self, ResizeHandle::S | ResizeHandle::SE | ResizeHandle::SW)
    }

    /// Handle location on the unit square, (0,0) top-left.
    fn anchor(&self) -> (f64, f64) {
        let x = if self.moves_left() {
            0.0
        } else if self.moves_right() {
            1.0
        } else {
            0.5
        };
        let y = if self.moves_top() {
            0.0
        } else if self.moves_bottom() {
            1.0
        } else {
            0.5
        };
        (x, y)
    }
}

/// Result of a resize attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    Applied,
    /// The geometry would have dropped to the minimum extent; nothing changed.
    Rejected,
}

/// Move the dragged edges of a box by `delta`, keeping the opposite edges
/// fixed. Returns `None` when the new width or height is not above
/// `min_extent`.
pub fn apply_resize(
    position: Point,
    dimensions: Size,
    handle: ResizeHandle,
    delta: Vec2,
    min_extent: f64,
) -> Option<(Point, Size)> {
    let mut position = position;
    let mut size = dimensions;

    if handle.moves_right() {
        size.width += delta.x;
    }
    if handle.moves_left() {
        position.x += delta.x;
        size.width -= delta.x;
    }
    if handle.moves_bottom() {
        size.height += delta.y;
    }
    if handle.moves_top() {
        position.y += delta.y;
        size.height -= delta.y;
    }

    if size.width <= min_extent || size.height <= min_extent {
        return None;
    }
    Some((position, size))
}

/// A resize handle placed in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub kind: ResizeHandle,
    /// Center of the handle in screen pixels.
    pub position: Point,
}

impl Handle {
    /// The square drawn for this handle, in screen pixels.
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.position, (HANDLE_SIZE, HANDLE_SIZE))
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point.x - self.position.x).abs() <= tolerance
            && (point.y - self.position.y).abs() <= tolerance
    }
}

/// The eight handles of `element` as drawn under `viewport`.
pub fn handles(element: &Element, viewport: &Viewport) -> Vec<Handle> {
    let origin = viewport.canvas_to_screen(element.position);
    let width = element.dimensions.width * viewport.zoom;
    let height = element.dimensions.height * viewport.zoom;

    ResizeHandle::ALL
        .iter()
        .map(|&kind| {
            let (ax, ay) = kind.anchor();
            Handle {
                kind,
                position: Point::new(origin.x + ax * width, origin.y + ay * height),
            }
        })
        .collect()
}

/// Handle under a screen-space point, if any.
pub fn hit_test_handle(
    element: &Element,
    viewport: &Viewport,
    screen_point: Point,
    tolerance: f64,
) -> Option<ResizeHandle> {
    handles(element, viewport)
        .into_iter()
        .find(|h| h.hit_test(screen_point, tolerance))
        .map(|h| h.kind)
}

/// An in-progress move or resize drag.
#[derive(Debug, Clone)]
pub struct ManipulationState {
    pub element_id: ElementId,
    /// The handle being dragged (None = moving the whole element).
    pub handle: Option<ResizeHandle>,
    /// Canvas point where the drag started.
    pub start_point: Point,
    /// Canvas point of the last processed pointer event.
    pub current_point: Point,
    /// Whether the drag has changed anything and taken its undo checkpoint.
    pub checkpointed: bool,
}

impl ManipulationState {
    pub fn new(element_id: ElementId, handle: Option<ResizeHandle>, start_point: Point) -> Self {
        Self {
            element_id,
            handle,
            start_point,
            current_point: start_point,
            checkpointed: false,
        }
    }

    pub fn total_delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }

    /// Advance to `point`, returning the delta since the previous event.
    pub fn step(&mut self, point: Point) -> Vec2 {
        let delta = point - self.current_point;
        self.current_point = point;
        delta
    }

    pub fn is_resize(&self) -> bool {
        self.handle.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementProperties, ShapeProperties};

    fn element() -> Element {
        Element::new(
            Point::new(100.0, 100.0),
            Size::new(200.0, 150.0),
            ElementProperties::Rectangle(ShapeProperties::default()),
        )
    }

    #[test]
    fn test_resize_east_keeps_left_edge() {
        let (pos, size) = apply_resize(
            Point::new(100.0, 100.0),
            Size::new(200.0, 150.0),
            ResizeHandle::E,
            Vec2::new(30.0, 99.0),
            MIN_RESIZE_EXTENT,
        )
        .unwrap();
        assert_eq!(pos, Point::new(100.0, 100.0));
        assert_eq!(size, Size::new(230.0, 150.0));
    }

    #[test]
    fn test_resize_north_west_moves_origin() {
        let (pos, size) = apply_resize(
            Point::new(100.0, 100.0),
            Size::new(200.0, 150.0),
            ResizeHandle::NW,
            Vec2::new(20.0, -10.0),
            MIN_RESIZE_EXTENT,
        )
        .unwrap();
        assert_eq!(pos, Point::new(120.0, 90.0));
        assert_eq!(size, Size::new(180.0, 160.0));
    }

    #[test]
    fn test_resize_floor_rejects() {
        // 60 - 50 = 10 is not above the floor
        assert!(
            apply_resize(
                Point::ZERO,
                Size::new(60.0, 60.0),
                ResizeHandle::SE,
                Vec2::new(-50.0, 0.0),
                MIN_RESIZE_EXTENT,
            )
            .is_none()
        );
        assert!(
            apply_resize(
                Point::ZERO,
                Size::new(60.0, 60.0),
                ResizeHandle::SE,
                Vec2::new(-49.0, -49.0),
                MIN_RESIZE_EXTENT,
            )
            .is_some()
        );
    }

    #[test]
    fn test_handles_follow_viewport() {
        let viewport = Viewport {
            offset_x: 10.0,
            offset_y: 20.0,
            zoom: 2.0,
        };
        let placed = handles(&element(), &viewport);
        assert_eq!(placed.len(), 8);
        let se = placed.iter().find(|h| h.kind == ResizeHandle::SE).unwrap();
        // (100 + 200) * 2 + 10, (100 + 150) * 2 + 20
        assert_eq!(se.position, Point::new(610.0, 520.0));
        let n = placed.iter().find(|h| h.kind == ResizeHandle::N).unwrap();
        assert_eq!(n.position, Point::new(410.0, 220.0));
    }

    #[test]
    fn test_hit_test_handle() {
        let viewport = Viewport::default();
        let el = element();
        assert_eq!(
            hit_test_handle(&el, &viewport, Point::new(302.0, 251.0), HANDLE_HIT_TOLERANCE),
            Some(ResizeHandle::SE)
        );
        assert_eq!(
            hit_test_handle(&el, &viewport, Point::new(200.0, 175.0), HANDLE_HIT_TOLERANCE),
            None
        );
    }

    #[test]
    fn test_manipulation_steps_are_incremental() {
        let mut state = ManipulationState::new(element().id(), None, Point::new(0.0, 0.0));
        assert_eq!(state.step(Point::new(5.0, 5.0)), Vec2::new(5.0, 5.0));
        assert_eq!(state.step(Point::new(8.0, 4.0)), Vec2::new(3.0, -1.0));
        assert_eq!(state.total_delta(), Vec2::new(8.0, 4.0));
        assert!(!state.is_resize());
        assert!(!state.checkpointed);
    }

    #[test]
    fn test_handle_squares_and_cursors() {
        let placed = handles(&element(), &Viewport::default());
        let nw = placed[0];
        assert_eq!(nw.kind, ResizeHandle::NW);
        assert_eq!(nw.rect(), Rect::new(96.0, 96.0, 104.0, 104.0));
        assert_eq!(nw.kind.cursor(), "nwse-resize");
        assert_eq!(ResizeHandle::NE.cursor(), ResizeHandle::SW.cursor());
        assert_eq!(ResizeHandle::N.cursor(), "ns-resize");
        assert_eq!(ResizeHandle::W.cursor(), "ew-resize");
    }
}
