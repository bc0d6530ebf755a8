//! Stateless geometry helpers shared by hit-testing, snapping and layout.
//!
//! None of these sanitize their input: a NaN coordinate simply propagates.

use crate::element::Element;
use kurbo::{Point, Rect};

/// Default grid spacing used when snapping is requested without a size.
pub const GRID_SIZE: f64 = 10.0;

/// Inclusive point-in-rectangle test.
///
/// Unlike [`Rect::contains`], both the far edges count as inside, so a click
/// exactly on the right or bottom border still hits.
pub fn is_point_in_rect(point: Point, rect: Rect) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Minimal axis-aligned rectangle enclosing every element.
///
/// Rotation is not taken into account; each element contributes its
/// unrotated rect. Returns [`Rect::ZERO`] for an empty input.
pub fn bounding_box<'a, I>(elements: I) -> Rect
where
    I: IntoIterator<Item = &'a Element>,
{
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut any = false;

    for element in elements {
        any = true;
        min_x = min_x.min(element.position.x);
        min_y = min_y.min(element.position.y);
        max_x = max_x.max(element.position.x + element.dimensions.width);
        max_y = max_y.max(element.position.y + element.dimensions.height);
    }

    if !any {
        return Rect::ZERO;
    }
    Rect::new(min_x, min_y, max_x, max_y)
}

/// Round a value to the nearest multiple of `grid_size`.
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    (value / grid_size).round() * grid_size
}

/// Snap both coordinates of a point to the grid.
pub fn snap_point_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(
        snap_to_grid(point.x, grid_size),
        snap_to_grid(point.y, grid_size),
    )
}

/// Clamp `value` into `[min, max]`.
///
/// Written as `min(max(value, min), max)` rather than [`f64::clamp`] so
/// that an inverted range never panics.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Normalize a rectangle spanned by two arbitrary corner points.
pub fn rect_from_corners(a: Point, b: Point) -> Rect {
    Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, ElementProperties, ShapeProperties};
    use kurbo::Size;

    fn rect_element(x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::new(
            Point::new(x, y),
            Size::new(w, h),
            ElementProperties::Rectangle(ShapeProperties::default()),
        )
    }

    #[test]
    fn test_point_in_rect_inclusive_edges() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(is_point_in_rect(Point::new(0.0, 0.0), rect));
        assert!(is_point_in_rect(Point::new(100.0, 50.0), rect));
        assert!(is_point_in_rect(Point::new(50.0, 25.0), rect));
        assert!(!is_point_in_rect(Point::new(100.1, 25.0), rect));
        assert!(!is_point_in_rect(Point::new(50.0, -0.1), rect));
    }

    #[test]
    fn test_bounding_box_empty() {
        let none: Vec<Element> = Vec::new();
        assert_eq!(bounding_box(&none), Rect::ZERO);
    }

    #[test]
    fn test_bounding_box_multiple() {
        let elements = [
            rect_element(10.0, 20.0, 30.0, 40.0),
            rect_element(-5.0, 50.0, 10.0, 10.0),
        ];
        let bounds = bounding_box(&elements);
        assert_eq!(bounds, Rect::new(-5.0, 20.0, 40.0, 60.0));
    }

    #[test]
    fn test_bounding_box_ignores_rotation() {
        let mut element = rect_element(0.0, 0.0, 100.0, 10.0);
        element.rotation = 45.0;
        assert_eq!(bounding_box([&element]), Rect::new(0.0, 0.0, 100.0, 10.0));
    }

    #[test]
    fn test_snap_to_grid() {
        assert!((snap_to_grid(14.0, 10.0) - 10.0).abs() < f64::EPSILON);
        assert!((snap_to_grid(15.0, 10.0) - 20.0).abs() < f64::EPSILON);
        assert!((snap_to_grid(-14.0, 10.0) + 10.0).abs() < f64::EPSILON);
        let snapped = snap_point_to_grid(Point::new(23.0, 37.0), GRID_SIZE);
        assert_eq!(snapped, Point::new(20.0, 40.0));
    }

    #[test]
    fn test_clamp() {
        assert!((clamp(7.0, 0.1, 5.0) - 5.0).abs() < f64::EPSILON);
        assert!((clamp(-3.0, 0.1, 5.0) - 0.1).abs() < f64::EPSILON);
        assert!((clamp(2.5, 0.1, 5.0) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(snap_to_grid(f64::NAN, 10.0).is_nan());
        assert!(!is_point_in_rect(Point::new(f64::NAN, 0.0), Rect::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_rect_from_corners() {
        let rect = rect_from_corners(Point::new(100.0, 10.0), Point::new(40.0, 80.0));
        assert_eq!(rect, Rect::new(40.0, 10.0, 100.0, 80.0));
    }
}
