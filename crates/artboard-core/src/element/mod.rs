//! Element definitions for the design surface.

mod properties;

pub use properties::{
    AlignItems, FrameProperties, ImageFit, ImageProperties, JustifyContent, LayoutMode,
    LineProperties, Shadow, ShapeProperties, TextAlign, TextProperties,
};

use crate::error::{EditorError, EditorResult};
use crate::id::{ElementId, generate_id};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Frame,
    Rectangle,
    Circle,
    Text,
    Image,
    Line,
}

impl ElementType {
    /// Lowercase identifier, as used in serialized documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Frame => "frame",
            ElementType::Rectangle => "rectangle",
            ElementType::Circle => "circle",
            ElementType::Text => "text",
            ElementType::Image => "image",
            ElementType::Line => "line",
        }
    }

    /// Default layer name for newly created elements.
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementType::Frame => "Frame",
            ElementType::Rectangle => "Rectangle",
            ElementType::Circle => "Circle",
            ElementType::Text => "Text",
            ElementType::Image => "Image",
            ElementType::Line => "Line",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element type together with the properties valid for it.
///
/// Serialized adjacently: `"type": "rectangle", "properties": { ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "properties", rename_all = "lowercase")]
pub enum ElementProperties {
    Frame(FrameProperties),
    Rectangle(ShapeProperties),
    Circle(ShapeProperties),
    Text(TextProperties),
    Image(ImageProperties),
    Line(LineProperties),
}

impl ElementProperties {
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementProperties::Frame(_) => ElementType::Frame,
            ElementProperties::Rectangle(_) => ElementType::Rectangle,
            ElementProperties::Circle(_) => ElementType::Circle,
            ElementProperties::Text(_) => ElementType::Text,
            ElementProperties::Image(_) => ElementType::Image,
            ElementProperties::Line(_) => ElementType::Line,
        }
    }

    /// Shape paint fields, for the types that have them.
    pub fn shape(&self) -> Option<&ShapeProperties> {
        match self {
            ElementProperties::Frame(f) => Some(&f.shape),
            ElementProperties::Rectangle(s) | ElementProperties::Circle(s) => Some(s),
            _ => None,
        }
    }

    pub fn shape_mut(&mut self) -> Option<&mut ShapeProperties> {
        match self {
            ElementProperties::Frame(f) => Some(&mut f.shape),
            ElementProperties::Rectangle(s) | ElementProperties::Circle(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextProperties> {
        match self {
            ElementProperties::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_frame(&self) -> Option<&FrameProperties> {
        match self {
            ElementProperties::Frame(f) => Some(f),
            _ => None,
        }
    }
}

/// A placeable node on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub(crate) id: ElementId,
    /// Layer name.
    pub name: String,
    /// Top-left corner in canvas space.
    pub position: Point,
    /// Extent in canvas units. May go negative mid-drag.
    pub dimensions: Size,
    /// Rotation in degrees around the center, not normalized.
    pub rotation: f64,
    /// Expected in `[0, 1]`; not enforced.
    pub opacity: f64,
    /// Paint and hit-test order; higher is on top.
    pub z_index: i32,
    pub locked: bool,
    pub visible: bool,
    /// Containing frame. Stored as-is, never resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ElementId>,
    #[serde(flatten)]
    pub properties: ElementProperties,
}

impl Element {
    /// Create a visible, unlocked element with a fresh id.
    pub fn new(position: Point, dimensions: Size, properties: ElementProperties) -> Self {
        Self::with_id(generate_id(), position, dimensions, properties)
    }

    /// Create an element with a caller-chosen id.
    pub fn with_id(
        id: ElementId,
        position: Point,
        dimensions: Size,
        properties: ElementProperties,
    ) -> Self {
        Self {
            id,
            name: properties.element_type().display_name().to_string(),
            position,
            dimensions,
            rotation: 0.0,
            opacity: 1.0,
            z_index: 0,
            locked: false,
            visible: true,
            parent_id: None,
            properties,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn at_z(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn element_type(&self) -> ElementType {
        self.properties.element_type()
    }

    /// Unrotated bounds in canvas space.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.dimensions)
    }

    /// Like [`Element::rect`] but without normalizing negative extents.
    ///
    /// Hit-testing uses this so a mid-drag element with negative size is not
    /// hittable, matching the plain `x <= p <= x + w` comparison.
    pub fn raw_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.dimensions.width,
            self.position.y + self.dimensions.height,
        )
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Assign a fresh id, for duplication.
    pub(crate) fn regenerate_id(&mut self) {
        self.id = generate_id();
    }
}

/// Partial update for [`Element`].
///
/// Provided fields overwrite; nested values (`position`, `dimensions`,
/// `properties`) replace the whole nested value, they are not merged.
/// `parent_id: Some(None)` clears the parent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementUpdate {
    pub name: Option<String>,
    pub position: Option<Point>,
    pub dimensions: Option<Size>,
    pub rotation: Option<f64>,
    pub opacity: Option<f64>,
    pub z_index: Option<i32>,
    pub locked: Option<bool>,
    pub visible: Option<bool>,
    pub parent_id: Option<Option<ElementId>>,
    pub properties: Option<ElementProperties>,
}

impl ElementUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn dimensions(mut self, dimensions: Size) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn parent_id(mut self, parent_id: Option<ElementId>) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn properties(mut self, properties: ElementProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge into `element`.
    ///
    /// Fails without touching the element if `properties` belong to a
    /// different element type.
    pub fn apply(self, element: &mut Element) -> EditorResult<()> {
        if let Some(props) = &self.properties {
            let expected = element.element_type();
            let found = props.element_type();
            if expected != found {
                return Err(EditorError::PropertiesTypeMismatch {
                    id: element.id,
                    expected,
                    found,
                });
            }
        }

        if let Some(name) = self.name {
            element.name = name;
        }
        if let Some(position) = self.position {
            element.position = position;
        }
        if let Some(dimensions) = self.dimensions {
            element.dimensions = dimensions;
        }
        if let Some(rotation) = self.rotation {
            element.rotation = rotation;
        }
        if let Some(opacity) = self.opacity {
            element.opacity = opacity;
        }
        if let Some(z_index) = self.z_index {
            element.z_index = z_index;
        }
        if let Some(locked) = self.locked {
            element.locked = locked;
        }
        if let Some(visible) = self.visible {
            element.visible = visible;
        }
        if let Some(parent_id) = self.parent_id {
            element.parent_id = parent_id;
        }
        if let Some(properties) = self.properties {
            element.properties = properties;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::SerializableColor;

    fn rectangle() -> Element {
        Element::new(
            Point::new(10.0, 20.0),
            Size::new(100.0, 50.0),
            ElementProperties::Rectangle(ShapeProperties::filled(
                SerializableColor::rgb(0x3b, 0x82, 0xf6),
                SerializableColor::rgb(0x1e, 0x40, 0xaf),
                2.0,
            )),
        )
    }

    #[test]
    fn test_element_creation_defaults() {
        let element = rectangle();
        assert_eq!(element.element_type(), ElementType::Rectangle);
        assert_eq!(element.name, "Rectangle");
        assert!(element.visible);
        assert!(!element.locked);
        assert!((element.opacity - 1.0).abs() < f64::EPSILON);
        assert_eq!(element.rect(), Rect::new(10.0, 20.0, 110.0, 70.0));
    }

    #[test]
    fn test_update_merges_top_level_fields() {
        let mut element = rectangle();
        ElementUpdate::new()
            .name("Hero")
            .position(Point::new(300.0, 300.0))
            .apply(&mut element)
            .unwrap();
        assert_eq!(element.name, "Hero");
        assert_eq!(element.position, Point::new(300.0, 300.0));
        assert_eq!(element.dimensions, Size::new(100.0, 50.0));
    }

    #[test]
    fn test_update_replaces_properties_wholesale() {
        let mut element = rectangle();
        let replacement = ShapeProperties {
            stroke_width: Some(4.0),
            ..Default::default()
        };
        ElementUpdate::new()
            .properties(ElementProperties::Rectangle(replacement.clone()))
            .apply(&mut element)
            .unwrap();
        assert_eq!(element.properties, ElementProperties::Rectangle(replacement));
        assert_eq!(element.properties.shape().and_then(|s| s.fill), None);
    }

    #[test]
    fn test_update_rejects_other_type_properties() {
        let mut element = rectangle();
        let before = element.clone();
        let result = ElementUpdate::new()
            .name("changed")
            .properties(ElementProperties::Text(TextProperties::default()))
            .apply(&mut element);
        assert!(matches!(
            result,
            Err(EditorError::PropertiesTypeMismatch {
                expected: ElementType::Rectangle,
                found: ElementType::Text,
                ..
            })
        ));
        assert_eq!(element, before);
    }

    #[test]
    fn test_update_clears_parent() {
        let mut element = rectangle();
        element.parent_id = Some(generate_id());
        ElementUpdate::new().parent_id(None).apply(&mut element).unwrap();
        assert_eq!(element.parent_id, None);
    }

    #[test]
    fn test_raw_rect_keeps_negative_extent() {
        let mut element = rectangle();
        element.dimensions = Size::new(-20.0, 10.0);
        assert!(element.raw_rect().x1 < element.raw_rect().x0);
        assert!(element.rect().x1 > element.rect().x0);
    }

    #[test]
    fn test_serialized_shape() {
        let element = rectangle().at_z(3);
        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(value["type"], "rectangle");
        assert_eq!(value["zIndex"], 3);
        assert_eq!(value["properties"]["fill"], "#3b82f6");
        assert_eq!(value["position"]["x"], 10.0);
        assert_eq!(value["dimensions"]["width"], 100.0);

        let back: Element = serde_json::from_value(value).unwrap();
        assert_eq!(back, element);
    }
}
