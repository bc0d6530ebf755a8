//! Per-type property bags.
//!
//! Every field is optional. A missing field is not filled in at write time;
//! consumers pass the default they want through the `*_or` accessors.

use crate::color::SerializableColor;
use serde::{Deserialize, Serialize};

/// Drop shadow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub color: SerializableColor,
}

/// Paint properties shared by rectangles, circles and frames.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<SerializableColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<SerializableColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
}

impl ShapeProperties {
    /// Filled and stroked shape with square corners.
    pub fn filled(fill: SerializableColor, stroke: SerializableColor, stroke_width: f64) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(stroke),
            stroke_width: Some(stroke_width),
            ..Default::default()
        }
    }

    pub fn with_border_radius(mut self, radius: f64) -> Self {
        self.border_radius = Some(radius);
        self
    }

    pub fn stroke_width_or(&self, default: f64) -> f64 {
        self.stroke_width.unwrap_or(default)
    }

    pub fn border_radius_or(&self, default: f64) -> f64 {
        self.border_radius.unwrap_or(default)
    }
}

/// Child flow direction of a frame. Stored only; no layout is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyContent {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignItems {
    #[default]
    Start,
    Center,
    End,
}

/// Frame: a shape plus auto-layout settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameProperties {
    #[serde(flatten)]
    pub shape: ShapeProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_mode: Option<LayoutMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<JustifyContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align_items: Option<AlignItems>,
}

impl FrameProperties {
    pub fn padding_or(&self, default: f64) -> f64 {
        self.padding.unwrap_or(default)
    }

    /// Whether the frame declares an auto-layout mode other than `none`.
    pub fn has_auto_layout(&self) -> bool {
        !matches!(self.layout_mode.unwrap_or_default(), LayoutMode::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<SerializableColor>,
}

impl TextProperties {
    pub fn text_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.text.as_deref().unwrap_or(default)
    }

    pub fn font_size_or(&self, default: f64) -> f64 {
        self.font_size.unwrap_or(default)
    }

    pub fn font_family_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.font_family.as_deref().unwrap_or(default)
    }

    pub fn font_weight_or(&self, default: u16) -> u16 {
        self.font_weight.unwrap_or(default)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    Fill,
    Contain,
    #[default]
    Cover,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_fit: Option<ImageFit>,
}

/// A line runs from the element's position to `position + dimensions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<SerializableColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl LineProperties {
    pub fn stroke_width_or(&self, default: f64) -> f64 {
        self.stroke_width.unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_at_read_time() {
        let props = ShapeProperties::default();
        assert_eq!(props.stroke_width, None);
        assert!((props.stroke_width_or(1.0) - 1.0).abs() < f64::EPSILON);

        let text = TextProperties::default();
        assert_eq!(text.text_or(""), "");
        assert_eq!(text.font_family_or("sans-serif"), "sans-serif");
        assert_eq!(text.font_weight_or(400), 400);

        let rounded = ShapeProperties::default().with_border_radius(6.0);
        assert!((rounded.border_radius_or(0.0) - 6.0).abs() < f64::EPSILON);
        assert!(props.border_radius_or(0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_frame_auto_layout_flag() {
        let mut frame = FrameProperties::default();
        assert!(!frame.has_auto_layout());
        assert!((frame.padding_or(16.0) - 16.0).abs() < f64::EPSILON);
        frame.padding = Some(4.0);
        assert!((frame.padding_or(16.0) - 4.0).abs() < f64::EPSILON);
        frame.layout_mode = Some(LayoutMode::Vertical);
        assert!(frame.has_auto_layout());
    }

    #[test]
    fn test_frame_serializes_flat() {
        let frame = FrameProperties {
            shape: ShapeProperties::default().with_border_radius(8.0),
            padding: Some(16.0),
            layout_mode: Some(LayoutMode::None),
            justify_content: Some(JustifyContent::SpaceBetween),
            ..Default::default()
        };
        let value = serde_json::to_value(&frame).unwrap();
        assert_eq!(value["borderRadius"], 8.0);
        assert_eq!(value["padding"], 16.0);
        assert_eq!(value["layoutMode"], "none");
        assert_eq!(value["justifyContent"], "space-between");
        assert!(value.get("fill").is_none());
    }
}
