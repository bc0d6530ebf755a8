//! Artboards and the device templates they are created from.

use crate::color::SerializableColor;
use crate::id::{ArtboardId, ElementId, generate_id};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Template id recorded on artboards created from a user-entered size.
pub const CUSTOM_TEMPLATE_ID: &str = "custom";
/// Size used when a custom width or height cannot be parsed.
pub const FALLBACK_ARTBOARD_SIZE: (u32, u32) = (1920, 1080);

/// Device family of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Desktop,
    Tablet,
    Mobile,
    Custom,
}

/// A preset artboard size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub device_type: DeviceType,
    pub width: u32,
    pub height: u32,
}

impl Template {
    const fn new(
        id: &'static str,
        name: &'static str,
        device_type: DeviceType,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id,
            name,
            device_type,
            width,
            height,
        }
    }
}

pub const DESKTOP_TEMPLATES: &[Template] = &[
    Template::new("desktop-1", "Desktop HD", DeviceType::Desktop, 1920, 1080),
    Template::new("desktop-2", "Desktop WXGA+", DeviceType::Desktop, 1440, 900),
    Template::new("desktop-3", "Desktop HD", DeviceType::Desktop, 1366, 768),
];

pub const TABLET_TEMPLATES: &[Template] = &[
    Template::new("tablet-1", "iPad", DeviceType::Tablet, 768, 1024),
    Template::new("tablet-2", "iPad Pro 11\"", DeviceType::Tablet, 834, 1194),
    Template::new("tablet-3", "iPad Pro 12.9\"", DeviceType::Tablet, 1024, 1366),
];

pub const MOBILE_TEMPLATES: &[Template] = &[
    Template::new("mobile-1", "iPhone X/XS", DeviceType::Mobile, 375, 812),
    Template::new("mobile-2", "iPhone 12/13", DeviceType::Mobile, 390, 844),
    Template::new("mobile-3", "Android", DeviceType::Mobile, 360, 800),
];

/// Every preset, desktop first.
pub fn all_templates() -> impl Iterator<Item = &'static Template> {
    DESKTOP_TEMPLATES
        .iter()
        .chain(TABLET_TEMPLATES)
        .chain(MOBILE_TEMPLATES)
}

/// Presets for one device family. `Custom` has none.
pub fn templates_for(device_type: DeviceType) -> &'static [Template] {
    match device_type {
        DeviceType::Desktop => DESKTOP_TEMPLATES,
        DeviceType::Tablet => TABLET_TEMPLATES,
        DeviceType::Mobile => MOBILE_TEMPLATES,
        DeviceType::Custom => &[],
    }
}

pub fn find_template(id: &str) -> Option<&'static Template> {
    all_templates().find(|t| t.id == id)
}

/// Parse user-entered custom dimensions.
///
/// Each side that is not a positive integer falls back to
/// [`FALLBACK_ARTBOARD_SIZE`] independently.
pub fn parse_custom_size(width: &str, height: &str) -> (u32, u32) {
    let parse = |s: &str, fallback: u32| {
        s.trim()
            .parse::<u32>()
            .ok()
            .filter(|v| *v > 0)
            .unwrap_or(fallback)
    };
    (
        parse(width, FALLBACK_ARTBOARD_SIZE.0),
        parse(height, FALLBACK_ARTBOARD_SIZE.1),
    )
}

/// A named device-sized region of the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artboard {
    pub(crate) id: ArtboardId,
    pub name: String,
    /// Preset id, or [`CUSTOM_TEMPLATE_ID`].
    pub template_id: String,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub background_color: SerializableColor,
    /// Declared member elements. Not populated by any mutation.
    #[serde(default)]
    pub elements: Vec<ElementId>,
}

impl Artboard {
    /// Create a white artboard with a fresh id.
    pub fn new(
        name: impl Into<String>,
        template_id: impl Into<String>,
        position: Point,
        width: f64,
        height: f64,
    ) -> Self {
        Self::with_id(generate_id(), name, template_id, position, width, height)
    }

    pub fn with_id(
        id: ArtboardId,
        name: impl Into<String>,
        template_id: impl Into<String>,
        position: Point,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            template_id: template_id.into(),
            position,
            width,
            height,
            background_color: SerializableColor::white(),
            elements: Vec::new(),
        }
    }

    /// Artboard sized and named after a template.
    pub fn from_template(template: &Template, position: Point) -> Self {
        Self::new(
            template.name,
            template.id,
            position,
            template.width as f64,
            template.height as f64,
        )
    }

    pub fn id(&self) -> ArtboardId {
        self.id
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }
}

/// Partial update for [`Artboard`]; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtboardUpdate {
    pub name: Option<String>,
    pub template_id: Option<String>,
    pub position: Option<Point>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub background_color: Option<SerializableColor>,
}

impl ArtboardUpdate {
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

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn background_color(mut self, color: SerializableColor) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn apply(self, artboard: &mut Artboard) {
        if let Some(name) = self.name {
            artboard.name = name;
        }
        if let Some(template_id) = self.template_id {
            artboard.template_id = template_id;
        }
        if let Some(position) = self.position {
            artboard.position = position;
        }
        if let Some(width) = self.width {
            artboard.width = width;
        }
        if let Some(height) = self.height {
            artboard.height = height;
        }
        if let Some(color) = self.background_color {
            artboard.background_color = color;
        }
    }
}
