//! Tool system for the design surface.

use crate::color::SerializableColor;
use crate::element::{
    Element, ElementProperties, FrameProperties, ImageFit, ImageProperties, LayoutMode,
    LineProperties, ShapeProperties, TextAlign, TextProperties,
};
use crate::geometry::rect_from_corners;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Drags narrower or shorter than this are discarded.
pub const MIN_DRAW_EXTENT: f64 = 5.0;
/// Size of a text box created by clicking.
pub const DEFAULT_TEXT_SIZE: Size = Size::new(200.0, 50.0);
pub const DEFAULT_TEXT: &str = "Double click to edit";

const RECTANGLE_FILL: SerializableColor = SerializableColor::rgb(0x3b, 0x82, 0xf6);
const RECTANGLE_STROKE: SerializableColor = SerializableColor::rgb(0x1e, 0x40, 0xaf);
const CIRCLE_FILL: SerializableColor = SerializableColor::rgb(0xef, 0x44, 0x44);
const CIRCLE_STROKE: SerializableColor = SerializableColor::rgb(0x99, 0x1b, 0x1b);
const FRAME_FILL: SerializableColor = SerializableColor::rgb(0x6b, 0x72, 0x80);
const FRAME_STROKE: SerializableColor = SerializableColor::rgb(0x37, 0x41, 0x51);

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Hand,
    Frame,
    Rectangle,
    Circle,
    Text,
    Image,
    Line,
}

impl ToolKind {
    pub const ALL: [ToolKind; 8] = [
        ToolKind::Select,
        ToolKind::Hand,
        ToolKind::Frame,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Text,
        ToolKind::Image,
        ToolKind::Line,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Select => "Select",
            ToolKind::Hand => "Hand",
            ToolKind::Frame => "Frame",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Text => "Text",
            ToolKind::Image => "Image",
            ToolKind::Line => "Line",
        }
    }

    /// Single-key shortcut, lowercase.
    pub fn shortcut(&self) -> char {
        match self {
            ToolKind::Select => 'v',
            ToolKind::Hand => 'h',
            ToolKind::Frame => 'f',
            ToolKind::Rectangle => 'r',
            ToolKind::Circle => 'c',
            ToolKind::Text => 't',
            ToolKind::Image => 'i',
            ToolKind::Line => 'l',
        }
    }

    pub fn from_shortcut(key: char) -> Option<ToolKind> {
        let key = key.to_ascii_lowercase();
        Self::ALL.into_iter().find(|tool| tool.shortcut() == key)
    }

    /// Whether a drag with this tool produces an element.
    pub fn draws_by_drag(&self) -> bool {
        matches!(
            self,
            ToolKind::Frame
                | ToolKind::Rectangle
                | ToolKind::Circle
                | ToolKind::Image
                | ToolKind::Line
        )
    }

    /// Whether a single click with this tool produces an element.
    pub fn creates_on_click(&self) -> bool {
        matches!(self, ToolKind::Text)
    }
}

/// Element a tool produces for `rect`, with that tool's default styling.
///
/// `rect` is normalized first. Returns `None` for tools that never create
/// elements.
pub fn default_element(tool: ToolKind, rect: Rect, z_index: i32) -> Option<Element> {
    let rect = rect.abs();
    let properties = match tool {
        ToolKind::Rectangle => ElementProperties::Rectangle(
            ShapeProperties::filled(RECTANGLE_FILL, RECTANGLE_STROKE, 2.0).with_border_radius(0.0),
        ),
        ToolKind::Circle => {
            ElementProperties::Circle(ShapeProperties::filled(CIRCLE_FILL, CIRCLE_STROKE, 2.0))
        }
        ToolKind::Frame => ElementProperties::Frame(FrameProperties {
            shape: ShapeProperties::filled(FRAME_FILL, FRAME_STROKE, 2.0).with_border_radius(8.0),
            padding: Some(16.0),
            layout_mode: Some(LayoutMode::None),
            ..Default::default()
        }),
        ToolKind::Line => ElementProperties::Line(LineProperties {
            stroke: Some(SerializableColor::white()),
            stroke_width: Some(2.0),
        }),
        ToolKind::Image => ElementProperties::Image(ImageProperties {
            image_url: Some(String::new()),
            image_fit: Some(ImageFit::Cover),
        }),
        ToolKind::Text => ElementProperties::Text(TextProperties {
            text: Some(DEFAULT_TEXT.to_string()),
            font_size: Some(16.0),
            font_family: Some("sans-serif".to_string()),
            font_weight: Some(400),
            text_align: Some(TextAlign::Left),
            fill: Some(SerializableColor::white()),
            ..Default::default()
        }),
        ToolKind::Select | ToolKind::Hand => return None,
    };
    Some(Element::new(rect.origin(), rect.size(), properties).at_z(z_index))
}

/// State of a tool interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ToolState {
    #[default]
    Idle,
    /// A drag-to-draw gesture is in progress.
    Drawing { start: Point, current: Point },
}

/// How a draw gesture ended.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawResult {
    /// The gesture produced this element; the caller inserts it.
    Created(Element),
    /// The drag was too small.
    Discarded,
    /// No gesture was in progress.
    Inactive,
}

/// Manages the active tool and its gesture state.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
    is_panning: bool,
    min_extent: f64,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::with_min_extent(MIN_DRAW_EXTENT)
    }
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_extent(min_extent: f64) -> Self {
        Self {
            current_tool: ToolKind::default(),
            state: ToolState::Idle,
            is_panning: false,
            min_extent,
        }
    }

    /// Switch tools. Any gesture in progress is dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, ToolState::Drawing { .. })
    }

    pub fn is_panning(&self) -> bool {
        self.is_panning
    }

    pub fn set_panning(&mut self, panning: bool) {
        self.is_panning = panning;
    }

    /// Pointer down at a canvas point.
    ///
    /// Click-to-create tools return their element immediately. Drag tools
    /// start a gesture and return `None`. Other tools do nothing.
    pub fn begin(&mut self, point: Point, z_index: i32) -> Option<Element> {
        let tool = self.current_tool;
        if tool.creates_on_click() {
            return default_element(tool, Rect::from_origin_size(point, DEFAULT_TEXT_SIZE), z_index);
        }
        if tool.draws_by_drag() {
            self.state = ToolState::Drawing {
                start: point,
                current: point,
            };
        }
        None
    }

    pub fn update(&mut self, point: Point) {
        if let ToolState::Drawing { current, .. } = &mut self.state {
            *current = point;
        }
    }

    /// Pointer up. Finishes the gesture, produces the element if it is
    /// large enough, and returns to idle in every case.
    pub fn end(&mut self, point: Point, z_index: i32) -> DrawResult {
        let ToolState::Drawing { start, .. } = self.state else {
            return DrawResult::Inactive;
        };
        self.state = ToolState::Idle;

        let rect = rect_from_corners(start, point);
        if rect.width() < self.min_extent || rect.height() < self.min_extent {
            log::debug!(
                "Discarded {:?} draw of {}x{}",
                self.current_tool,
                rect.width(),
                rect.height()
            );
            return DrawResult::Discarded;
        }

        match default_element(self.current_tool, rect, z_index) {
            Some(element) => DrawResult::Created(element),
            None => DrawResult::Discarded,
        }
    }

    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Normalized rect of the gesture in progress, in canvas space.
    pub fn preview_rect(&self) -> Option<Rect> {
        match self.state {
            ToolState::Drawing { start, current } => Some(rect_from_corners(start, current)),
            ToolState::Idle => None,
        }
    }
}
