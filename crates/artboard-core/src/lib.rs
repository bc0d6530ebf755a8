//! Artboard Core Library
//!
//! Platform-agnostic editor state for a 2D design surface: artboards,
//! elements, selection, viewport and snapshot undo/redo. Rendering and input
//! handling live outside this crate and drive it through [`Editor`].

pub mod artboard;
pub mod color;
pub mod config;
pub mod document;
pub mod editor;
pub mod element;
pub mod error;
pub mod geometry;
pub mod history;
pub mod id;
pub mod selection;
pub mod tools;
pub mod transform;
pub mod viewport;

pub use artboard::{Artboard, ArtboardUpdate, DeviceType, Template, all_templates, find_template};
pub use color::SerializableColor;
pub use config::EditorConfig;
pub use document::ProjectDocument;
pub use editor::{Editor, HitTarget};
pub use element::{Element, ElementProperties, ElementType, ElementUpdate};
pub use error::{EditorError, EditorResult};
pub use geometry::{GRID_SIZE, bounding_box, clamp, is_point_in_rect, snap_to_grid};
pub use history::{History, MAX_UNDO_HISTORY, ProjectSnapshot};
pub use id::{ArtboardId, ElementId, generate_id};
pub use selection::Selection;
pub use tools::{DrawResult, ToolKind, ToolManager};
pub use transform::{ManipulationState, ResizeHandle, ResizeOutcome};
pub use viewport::{Viewport, ViewportUpdate};
