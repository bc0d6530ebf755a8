//! Error types for editor mutations.

use crate::element::ElementType;
use crate::id::{ArtboardId, ElementId};
use thiserror::Error;

/// Errors returned by the mutation API.
///
/// Outcomes that are policy rather than failure (a rejected resize, a
/// discarded draw gesture, undo with nothing to undo) are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),
    #[error("Artboard not found: {0}")]
    ArtboardNotFound(ArtboardId),
    #[error("Element id already in use: {0}")]
    DuplicateElementId(ElementId),
    #[error("Artboard id already in use: {0}")]
    DuplicateArtboardId(ArtboardId),
    #[error("Element {id} is a {expected}, cannot assign {found} properties")]
    PropertiesTypeMismatch {
        id: ElementId,
        expected: ElementType,
        found: ElementType,
    },
    #[error("Element is locked: {0}")]
    ElementLocked(ElementId),
    #[error("Invalid config: {0}")]
    Config(String),
    #[error("Invalid document: {0}")]
    Document(String),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
