//! Identifiers for elements and artboards.

use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Unique identifier for artboards.
pub type ArtboardId = Uuid;

/// Generate a fresh identifier.
///
/// Random 128-bit v4 ids: collisions would overwrite entries in the element
/// map, so a time-plus-counter scheme is not good enough here.
pub fn generate_id() -> Uuid {
    Uuid::new_v4()
}
