//! Element and artboard selection.

use crate::id::{ArtboardId, ElementId};
use serde::{Deserialize, Serialize};

/// Two independent selection channels: an ordered list of elements and at
/// most one artboard. Changing one never touches the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Selected elements in selection order. Duplicates are possible when
    /// the same element is appended twice.
    #[serde(rename = "selectedElementIds")]
    pub element_ids: Vec<ElementId>,
    #[serde(rename = "selectedArtboardId")]
    pub artboard_id: Option<ArtboardId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the element selection with `id`, or append it when `multi`.
    pub fn select(&mut self, id: ElementId, multi: bool) {
        if !multi {
            self.element_ids.clear();
        }
        self.element_ids.push(id);
    }

    /// Replace the element selection wholesale.
    pub fn set_elements(&mut self, ids: Vec<ElementId>) {
        self.element_ids = ids;
    }

    pub fn clear_elements(&mut self) {
        self.element_ids.clear();
    }

    /// Drop every occurrence of `id`. Returns whether anything was removed.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        let before = self.element_ids.len();
        self.element_ids.retain(|&e| e != id);
        before != self.element_ids.len()
    }

    pub fn set_artboard(&mut self, id: Option<ArtboardId>) {
        self.artboard_id = id;
    }

    /// Clear the artboard channel if it points at `id`.
    pub fn forget_artboard(&mut self, id: ArtboardId) -> bool {
        if self.artboard_id == Some(id) {
            self.artboard_id = None;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.element_ids.clear();
        self.artboard_id = None;
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.element_ids.contains(&id)
    }

    /// First selected element, the one property panels edit.
    pub fn primary(&self) -> Option<ElementId> {
        self.element_ids.first().copied()
    }

    pub fn has_elements(&self) -> bool {
        !self.element_ids.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.element_ids.is_empty() && self.artboard_id.is_none()
    }
}
