//! Project document: artboards, elements and their undo history.

use crate::artboard::{Artboard, ArtboardUpdate};
use crate::element::{Element, ElementUpdate};
use crate::error::{EditorError, EditorResult};
use crate::geometry::{bounding_box, is_point_in_rect};
use crate::history::{History, ProjectSnapshot};
use crate::id::{ArtboardId, ElementId, generate_id};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// The editable project: everything that is saved and undone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub id: String,
    pub name: String,
    created_at: u64,
    updated_at: u64,
    /// Paint order is array order.
    artboards: Vec<Artboard>,
    elements: HashMap<ElementId, Element>,
    #[serde(skip)]
    history: History,
    /// Set by every mutation, cleared when the live state matches the
    /// history's `present` again.
    #[serde(skip)]
    pending_changes: bool,
}

impl Default for ProjectDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::with_history_limit(crate::history::MAX_UNDO_HISTORY)
    }

    pub fn with_history_limit(limit: usize) -> Self {
        let now = now_millis();
        Self {
            id: generate_id().to_string(),
            name: "Untitled Project".to_string(),
            created_at: now,
            updated_at: now,
            artboards: Vec::new(),
            elements: HashMap::new(),
            history: History::with_limit(limit),
            pending_changes: false,
        }
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn updated_at(&self) -> u64 {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = now_millis().max(self.updated_at);
        self.pending_changes = true;
    }

    // --- elements ---

    pub fn elements(&self) -> &HashMap<ElementId, Element> {
        &self.elements
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn contains_element(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Insert a new element.
    pub fn add_element(&mut self, element: Element) -> EditorResult<ElementId> {
        let id = element.id();
        if self.contains_element(id) {
            log::warn!("Rejected element {}: id already present", id);
            return Err(EditorError::DuplicateElementId(id));
        }
        log::debug!("Adding {} element {}", element.element_type(), id);
        self.elements.insert(id, element);
        self.touch();
        Ok(id)
    }

    /// Merge `update` into an existing element.
    pub fn update_element(&mut self, id: ElementId, update: ElementUpdate) -> EditorResult<()> {
        let element = self
            .elements
            .get_mut(&id)
            .ok_or(EditorError::ElementNotFound(id))?;
        update.apply(element)?;
        self.touch();
        Ok(())
    }

    /// Apply an in-place edit to an element.
    pub(crate) fn edit_element<F>(&mut self, id: ElementId, edit: F) -> EditorResult<()>
    where
        F: FnOnce(&mut Element),
    {
        let element = self
            .elements
            .get_mut(&id)
            .ok_or(EditorError::ElementNotFound(id))?;
        edit(element);
        self.touch();
        Ok(())
    }

    pub fn remove_element(&mut self, id: ElementId) -> EditorResult<Element> {
        let element = self
            .elements
            .remove(&id)
            .ok_or(EditorError::ElementNotFound(id))?;
        log::debug!("Removed element {}", id);
        self.touch();
        Ok(element)
    }

    /// Elements sorted by ascending z-index. Ties are ordered by id so the
    /// result does not depend on map iteration order.
    pub fn elements_by_z(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.values().collect();
        ordered.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
        ordered
    }

    /// Visible elements, back to front.
    pub fn elements_in_paint_order(&self) -> Vec<&Element> {
        let mut ordered = self.elements_by_z();
        ordered.retain(|e| e.visible);
        ordered
    }

    /// Topmost element whose unrotated rect contains `point`.
    pub fn element_at_point(&self, point: Point) -> Option<ElementId> {
        self.elements_by_z()
            .into_iter()
            .rev()
            .find(|e| is_point_in_rect(point, e.raw_rect()))
            .map(|e| e.id)
    }

    pub fn max_z_index(&self) -> Option<i32> {
        self.elements.values().map(|e| e.z_index).max()
    }

    /// z-index that places a new element above everything else.
    pub fn next_z_index(&self) -> i32 {
        self.max_z_index().map_or(1, |z| z.saturating_add(1))
    }

    /// Bounding box of all elements, `None` when there are none.
    pub fn bounds(&self) -> Option<Rect> {
        if self.elements.is_empty() {
            None
        } else {
            Some(bounding_box(self.elements.values()))
        }
    }

    // --- artboards ---

    pub fn artboards(&self) -> &[Artboard] {
        &self.artboards
    }

    pub fn artboard(&self, id: ArtboardId) -> Option<&Artboard> {
        self.artboards.iter().find(|a| a.id == id)
    }

    pub fn add_artboard(&mut self, artboard: Artboard) -> EditorResult<ArtboardId> {
        let id = artboard.id();
        if self.artboard(id).is_some() {
            log::warn!("Rejected artboard {}: id already present", id);
            return Err(EditorError::DuplicateArtboardId(id));
        }
        log::debug!(
            "Adding artboard {} '{}' ({}x{})",
            id,
            artboard.name,
            artboard.width,
            artboard.height
        );
        self.artboards.push(artboard);
        self.touch();
        Ok(id)
    }

    pub fn update_artboard(&mut self, id: ArtboardId, update: ArtboardUpdate) -> EditorResult<()> {
        let artboard = self
            .artboards
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(EditorError::ArtboardNotFound(id))?;
        update.apply(artboard);
        self.touch();
        Ok(())
    }

    pub fn remove_artboard(&mut self, id: ArtboardId) -> EditorResult<Artboard> {
        let index = self
            .artboards
            .iter()
            .position(|a| a.id == id)
            .ok_or(EditorError::ArtboardNotFound(id))?;
        let artboard = self.artboards.remove(index);
        log::debug!("Removed artboard {}", id);
        self.touch();
        Ok(artboard)
    }

    /// First artboard, in array order, containing `point`.
    pub fn artboard_at_point(&self, point: Point) -> Option<ArtboardId> {
        self.artboards
            .iter()
            .find(|a| is_point_in_rect(point, a.rect()))
            .map(|a| a.id)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.artboards.is_empty()
    }

    // --- history ---

    /// Copy of the undoable state.
    pub fn snapshot(&self) -> ProjectSnapshot {
        ProjectSnapshot {
            artboards: self.artboards.clone(),
            elements: self.elements.clone(),
        }
    }

    fn restore(&mut self, snapshot: ProjectSnapshot) {
        self.artboards = snapshot.artboards;
        self.elements = snapshot.elements;
        self.touch();
        self.pending_changes = false;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// True when artboards or elements changed since the last checkpoint,
    /// undo or redo.
    pub fn has_pending_changes(&self) -> bool {
        self.pending_changes
    }

    /// Record the live state as a checkpoint.
    ///
    /// Without pending changes the live state already is the checkpoint, so
    /// only redo history is dropped.
    pub fn save_snapshot(&mut self) {
        if self.pending_changes {
            let live = self.snapshot();
            self.history.save_snapshot(live);
            self.pending_changes = false;
        } else {
            self.history.clear_future();
        }
    }

    /// Throw away pending changes, returning to the last checkpoint. Redo
    /// history is kept.
    pub fn revert_to_checkpoint(&mut self) -> bool {
        if !self.pending_changes {
            return false;
        }
        let checkpoint = self.history.present().clone();
        self.restore(checkpoint);
        true
    }

    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let pending = self.pending_changes.then(|| self.snapshot());
        match self.history.undo(pending) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.pending_changes || self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn to_json(&self) -> EditorResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EditorError::Document(e.to_string()))
    }

    /// Load a document. History starts over with the loaded state as its
    /// baseline.
    ///
    /// Elements are re-keyed by their own id; two elements or two artboards
    /// sharing an id are rejected.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let mut document: Self =
            serde_json::from_str(json).map_err(|e| EditorError::Document(e.to_string()))?;

        let loaded = std::mem::take(&mut document.elements);
        for (key, element) in loaded {
            let id = element.id();
            if key != id {
                log::warn!("Element stored under {} has id {}; re-keying", key, id);
            }
            if document.elements.insert(id, element).is_some() {
                return Err(EditorError::DuplicateElementId(id));
            }
        }

        let mut artboard_ids = HashSet::with_capacity(document.artboards.len());
        for artboard in &document.artboards {
            if !artboard_ids.insert(artboard.id()) {
                return Err(EditorError::DuplicateArtboardId(artboard.id()));
            }
        }

        let baseline = document.snapshot();
        document.history.reset(baseline);
        document.pending_changes = false;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementProperties, ShapeProperties};
    use kurbo::Size;

    fn rect_at(x: f64, y: f64, z: i32) -> Element {
        Element::new(
            Point::new(x, y),
            Size::new(100.0, 100.0),
            ElementProperties::Rectangle(ShapeProperties::default()),
        )
        .at_z(z)
    }

    #[test]
    fn test_new_document_is_empty() {
        let doc = ProjectDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.name, "Untitled Project");
        assert_eq!(doc.created_at(), doc.updated_at());
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_duplicate_element_rejected() {
        let mut doc = ProjectDocument::new();
        let element = rect_at(0.0, 0.0, 1);
        doc.add_element(element.clone()).unwrap();
        assert_eq!(
            doc.add_element(element.clone()),
            Err(EditorError::DuplicateElementId(element.id()))
        );
        assert_eq!(doc.elements().len(), 1);
    }

    #[test]
    fn test_missing_ids_are_errors() {
        let mut doc = ProjectDocument::new();
        let id = generate_id();
        assert_eq!(
            doc.update_element(id, ElementUpdate::new().name("x")),
            Err(EditorError::ElementNotFound(id))
        );
        assert!(matches!(doc.remove_element(id), Err(EditorError::ElementNotFound(_))));
        assert!(matches!(
            doc.update_artboard(id, ArtboardUpdate::new()),
            Err(EditorError::ArtboardNotFound(_))
        ));
        assert!(matches!(doc.remove_artboard(id), Err(EditorError::ArtboardNotFound(_))));
    }

    #[test]
    fn test_mutation_touches_updated_at() {
        let mut doc = ProjectDocument::new();
        doc.updated_at = 0;
        doc.add_element(rect_at(0.0, 0.0, 1)).unwrap();
        assert!(doc.updated_at() > 0);
    }

    #[test]
    fn test_hit_test_prefers_higher_z() {
        let mut doc = ProjectDocument::new();
        let low = doc.add_element(rect_at(0.0, 0.0, 1)).unwrap();
        let high = doc.add_element(rect_at(50.0, 50.0, 2)).unwrap();
        assert_eq!(doc.element_at_point(Point::new(75.0, 75.0)), Some(high));
        assert_eq!(doc.element_at_point(Point::new(10.0, 10.0)), Some(low));
        // right and bottom edges are inclusive
        assert_eq!(doc.element_at_point(Point::new(150.0, 150.0)), Some(high));
        assert_eq!(doc.element_at_point(Point::new(151.0, 151.0)), None);
    }

    #[test]
    fn test_paint_order_skips_hidden() {
        let mut doc = ProjectDocument::new();
        let top = doc.add_element(rect_at(0.0, 0.0, 5)).unwrap();
        let bottom = doc.add_element(rect_at(0.0, 0.0, -1)).unwrap();
        let mut hidden = rect_at(0.0, 0.0, 2);
        hidden.visible = false;
        doc.add_element(hidden).unwrap();

        let order: Vec<ElementId> = doc.elements_in_paint_order().iter().map(|e| e.id()).collect();
        assert_eq!(order, vec![bottom, top]);
        assert_eq!(doc.next_z_index(), 6);
    }

    #[test]
    fn test_artboards_hit_in_array_order() {
        let mut doc = ProjectDocument::new();
        let first = doc
            .add_artboard(Artboard::new("A", "custom", Point::ZERO, 200.0, 200.0))
            .unwrap();
        doc.add_artboard(Artboard::new("B", "custom", Point::new(100.0, 100.0), 200.0, 200.0))
            .unwrap();
        assert_eq!(doc.artboard_at_point(Point::new(150.0, 150.0)), Some(first));
        assert_eq!(doc.artboard_at_point(Point::new(-1.0, 0.0)), None);
    }

    #[test]
    fn test_undo_redo_restores_state() {
        let mut doc = ProjectDocument::new();
        let id = doc.add_element(rect_at(100.0, 100.0, 1)).unwrap();
        doc.save_snapshot();
        doc.update_element(id, ElementUpdate::new().position(Point::new(300.0, 300.0)))
            .unwrap();

        assert!(doc.undo());
        assert_eq!(doc.element(id).unwrap().position, Point::new(100.0, 100.0));
        assert!(doc.redo());
        assert_eq!(doc.element(id).unwrap().position, Point::new(300.0, 300.0));
    }

    #[test]
    fn test_checkpoint_without_changes_adds_no_step() {
        let mut doc = ProjectDocument::new();
        doc.save_snapshot();
        assert!(doc.history().past().is_empty());
        assert!(!doc.can_undo());

        let id = doc.add_element(rect_at(0.0, 0.0, 1)).unwrap();
        assert!(doc.can_undo());
        doc.save_snapshot();
        doc.save_snapshot();
        assert_eq!(doc.history().past().len(), 1);

        assert!(doc.undo());
        assert!(doc.element(id).is_none());
        assert!(!doc.undo());
    }

    #[test]
    fn test_nan_field_does_not_stall_undo() {
        let mut doc = ProjectDocument::new();
        let id = doc.add_element(rect_at(0.0, 0.0, 1)).unwrap();
        doc.save_snapshot();
        doc.update_element(id, ElementUpdate::new().rotation(f64::NAN)).unwrap();
        doc.save_snapshot();
        doc.update_element(id, ElementUpdate::new().name("renamed")).unwrap();

        // pending rename, then the NaN rotation, then the insert
        assert!(doc.undo());
        assert!(doc.element(id).unwrap().rotation.is_nan());
        assert!(doc.undo());
        assert_eq!(doc.element(id).unwrap().rotation, 0.0);
        assert!(doc.undo());
        assert!(doc.element(id).is_none());
        assert!(!doc.undo());
        assert_eq!(doc.history().future().len(), 3);
    }

    #[test]
    fn test_revert_to_checkpoint_keeps_redo() {
        let mut doc = ProjectDocument::new();
        let id = doc.add_element(rect_at(0.0, 0.0, 1)).unwrap();
        doc.save_snapshot();
        assert!(!doc.revert_to_checkpoint());

        doc.update_element(id, ElementUpdate::new().position(Point::new(9.0, 9.0))).unwrap();
        assert!(doc.revert_to_checkpoint());
        assert_eq!(doc.element(id).unwrap().position, Point::ZERO);
        assert!(!doc.has_pending_changes());
        assert_eq!(doc.history().past().len(), 1);
    }

    #[test]
    fn test_undo_and_redo_touch_updated_at() {
        let mut doc = ProjectDocument::new();
        doc.add_element(rect_at(0.0, 0.0, 1)).unwrap();
        doc.save_snapshot();

        doc.updated_at = 0;
        assert!(doc.undo());
        assert!(doc.updated_at() > 0);

        doc.updated_at = 0;
        assert!(doc.redo());
        assert!(doc.updated_at() > 0);

        doc.updated_at = 0;
        assert!(!doc.redo());
        assert_eq!(doc.updated_at(), 0);
    }

    #[test]
    fn test_from_json_rekeys_elements_by_id() {
        let mut doc = ProjectDocument::new();
        let id = doc.add_element(rect_at(0.0, 0.0, 1)).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        let elements = value["elements"].as_object_mut().unwrap();
        let element = elements.remove(&id.to_string()).unwrap();
        let stray = generate_id();
        elements.insert(stray.to_string(), element);

        let loaded = ProjectDocument::from_json(&value.to_string()).unwrap();
        assert!(loaded.contains_element(id));
        assert!(!loaded.contains_element(stray));
        assert_eq!(loaded.element_at_point(Point::new(10.0, 10.0)), Some(id));
    }

    #[test]
    fn test_from_json_rejects_duplicate_ids() {
        let mut doc = ProjectDocument::new();
        let id = doc.add_element(rect_at(0.0, 0.0, 1)).unwrap();
        let board = doc
            .add_artboard(Artboard::new("A", "custom", Point::ZERO, 100.0, 100.0))
            .unwrap();
        let json = doc.to_json().unwrap();

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let elements = value["elements"].as_object_mut().unwrap();
        let copy = elements[&id.to_string()].clone();
        elements.insert(generate_id().to_string(), copy);
        assert_eq!(
            ProjectDocument::from_json(&value.to_string()).map(|_| ()),
            Err(EditorError::DuplicateElementId(id))
        );

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let artboards = value["artboards"].as_array_mut().unwrap();
        let copy = artboards[0].clone();
        artboards.push(copy);
        assert_eq!(
            ProjectDocument::from_json(&value.to_string()).map(|_| ()),
            Err(EditorError::DuplicateArtboardId(board))
        );

        assert!(matches!(
            ProjectDocument::from_json("{"),
            Err(EditorError::Document(_))
        ));
    }

    #[test]
    fn test_json_roundtrip_resets_history() {
        let mut doc = ProjectDocument::new();
        doc.add_element(rect_at(1.0, 2.0, 1)).unwrap();
        doc.save_snapshot();
        let json = doc.to_json().unwrap();
        let loaded = ProjectDocument::from_json(&json).unwrap();
        assert_eq!(loaded.snapshot(), doc.snapshot());
        assert_eq!(loaded.id, doc.id);
        assert!(!loaded.can_undo());
        assert_eq!(loaded.history().present(), &loaded.snapshot());
    }
}
