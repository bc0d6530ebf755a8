//! Editor state: the document plus everything about how it is being viewed
//! and edited.

use crate::artboard::{
    Artboard, ArtboardUpdate, CUSTOM_TEMPLATE_ID, Template, parse_custom_size,
};
use crate::config::EditorConfig;
use crate::document::ProjectDocument;
use crate::element::{Element, ElementUpdate};
use crate::error::{EditorError, EditorResult};
use crate::geometry::{bounding_box, clamp, snap_point_to_grid};
use crate::id::{ArtboardId, ElementId};
use crate::selection::Selection;
use crate::tools::{DrawResult, ToolKind, ToolManager};
use crate::transform::{
    HANDLE_HIT_TOLERANCE, ManipulationState, ResizeHandle, ResizeOutcome, apply_resize,
    hit_test_handle,
};
use crate::viewport::{Viewport, ViewportUpdate};
use kurbo::{Point, Rect, Size, Vec2};
use std::collections::HashMap;

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Element(ElementId),
    Artboard(ArtboardId),
    /// Empty canvas; both selections were cleared.
    Nothing,
}

/// Runtime editor state (not persisted beyond the document).
///
/// Every successful change bumps [`Editor::revision`].
#[derive(Debug, Clone)]
pub struct Editor {
    document: ProjectDocument,
    viewport: Viewport,
    selection: Selection,
    tools: ToolManager,
    manipulation: Option<ManipulationState>,
    config: EditorConfig,
    revision: u64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an editor with an empty document and default settings.
    pub fn new() -> Self {
        Self::build(EditorConfig::default())
    }

    /// Create an editor with custom settings.
    pub fn with_config(config: EditorConfig) -> EditorResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EditorConfig) -> Self {
        Self {
            document: ProjectDocument::with_history_limit(config.history_limit),
            viewport: Viewport::default(),
            selection: Selection::default(),
            tools: ToolManager::with_min_extent(config.min_draw_extent),
            manipulation: None,
            config,
            revision: 0,
        }
    }

    /// Open an existing document. Selection and viewport start fresh.
    pub fn with_document(document: ProjectDocument) -> Self {
        let mut editor = Self::new();
        editor.document = document;
        editor
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // --- accessors ---

    pub fn document(&self) -> &ProjectDocument {
        &self.document
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Change counter; differs whenever any observable state changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn manipulation(&self) -> Option<&ManipulationState> {
        self.manipulation.as_ref()
    }

    pub fn artboards(&self) -> &[Artboard] {
        self.document.artboards()
    }

    pub fn elements(&self) -> &HashMap<ElementId, Element> {
        self.document.elements()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.document.element(id)
    }

    /// Visible elements, back to front.
    pub fn elements_in_paint_order(&self) -> Vec<&Element> {
        self.document.elements_in_paint_order()
    }

    /// Selected elements in selection order. Stale ids are skipped.
    pub fn selected_elements(&self) -> Vec<&Element> {
        self.selection
            .element_ids
            .iter()
            .filter_map(|&id| self.document.element(id))
            .collect()
    }

    pub fn selected_artboard(&self) -> Option<&Artboard> {
        self.selection
            .artboard_id
            .and_then(|id| self.document.artboard(id))
    }

    /// Bounding box of the selected elements, `None` when nothing is selected.
    pub fn selection_bounds(&self) -> Option<Rect> {
        let selected = self.selected_elements();
        if selected.is_empty() {
            None
        } else {
            Some(bounding_box(selected))
        }
    }

    // --- elements ---

    pub fn add_element(&mut self, element: Element) -> EditorResult<ElementId> {
        let id = self.document.add_element(element)?;
        self.bump();
        Ok(id)
    }

    pub fn update_element(&mut self, id: ElementId, update: ElementUpdate) -> EditorResult<()> {
        self.document.update_element(id, update)?;
        self.bump();
        Ok(())
    }

    /// Remove an element and drop it from the selection.
    pub fn delete_element(&mut self, id: ElementId) -> EditorResult<Element> {
        let element = self.document.remove_element(id)?;
        self.selection.remove_element(id);
        if self.manipulation.as_ref().is_some_and(|m| m.element_id == id) {
            self.manipulation = None;
        }
        self.bump();
        Ok(element)
    }

    /// Translate an element. Locked elements cannot move.
    pub fn move_element(&mut self, id: ElementId, delta: Vec2) -> EditorResult<()> {
        self.ensure_unlocked(id)?;
        self.document.edit_element(id, |e| e.translate(delta))?;
        self.bump();
        Ok(())
    }

    /// Drag one handle of an element by `delta` (canvas units).
    pub fn resize_element(
        &mut self,
        id: ElementId,
        handle: ResizeHandle,
        delta: Vec2,
    ) -> EditorResult<ResizeOutcome> {
        match self.resized_geometry(id, handle, delta)? {
            Some(geometry) => {
                self.set_geometry(id, geometry)?;
                Ok(ResizeOutcome::Applied)
            }
            None => Ok(ResizeOutcome::Rejected),
        }
    }

    /// New position and size for a resize, `None` when it would hit the
    /// minimum extent.
    fn resized_geometry(
        &self,
        id: ElementId,
        handle: ResizeHandle,
        delta: Vec2,
    ) -> EditorResult<Option<(Point, Size)>> {
        let element = self.ensure_unlocked(id)?;
        let resized = apply_resize(
            element.position,
            element.dimensions,
            handle,
            delta,
            self.config.min_resize_extent,
        );
        if resized.is_none() {
            log::debug!("Rejected {} resize of {}", handle.as_str(), id);
        }
        Ok(resized)
    }

    fn set_geometry(
        &mut self,
        id: ElementId,
        (position, dimensions): (Point, Size),
    ) -> EditorResult<()> {
        self.document.edit_element(id, |e| {
            e.position = position;
            e.dimensions = dimensions;
        })?;
        self.bump();
        Ok(())
    }

    fn ensure_unlocked(&self, id: ElementId) -> EditorResult<&Element> {
        let element = self
            .document
            .element(id)
            .ok_or(EditorError::ElementNotFound(id))?;
        if element.locked {
            log::debug!("Element {} is locked", id);
            return Err(EditorError::ElementLocked(id));
        }
        Ok(element)
    }

    // --- selection ---

    pub fn select_element(&mut self, id: ElementId, multi: bool) {
        self.selection.select(id, multi);
        self.bump();
    }

    /// Clear the element selection. The selected artboard is kept.
    pub fn clear_selection(&mut self) {
        self.selection.clear_elements();
        self.bump();
    }

    pub fn set_selected_artboard(&mut self, id: Option<ArtboardId>) {
        self.selection.set_artboard(id);
        self.bump();
    }

    /// Select every element, back to front.
    pub fn select_all(&mut self) {
        let ids = self.document.elements_by_z().iter().map(|e| e.id()).collect();
        self.selection.set_elements(ids);
        self.bump();
    }

    /// Hit-test a canvas point and update the selection.
    ///
    /// Elements win over artboards; the topmost element is chosen. A miss
    /// clears both selection channels.
    pub fn select_at(&mut self, point: Point) -> HitTarget {
        let target = if let Some(id) = self.document.element_at_point(point) {
            self.selection.select(id, false);
            HitTarget::Element(id)
        } else if let Some(id) = self.document.artboard_at_point(point) {
            self.selection.set_artboard(Some(id));
            HitTarget::Artboard(id)
        } else {
            self.selection.clear();
            HitTarget::Nothing
        };
        self.bump();
        target
    }

    /// [`Editor::select_at`] for a point in screen pixels.
    pub fn click(&mut self, screen_point: Point) -> HitTarget {
        let point = self.viewport.screen_to_canvas(screen_point);
        self.select_at(point)
    }

    /// Resize handle of a selected element under a screen point.
    pub fn handle_at(&self, screen_point: Point) -> Option<(ElementId, ResizeHandle)> {
        self.selected_elements().into_iter().find_map(|element| {
            hit_test_handle(element, &self.viewport, screen_point, HANDLE_HIT_TOLERANCE)
                .map(|handle| (element.id(), handle))
        })
    }

    // --- artboards ---

    pub fn add_artboard(&mut self, artboard: Artboard) -> EditorResult<ArtboardId> {
        let id = self.document.add_artboard(artboard)?;
        self.bump();
        Ok(id)
    }

    pub fn update_artboard(&mut self, id: ArtboardId, update: ArtboardUpdate) -> EditorResult<()> {
        self.document.update_artboard(id, update)?;
        self.bump();
        Ok(())
    }

    /// Remove an artboard; clears the artboard selection if it was selected.
    pub fn delete_artboard(&mut self, id: ArtboardId) -> EditorResult<Artboard> {
        let artboard = self.document.remove_artboard(id)?;
        self.selection.forget_artboard(id);
        self.bump();
        Ok(artboard)
    }

    /// Where the next created artboard goes: a diagonal cascade.
    pub fn next_artboard_position(&self) -> Point {
        let step = self.config.artboard_cascade;
        let offset = step + step * self.document.artboards().len() as f64;
        Point::new(offset, offset)
    }

    /// Create an artboard from a preset, as one undo step.
    pub fn add_artboard_from_template(&mut self, template: &Template) -> EditorResult<ArtboardId> {
        let artboard = Artboard::from_template(template, self.next_artboard_position());
        self.checkpoint();
        self.add_artboard(artboard)
    }

    /// Create an artboard from user-entered text, as one undo step.
    ///
    /// Unparsable sizes fall back per side to 1920x1080.
    pub fn add_custom_artboard(
        &mut self,
        name: &str,
        width: &str,
        height: &str,
    ) -> EditorResult<ArtboardId> {
        let (w, h) = parse_custom_size(width, height);
        let artboard = Artboard::new(
            name,
            CUSTOM_TEMPLATE_ID,
            self.next_artboard_position(),
            w as f64,
            h as f64,
        );
        self.checkpoint();
        self.add_artboard(artboard)
    }

    // --- selection commands ---

    /// Delete every selected element as one undo step. Returns the removed
    /// ids.
    pub fn delete_selection(&mut self) -> Vec<ElementId> {
        let ids = unique(&self.selection.element_ids);
        if ids.is_empty() {
            return Vec::new();
        }
        self.checkpoint();
        let removed: Vec<ElementId> = ids
            .into_iter()
            .filter(|&id| self.delete_element(id).is_ok())
            .collect();
        log::debug!("Deleted {} selected elements", removed.len());
        removed
    }

    /// Copy every selected element under a fresh id, offset and stacked on
    /// top, as one undo step. The copies become the selection.
    pub fn duplicate_selection(&mut self) -> EditorResult<Vec<ElementId>> {
        let originals: Vec<Element> = unique(&self.selection.element_ids)
            .into_iter()
            .filter_map(|id| self.document.element(id).cloned())
            .collect();
        if originals.is_empty() {
            return Ok(Vec::new());
        }

        self.checkpoint();
        let offset = Vec2::new(self.config.duplicate_offset, self.config.duplicate_offset);
        let mut z = self.document.next_z_index();
        let mut copies = Vec::with_capacity(originals.len());
        for mut element in originals {
            element.regenerate_id();
            element.translate(offset);
            element.z_index = z;
            z = z.saturating_add(1);
            copies.push(self.document.add_element(element)?);
        }
        log::debug!("Duplicated {} elements", copies.len());
        self.selection.set_elements(copies.clone());
        self.bump();
        Ok(copies)
    }

    // --- viewport ---

    /// Merge viewport fields. Zoom is not clamped here.
    pub fn set_viewport(&mut self, update: ViewportUpdate) {
        self.viewport.apply(update);
        self.bump();
    }

    /// Change zoom by `delta`, clamped to the configured range.
    pub fn zoom(&mut self, delta: f64) {
        self.viewport.zoom_by(delta, self.config.min_zoom, self.config.max_zoom);
        self.bump();
    }

    pub fn zoom_in(&mut self) {
        self.zoom(self.config.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.zoom(-self.config.zoom_step);
    }

    /// Set an absolute zoom level, clamped to the configured range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.viewport.zoom = clamp(zoom, self.config.min_zoom, self.config.max_zoom);
        self.bump();
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.viewport.pan(dx, dy);
        self.bump();
    }

    pub fn reset_viewport(&mut self) {
        self.viewport.reset();
        self.bump();
    }

    /// Snap a canvas point to the configured grid.
    pub fn snap_point(&self, point: Point) -> Point {
        snap_point_to_grid(point, self.config.grid_size)
    }

    // --- tools ---

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
        self.bump();
    }

    pub fn set_panning(&mut self, panning: bool) {
        self.tools.set_panning(panning);
        self.bump();
    }

    /// Pointer down with the active tool, at a canvas point.
    ///
    /// Click-to-create tools commit immediately and return the new id.
    pub fn begin_drawing(&mut self, point: Point) -> EditorResult<Option<ElementId>> {
        let z = self.document.next_z_index();
        let created = self.tools.begin(point, z);
        self.bump();
        match created {
            Some(element) => self.commit_element(element).map(Some),
            None => Ok(None),
        }
    }

    pub fn update_drawing(&mut self, point: Point) {
        if self.tools.is_drawing() {
            self.tools.update(point);
            self.bump();
        }
    }

    /// Pointer up. Inserts the drawn element as one undo step when the
    /// gesture was large enough.
    pub fn commit_drawing(&mut self, point: Point) -> EditorResult<Option<ElementId>> {
        let z = self.document.next_z_index();
        match self.tools.end(point, z) {
            DrawResult::Created(element) => self.commit_element(element).map(Some),
            DrawResult::Discarded => {
                self.bump();
                Ok(None)
            }
            DrawResult::Inactive => Ok(None),
        }
    }

    pub fn cancel_drawing(&mut self) {
        self.tools.cancel();
        self.bump();
    }

    /// Rect of the draw gesture in progress, canvas space.
    pub fn drawing_preview(&self) -> Option<Rect> {
        self.tools.preview_rect()
    }

    fn commit_element(&mut self, element: Element) -> EditorResult<ElementId> {
        self.checkpoint();
        let id = self.add_element(element)?;
        self.tools.set_tool(ToolKind::Select);
        Ok(id)
    }

    // --- manipulation ---

    /// Start moving (`handle == None`) or resizing an element from a canvas
    /// point. The whole drag is one undo step, checkpointed by its first
    /// applied event; a click without a drag leaves history alone.
    pub fn begin_manipulation(
        &mut self,
        id: ElementId,
        handle: Option<ResizeHandle>,
        point: Point,
    ) -> EditorResult<()> {
        self.ensure_unlocked(id)?;
        self.manipulation = Some(ManipulationState::new(id, handle, point));
        self.bump();
        Ok(())
    }

    /// Continue the drag to a canvas point. Each event applies the delta
    /// since the previous one; a rejected resize drops that event's delta.
    pub fn update_manipulation(&mut self, point: Point) -> EditorResult<ResizeOutcome> {
        let Some(state) = self.manipulation.as_mut() else {
            return Ok(ResizeOutcome::Rejected);
        };
        let delta = state.step(point);
        let (id, handle) = (state.element_id, state.handle);
        if delta == Vec2::ZERO {
            self.bump();
            return Ok(ResizeOutcome::Applied);
        }

        let geometry = match handle {
            Some(handle) => match self.resized_geometry(id, handle, delta)? {
                Some(geometry) => Some(geometry),
                None => return Ok(ResizeOutcome::Rejected),
            },
            None => {
                self.ensure_unlocked(id)?;
                None
            }
        };

        self.checkpoint_manipulation();
        match geometry {
            Some(geometry) => self.set_geometry(id, geometry)?,
            None => self.move_element(id, delta)?,
        }
        Ok(ResizeOutcome::Applied)
    }

    fn checkpoint_manipulation(&mut self) {
        let first = self
            .manipulation
            .as_mut()
            .is_some_and(|m| !std::mem::replace(&mut m.checkpointed, true));
        if first {
            self.checkpoint();
        }
    }

    /// Finish the drag, keeping the result.
    pub fn end_manipulation(&mut self) -> Option<ManipulationState> {
        let state = self.manipulation.take();
        if state.is_some() {
            self.bump();
        }
        state
    }

    /// Abort the drag and return to the state before its first applied
    /// event. Redo history dropped by that checkpoint stays dropped.
    pub fn cancel_manipulation(&mut self) {
        let Some(state) = self.manipulation.take() else {
            return;
        };
        if state.checkpointed {
            self.document.revert_to_checkpoint();
        }
        self.bump();
    }

    // --- history ---

    /// Record the current artboards and elements as an undo step.
    pub fn checkpoint(&mut self) {
        self.document.save_snapshot();
        self.bump();
    }

    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.document.undo() {
            log::debug!("Nothing to undo");
            return false;
        }
        self.after_history_jump();
        true
    }

    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.document.redo() {
            log::debug!("Nothing to redo");
            return false;
        }
        self.after_history_jump();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.document.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.document.can_redo()
    }

    fn after_history_jump(&mut self) {
        self.manipulation = None;
        self.bump();
    }
}

/// Ids in first-seen order without repeats.
fn unique(ids: &[ElementId]) -> Vec<ElementId> {
    let mut seen = Vec::with_capacity(ids.len());
    for &id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}
