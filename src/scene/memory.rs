// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! An in-memory scene host.
//!
//! Backs the terminal UI and the tests. Like a real host it applies writes immediately but only
//! *reports* them when the driver asks for the pending change notification, so a write and its
//! echo are always observed on separate ticks.

use super::element::{ElementId, SceneElement};
use super::host::{AppState, SceneHost, SceneUpdate};

const FIT_MARGIN: f64 = 40.0;

#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    elements: Vec<SceneElement>,
    app_state: AppState,
    pending_notification: bool,
    writes: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[SceneElement] {
        &self.elements
    }

    pub fn element(&self, element_id: &str) -> Option<&SceneElement> {
        self.elements.iter().find(|element| element.id == element_id)
    }

    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Number of programmatic writes applied so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn has_pending_notification(&self) -> bool {
        self.pending_notification
    }

    /// Returns the change notification for everything applied since the last call, if any.
    pub fn take_notification(&mut self) -> Option<(Vec<SceneElement>, AppState)> {
        if !std::mem::take(&mut self.pending_notification) {
            return None;
        }
        Some((self.elements.clone(), self.app_state.clone()))
    }

    pub fn add_element(&mut self, element: SceneElement) {
        self.elements.push(element);
        self.pending_notification = true;
    }

    pub fn select(&mut self, element_ids: Vec<ElementId>) {
        self.app_state.selected_element_ids = element_ids;
        self.pending_notification = true;
    }

    pub fn begin_text_edit(&mut self, element_id: impl Into<ElementId>) {
        self.app_state.editing_text_element_id = Some(element_id.into());
        self.pending_notification = true;
    }

    pub fn end_text_edit(&mut self) {
        if self.app_state.editing_text_element_id.take().is_some() {
            self.pending_notification = true;
        }
    }

    pub fn edit_text(&mut self, element_id: &str, text: impl Into<String>) -> bool {
        let Some(element) = self.element_mut(element_id) else {
            return false;
        };
        element.text = Some(text.into());
        element.version += 1;
        self.pending_notification = true;
        true
    }

    /// Moves an element together with any text bound to it.
    pub fn move_element(&mut self, element_id: &str, dx: f64, dy: f64) -> bool {
        let mut moved = false;
        for element in &mut self.elements {
            let bound = element.container_id.as_deref() == Some(element_id);
            if element.id == element_id || bound {
                element.x += dx;
                element.y += dy;
                element.version += 1;
                moved = true;
            }
        }
        self.pending_notification |= moved;
        moved
    }

    /// Marks an element (and text bound to it) deleted, the way hosts keep tombstones.
    pub fn delete_element(&mut self, element_id: &str) -> bool {
        let mut deleted = false;
        for element in &mut self.elements {
            let bound = element.container_id.as_deref() == Some(element_id);
            if (element.id == element_id || bound) && !element.is_deleted {
                element.is_deleted = true;
                element.version += 1;
                deleted = true;
            }
        }
        self.app_state.selected_element_ids.retain(|id| id != element_id);
        self.pending_notification |= deleted;
        deleted
    }

    /// Drops an element (and text bound to it) from the list without a tombstone.
    pub fn remove_element(&mut self, element_id: &str) -> bool {
        let before = self.elements.len();
        self.elements.retain(|element| {
            element.id != element_id && element.container_id.as_deref() != Some(element_id)
        });
        let removed = self.elements.len() != before;
        self.pending_notification |= removed;
        removed
    }

    fn element_mut(&mut self, element_id: &str) -> Option<&mut SceneElement> {
        self.elements.iter_mut().find(|element| element.id == element_id)
    }
}

impl SceneHost for MemoryHost {
    fn update_scene(&mut self, update: SceneUpdate) {
        self.elements = update.elements;
        if let Some(patch) = update.app_state {
            if let Some(selected) = patch.selected_element_ids {
                self.app_state.selected_element_ids = selected;
            }
            if let Some(editing) = patch.editing_text_element_id {
                self.app_state.editing_text_element_id = Some(editing);
            }
        }
        self.writes += 1;
        self.pending_notification = true;
    }

    fn scroll_to_content(&mut self, element_ids: &[ElementId]) {
        let (min_x, min_y) = self
            .elements
            .iter()
            .filter(|element| element_ids.contains(&element.id) && !element.is_deleted)
            .fold((f64::INFINITY, f64::INFINITY), |(x, y), element| {
                (x.min(element.x), y.min(element.y))
            });
        if !min_x.is_finite() || !min_y.is_finite() {
            return;
        }
        self.app_state.viewport.scroll_x = FIT_MARGIN - min_x;
        self.app_state.viewport.scroll_y = FIT_MARGIN - min_y;
        self.app_state.viewport.zoom = 1.0;
    }
}
