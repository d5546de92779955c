// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The boundary to the external scene host.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::element::{ElementId, SceneElement};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub zoom: f64,
    pub offset_left: f64,
    pub offset_top: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { scroll_x: 0.0, scroll_y: 0.0, zoom: 1.0, offset_left: 0.0, offset_top: 0.0 }
    }
}

/// Application state the host reports with every change notification.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Selected element ids in selection order.
    pub selected_element_ids: Vec<ElementId>,
    pub editing_text_element_id: Option<ElementId>,
    pub viewport: Viewport,
}

impl AppState {
    pub fn selection_set(&self) -> BTreeSet<&ElementId> {
        self.selected_element_ids.iter().collect()
    }
}

/// The parts of application state a write may replace; `None` leaves the host's value alone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStatePatch {
    pub selected_element_ids: Option<Vec<ElementId>>,
    pub editing_text_element_id: Option<ElementId>,
}

/// A full replacement of the host's element list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneUpdate {
    pub elements: Vec<SceneElement>,
    pub app_state: Option<AppStatePatch>,
    /// Keep the write out of the host's own undo stack.
    pub suppress_history: bool,
}

/// A scene host that can be written to.
///
/// Writes are fire-and-forget: the host applies them on its own schedule and reports the outcome
/// through its regular change notification, which the driver forwards to
/// [`Workspace::on_scene_change`](crate::workspace::Workspace::on_scene_change).
pub trait SceneHost {
    fn update_scene(&mut self, update: SceneUpdate);

    /// Centers and fits the viewport on the given elements.
    fn scroll_to_content(&mut self, element_ids: &[ElementId]);
}

impl<H: SceneHost + ?Sized> SceneHost for &mut H {
    fn update_scene(&mut self, update: SceneUpdate) {
        (**self).update_scene(update);
    }

    fn scroll_to_content(&mut self, element_ids: &[ElementId]) {
        (**self).scroll_to_content(element_ids);
    }
}
