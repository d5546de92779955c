// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Two-way synchronization between the tree store and the scene host.
//!
//! The forward path ([`Reconciler::push`]) writes the projected elements into the host, merged
//! with whatever unmanaged content the user drew there. The backward path
//! ([`Reconciler::on_scene_change`]) reads every host change notification and mirrors managed
//! edits (deletion, selection, label text, position) into the store.
//!
//! A push engages echo suppression: the host reports our own write back to us, and that report
//! must not be read as user input. Suppression is lifted by a [`FrameTask::ReleaseSuppression`]
//! on the next frame tick, never synchronously.

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::element::{ElementId, SceneElement, TagRole};
use super::frame::{FrameScheduler, FrameTask};
use super::host::{AppState, AppStatePatch, SceneHost, SceneUpdate};
use super::project::{label_element_id, shape_element_id, DescriptorKind, ElementDescriptor};
use super::text::normalize_label;
use crate::layout::PositionMap;
use crate::model::{ForestState, NodeId};
use crate::store::TreeStore;

pub const DEFAULT_POSITION_EPSILON: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Host moves at or below this distance (per axis) are treated as jitter.
    pub position_epsilon: f64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self { position_epsilon: DEFAULT_POSITION_EPSILON }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// Nothing changed since the last write.
    Skipped,
    Written { elements: usize, selection_written: bool, fitted: bool },
}

/// What a host change notification turned into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneChangeReport {
    /// The notification arrived while our own write was being echoed and was ignored.
    pub suppressed: bool,
    pub deleted: Vec<NodeId>,
    pub selection_changed: bool,
    pub relabeled: Vec<NodeId>,
    pub moved: Vec<NodeId>,
}

impl SceneChangeReport {
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty()
            && !self.selection_changed
            && self.relabeled.is_empty()
            && self.moved.is_empty()
    }

    fn suppressed() -> Self {
        Self { suppressed: true, ..Self::default() }
    }
}

#[derive(Debug, Default)]
pub struct Reconciler {
    config: ReconcileConfig,
    suppressed: bool,
    release_at: u64,
    mounted: bool,
    last_fingerprint: Option<u64>,
    /// Every element id ever written as part of a projection.
    projected_ids: BTreeSet<ElementId>,
    /// The host's element list as last written or reported; the deletion diff baseline.
    known_elements: Vec<SceneElement>,
    host_selection: Vec<ElementId>,
    host_editing: Option<ElementId>,
    last_positions: PositionMap,
    frames: FrameScheduler,
}

impl Reconciler {
    pub fn new(config: ReconcileConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// True while the host reports an active text-edit target.
    pub fn is_editing(&self) -> bool {
        self.host_editing.is_some()
    }

    pub fn known_elements(&self) -> &[SceneElement] {
        &self.known_elements
    }

    pub fn frames(&self) -> &FrameScheduler {
        &self.frames
    }

    /// Adopts the host's existing scene as the baseline without mirroring any of it, so content
    /// the host had before the first push is preserved by that push.
    pub fn prime(&mut self, elements: &[SceneElement], app_state: &AppState) {
        self.known_elements = elements.to_vec();
        self.host_selection = app_state.selected_element_ids.clone();
        self.host_editing = app_state.editing_text_element_id.clone();
    }

    /// Writes the projection into the host unless it is unchanged since the last write.
    pub fn push<H: SceneHost>(
        &mut self,
        host: &mut H,
        state: &ForestState,
        positions: &PositionMap,
        descriptors: &[ElementDescriptor],
        force: bool,
    ) -> PushOutcome {
        let target_selection = target_selection(state, descriptors);
        let fingerprint = fingerprint(descriptors, &target_selection);
        if !force && fingerprint.is_some() && fingerprint == self.last_fingerprint {
            trace!("scene push skipped, projection unchanged");
            return PushOutcome::Skipped;
        }

        self.last_positions = positions.clone();
        let projected: Vec<SceneElement> =
            descriptors.iter().flat_map(ElementDescriptor::to_scene_elements).collect();
        self.projected_ids.extend(projected.iter().map(|element| element.id.clone()));

        let unmanaged = self.unmanaged_elements();
        let preserved = unmanaged.len();
        let mut elements = projected;
        elements.extend(unmanaged);

        let selection_written = !same_selection(&target_selection, &self.host_selection);
        let app_state = selection_written.then(|| AppStatePatch {
            selected_element_ids: Some(target_selection.clone()),
            editing_text_element_id: None,
        });

        self.engage_suppression();
        host.update_scene(SceneUpdate {
            elements: elements.clone(),
            app_state,
            suppress_history: true,
        });

        let fitted = !self.mounted;
        if fitted {
            let shape_ids: Vec<ElementId> = descriptors
                .iter()
                .filter(|descriptor| descriptor.kind == DescriptorKind::Shape)
                .map(|descriptor| descriptor.id.clone())
                .collect();
            host.scroll_to_content(&shape_ids);
            self.mounted = true;
        }

        if selection_written {
            self.host_selection = target_selection;
        }
        let written = elements.len();
        self.known_elements = elements;
        self.last_fingerprint = fingerprint;

        debug!(elements = written, preserved, selection_written, fitted, "scene push");
        PushOutcome::Written { elements: written, selection_written, fitted }
    }

    /// Interprets a host change notification, mirroring managed edits into `store`.
    pub fn on_scene_change(
        &mut self,
        store: &mut TreeStore,
        elements: &[SceneElement],
        app_state: &AppState,
    ) -> SceneChangeReport {
        let previous = std::mem::replace(&mut self.known_elements, elements.to_vec());
        self.host_selection = app_state.selected_element_ids.clone();
        self.host_editing = app_state.editing_text_element_id.clone();

        if self.suppressed {
            trace!(elements = elements.len(), "scene change suppressed");
            return SceneChangeReport::suppressed();
        }

        let mut report = SceneChangeReport::default();

        report.deleted = mirror_deletions(store, &previous, elements);
        if !report.deleted.is_empty() {
            debug!(deleted = ?report.deleted, "mirrored host deletion");
            return report;
        }

        if app_state.editing_text_element_id.is_none() {
            report.selection_changed = sync_selection(store, elements, &app_state.selected_element_ids);
            report.relabeled = sync_labels(store, elements);
        }
        report.moved = self.sync_positions(store, elements);

        if !report.is_empty() {
            debug!(
                selection_changed = report.selection_changed,
                relabeled = report.relabeled.len(),
                moved = report.moved.len(),
                "mirrored host change"
            );
        }
        report
    }

    /// Asks the host to put `node_id`'s label into edit mode `delay_frames` ticks from now.
    pub fn request_edit(&mut self, node_id: NodeId, delay_frames: u64) {
        self.frames.schedule(delay_frames, FrameTask::StartEdit(node_id));
    }

    /// Advances one frame and runs the tasks that came due.
    pub fn tick<H: SceneHost>(&mut self, host: &mut H, state: &ForestState) -> Vec<FrameTask> {
        let due = self.frames.advance();
        for task in &due {
            match task {
                FrameTask::ReleaseSuppression => {
                    if self.frames.current_frame() >= self.release_at {
                        self.suppressed = false;
                        trace!(frame = self.frames.current_frame(), "scene suppression released");
                    }
                }
                FrameTask::StartEdit(node_id) => self.start_edit(host, state, node_id),
            }
        }
        due
    }

    fn start_edit<H: SceneHost>(&mut self, host: &mut H, state: &ForestState, node_id: &NodeId) {
        let label_id = label_element_id(node_id);
        let has_label = self
            .known_elements
            .iter()
            .any(|element| element.id == label_id && !element.is_deleted);
        if !state.contains(node_id) || !has_label {
            trace!(%node_id, "edit request dropped");
            return;
        }

        let shape_id = shape_element_id(node_id);
        self.engage_suppression();
        host.update_scene(SceneUpdate {
            elements: self.known_elements.clone(),
            app_state: Some(AppStatePatch {
                selected_element_ids: Some(vec![shape_id.clone()]),
                editing_text_element_id: Some(label_id.clone()),
            }),
            suppress_history: true,
        });
        self.host_selection = vec![shape_id];
        self.host_editing = Some(label_id);
        debug!(%node_id, "label edit started");
    }

    /// Suppresses notifications until the next frame. A release queued by an earlier write
    /// does not cut a later write's window short.
    fn engage_suppression(&mut self) {
        self.suppressed = true;
        self.release_at = self.frames.current_frame() + 1;
        self.frames.schedule(1, FrameTask::ReleaseSuppression);
    }

    /// Host elements the projection does not own and must carry through a write untouched.
    fn unmanaged_elements(&self) -> Vec<SceneElement> {
        let managed: BTreeSet<&ElementId> = self
            .known_elements
            .iter()
            .filter(|element| element.tag().is_some())
            .map(|element| &element.id)
            .chain(self.projected_ids.iter())
            .collect();
        let is_managed = |id: &Option<ElementId>| id.as_ref().is_some_and(|id| managed.contains(id));

        self.known_elements
            .iter()
            .filter(|element| {
                element.tag().is_none()
                    && !managed.contains(&element.id)
                    && !(element.is_text() && is_managed(&element.container_id))
                    && !(element.is_connector()
                        && (is_managed(&element.start_binding) || is_managed(&element.end_binding)))
            })
            .cloned()
            .collect()
    }

    fn sync_positions(&self, store: &mut TreeStore, elements: &[SceneElement]) -> Vec<NodeId> {
        let mut moved = Vec::new();
        for element in elements.iter().filter(|element| !element.is_deleted) {
            let Some(tag) = element.tag().filter(|tag| tag.role == TagRole::Shape) else {
                continue;
            };
            let Some(node) = store.node(&tag.owner_node_id) else {
                continue;
            };
            let Some(reference) =
                node.position().or_else(|| self.last_positions.get(&tag.owner_node_id).copied())
            else {
                continue;
            };
            let at = element.position();
            if at.differs_from(&reference, self.config.position_epsilon) {
                store.set_node_position(&tag.owner_node_id, at);
                moved.push(tag.owner_node_id);
            }
        }
        moved
    }
}

/// Resolves a host selection to a node: selected text bound to a container stands for the
/// container, and the first tagged element wins.
pub fn resolve_selection(elements: &[SceneElement], selected: &[ElementId]) -> Option<NodeId> {
    let by_id: BTreeMap<&str, &SceneElement> = elements
        .iter()
        .filter(|element| !element.is_deleted)
        .map(|element| (element.id.as_str(), element))
        .collect();

    selected.iter().find_map(|element_id| {
        let element = *by_id.get(element_id.as_str())?;
        let element = match (&element.container_id, element.is_text()) {
            (Some(container_id), true) => by_id.get(container_id.as_str()).copied().unwrap_or(element),
            _ => element,
        };
        element.tag().map(|tag| tag.owner_node_id)
    })
}

fn target_selection(state: &ForestState, descriptors: &[ElementDescriptor]) -> Vec<ElementId> {
    let Some(selected) = state.selected_node_id() else {
        return Vec::new();
    };
    let shape_id = shape_element_id(selected);
    if descriptors.iter().any(|descriptor| descriptor.id == shape_id) {
        vec![shape_id]
    } else {
        Vec::new()
    }
}

/// `None` when the projection cannot be serialized; such a projection is always written.
fn fingerprint(descriptors: &[ElementDescriptor], target_selection: &[ElementId]) -> Option<u64> {
    let serialized = serde_json::to_string(descriptors).ok()?;
    let mut hasher = DefaultHasher::new();
    serialized.hash(&mut hasher);
    target_selection.hash(&mut hasher);
    Some(hasher.finish())
}

fn same_selection(left: &[ElementId], right: &[ElementId]) -> bool {
    left.iter().collect::<BTreeSet<_>>() == right.iter().collect::<BTreeSet<_>>()
}

/// Deletes the nodes whose shapes vanished from the host since `previous`, topmost first.
fn mirror_deletions(
    store: &mut TreeStore,
    previous: &[SceneElement],
    current: &[SceneElement],
) -> Vec<NodeId> {
    let current_by_id: BTreeMap<&str, &SceneElement> =
        current.iter().map(|element| (element.id.as_str(), element)).collect();

    let removed: BTreeSet<NodeId> = previous
        .iter()
        .filter(|element| !element.is_deleted)
        .filter_map(|element| {
            let tag = element.tag().filter(|tag| tag.role == TagRole::Shape)?;
            let gone = current_by_id.get(element.id.as_str()).map_or(true, |now| now.is_deleted);
            (gone && store.state().contains(&tag.owner_node_id)).then_some(tag.owner_node_id)
        })
        .collect();

    let topmost: Vec<NodeId> = removed
        .iter()
        .filter(|node_id| !store.state().ancestors(node_id).any(|ancestor| removed.contains(ancestor)))
        .cloned()
        .collect();

    let mut deleted = Vec::new();
    for node_id in topmost {
        if store.state().contains(&node_id) {
            store.delete_node(&node_id);
            deleted.push(node_id);
        }
    }
    deleted
}

/// Returns true when the store selection changed.
fn sync_selection(store: &mut TreeStore, elements: &[SceneElement], selected: &[ElementId]) -> bool {
    match resolve_selection(elements, selected) {
        Some(node_id) => {
            if !store.state().contains(&node_id) || store.selected_node_id() == Some(&node_id) {
                return false;
            }
            store.select_node(Some(node_id));
            true
        }
        None => {
            if store.selected_node_id().is_none() {
                return false;
            }
            store.select_node(None);
            true
        }
    }
}

fn sync_labels(store: &mut TreeStore, elements: &[SceneElement]) -> Vec<NodeId> {
    let tags_by_id: BTreeMap<&str, NodeId> = elements
        .iter()
        .filter(|element| !element.is_deleted)
        .filter_map(|element| element.tag().map(|tag| (element.id.as_str(), tag.owner_node_id)))
        .collect();

    let mut relabeled = Vec::new();
    for element in elements.iter().filter(|element| element.is_text() && !element.is_deleted) {
        let Some(text) = element.text.as_deref() else {
            continue;
        };
        let owner = match element.tag() {
            Some(tag) if tag.role == TagRole::Label => Some(tag.owner_node_id),
            _ => element
                .container_id
                .as_ref()
                .and_then(|container_id| tags_by_id.get(container_id.as_str()).cloned()),
        };
        let Some(node_id) = owner else {
            continue;
        };
        let label = normalize_label(text);
        if store.node(&node_id).is_some_and(|node| node.label() != label) {
            store.update_label(&node_id, label);
            relabeled.push(node_id);
        }
    }
    relabeled
}
