// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wires the store, the layout, the projector and the reconciler to one scene host.

use std::cell::Cell;
use std::rc::Rc;

use crossterm::event::KeyEvent;
use tracing::debug;

use crate::config::Config;
use crate::layout::{compute_layout, LayoutConfig, PositionMap};
use crate::model::NodeId;
use crate::scene::{
    project, AppState, ElementDescriptor, FrameTask, PushOutcome, Reconciler, SceneChangeReport,
    SceneElement, SceneHost,
};
use crate::shortcut::{resolve_action, Action, ShortcutContext};
use crate::store::{SubscriptionId, TreeStore};

/// Frames between creating a node and opening its label editor; the first push has to land and
/// its echo has to be released before the host accepts an edit target.
const NEW_NODE_EDIT_DELAY: u64 = 2;
const EXISTING_NODE_EDIT_DELAY: u64 = 1;

#[derive(Debug)]
pub struct Workspace<H: SceneHost> {
    store: TreeStore,
    reconciler: Reconciler,
    host: H,
    layout: LayoutConfig,
    dirty: Rc<Cell<bool>>,
    subscription: SubscriptionId,
}

impl<H: SceneHost> Workspace<H> {
    pub fn new(mut store: TreeStore, host: H, config: &Config) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        let subscription = store.subscribe(move |_, _| flag.set(true));
        Self {
            store,
            reconciler: Reconciler::new(config.reconcile()),
            host,
            layout: config.layout,
            dirty,
            subscription,
        }
    }

    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    /// Direct store access; the next [`refresh`](Self::refresh) or frame tick pushes the result.
    pub fn store_mut(&mut self) -> &mut TreeStore {
        &mut self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    pub fn positions(&self) -> PositionMap {
        let state = self.store.state();
        compute_layout(state.root_ids(), state.nodes(), &self.layout)
    }

    pub fn descriptors(&self) -> Vec<ElementDescriptor> {
        let state = self.store.state();
        project(state.root_ids(), state.nodes(), &self.positions())
    }

    /// Takes the host's pre-existing scene as the starting point; call before the first push.
    pub fn prime(&mut self, elements: &[SceneElement], app_state: &AppState) {
        self.reconciler.prime(elements, app_state);
    }

    /// Pushes the current projection if the store changed since the last push.
    pub fn refresh(&mut self) -> PushOutcome {
        if !self.dirty.get() && self.reconciler.is_mounted() {
            return PushOutcome::Skipped;
        }
        self.push(false)
    }

    /// Pushes the current projection even if it is unchanged.
    pub fn force_refresh(&mut self) -> PushOutcome {
        self.push(true)
    }

    fn push(&mut self, force: bool) -> PushOutcome {
        self.dirty.set(false);
        let positions = self.positions();
        let state = self.store.state();
        let descriptors = project(state.root_ids(), state.nodes(), &positions);
        self.reconciler.push(&mut self.host, state, &positions, &descriptors, force)
    }

    /// Handles a change notification from the host, then pushes whatever it changed.
    pub fn on_scene_change(
        &mut self,
        elements: &[SceneElement],
        app_state: &AppState,
    ) -> SceneChangeReport {
        let report = self.reconciler.on_scene_change(&mut self.store, elements, app_state);
        self.refresh();
        report
    }

    /// Runs once per host frame: due tasks first, then a push of any pending store change.
    pub fn tick_frame(&mut self) -> Vec<FrameTask> {
        let due = self.reconciler.tick(&mut self.host, self.store.state());
        self.refresh();
        due
    }

    /// Routes a key press through the shortcut policy; returns the action it triggered.
    pub fn handle_key(&mut self, event: &KeyEvent, is_editable_target: bool) -> Option<Action> {
        let context = ShortcutContext::from_key_event(
            event,
            self.store.selected_node_id().is_some(),
            self.reconciler.is_editing(),
            is_editable_target,
        );
        let action = resolve_action(event.code, context)?;
        self.dispatch(action);
        Some(action)
    }

    /// Applies `action` to the selected node. Returns the node it created, if any.
    pub fn dispatch(&mut self, action: Action) -> Option<NodeId> {
        let selected = self.store.selected_node_id()?.clone();
        debug!(?action, node_id = %selected, "dispatch");

        let created = match action {
            Action::AddChild => self.store.add_child(&selected, "").ok(),
            Action::AddSibling => {
                Some(self.store.add_sibling(&selected, "")).filter(|node_id| *node_id != selected)
            }
            Action::DeleteNode => {
                self.store.delete_node(&selected);
                None
            }
            Action::ToggleCollapse => {
                self.store.toggle_collapse(&selected);
                None
            }
            Action::Deselect => {
                self.store.select_node(None);
                None
            }
            Action::StartEdit => {
                self.reconciler.request_edit(selected, EXISTING_NODE_EDIT_DELAY);
                None
            }
        };

        if let Some(node_id) = &created {
            self.reconciler.request_edit(node_id.clone(), NEW_NODE_EDIT_DELAY);
        }
        self.refresh();
        created
    }

    pub fn into_parts(mut self) -> (TreeStore, H) {
        self.store.unsubscribe(self.subscription);
        (self.store, self.host)
    }
}

#[cfg(test)]
mod tests;
