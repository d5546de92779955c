// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::trace;

use super::history::{History, DEFAULT_HISTORY_CAPACITY};
use super::subtree::collect_subtree;
use crate::model::{ForestState, Node, NodeId, NodeIdAllocator, NodeKind, Point};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    NotFound { node_id: NodeId },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { node_id } => write!(f, "node not found (id={node_id})"),
        }
    }
}

impl std::error::Error for TreeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ForestState, u64)>;

fn system_now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// The single writer of the canonical forest.
///
/// Every edit replaces the live state and, unless it was a no-op, records the previous state for
/// undo, bumps `rev` and notifies subscribers. Selection and focus changes bump `rev` too (the
/// scene needs them) but are not undoable.
pub struct TreeStore {
    state: ForestState,
    history: History,
    ids: NodeIdAllocator,
    rev: u64,
    clock: fn() -> u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for TreeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeStore")
            .field("rev", &self.rev)
            .field("state", &self.state)
            .field("undo_len", &self.history.undo_len())
            .field("redo_len", &self.history.redo_len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl TreeStore {
    pub fn new(history_capacity: usize) -> Self {
        Self::with_state(ForestState::default(), history_capacity)
    }

    /// Starts from an existing forest; fresh ids are allocated past any `n<number>` id in it.
    pub fn with_state(state: ForestState, history_capacity: usize) -> Self {
        let mut ids = NodeIdAllocator::default();
        for node_id in state.nodes().keys().chain(state.deleted_nodes().keys()) {
            ids.observe(node_id);
        }
        Self {
            state,
            history: History::with_capacity(history_capacity),
            ids,
            rev: 0,
            clock: system_now_millis,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &ForestState {
        &self.state
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.state.node(node_id)
    }

    pub fn selected_node_id(&self) -> Option<&NodeId> {
        self.state.selected_node_id()
    }

    /// Monotonic change counter; differs after every observable change.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn can_undo(&self) -> bool {
        self.history.undo_len() > 0
    }

    pub fn can_redo(&self) -> bool {
        self.history.redo_len() > 0
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&ForestState, u64) + 'static,
    ) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn create_root(&mut self, label: impl Into<String>) -> NodeId {
        let node_id = self.ids.allocate();
        let node = Node::new(node_id.clone(), label, None, (self.clock)());
        self.commit(|state| {
            state.root_ids_mut().push(node_id.clone());
            state.nodes_mut().insert(node_id.clone(), node);
            state.set_selected_node_id(Some(node_id.clone()));
        });
        node_id
    }

    pub fn add_child(
        &mut self,
        parent_id: &NodeId,
        label: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        if !self.state.contains(parent_id) {
            return Err(TreeError::NotFound { node_id: parent_id.clone() });
        }

        let node_id = self.ids.allocate();
        let node = Node::new(node_id.clone(), label, Some(parent_id.clone()), (self.clock)());
        self.commit(|state| {
            if let Some(parent) = state.nodes_mut().get_mut(parent_id) {
                parent.children_ids_mut().push(node_id.clone());
                parent.set_collapsed(false);
            }
            state.nodes_mut().insert(node_id.clone(), node);
            state.set_selected_node_id(Some(node_id.clone()));
        });
        Ok(node_id)
    }

    /// Inserts a node right after `sibling_id` under the same parent.
    ///
    /// Roots have no parent to attach to: for a root (or an unknown id, or a node whose parent is
    /// gone) `sibling_id` is returned unchanged and nothing happens.
    pub fn add_sibling(&mut self, sibling_id: &NodeId, label: impl Into<String>) -> NodeId {
        let Some(parent_id) = self.state.node(sibling_id).and_then(Node::parent_id).cloned() else {
            return sibling_id.clone();
        };
        if !self.state.contains(&parent_id) {
            return sibling_id.clone();
        }

        let node_id = self.ids.allocate();
        let node = Node::new(node_id.clone(), label, Some(parent_id.clone()), (self.clock)());
        self.commit(|state| {
            if let Some(parent) = state.nodes_mut().get_mut(&parent_id) {
                let children = parent.children_ids_mut();
                match children.iter().position(|id| id == sibling_id) {
                    Some(index) => children.insert(index + 1, node_id.clone()),
                    None => children.push(node_id.clone()),
                }
            }
            state.nodes_mut().insert(node_id.clone(), node);
            state.set_selected_node_id(Some(node_id.clone()));
        });
        node_id
    }

    pub fn update_label(&mut self, node_id: &NodeId, label: &str) {
        match self.state.node(node_id) {
            Some(node) if node.label() != label => {}
            _ => return,
        }
        let now = (self.clock)();
        self.commit(|state| {
            if let Some(node) = state.nodes_mut().get_mut(node_id) {
                node.set_label(label);
                node.metadata_mut().touch(now);
            }
        });
    }

    /// Soft-deletes `node_id` and its whole subtree.
    pub fn delete_node(&mut self, node_id: &NodeId) {
        let Some(node) = self.state.node(node_id) else {
            return;
        };
        let parent_id = node.parent_id().cloned();
        let doomed = collect_subtree(self.state.nodes(), node_id);
        let doomed_set = doomed.iter().collect::<BTreeSet<_>>();
        let selection_doomed =
            self.state.selected_node_id().is_some_and(|selected| doomed_set.contains(selected));
        let focus_doomed =
            self.state.focus_branch_id().is_some_and(|focused| doomed_set.contains(focused));

        self.commit(|state| {
            if let Some(parent_id) = &parent_id {
                if let Some(parent) = state.nodes_mut().get_mut(parent_id) {
                    parent.children_ids_mut().retain(|child| child != node_id);
                }
            }
            for id in &doomed {
                if let Some(node) = state.nodes_mut().remove(id) {
                    state.deleted_nodes_mut().insert(id.clone(), node);
                }
            }
            state.root_ids_mut().retain(|root| root != node_id);

            if selection_doomed {
                let fallback = parent_id
                    .clone()
                    .filter(|parent| state.contains(parent))
                    .or_else(|| state.root_ids().last().cloned());
                state.set_selected_node_id(fallback);
            }
            if focus_doomed {
                state.set_focus_branch_id(None);
            }
        });
    }

    /// Brings a soft-deleted subtree back and re-attaches it where it was recorded.
    pub fn restore_node(&mut self, node_id: &NodeId) {
        if !self.state.deleted_nodes().contains_key(node_id) {
            return;
        }
        let revived = collect_subtree(self.state.deleted_nodes(), node_id);

        self.commit(|state| {
            for id in &revived {
                if let Some(node) = state.deleted_nodes_mut().remove(id) {
                    state.nodes_mut().insert(id.clone(), node);
                }
            }

            let parent_id = state.node(node_id).and_then(Node::parent_id).cloned();
            match parent_id {
                Some(parent_id) => {
                    if let Some(parent) = state.nodes_mut().get_mut(&parent_id) {
                        if !parent.children_ids().contains(node_id) {
                            parent.children_ids_mut().push(node_id.clone());
                        }
                    }
                }
                None => {
                    if !state.root_ids().contains(node_id) {
                        state.root_ids_mut().push(node_id.clone());
                    }
                }
            }
        });
    }

    pub fn toggle_collapse(&mut self, node_id: &NodeId) {
        match self.state.node(node_id) {
            Some(node) if !node.children_ids().is_empty() => {}
            _ => return,
        }
        self.commit(|state| {
            if let Some(node) = state.nodes_mut().get_mut(node_id) {
                let collapsed = node.collapsed();
                node.set_collapsed(!collapsed);
            }
        });
    }

    pub fn set_node_kind(&mut self, node_id: &NodeId, kind: NodeKind) {
        match self.state.node(node_id) {
            Some(node) if node.kind() != kind => {}
            _ => return,
        }
        self.commit(|state| {
            if let Some(node) = state.nodes_mut().get_mut(node_id) {
                node.set_kind(kind);
            }
        });
    }

    /// Pins `node_id` at `position`; layout returns the override verbatim from now on.
    pub fn set_node_position(&mut self, node_id: &NodeId, position: Point) {
        match self.state.node(node_id) {
            Some(node) if node.position() != Some(position) => {}
            _ => return,
        }
        let now = (self.clock)();
        self.commit(|state| {
            if let Some(node) = state.nodes_mut().get_mut(node_id) {
                node.set_position(Some(position));
                node.metadata_mut().touch(now);
            }
        });
    }

    pub fn clear_node_position(&mut self, node_id: &NodeId) {
        match self.state.node(node_id) {
            Some(node) if node.position().is_some() => {}
            _ => return,
        }
        let now = (self.clock)();
        self.commit(|state| {
            if let Some(node) = state.nodes_mut().get_mut(node_id) {
                node.set_position(None);
                node.metadata_mut().touch(now);
            }
        });
    }

    pub fn set_node_notes(&mut self, node_id: &NodeId, notes: Option<&str>) {
        match self.state.node(node_id) {
            Some(node) if node.metadata().notes() != notes => {}
            _ => return,
        }
        let now = (self.clock)();
        self.commit(|state| {
            if let Some(node) = state.nodes_mut().get_mut(node_id) {
                node.metadata_mut().set_notes(notes);
                node.metadata_mut().touch(now);
            }
        });
    }

    pub fn set_node_links(&mut self, node_id: &NodeId, links: Vec<String>) {
        match self.state.node(node_id) {
            Some(node) if node.metadata().links() != links.as_slice() => {}
            _ => return,
        }
        let now = (self.clock)();
        self.commit(|state| {
            if let Some(node) = state.nodes_mut().get_mut(node_id) {
                node.metadata_mut().set_links(links);
                node.metadata_mut().touch(now);
            }
        });
    }

    /// Selection is view state: never recorded in history.
    pub fn select_node(&mut self, node_id: Option<NodeId>) {
        if self.state.selected_node_id() == node_id.as_ref() {
            return;
        }
        self.state.set_selected_node_id(node_id);
        self.changed();
    }

    /// Focuses a live branch, or clears the focus with `None`. Unknown ids are ignored.
    pub fn set_focus_branch(&mut self, node_id: Option<NodeId>) {
        if node_id.as_ref().is_some_and(|id| !self.state.contains(id)) {
            return;
        }
        if self.state.focus_branch_id() == node_id.as_ref() {
            return;
        }
        self.state.set_focus_branch_id(node_id);
        self.changed();
    }

    pub fn undo(&mut self) {
        if self.history.undo(&mut self.state) {
            trace!(rev = self.rev, "tree store undo");
            self.changed();
        }
    }

    pub fn redo(&mut self) {
        if self.history.redo(&mut self.state) {
            trace!(rev = self.rev, "tree store redo");
            self.changed();
        }
    }

    fn commit(&mut self, edit: impl FnOnce(&mut ForestState)) {
        let mut next = self.state.clone();
        edit(&mut next);
        let previous = std::mem::replace(&mut self.state, next);
        self.history.record(previous);
        trace!(rev = self.rev, undo_len = self.history.undo_len(), "tree store history push");
        self.changed();
    }

    fn changed(&mut self) {
        self.rev = self.rev.wrapping_add(1);
        for (_, listener) in &mut self.listeners {
            listener(&self.state, self.rev);
        }
    }
}
