// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::ids::NodeId;
use super::node::Node;

pub type NodeTable = BTreeMap<NodeId, Node>;

/// The complete canonical document: live forest, soft-deleted nodes and view selection.
///
/// A whole `ForestState` is also what undo/redo snapshots hold.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForestState {
    root_ids: Vec<NodeId>,
    nodes: NodeTable,
    deleted_nodes: NodeTable,
    selected_node_id: Option<NodeId>,
    focus_branch_id: Option<NodeId>,
}

impl ForestState {
    pub fn root_ids(&self) -> &[NodeId] {
        &self.root_ids
    }

    pub fn root_ids_mut(&mut self) -> &mut Vec<NodeId> {
        &mut self.root_ids
    }

    pub fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut NodeTable {
        &mut self.nodes
    }

    pub fn deleted_nodes(&self) -> &NodeTable {
        &self.deleted_nodes
    }

    pub fn deleted_nodes_mut(&mut self) -> &mut NodeTable {
        &mut self.deleted_nodes
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    pub fn selected_node_id(&self) -> Option<&NodeId> {
        self.selected_node_id.as_ref()
    }

    pub fn set_selected_node_id(&mut self, node_id: Option<NodeId>) {
        self.selected_node_id = node_id;
    }

    pub fn focus_branch_id(&self) -> Option<&NodeId> {
        self.focus_branch_id.as_ref()
    }

    pub fn set_focus_branch_id(&mut self, node_id: Option<NodeId>) {
        self.focus_branch_id = node_id;
    }

    /// Walks `node_id`'s ancestors (nearest first) through live nodes only.
    ///
    /// Stops at a missing parent and on revisiting a node, so drifted or cyclic parent links end
    /// the walk instead of looping.
    pub fn ancestors<'a>(&'a self, node_id: &NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
        let mut seen = Vec::<&NodeId>::new();
        let mut current = self.nodes.get(node_id).and_then(Node::parent_id);
        std::iter::from_fn(move || {
            let parent_id = current?;
            let node = self.nodes.get(parent_id)?;
            if seen.contains(&parent_id) {
                return None;
            }
            seen.push(parent_id);
            current = node.parent_id();
            Some(node.id())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ForestState;
    use crate::model::{Node, NodeId};

    fn nid(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    #[test]
    fn ancestors_walk_nearest_first_and_stop_at_cycles() {
        let mut state = ForestState::default();
        state.nodes_mut().insert(nid("a"), Node::new(nid("a"), "A", Some(nid("c")), 0));
        state.nodes_mut().insert(nid("b"), Node::new(nid("b"), "B", Some(nid("a")), 0));
        state.nodes_mut().insert(nid("c"), Node::new(nid("c"), "C", Some(nid("b")), 0));

        let chain = state.ancestors(&nid("c")).map(NodeId::as_str).collect::<Vec<_>>();
        assert_eq!(chain, vec!["b", "a", "c"]);
    }

    #[test]
    fn ancestors_stop_at_missing_parent() {
        let mut state = ForestState::default();
        state.nodes_mut().insert(nid("a"), Node::new(nid("a"), "A", Some(nid("gone")), 0));
        state.nodes_mut().insert(nid("b"), Node::new(nid("b"), "B", Some(nid("a")), 0));

        let chain = state.ancestors(&nid("b")).map(NodeId::as_str).collect::<Vec<_>>();
        assert_eq!(chain, vec!["a"]);
    }
}
