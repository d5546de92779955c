// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Subtree collection that tolerates parent/child drift.
//!
//! A node belongs to the subtree of `root` when it is reachable through `children_ids` *or*
//! through `parent_id` back-references. Both edge sources are followed from every collected node,
//! so a child missing from its parent's list is still found (and vice versa).

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{NodeId, NodeTable};

/// Child lists rebuilt from `parent_id` back-references.
pub(crate) fn parent_index(table: &NodeTable) -> BTreeMap<&NodeId, Vec<&NodeId>> {
    let mut index = BTreeMap::<&NodeId, Vec<&NodeId>>::new();
    for (node_id, node) in table {
        if let Some(parent_id) = node.parent_id() {
            index.entry(parent_id).or_default().push(node_id);
        }
    }
    index
}

/// Collects `root_id` and every descendant present in `table`, in pre-order.
///
/// Returns an empty list when `root_id` itself is not in `table`.
pub fn collect_subtree(table: &NodeTable, root_id: &NodeId) -> Vec<NodeId> {
    if !table.contains_key(root_id) {
        return Vec::new();
    }

    let index = parent_index(table);
    let mut visited = BTreeSet::<&NodeId>::new();
    let mut ordered = Vec::<NodeId>::new();
    let mut stack = vec![root_id];

    while let Some(node_id) = stack.pop() {
        let Some((key, node)) = table.get_key_value(node_id) else {
            continue;
        };
        if !visited.insert(key) {
            continue;
        }
        ordered.push(key.clone());

        // Pushed in reverse so the pop order follows `children_ids` first, then index extras.
        let mut next = Vec::<&NodeId>::new();
        next.extend(node.children_ids().iter().filter(|id| table.contains_key(*id)));
        if let Some(indexed) = index.get(key) {
            next.extend(indexed.iter().copied().filter(|id| !node.children_ids().contains(*id)));
        }
        stack.extend(next.into_iter().rev());
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::collect_subtree;
    use crate::model::fixtures::forest_two_roots;
    use crate::model::{Node, NodeId};

    fn nid(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    fn ids(list: &[NodeId]) -> Vec<&str> {
        list.iter().map(NodeId::as_str).collect()
    }

    #[test]
    fn collects_pre_order_through_children_lists() {
        let state = forest_two_roots();
        let subtree = collect_subtree(state.nodes(), &nid("r1"));
        assert_eq!(ids(&subtree), vec!["r1", "a", "a1", "a2", "b"]);
    }

    #[test]
    fn finds_children_missing_from_parent_list() {
        let mut state = forest_two_roots();
        state.nodes_mut().get_mut("a").expect("a").children_ids_mut().clear();

        let subtree = collect_subtree(state.nodes(), &nid("a"));
        assert_eq!(ids(&subtree), vec!["a", "a1", "a2"]);
    }

    #[test]
    fn finds_children_whose_parent_pointer_drifted() {
        let mut state = forest_two_roots();
        state.nodes_mut().get_mut("b").expect("b").set_parent_id(None);

        let subtree = collect_subtree(state.nodes(), &nid("r1"));
        assert!(subtree.contains(&nid("b")));
    }

    #[test]
    fn survives_cycles_and_missing_roots() {
        let mut state = forest_two_roots();
        state.nodes_mut().get_mut("a1").expect("a1").children_ids_mut().push(nid("r1"));
        state.nodes_mut().insert(nid("x"), Node::new(nid("x"), "X", Some(nid("a2")), 0));

        let subtree = collect_subtree(state.nodes(), &nid("r1"));
        assert_eq!(ids(&subtree), vec!["r1", "a", "a1", "a2", "x", "b"]);
        assert!(collect_subtree(state.nodes(), &nid("missing")).is_empty());
    }
}
