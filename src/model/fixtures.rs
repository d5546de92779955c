// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::forest::ForestState;
use super::ids::NodeId;
use super::node::Node;

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn insert(state: &mut ForestState, id: &str, label: &str, parent: Option<&str>) {
    let node = Node::new(nid(id), label, parent.map(nid), 0);
    if let Some(parent) = parent {
        if let Some(parent_node) = state.nodes_mut().get_mut(parent) {
            parent_node.children_ids_mut().push(nid(id));
        }
    } else {
        state.root_ids_mut().push(nid(id));
    }
    state.nodes_mut().insert(nid(id), node);
}

/// Two roots:
///
/// ```text
/// r1 ─┬─ a ─┬─ a1
///     │     └─ a2
///     └─ b
/// r2
/// ```
pub(crate) fn forest_two_roots() -> ForestState {
    let mut state = ForestState::default();
    insert(&mut state, "r1", "Root", None);
    insert(&mut state, "a", "Alpha", Some("r1"));
    insert(&mut state, "a1", "Alpha one", Some("a"));
    insert(&mut state, "a2", "Alpha two", Some("a"));
    insert(&mut state, "b", "Beta", Some("r1"));
    insert(&mut state, "r2", "Second root", None);
    state
}

/// A single chain `r -> c1 -> c2 -> c3`.
pub(crate) fn forest_chain() -> ForestState {
    let mut state = ForestState::default();
    insert(&mut state, "r", "Root", None);
    insert(&mut state, "c1", "One", Some("r"));
    insert(&mut state, "c2", "Two", Some("c1"));
    insert(&mut state, "c3", "Three", Some("c2"));
    state
}
