// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in starting documents.

use crate::model::{ForestState, Node, NodeId, NodeKind};
use crate::scene::{ElementKind, SceneElement};

struct Seed<'a> {
    id: &'a str,
    label: &'a str,
    parent: Option<&'a str>,
    kind: NodeKind,
}

const fn seed<'a>(id: &'a str, label: &'a str, parent: Option<&'a str>, kind: NodeKind) -> Seed<'a> {
    Seed { id, label, parent, kind }
}

fn forest_from(seeds: &[Seed<'_>]) -> ForestState {
    let mut state = ForestState::default();
    for seed in seeds {
        let Ok(node_id) = NodeId::new(seed.id) else {
            continue;
        };
        let parent_id = seed.parent.and_then(|parent| NodeId::new(parent).ok());
        let mut node = Node::new(node_id.clone(), seed.label, parent_id.clone(), 0);
        node.set_kind(seed.kind);

        match parent_id {
            Some(parent_id) => {
                if let Some(parent) = state.nodes_mut().get_mut(&parent_id) {
                    parent.children_ids_mut().push(node_id.clone());
                }
            }
            None => state.root_ids_mut().push(node_id.clone()),
        }
        state.nodes_mut().insert(node_id, node);
    }
    state.set_selected_node_id(state.root_ids().first().cloned());
    state
}

/// Two small trees; the second one starts collapsed.
pub fn demo_forest() -> ForestState {
    let mut state = forest_from(&[
        seed("n1", "Launch plan", None, NodeKind::Topic),
        seed("n2", "Research", Some("n1"), NodeKind::Topic),
        seed("n3", "Interview users", Some("n2"), NodeKind::Task),
        seed("n4", "Prior art notes", Some("n2"), NodeKind::Reference),
        seed("n5", "Build", Some("n1"), NodeKind::Topic),
        seed("n6", "Prototype", Some("n5"), NodeKind::Task),
        seed("n7", "Ship", Some("n5"), NodeKind::Task),
        seed("n8", "Someday", None, NodeKind::Topic),
        seed("n9", "Rewrite in a weekend", Some("n8"), NodeKind::Reference),
    ]);
    if let Some(someday) = state.nodes_mut().get_mut("n8") {
        someday.set_collapsed(true);
    }
    state
}

pub fn blank_forest() -> ForestState {
    forest_from(&[seed("n1", "Root", None, NodeKind::Topic)])
}

/// A hand-drawn note with bound text: content the tree knows nothing about.
pub fn demo_note_elements() -> Vec<SceneElement> {
    vec![
        SceneElement::new("note-1", ElementKind::Rectangle, 900.0, -40.0).with_size(200.0, 48.0),
        SceneElement::new("note-1-text", ElementKind::Text, 916.0, -26.0)
            .with_size(168.0, 20.0)
            .with_text("drawn by hand")
            .with_container("note-1"),
    ]
}

#[cfg(test)]
mod tests {
    use super::{blank_forest, demo_forest, demo_note_elements};

    #[test]
    fn demo_forest_is_consistent() {
        let state = demo_forest();
        assert_eq!(state.root_ids().len(), 2);
        assert_eq!(state.nodes().len(), 9);
        for node in state.nodes().values() {
            match node.parent_id() {
                Some(parent_id) => {
                    let parent = state.node(parent_id).expect("parent exists");
                    assert!(parent.children_ids().contains(node.id()));
                }
                None => assert!(state.root_ids().contains(node.id())),
            }
        }
        assert_eq!(state.selected_node_id().map(|id| id.as_str()), Some("n1"));
    }

    #[test]
    fn blank_forest_has_one_selected_root() {
        let state = blank_forest();
        assert_eq!(state.root_ids().len(), 1);
        assert_eq!(state.selected_node_id(), state.root_ids().first());
    }

    #[test]
    fn demo_note_is_untagged() {
        assert!(demo_note_elements().iter().all(|element| element.tag().is_none()));
    }
}
