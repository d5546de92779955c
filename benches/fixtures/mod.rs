// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use dryad::model::{ForestState, NodeId};
use dryad::store::TreeStore;

/// Builds `roots` trees, each `depth` levels deep with `fanout` children per branch.
pub fn balanced_store(roots: usize, fanout: usize, depth: usize) -> TreeStore {
    let mut store = TreeStore::new(0);
    for root in 0..roots {
        let root_id = store.create_root(format!("Root {root}"));
        grow(&mut store, &root_id, fanout, depth, &format!("{root}"));
    }
    store
}

fn grow(store: &mut TreeStore, parent_id: &NodeId, fanout: usize, depth: usize, path: &str) {
    if depth == 0 {
        return;
    }
    for child in 0..fanout {
        let label = format!("Node {path}.{child}");
        let Ok(child_id) = store.add_child(parent_id, label) else {
            return;
        };
        grow(store, &child_id, fanout, depth - 1, &format!("{path}.{child}"));
    }
}

pub fn balanced_forest(roots: usize, fanout: usize, depth: usize) -> ForestState {
    balanced_store(roots, fanout, depth).state().clone()
}

/// A single root whose descendants form one long chain.
pub fn chain_forest(len: usize) -> ForestState {
    let mut store = TreeStore::new(0);
    let mut parent_id = store.create_root("Chain");
    for idx in 0..len {
        match store.add_child(&parent_id, format!("Link {idx}")) {
            Ok(child_id) => parent_id = child_id,
            Err(_) => break,
        }
    }
    store.state().clone()
}

pub fn node_count(state: &ForestState) -> usize {
    state.nodes().len()
}
