// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::{NodeId, NodeTable, Point};

pub type PositionMap = BTreeMap<NodeId, Point>;

/// Spacing constants for the tree layout, in scene units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub horizontal_gap: f64,
    pub node_height: f64,
    pub vertical_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { horizontal_gap: 280.0, node_height: 44.0, vertical_gap: 80.0 }
    }
}

/// Returns the layout roots: listed ids that are live and parentless (first occurrence wins),
/// followed by any other live parentless node in id order.
///
/// The second group recovers nodes that lost their `root_ids` entry through drift; they still
/// render instead of silently disappearing.
pub fn normalize_roots<'a>(root_ids: &'a [NodeId], nodes: &'a NodeTable) -> Vec<&'a NodeId> {
    let mut seen = BTreeSet::<&NodeId>::new();
    let mut roots = Vec::<&NodeId>::new();

    for root_id in root_ids {
        let is_root = nodes.get(root_id).is_some_and(|node| node.is_root());
        if is_root && seen.insert(root_id) {
            roots.push(root_id);
        }
    }
    for (node_id, node) in nodes {
        if node.is_root() && seen.insert(node_id) {
            roots.push(node_id);
        }
    }

    roots
}

struct TreePass<'a> {
    nodes: &'a NodeTable,
    config: &'a LayoutConfig,
    cursor: f64,
    visited: BTreeSet<&'a NodeId>,
    positions: PositionMap,
}

impl<'a> TreePass<'a> {
    /// Places `node_id` and its visible subtree; returns the node's computed y.
    fn place(&mut self, node_id: &'a NodeId, depth: usize) -> Option<f64> {
        let nodes = self.nodes;
        let node = nodes.get(node_id)?;
        if !self.visited.insert(node_id) {
            return None;
        }

        let x = depth as f64 * self.config.horizontal_gap;
        let mut first_child_y = None::<f64>;
        let mut last_child_y = None::<f64>;
        if !node.collapsed() {
            for child_id in node.children_ids() {
                if let Some(child_y) = self.place(child_id, depth + 1) {
                    first_child_y.get_or_insert(child_y);
                    last_child_y = Some(child_y);
                }
            }
        }

        let y = match (first_child_y, last_child_y) {
            (Some(first), Some(last)) => (first + last) / 2.0,
            _ => {
                let y = self.cursor;
                self.cursor += self.config.node_height + self.config.vertical_gap;
                y
            }
        };

        self.positions.insert(node_id.clone(), Point::new(x, y));
        Some(y)
    }
}

/// Computes a left-to-right tree layout for the whole forest.
///
/// Depth maps to x, leaves stack downwards on one cursor shared by every root, and branches are
/// centered on their first and last visible child. Manual position overrides replace the computed
/// point verbatim at the end. Nodes not reachable from a root are omitted.
pub fn compute_layout(
    root_ids: &[NodeId],
    nodes: &NodeTable,
    config: &LayoutConfig,
) -> PositionMap {
    let mut pass = TreePass {
        nodes,
        config,
        cursor: 0.0,
        visited: BTreeSet::new(),
        positions: PositionMap::new(),
    };

    for root_id in normalize_roots(root_ids, nodes) {
        pass.place(root_id, 0);
    }

    let mut positions = pass.positions;
    for (node_id, point) in positions.iter_mut() {
        if let Some(manual) = nodes.get(node_id).and_then(|node| node.position()) {
            *point = manual;
        }
    }
    positions
}
