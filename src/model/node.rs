// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::geometry::Point;
use super::ids::NodeId;

pub type ChildIds = SmallVec<[NodeId; 4]>;

/// What a node represents; drives the projected shape style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Topic,
    Task,
    Reference,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Topic => "topic",
            Self::Task => "task",
            Self::Reference => "reference",
        }
    }

    /// The next kind in `topic -> task -> reference -> topic` order.
    pub fn cycled(self) -> Self {
        match self {
            Self::Topic => Self::Task,
            Self::Task => Self::Reference,
            Self::Reference => Self::Topic,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeKindError {
    value: String,
}

impl fmt::Display for ParseNodeKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown node kind '{}' (expected topic, task or reference)", self.value)
    }
}

impl std::error::Error for ParseNodeKindError {}

impl FromStr for NodeKind {
    type Err = ParseNodeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "topic" => Ok(Self::Topic),
            "task" => Ok(Self::Task),
            "reference" => Ok(Self::Reference),
            _ => Err(ParseNodeKindError { value: s.to_owned() }),
        }
    }
}

/// Bookkeeping that travels with a node but never affects layout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeMetadata {
    created_at: u64,
    updated_at: u64,
    notes: Option<String>,
    links: Vec<String>,
}

impl NodeMetadata {
    pub fn new(now_millis: u64) -> Self {
        Self { created_at: now_millis, updated_at: now_millis, notes: None, links: Vec::new() }
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn updated_at(&self) -> u64 {
        self.updated_at
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn touch(&mut self, now_millis: u64) {
        self.updated_at = now_millis;
    }

    pub fn set_notes<T: Into<String>>(&mut self, notes: Option<T>) {
        self.notes = notes.map(Into::into);
    }

    pub fn set_links(&mut self, links: Vec<String>) {
        self.links = links;
    }
}

/// One labeled node of the forest.
///
/// `parent_id` is `None` exactly for roots. The parent's `children_ids` is expected to list the
/// node once, but readers must not rely on it; see `store::subtree`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    label: String,
    parent_id: Option<NodeId>,
    children_ids: ChildIds,
    kind: NodeKind,
    collapsed: bool,
    position: Option<Point>,
    metadata: NodeMetadata,
}

impl Node {
    pub fn new(
        id: NodeId,
        label: impl Into<String>,
        parent_id: Option<NodeId>,
        now_millis: u64,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            parent_id,
            children_ids: ChildIds::new(),
            kind: NodeKind::Topic,
            collapsed: false,
            position: None,
            metadata: NodeMetadata::new(now_millis),
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn parent_id(&self) -> Option<&NodeId> {
        self.parent_id.as_ref()
    }

    pub fn set_parent_id(&mut self, parent_id: Option<NodeId>) {
        self.parent_id = parent_id;
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn children_ids(&self) -> &[NodeId] {
        &self.children_ids
    }

    pub fn children_ids_mut(&mut self) -> &mut ChildIds {
        &mut self.children_ids
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: NodeKind) {
        self.kind = kind;
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    /// The manual position override, if the user has placed this node.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn set_position(&mut self, position: Option<Point>) {
        self.position = position;
    }

    pub fn metadata(&self) -> &NodeMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut NodeMetadata {
        &mut self.metadata
    }
}
