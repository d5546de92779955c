// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A forest of labeled nodes plus the soft-deleted set and the current selection.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod forest;
pub mod geometry;
pub mod ids;
pub mod node;

pub use forest::{ForestState, NodeTable};
pub use geometry::Point;
pub use ids::{Id, IdError, NodeId, NodeIdAllocator};
pub use node::{ChildIds, Node, NodeKind, NodeMetadata, ParseNodeKindError};
