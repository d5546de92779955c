// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The canonical forest store.
//!
//! `TreeStore` is the only writer of the forest. It keeps bounded undo/redo snapshots and
//! notifies subscribers after every observable change.

pub mod history;
pub mod subtree;
pub mod tree_store;

pub use history::{History, DEFAULT_HISTORY_CAPACITY};
pub use subtree::collect_subtree;
pub use tree_store::{SubscriptionId, TreeError, TreeStore};
