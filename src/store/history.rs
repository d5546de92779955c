// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::VecDeque;

use crate::model::ForestState;

pub const DEFAULT_HISTORY_CAPACITY: usize = 250;

/// Bounded undo stack plus redo stack of whole-state snapshots.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<ForestState>,
    redo: Vec<ForestState>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { undo: VecDeque::with_capacity(capacity.min(64)), redo: Vec::new(), capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Records the state as it was right before a mutation; invalidates redo.
    pub fn record(&mut self, snapshot: ForestState) {
        if self.undo.len() == self.capacity {
            self.undo.pop_front();
        }
        self.undo.push_back(snapshot);
        self.redo.clear();
    }

    /// Swaps `live` with the newest undo snapshot. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, live: &mut ForestState) -> bool {
        let Some(snapshot) = self.undo.pop_back() else {
            return false;
        };
        self.redo.push(std::mem::replace(live, snapshot));
        true
    }

    /// Swaps `live` with the newest redo snapshot. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self, live: &mut ForestState) -> bool {
        let Some(snapshot) = self.redo.pop() else {
            return false;
        };
        let previous = std::mem::replace(live, snapshot);
        if self.undo.len() == self.capacity {
            self.undo.pop_front();
        }
        self.undo.push_back(previous);
        true
    }
}
