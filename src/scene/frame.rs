// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deferred work, released on later frame ticks of the host.

use std::collections::VecDeque;

use crate::model::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameTask {
    /// Lift echo suppression after a forward push.
    ReleaseSuppression,
    /// Put the node's label into text-edit mode.
    StartEdit(NodeId),
}

#[derive(Debug, Default)]
pub struct FrameScheduler {
    frame: u64,
    queue: VecDeque<(u64, FrameTask)>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_frame(&self) -> u64 {
        self.frame
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_pending(&self, task: &FrameTask) -> bool {
        self.queue.iter().any(|(_, queued)| queued == task)
    }

    /// Queues `task` to run `delay_frames` ticks from now. Zero is treated as one: nothing runs
    /// on the frame that scheduled it.
    pub fn schedule(&mut self, delay_frames: u64, task: FrameTask) {
        let due = self.frame + delay_frames.max(1);
        let at = self.queue.partition_point(|(queued_due, _)| *queued_due <= due);
        self.queue.insert(at, (due, task));
    }

    /// Advances one frame and returns the tasks that came due, in scheduling order.
    pub fn advance(&mut self) -> Vec<FrameTask> {
        self.frame += 1;
        let mut due = Vec::new();
        while self.queue.front().is_some_and(|(at, _)| *at <= self.frame) {
            if let Some((_, task)) = self.queue.pop_front() {
                due.push(task);
            }
        }
        due
    }
}
