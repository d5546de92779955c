// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Everything between the tree store and the scene host.

pub mod element;
pub mod frame;
pub mod host;
pub mod memory;
pub mod project;
pub mod reconcile;
pub mod text;

pub use element::{ElementId, ElementKind, ElementTag, SceneElement, StrokeStyle, TagRole};
pub use frame::{FrameScheduler, FrameTask};
pub use host::{AppState, AppStatePatch, SceneHost, SceneUpdate, Viewport};
pub use memory::MemoryHost;
pub use project::{
    connector_element_id, label_element_id, project, shape_element_id, to_scene_elements,
    DescriptorKind, ElementDescriptor,
};
pub use reconcile::{
    resolve_selection, PushOutcome, ReconcileConfig, Reconciler, SceneChangeReport,
};
