// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dryad: tree-structured outline documents projected onto a freeform scene.
//!
//! The [`store::TreeStore`] owns the forest. [`layout`] places it, [`scene::project`] turns it
//! into tagged scene elements and [`scene::Reconciler`] keeps those elements and the scene host
//! in sync in both directions. [`workspace::Workspace`] wires the pieces together; [`tui`] is an
//! interactive terminal host for it.

pub mod config;
pub mod layout;
pub mod model;
pub mod scene;
pub mod shortcut;
pub mod store;
pub mod tui;
pub mod workspace;
