// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout algorithms.
//!
//! Assigns a scene position to every visible node of the forest.

pub mod tree;

pub use tree::{compute_layout, normalize_roots, LayoutConfig, PositionMap};
