// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Keyboard shortcuts for tree editing.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    AddChild,
    AddSibling,
    DeleteNode,
    ToggleCollapse,
    Deselect,
    StartEdit,
}

/// Everything the policy needs to know about the moment a key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortcutContext {
    pub has_selection: bool,
    /// The scene host is editing text.
    pub is_editing: bool,
    pub has_modifier: bool,
    /// Focus is in a text input outside the scene.
    pub is_editable_target: bool,
}

impl ShortcutContext {
    /// Shift alone does not count as a modifier.
    pub fn from_key_event(
        event: &KeyEvent,
        has_selection: bool,
        is_editing: bool,
        is_editable_target: bool,
    ) -> Self {
        let chord = KeyModifiers::CONTROL
            | KeyModifiers::ALT
            | KeyModifiers::SUPER
            | KeyModifiers::META
            | KeyModifiers::HYPER;
        Self {
            has_selection,
            is_editing,
            has_modifier: event.modifiers.intersects(chord),
            is_editable_target,
        }
    }

    fn blocks_shortcuts(self) -> bool {
        self.is_editing || self.has_modifier || self.is_editable_target || !self.has_selection
    }
}

pub fn resolve_action(key: KeyCode, context: ShortcutContext) -> Option<Action> {
    if context.blocks_shortcuts() {
        return None;
    }
    match key {
        KeyCode::Tab => Some(Action::AddChild),
        KeyCode::Enter => Some(Action::AddSibling),
        KeyCode::Delete | KeyCode::Backspace => Some(Action::DeleteNode),
        KeyCode::Char(' ') => Some(Action::ToggleCollapse),
        KeyCode::Esc => Some(Action::Deselect),
        KeyCode::F(2) => Some(Action::StartEdit),
        _ => None,
    }
}
