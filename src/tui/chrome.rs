// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Status and footer lines.

use ratatui::prelude::*;

use super::App;

const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "dryad";

pub(super) fn status_line(app: &App) -> Line<'static> {
    let store = app.workspace.store();
    let mut spans = Vec::<Span<'static>>::new();

    match store.selected_node_id().and_then(|node_id| store.node(node_id)) {
        Some(node) => {
            let label = if node.label().is_empty() { "(untitled)" } else { node.label() };
            push_footer_entry(&mut spans, "node", &format!("{} {label}", node.id()));
            push_footer_entry(&mut spans, "kind", node.kind().as_str());
            if node.position().is_some() {
                push_footer_entry(&mut spans, "pinned", "yes");
            }
        }
        None => push_footer_entry(&mut spans, "node", "none"),
    }
    push_footer_entry(&mut spans, "rev", &store.rev().to_string());
    if app.workspace.reconciler().is_editing() {
        push_footer_entry(&mut spans, "mode", "editing");
    }
    if let Some(toast) = &app.toast {
        spans.push(Span::styled(format!("  {toast}"), Style::default().fg(FOOTER_BRAND_COLOR)));
    }
    Line::from(spans)
}

pub(super) fn footer_help_line(app: &App) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    if app.workspace.reconciler().is_editing() {
        push_footer_entry(&mut spans, "type", "text");
        push_footer_entry(&mut spans, "done", "Enter/Esc");
    } else {
        let store = app.workspace.store();
        push_footer_entry(&mut spans, "child", "Tab");
        push_footer_entry(&mut spans, "sibling", "Enter");
        push_footer_entry(&mut spans, "edit", "F2");
        push_footer_entry(&mut spans, "fold", "Space");
        push_footer_entry(&mut spans, "delete", "Del");
        push_footer_entry(&mut spans, "move", "Shift+↑↓←→");
        push_footer_entry(&mut spans, "kind", "t");
        push_footer_entry(&mut spans, "note", "^N");
        push_footer_entry_maybe_disabled(&mut spans, "undo", "^Z", !store.can_undo());
        push_footer_entry_maybe_disabled(&mut spans, "redo", "^Y", !store.can_redo());
        push_footer_entry(&mut spans, "quit", "q");
    }
    spans.push(Span::styled(
        format!("  {FOOTER_BRAND}"),
        Style::default().fg(FOOTER_BRAND_COLOR).add_modifier(Modifier::BOLD),
    ));
    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    push_footer_entry_maybe_disabled(spans, label, value, false);
}

fn push_footer_entry_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    disabled: bool,
) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    let color = if disabled { Color::DarkGray } else { FOOTER_KEY_COLOR };
    spans.push(Span::styled(
        value.to_owned(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
}

fn footer_label_ucfirst(label: &str) -> String {
    let mut chars = label.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}
