// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rstest::{fixture, rstest};

use super::canvas::{render_scene, CanvasView};
use super::chrome::{footer_help_line, status_line};
use super::{build_workspace, App};
use crate::config::Config;
use crate::model::{NodeId, NodeKind};
use crate::scene::{ElementKind, SceneElement, Viewport};

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn text_to_string(text: &ratatui::text::Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn line_to_string(line: &ratatui::text::Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect::<String>()
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn chord(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    app.handle_key(KeyEvent::new(code, modifiers));
}

#[fixture]
fn app() -> App {
    let mut app = App::new(build_workspace(&Config::default(), true));
    app.workspace.refresh();
    app.pump();
    app
}

#[rstest]
fn demo_scene_shows_tree_and_freeform_note(app: App) {
    let rendered = text_to_string(&app.scene_text(120, 40));
    assert!(rendered.contains("Launch plan"));
    assert!(rendered.contains("drawn by hand"));
    assert!(!rendered.contains("Rewrite in a weekend"));
}

#[rstest]
fn arrow_keys_move_the_host_selection_and_the_store_follows(mut app: App) {
    assert_eq!(app.workspace.store().selected_node_id(), Some(&nid("n1")));
    press(&mut app, KeyCode::Down);
    app.pump();
    assert_eq!(app.workspace.store().selected_node_id(), Some(&nid("n2")));

    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Up);
    app.pump();
    assert_eq!(app.workspace.store().selected_node_id(), Some(&nid("n1")));
}

#[rstest]
fn f2_then_typing_renames_the_node(mut app: App) {
    press(&mut app, KeyCode::F(2));
    app.pump();
    assert!(app.workspace.host().app_state().editing_text_element_id.is_some());
    app.pump();

    press(&mut app, KeyCode::Backspace);
    press(&mut app, KeyCode::Char('!'));
    press(&mut app, KeyCode::Enter);
    app.pump();

    let label = app.workspace.store().node(&nid("n1")).map(|node| node.label().to_owned());
    assert_eq!(label.as_deref(), Some("Launch pla!"));
    assert!(!app.should_quit);
}

#[rstest]
fn tab_adds_a_child_and_ctrl_z_takes_it_back(mut app: App) {
    press(&mut app, KeyCode::Tab);
    app.pump();
    let child = app.workspace.store().selected_node_id().cloned().expect("child selected");
    assert_ne!(child, nid("n1"));

    app.pump();
    app.pump();
    press(&mut app, KeyCode::Esc);
    app.pump();
    chord(&mut app, KeyCode::Char('z'), KeyModifiers::CONTROL);
    app.pump();
    assert!(!app.workspace.store().state().contains(&child));
}

#[rstest]
fn freeform_notes_survive_tree_edits(mut app: App) {
    chord(&mut app, KeyCode::Char('n'), KeyModifiers::CONTROL);
    app.pump();
    chord(&mut app, KeyCode::Char('r'), KeyModifiers::CONTROL);
    app.pump();

    let host = app.workspace.host();
    let note = host.element("user-note-1").expect("note kept");
    assert!(note.tag().is_none());
    assert!(host.element("user-note-1-text").is_some());
    assert!(host.element("note-1").is_some());
    assert_eq!(app.workspace.store().state().root_ids().len(), 3);
}

#[rstest]
fn shift_arrows_pin_the_selected_node(mut app: App) {
    chord(&mut app, KeyCode::Right, KeyModifiers::SHIFT);
    app.pump();
    let pinned = app.workspace.store().node(&nid("n1")).and_then(|node| node.position());
    let pinned = pinned.expect("position override");
    assert_eq!(pinned.x, 20.0);

    press(&mut app, KeyCode::Char('p'));
    app.pump();
    assert_eq!(app.workspace.store().node(&nid("n1")).and_then(|node| node.position()), None);
}

#[rstest]
fn a_move_right_after_a_store_push_is_not_swallowed(mut app: App) {
    press(&mut app, KeyCode::Char('t'));
    app.pump();
    assert!(!app.workspace.host().has_pending_notification());
    assert!(!app.workspace.reconciler().is_suppressed());

    chord(&mut app, KeyCode::Right, KeyModifiers::SHIFT);
    app.pump();
    let pinned = app.workspace.store().node(&nid("n1")).and_then(|node| node.position());
    assert_eq!(pinned.map(|point| point.x), Some(20.0));
}

#[rstest]
fn the_echo_of_a_shortcut_push_is_absorbed_before_release(mut app: App) {
    press(&mut app, KeyCode::Tab);
    assert!(app.workspace.reconciler().is_suppressed());
    assert!(app.workspace.host().has_pending_notification());
    let rev = app.workspace.store().rev();

    app.pump();
    assert_eq!(app.workspace.store().rev(), rev);
    assert!(!app.workspace.reconciler().is_suppressed());
}

#[rstest]
fn t_cycles_the_selected_kind(mut app: App) {
    press(&mut app, KeyCode::Char('t'));
    app.pump();
    assert_eq!(app.workspace.store().node(&nid("n1")).map(|node| node.kind()), Some(NodeKind::Task));
    assert!(line_to_string(&status_line(&app)).contains("Kind:task"));
}

#[rstest]
fn q_quits_but_not_while_editing(mut app: App) {
    press(&mut app, KeyCode::F(2));
    app.pump();
    app.pump();
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.should_quit);

    press(&mut app, KeyCode::Esc);
    app.pump();
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);
}

#[rstest]
fn footer_lists_shortcuts(app: App) {
    let footer = line_to_string(&footer_help_line(&app));
    assert!(footer.contains("Child:Tab"));
    assert!(footer.contains("Undo:^Z"));
}

#[test]
fn canvas_draws_boxes_labels_and_freeform_text() {
    let elements = vec![
        SceneElement::new("box", ElementKind::Rectangle, 0.0, 0.0).with_size(100.0, 48.0),
        SceneElement::new("box-text", ElementKind::Text, 10.0, 16.0)
            .with_text("hello")
            .with_container("box"),
        SceneElement::new("loose", ElementKind::Text, 0.0, 64.0).with_text("free"),
    ];
    let viewport = Viewport::default();
    let view = CanvasView { viewport: &viewport, selected: Default::default(), editing: None };
    let rendered = text_to_string(&render_scene(&elements, &view, 20, 6));
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0].trim_end(), "┌────────┐");
    assert_eq!(lines[1].trim_end(), "│hello   │");
    assert_eq!(lines[2].trim_end(), "└────────┘");
    assert_eq!(lines[4].trim_end(), "free");
}
