// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rstest::{fixture, rstest};

use super::Workspace;
use crate::config::Config;
use crate::model::fixtures::forest_two_roots;
use crate::model::NodeId;
use crate::scene::{ElementId, FrameTask, MemoryHost, PushOutcome};
use crate::shortcut::Action;
use crate::store::TreeStore;

type TestWorkspace = Workspace<MemoryHost>;

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// One host frame: deliver notifications (including echoes of writes they caused), then tick.
fn pump(workspace: &mut TestWorkspace) -> Vec<FrameTask> {
    while let Some((elements, app_state)) = workspace.host_mut().take_notification() {
        workspace.on_scene_change(&elements, &app_state);
    }
    workspace.tick_frame()
}

fn select(workspace: &mut TestWorkspace, node_id: &str) {
    workspace.store_mut().select_node(Some(nid(node_id)));
    workspace.refresh();
    pump(workspace);
}

#[fixture]
fn workspace() -> TestWorkspace {
    let store = TreeStore::with_state(forest_two_roots(), 250);
    let mut workspace = Workspace::new(store, MemoryHost::new(), &Config::default());
    assert!(matches!(workspace.refresh(), PushOutcome::Written { fitted: true, .. }));
    pump(&mut workspace);
    workspace
}

#[rstest]
fn refresh_pushes_only_after_store_changes(mut workspace: TestWorkspace) {
    assert_eq!(workspace.refresh(), PushOutcome::Skipped);
    workspace.store_mut().update_label(&nid("r2"), "Renamed");
    assert!(matches!(workspace.refresh(), PushOutcome::Written { .. }));
    let label = workspace.host().element("label-r2").and_then(|element| element.text.clone());
    assert_eq!(label.as_deref(), Some("Renamed"));
}

#[rstest]
fn tab_creates_a_child_and_opens_its_label_editor(mut workspace: TestWorkspace) {
    select(&mut workspace, "b");
    assert_eq!(workspace.handle_key(&key(KeyCode::Tab), false), Some(Action::AddChild));

    let child = workspace.store().selected_node_id().cloned().expect("child selected");
    assert_eq!(workspace.store().node(&child).and_then(|node| node.parent_id()), Some(&nid("b")));
    let shape_id = format!("shape-{child}");
    let label_id = format!("label-{child}");
    assert!(workspace.host().element(&shape_id).is_some());

    pump(&mut workspace);
    assert_eq!(workspace.host().app_state().editing_text_element_id, None);
    assert_eq!(pump(&mut workspace), vec![FrameTask::StartEdit(child.clone())]);
    assert_eq!(
        workspace.host().app_state().editing_text_element_id.as_deref(),
        Some(label_id.as_str())
    );

    // Shortcuts stay off while the label is being edited.
    assert_eq!(workspace.handle_key(&key(KeyCode::Tab), false), None);

    pump(&mut workspace);
    workspace.host_mut().edit_text(&label_id, "Gamma");
    workspace.host_mut().end_text_edit();
    pump(&mut workspace);
    assert_eq!(workspace.store().node(&child).map(|node| node.label()), Some("Gamma"));
    assert!(!workspace.reconciler().is_editing());
}

#[rstest]
fn enter_on_a_root_adds_nothing(mut workspace: TestWorkspace) {
    select(&mut workspace, "r2");
    let nodes = workspace.store().state().nodes().len();

    assert_eq!(workspace.handle_key(&key(KeyCode::Enter), false), Some(Action::AddSibling));
    assert_eq!(workspace.store().state().nodes().len(), nodes);
    assert_eq!(workspace.reconciler().frames().pending(), 0);
}

#[rstest]
fn enter_on_a_child_inserts_a_sibling_after_it(mut workspace: TestWorkspace) {
    select(&mut workspace, "a1");
    let created = workspace.dispatch(Action::AddSibling).expect("sibling created");
    let children = workspace.store().node(&nid("a")).expect("a").children_ids().to_vec();
    assert_eq!(children, vec![nid("a1"), created, nid("a2")]);
}

#[rstest]
fn delete_key_removes_the_branch_and_moves_selection_to_the_parent(mut workspace: TestWorkspace) {
    select(&mut workspace, "a");
    assert_eq!(workspace.handle_key(&key(KeyCode::Delete), false), Some(Action::DeleteNode));

    assert!(workspace.host().element("shape-a").is_none());
    assert!(workspace.host().element("shape-a1").is_none());
    assert_eq!(workspace.store().selected_node_id(), Some(&nid("r1")));
    assert_eq!(
        workspace.host().app_state().selected_element_ids,
        vec![ElementId::new("shape-r1")]
    );
}

#[rstest]
fn space_toggles_collapse_and_escape_deselects(mut workspace: TestWorkspace) {
    select(&mut workspace, "a");
    workspace.handle_key(&key(KeyCode::Char(' ')), false);
    assert!(workspace.host().element("shape-a1").is_none());
    pump(&mut workspace);

    workspace.handle_key(&key(KeyCode::Esc), false);
    assert_eq!(workspace.store().selected_node_id(), None);
    assert!(workspace.host().app_state().selected_element_ids.is_empty());
    assert!(workspace.store().state().contains(&nid("a1")));
}

#[rstest]
fn f2_edits_the_selected_label_on_the_next_frame(mut workspace: TestWorkspace) {
    workspace.store_mut().select_node(Some(nid("b")));
    assert_eq!(workspace.handle_key(&key(KeyCode::F(2)), false), Some(Action::StartEdit));

    let due = pump(&mut workspace);
    assert!(due.contains(&FrameTask::StartEdit(nid("b"))));
    assert_eq!(
        workspace.host().app_state().editing_text_element_id.as_deref(),
        Some("label-b")
    );
    assert!(workspace.reconciler().is_suppressed());
}

#[rstest]
#[case::control(KeyModifiers::CONTROL, false)]
#[case::editable_target(KeyModifiers::NONE, true)]
fn blocked_keys_do_nothing(
    mut workspace: TestWorkspace,
    #[case] modifiers: KeyModifiers,
    #[case] editable_target: bool,
) {
    select(&mut workspace, "b");
    let event = KeyEvent::new(KeyCode::Tab, modifiers);
    assert_eq!(workspace.handle_key(&event, editable_target), None);
    assert!(!workspace.store().can_undo());
}

#[rstest]
fn undo_in_the_store_is_pushed_on_the_next_frame(mut workspace: TestWorkspace) {
    workspace.host_mut().delete_element("shape-r2");
    pump(&mut workspace);
    assert!(!workspace.store().state().contains(&nid("r2")));

    pump(&mut workspace);
    workspace.store_mut().undo();
    pump(&mut workspace);
    assert!(workspace.host().element("shape-r2").is_some_and(|element| !element.is_deleted));
}

#[rstest]
fn into_parts_releases_the_store(workspace: TestWorkspace) {
    let (mut store, host) = workspace.into_parts();
    store.create_root("Detached");
    assert!(host.element("shape-r1").is_some());
}
