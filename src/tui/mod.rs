// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! An in-memory scene host drawn with ratatui and driven by crossterm key events. Tree shortcuts
//! go through the workspace; everything else acts on the scene directly, the way a user would in
//! a drawing host, and reaches the tree only through change notifications.

use std::{error::Error, io, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use tracing::debug;

use crate::config::Config;
use crate::scene::{ElementId, ElementKind, MemoryHost, SceneElement};
use crate::store::TreeStore;
use crate::workspace::Workspace;

mod canvas;
mod chrome;
mod demo;

pub use demo::{blank_forest, demo_forest, demo_note_elements};

use canvas::{render_scene, CanvasView};
use chrome::{footer_help_line, status_line};

const FRAME: Duration = Duration::from_millis(50);
/// Frames a single pump may run: a write, its echo, and one follow-up write.
const SETTLE_FRAMES: usize = 4;
const NUDGE: f64 = 20.0;
const NOTE_WIDTH: f64 = 200.0;
const NOTE_HEIGHT: f64 = 48.0;

/// Builds a workspace over an in-memory host, seeded with the demo forest (and a hand-drawn
/// note) or a single empty root.
pub fn build_workspace(config: &Config, demo: bool) -> Workspace<MemoryHost> {
    let (forest, seed_elements) = if demo {
        (demo_forest(), demo_note_elements())
    } else {
        (blank_forest(), Vec::new())
    };

    let mut host = MemoryHost::new();
    for element in seed_elements {
        host.add_element(element);
    }
    let initial = host.take_notification();

    let store = TreeStore::with_state(forest, config.history_capacity);
    let mut workspace = Workspace::new(store, host, config);
    if let Some((elements, app_state)) = initial {
        workspace.prime(&elements, &app_state);
    }
    workspace
}

/// Runs the interactive terminal UI until the user quits.
pub fn run(workspace: Workspace<MemoryHost>) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(workspace);
    app.workspace.refresh();

    while !app.should_quit {
        app.pump();
        terminal.draw(|frame| draw(frame, &app))?;

        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let block = Block::default().borders(Borders::ALL).title(" scene ");
    let inner = block.inner(layout[0]);
    let scene = app.scene_text(inner.width as usize, inner.height as usize);
    frame.render_widget(Paragraph::new(scene).block(block), layout[0]);
    frame.render_widget(Paragraph::new(status_line(app)), layout[1]);
    frame.render_widget(Paragraph::new(footer_help_line(app)), layout[2]);
}

struct App {
    workspace: Workspace<MemoryHost>,
    should_quit: bool,
    toast: Option<String>,
    notes_added: usize,
}

impl App {
    fn new(workspace: Workspace<MemoryHost>) -> Self {
        Self { workspace, should_quit: false, toast: None, notes_added: 0 }
    }

    /// Delivers what the last input caused, then runs frames until every write made along the
    /// way has had its echo delivered and its suppression released, so the next key press is
    /// never read while a write is still in flight.
    fn pump(&mut self) {
        for _ in 0..SETTLE_FRAMES {
            self.drain_notifications();
            self.workspace.tick_frame();
            if !self.workspace.host().has_pending_notification()
                && !self.workspace.reconciler().is_suppressed()
            {
                return;
            }
        }
        debug!(frames = SETTLE_FRAMES, "scene did not settle");
    }

    fn drain_notifications(&mut self) {
        while let Some((elements, app_state)) = self.workspace.host_mut().take_notification() {
            let report = self.workspace.on_scene_change(&elements, &app_state);
            if !report.deleted.is_empty() {
                self.toast = Some(format!("Deleted {} branch(es)", report.deleted.len()));
            }
        }
    }

    fn scene_text(&self, width: usize, height: usize) -> Text<'static> {
        let host = self.workspace.host();
        let app_state = host.app_state();
        let view = CanvasView {
            viewport: &app_state.viewport,
            selected: app_state.selection_set(),
            editing: app_state.editing_text_element_id.as_ref(),
        };
        render_scene(host.elements(), &view, width, height)
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.toast = None;
        if let Some(editing) = self.workspace.host().app_state().editing_text_element_id.clone() {
            self.handle_editing_key(&editing, key);
            return;
        }
        if let Some(action) = self.workspace.handle_key(&key, false) {
            debug!(?action, "shortcut");
            return;
        }
        self.handle_scene_key(key);
    }

    fn handle_editing_key(&mut self, editing: &ElementId, key: KeyEvent) {
        let host = self.workspace.host_mut();
        match key.code {
            KeyCode::Enter | KeyCode::Esc => host.end_text_edit(),
            KeyCode::Backspace => {
                let mut text = host.element(editing).and_then(|e| e.text.clone()).unwrap_or_default();
                text.pop();
                host.edit_text(editing, text);
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut text = host.element(editing).and_then(|e| e.text.clone()).unwrap_or_default();
                text.push(ch);
                host.edit_text(editing, text);
            }
            _ => {}
        }
    }

    fn handle_scene_key(&mut self, key: KeyEvent) {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('q') if !control => self.should_quit = true,
            KeyCode::Char('c') if control => self.should_quit = true,
            KeyCode::Char('z') if control => self.workspace.store_mut().undo(),
            KeyCode::Char('y') if control => self.workspace.store_mut().redo(),
            KeyCode::Char('n') if control => self.add_note(),
            KeyCode::Char('r') if control => {
                self.workspace.store_mut().create_root("New root");
            }
            KeyCode::Char('t') if !control => self.cycle_selected_kind(),
            KeyCode::Char('p') if !control => self.unpin_selected(),
            KeyCode::Up if shift => self.nudge_selected(0.0, -NUDGE),
            KeyCode::Down if shift => self.nudge_selected(0.0, NUDGE),
            KeyCode::Left if shift => self.nudge_selected(-NUDGE, 0.0),
            KeyCode::Right if shift => self.nudge_selected(NUDGE, 0.0),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            _ => {}
        }
    }

    fn selectable_ids(&self) -> Vec<ElementId> {
        self.workspace
            .host()
            .elements()
            .iter()
            .filter(|element| !element.is_deleted && element.kind.is_shape())
            .map(|element| element.id.clone())
            .collect()
    }

    fn selected_shape_id(&self) -> Option<ElementId> {
        let selectable = self.selectable_ids();
        self.workspace
            .host()
            .app_state()
            .selected_element_ids
            .iter()
            .find(|id| selectable.contains(id))
            .cloned()
    }

    /// Steps the host selection through shapes in scene order.
    fn move_selection(&mut self, delta: isize) {
        let selectable = self.selectable_ids();
        if selectable.is_empty() {
            return;
        }
        let next = match self.selected_shape_id() {
            Some(current) => {
                let index = selectable.iter().position(|id| *id == current).unwrap_or(0);
                index.saturating_add_signed(delta).min(selectable.len() - 1)
            }
            None => 0,
        };
        self.workspace.host_mut().select(vec![selectable[next].clone()]);
    }

    fn nudge_selected(&mut self, dx: f64, dy: f64) {
        if let Some(element_id) = self.selected_shape_id() {
            self.workspace.host_mut().move_element(&element_id, dx, dy);
        }
    }

    fn cycle_selected_kind(&mut self) {
        let store = self.workspace.store_mut();
        let Some(node_id) = store.selected_node_id().cloned() else {
            return;
        };
        if let Some(kind) = store.node(&node_id).map(|node| node.kind().cycled()) {
            store.set_node_kind(&node_id, kind);
        }
    }

    fn unpin_selected(&mut self) {
        let store = self.workspace.store_mut();
        if let Some(node_id) = store.selected_node_id().cloned() {
            store.clear_node_position(&node_id);
        }
    }

    /// Drops a freeform note into the scene, below any previous one.
    fn add_note(&mut self) {
        self.notes_added += 1;
        let index = self.notes_added;
        let viewport = self.workspace.host().app_state().viewport;
        let x = 40.0 - viewport.scroll_x;
        let y = 40.0 - viewport.scroll_y + (index as f64 - 1.0) * (NOTE_HEIGHT + NUDGE);

        let note_id = format!("user-note-{index}");
        let host = self.workspace.host_mut();
        host.add_element(
            SceneElement::new(note_id.as_str(), ElementKind::Rectangle, x, y)
                .with_size(NOTE_WIDTH, NOTE_HEIGHT),
        );
        host.add_element(
            SceneElement::new(format!("{note_id}-text"), ElementKind::Text, x + 16.0, y + 14.0)
                .with_size(NOTE_WIDTH - 32.0, 20.0)
                .with_text(format!("note {index}"))
                .with_container(note_id.as_str()),
        );
        self.toast = Some(format!("Added note {index}"));
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

#[cfg(test)]
mod tests;
