// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rasterizes scene elements into terminal cells.

use std::collections::{BTreeMap, BTreeSet};

use ratatui::prelude::*;

use crate::scene::text::truncate_with_ellipsis;
use crate::scene::{ElementId, ElementKind, SceneElement, StrokeStyle, Viewport};

/// Scene units per terminal column / row.
const CELL_WIDTH: f64 = 10.0;
const CELL_HEIGHT: f64 = 16.0;

const SELECTED_COLOR: Color = Color::LightGreen;
const MANAGED_COLOR: Color = Color::Cyan;
const FREEFORM_COLOR: Color = Color::Yellow;
const CONNECTOR_COLOR: Color = Color::DarkGray;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct CellRect {
    pub col: i32,
    pub row: i32,
    pub width: i32,
    pub height: i32,
}

pub(super) fn cell_rect(element: &SceneElement, viewport: &Viewport) -> CellRect {
    let col = ((element.x + viewport.scroll_x) / CELL_WIDTH).round() as i32;
    let row = ((element.y + viewport.scroll_y) / CELL_HEIGHT).round() as i32;
    let width = (element.width / CELL_WIDTH).round().max(3.0) as i32;
    let height = (element.height / CELL_HEIGHT).round().max(3.0) as i32;
    CellRect { col, row, width, height }
}

fn cell_point(x: f64, y: f64, viewport: &Viewport) -> (i32, i32) {
    (
        ((x + viewport.scroll_x) / CELL_WIDTH).round() as i32,
        ((y + viewport.scroll_y) / CELL_HEIGHT).round() as i32,
    )
}

pub(super) struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
    colors: Vec<Option<Color>>,
}

impl Canvas {
    pub(super) fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
            colors: vec![None; width * height],
        }
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if col < 0 || row < 0 {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return;
        }
        let idx = row * self.width + col;
        self.cells[idx] = ch;
        self.colors[idx] = Some(color);
    }

    fn text(&mut self, col: i32, row: i32, text: &str, max_len: usize, color: Color) {
        for (offset, ch) in truncate_with_ellipsis(text, max_len).chars().enumerate() {
            self.put(col + offset as i32, row, ch, color);
        }
    }

    fn frame(&mut self, rect: CellRect, kind: ElementKind, stroke: StrokeStyle, color: Color) {
        let (horizontal, vertical) = match stroke {
            StrokeStyle::Solid => ('─', '│'),
            StrokeStyle::Dashed => ('┄', '┆'),
        };
        let [top_left, top_right, bottom_left, bottom_right] = match kind {
            ElementKind::Ellipse | ElementKind::Diamond => ['╭', '╮', '╰', '╯'],
            _ => ['┌', '┐', '└', '┘'],
        };
        let right = rect.col + rect.width - 1;
        let bottom = rect.row + rect.height - 1;
        for col in rect.col + 1..right {
            self.put(col, rect.row, horizontal, color);
            self.put(col, bottom, horizontal, color);
        }
        for row in rect.row + 1..bottom {
            self.put(rect.col, row, vertical, color);
            self.put(right, row, vertical, color);
            for col in rect.col + 1..right {
                self.put(col, row, ' ', color);
            }
        }
        self.put(rect.col, rect.row, top_left, color);
        self.put(right, rect.row, top_right, color);
        self.put(rect.col, bottom, bottom_left, color);
        self.put(right, bottom, bottom_right, color);
    }

    /// Elbow line: across to the midpoint column, up or down, then across again.
    fn connector(&mut self, from: (i32, i32), to: (i32, i32), color: Color) {
        let (start, end) = if from.0 <= to.0 { (from, to) } else { (to, from) };
        let mid = (start.0 + end.0) / 2;
        for col in start.0..mid {
            self.put(col, start.1, '─', color);
        }
        for col in mid + 1..=end.0 {
            self.put(col, end.1, '─', color);
        }
        if start.1 == end.1 {
            self.put(mid, start.1, '─', color);
            return;
        }
        let down = end.1 > start.1;
        let (low, high) = if down { (start.1, end.1) } else { (end.1, start.1) };
        for row in low + 1..high {
            self.put(mid, row, '│', color);
        }
        self.put(mid, start.1, if down { '┐' } else { '┘' }, color);
        self.put(mid, end.1, if down { '└' } else { '┌' }, color);
    }

    pub(super) fn into_text(self) -> Text<'static> {
        let mut lines = Vec::with_capacity(self.height);
        for row in 0..self.height {
            let cells = &self.cells[row * self.width..(row + 1) * self.width];
            let colors = &self.colors[row * self.width..(row + 1) * self.width];
            let mut spans = Vec::<Span<'static>>::new();
            let mut run = String::new();
            let mut run_color = colors.first().copied().flatten();
            for (ch, color) in cells.iter().zip(colors) {
                if *color != run_color && !run.is_empty() {
                    spans.push(styled_run(std::mem::take(&mut run), run_color));
                }
                run_color = *color;
                run.push(*ch);
            }
            if !run.is_empty() {
                spans.push(styled_run(run, run_color));
            }
            lines.push(Line::from(spans));
        }
        Text::from(lines)
    }
}

fn styled_run(text: String, color: Option<Color>) -> Span<'static> {
    match color {
        Some(color) => Span::styled(text, Style::default().fg(color)),
        None => Span::raw(text),
    }
}

/// What the canvas needs to know beyond the elements themselves.
pub(super) struct CanvasView<'a> {
    pub viewport: &'a Viewport,
    pub selected: BTreeSet<&'a ElementId>,
    pub editing: Option<&'a ElementId>,
}

/// Draws connectors first, then shapes, then text, so labels sit on top of their containers.
pub(super) fn render_scene(
    elements: &[SceneElement],
    view: &CanvasView<'_>,
    width: usize,
    height: usize,
) -> Text<'static> {
    let mut canvas = Canvas::new(width, height);
    let live: Vec<&SceneElement> = elements.iter().filter(|element| !element.is_deleted).collect();
    let by_id: BTreeMap<&str, &SceneElement> =
        live.iter().map(|element| (element.id.as_str(), *element)).collect();

    for element in live.iter().filter(|element| element.is_connector()) {
        let from = cell_point(element.x, element.y, view.viewport);
        let to = cell_point(element.x + element.width, element.y + element.height, view.viewport);
        canvas.connector(from, to, CONNECTOR_COLOR);
    }

    for element in live.iter().filter(|element| element.kind.is_shape()) {
        let color = element_color(element, view);
        canvas.frame(cell_rect(element, view.viewport), element.kind, element.stroke_style, color);
    }

    for element in live.iter().filter(|element| element.is_text()) {
        let text = element.text.as_deref().unwrap_or_default();
        let editing = view.editing == Some(&element.id);
        let line = text.lines().next().unwrap_or_default();
        let line = if editing { format!("{line}▏") } else { line.to_owned() };

        let container = element.container_id.as_deref().and_then(|id| by_id.get(id).copied());
        match container {
            Some(container) => {
                let rect = cell_rect(container, view.viewport);
                let color = element_color(container, view);
                let max_len = (rect.width - 2).max(0) as usize;
                canvas.text(rect.col + 1, rect.row + rect.height / 2, &line, max_len, color);
            }
            None => {
                let (col, row) = cell_point(element.x, element.y, view.viewport);
                canvas.text(col, row, &line, width, FREEFORM_COLOR);
            }
        }
    }

    canvas.into_text()
}

fn element_color(element: &SceneElement, view: &CanvasView<'_>) -> Color {
    if view.selected.contains(&element.id) {
        SELECTED_COLOR
    } else if element.tag().is_some() {
        MANAGED_COLOR
    } else {
        FREEFORM_COLOR
    }
}
