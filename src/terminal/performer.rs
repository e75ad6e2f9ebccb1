//! Event performer.
//!
//! Contains the `RowPerformer` struct that applies parser events to the
//! cursor and the row being built. Control sequences are dispatched to the
//! handler modules.

use std::mem;

use unicode_width::UnicodeWidthChar;

use super::handlers::log_unhandled_csi;
use super::parser::{Control, Event};
use super::types::{Row, Run, RunKind, Statistics, StyleAttributes};

/// Cursor and attribute state, owned by one interpreter.
#[derive(Debug, Clone)]
pub struct CursorState {
    /// 1-based, grows without bound.
    pub row: usize,
    /// 1-based, at most `line_width` when wrapping is on.
    pub column: usize,
    pub style: StyleAttributes,
    /// Columns before hardware wrap; 0 disables wrapping.
    pub line_width: usize,
}

impl CursorState {
    pub fn new(line_width: usize) -> Self {
        Self {
            row: 1,
            column: 1,
            style: StyleAttributes::default(),
            line_width,
        }
    }
}

/// Completed rows plus the one still being written.
#[derive(Debug, Default)]
pub(crate) struct Page {
    pub rows: Vec<Row>,
    pub current: Row,
    /// Rows before this index were erased by an erase-in-page.
    pub erased_before: usize,
}

impl Page {
    /// Append text to the current row, extending the last run when the
    /// style matches.
    fn push_text(&mut self, text: &str, style: StyleAttributes) {
        match self.current.runs.last_mut() {
            Some(run) if run.kind == RunKind::Content && run.style == style => {
                run.text.push_str(text);
            }
            _ => self.current.runs.push(Run::content(text, style)),
        }
    }

    /// Finish the page. Erase markers are applied here so completed rows
    /// are never touched while input is still being read.
    pub fn into_rows(mut self) -> Vec<Row> {
        if !self.current.is_empty() || self.current.erased || self.current.erased_to_end {
            self.rows.push(mem::take(&mut self.current));
        }
        let erased = self.erased_before.min(self.rows.len());
        for row in &mut self.rows[..erased] {
            row.erased = true;
        }
        self.rows
    }
}

/// Performer that applies events to the page.
pub(crate) struct RowPerformer<'a> {
    pub cursor: &'a mut CursorState,
    pub page: &'a mut Page,
    pub stats: &'a mut Statistics,
    pub ice_colors: &'a mut bool,
}

impl<'a> RowPerformer<'a> {
    pub fn perform(&mut self, event: Event) {
        match event {
            Event::Print(c) => self.put_char(c),
            Event::LineFeed => self.new_row(),
            // Bare CR cannot move back over an append-only row.
            Event::CarriageReturn => {}
            Event::Control(control) => self.dispatch(control),
            Event::Literal(text) => {
                self.stats.unknown += 1;
                for c in text.chars() {
                    match c {
                        '\n' => self.new_row(),
                        '\r' => {}
                        _ => self.put_char(c),
                    }
                }
            }
        }
    }

    fn dispatch(&mut self, control: Control) {
        match control {
            Control::CursorDown(n) => self.handle_cursor_down(n),
            Control::CursorForward(n) => self.handle_cursor_forward(n),
            Control::CursorPosition { row, column } => self.handle_cursor_position(row, column),
            Control::ForwardTab(n) => self.handle_forward_tab(n),
            Control::EraseInPage(mode) => self.handle_erase_page(mode),
            Control::EraseInLine(mode) => self.handle_erase_line(mode),
            Control::SelectGraphicRendition(params) => self.handle_sgr(&params),
            Control::SetMode {
                private,
                modes,
                enable,
            } => self.handle_set_mode(private, &modes, enable),
            Control::WindowOrTrueColor(params) => self.handle_true_color(&params),
            Control::CursorUp(_)
            | Control::CursorBack(_)
            | Control::SaveCursor
            | Control::RestoreCursor => {
                self.stats.other += 1;
                log_unhandled_csi(&control);
            }
        }
    }

    /// Close the current row and open a new one. The style carries over.
    pub(crate) fn new_row(&mut self) {
        let row = mem::take(&mut self.page.current);
        self.page.rows.push(row);
        self.cursor.row += 1;
        self.cursor.column = 1;
    }

    fn wraps(&self) -> bool {
        self.cursor.line_width > 0
    }

    /// Write a character with the current style, wrapping past the line width.
    fn put_char(&mut self, c: char) {
        let width = c.width().unwrap_or(1);
        let mut utf8 = [0u8; 4];
        self.page.push_text(c.encode_utf8(&mut utf8), self.cursor.style);
        self.cursor.column += width;
        if self.wraps() && self.cursor.column > self.cursor.line_width {
            self.new_row();
        }
    }

    /// Insert `width` positioning spaces without wrapping.
    pub(crate) fn push_positioning(&mut self, width: usize) {
        if width == 0 {
            return;
        }
        self.page.current.runs.push(Run::positioning(width));
        self.cursor.column += width;
    }

    /// Move forward `n` columns, wrapping onto new rows as 80-column
    /// hardware would.
    pub(crate) fn forward(&mut self, n: usize) {
        let mut remaining = n;
        while self.wraps() && self.cursor.column + remaining > self.cursor.line_width {
            let overflow = self.cursor.column + remaining - self.cursor.line_width - 1;
            self.new_row();
            remaining = overflow;
        }
        self.push_positioning(remaining);
    }

    pub(crate) fn mark_current_erased_to_end(&mut self) {
        self.page.current.erased_to_end = true;
    }

    pub(crate) fn mark_current_erased(&mut self) {
        self.page.current.erased = true;
    }

    /// Mark every row before the cursor row as erased.
    pub(crate) fn erase_page(&mut self) {
        if !self.page.current.is_empty() {
            self.new_row();
        }
        self.page.erased_before = self.page.rows.len();
    }
}
