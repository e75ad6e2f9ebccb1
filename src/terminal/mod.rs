//! ANSI.SYS / ECMA-48 control sequence interpreter.
//!
//! Turns transcoded text with embedded escape sequences into an ordered
//! list of styled rows, the way a period terminal would have painted them.
//! Rows are append-only: cursor movement can only go forward, so upward and
//! backward motion are no-ops and positioning is emulated with spaces.
//!
//! This module is independent of any display surface. A renderer maps the
//! resulting [`Document`] to terminal cells, HTML or anything else.

mod handlers;
mod parser;
mod performer;
mod types;

#[cfg(test)]
mod tests;

pub use handlers::style::{sgr_mutation, AttributeMutation};
pub use parser::{Control, Event, Parser, MAX_PARAM};
pub use performer::CursorState;
pub use types::{Attribute, Color, Document, Row, Run, RunKind, Statistics, StyleAttributes};

use std::borrow::Cow;

use performer::{Page, RowPerformer};

/// Line width of the hardware being emulated.
pub const DEFAULT_LINE_WIDTH: usize = 80;

/// Interpreter settings supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterOptions {
    /// Columns before wrapping; 0 disables wrapping.
    pub line_width: usize,
    /// iCE colors state before the document toggles it.
    pub ice_colors: bool,
}

impl Default for InterpreterOptions {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            ice_colors: false,
        }
    }
}

/// One interpreter per document. State is never shared between documents.
pub struct Interpreter {
    parser: Parser,
    cursor: CursorState,
    page: Page,
    stats: Statistics,
    ice_colors: bool,
}

impl Interpreter {
    pub fn new(options: InterpreterOptions) -> Self {
        Self {
            parser: Parser::new(),
            cursor: CursorState::new(options.line_width),
            page: Page::default(),
            stats: Statistics::default(),
            ice_colors: options.ice_colors,
        }
    }

    /// Process a chunk of text. Sequences may span chunk boundaries.
    pub fn process(&mut self, text: &str) {
        let mut perf = RowPerformer {
            cursor: &mut self.cursor,
            page: &mut self.page,
            stats: &mut self.stats,
            ice_colors: &mut self.ice_colors,
        };
        for c in text.chars() {
            if let Some(event) = self.parser.step(c) {
                perf.perform(event);
            }
        }
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    /// Replace the active style. Used by hosts that carry colour out of
    /// band, such as BBS colour codes.
    pub fn set_style(&mut self, style: StyleAttributes) {
        self.cursor.style = style;
    }

    /// Flush any unterminated sequence and return the finished document.
    pub fn finish(mut self) -> Document {
        if let Some(event) = self.parser.finish() {
            let mut perf = RowPerformer {
                cursor: &mut self.cursor,
                page: &mut self.page,
                stats: &mut self.stats,
                ice_colors: &mut self.ice_colors,
            };
            perf.perform(event);
        }
        Document {
            rows: self.page.into_rows(),
            ice_colors: self.ice_colors,
            stats: self.stats,
        }
    }
}

/// Interpret a complete document.
pub fn interpret(text: &str, options: InterpreterOptions) -> Document {
    let mut interpreter = Interpreter::new(options);
    interpreter.process(text);
    interpreter.finish()
}

/// Remove producer artifacts the row model cannot express.
///
/// - a leading `@CLS@` clear-screen code
/// - a line feed immediately undone by cursor up (`\n ESC[A`, `\n ESC[1A`),
///   together with a directly following cursor forward (`ESC[nC`)
pub fn clean_sequences(text: &str) -> Cow<'_, str> {
    let body = text.strip_prefix("@CLS@").unwrap_or(text);
    if !body.contains("\n\x1b[") {
        return Cow::Borrowed(body);
    }

    let mut out = String::with_capacity(body.len());
    let mut rest = body;
    while let Some(pos) = rest.find('\n') {
        let after = &rest[pos + 1..];
        let undone = after
            .strip_prefix("\x1b[A")
            .or_else(|| after.strip_prefix("\x1b[1A"));
        match undone {
            Some(tail) => {
                let line = &rest[..pos];
                out.push_str(line.strip_suffix('\r').unwrap_or(line));
                rest = skip_cursor_forward(tail);
            }
            None => {
                out.push_str(&rest[..=pos]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn skip_cursor_forward(text: &str) -> &str {
    let Some(params) = text.strip_prefix("\x1b[") else {
        return text;
    };
    let digits = params.bytes().take_while(u8::is_ascii_digit).count();
    match params[digits..].strip_prefix('C') {
        Some(rest) if digits > 0 => rest,
        _ => text,
    }
}
