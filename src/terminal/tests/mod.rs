//! Interpreter tests.
//!
//! Organized by handler category:
//! - cursor_tests: Cursor movement and positioning
//! - editing_tests: Erase in page and erase in line
//! - style_tests: SGR color/attribute parsing
//! - mode_tests: Mode toggles and iCE colors
//! - integration_tests: Whole documents and malformed input

mod mode_tests;

use super::{interpret, Document, InterpreterOptions};

pub(super) fn run(text: &str) -> Document {
    interpret(text, InterpreterOptions::default())
}

pub(super) fn row_texts(doc: &Document) -> Vec<String> {
    doc.rows.iter().map(|row| row.text()).collect()
}
