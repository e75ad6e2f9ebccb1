//! Cursor movement handlers.
//!
//! Handles CSI sequences for cursor movement:
//! - B: Cursor Down (appends rows)
//! - C: Cursor Forward (positioning spaces)
//! - H/f: Cursor Position (forward only)
//! - I: Cursor Forward Tabulation
//!
//! Up (A) and back (D) are no-ops: rows already emitted are never revisited.

use super::super::performer::RowPerformer;

/// Positioning spaces per tab stop.
const TAB_WIDTH: usize = 4;

impl RowPerformer<'_> {
    /// Handle Cursor Down (CSI n B): `n` row transitions.
    pub fn handle_cursor_down(&mut self, n: u16) {
        for _ in 0..n {
            self.new_row();
        }
    }

    /// Handle Cursor Forward (CSI n C).
    pub fn handle_cursor_forward(&mut self, n: u16) {
        self.forward(usize::from(n));
    }

    /// Handle Cursor Forward Tabulation (CSI n I).
    pub fn handle_forward_tab(&mut self, n: u16) {
        self.forward(usize::from(n) * TAB_WIDTH);
    }

    /// Handle Cursor Position (CSI row;column H).
    ///
    /// Targets above the cursor row, or behind the cursor on its row, are
    /// ignored. A lower row is reached with row transitions and then the
    /// column is padded with positioning spaces.
    pub fn handle_cursor_position(&mut self, row: u16, column: u16) {
        let row = usize::from(row);
        let column = usize::from(column);

        if row < self.cursor.row || (row == self.cursor.row && column < self.cursor.column) {
            self.stats.other += 1;
            tracing::trace!(
                row,
                column,
                cursor_row = self.cursor.row,
                cursor_column = self.cursor.column,
                "Backward cursor position ignored"
            );
            return;
        }

        if row > self.cursor.row {
            for _ in self.cursor.row..row {
                self.new_row();
            }
            self.forward(column - 1);
        } else {
            self.forward(column - self.cursor.column);
        }
    }
}
