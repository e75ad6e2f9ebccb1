//! Erase operation handlers.
//!
//! Handles CSI sequences for erasing:
//! - J: Erase in Page
//! - K: Erase in Line
//!
//! Nothing already emitted is deleted. Erased rows are tagged so a renderer
//! can still show the history.

use super::super::performer::RowPerformer;
use super::log_unhandled_param;

impl RowPerformer<'_> {
    /// Handle Erase in Page (CSI J).
    /// Mode 0: pad the current row to full width and start a new row
    /// Mode 1/2: emit the current row as-is and tag every prior row erased
    pub fn handle_erase_page(&mut self, mode: u16) {
        match mode {
            0 => {
                self.mark_current_erased_to_end();
                self.pad_to_end_of_row();
                self.new_row();
            }
            1 | 2 => self.erase_page(),
            _ => {
                self.stats.other += 1;
                log_unhandled_param('J', mode);
            }
        }
    }

    /// Handle Erase in Line (CSI K).
    /// Mode 0: tag the current row erased to the end of line
    /// Mode 1: the row is kept as-is
    /// Mode 2: tag the current row erased
    pub fn handle_erase_line(&mut self, mode: u16) {
        match mode {
            0 => self.mark_current_erased_to_end(),
            1 => self.stats.other += 1,
            2 => self.mark_current_erased(),
            _ => {
                self.stats.other += 1;
                log_unhandled_param('K', mode);
            }
        }
    }

    fn pad_to_end_of_row(&mut self) {
        let width = self.cursor.line_width;
        if width == 0 {
            return;
        }
        self.push_positioning(width + 1 - self.cursor.column.min(width));
    }
}
