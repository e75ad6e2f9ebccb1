//! Mode toggle handlers (CSI h / CSI l).
//!
//! - `?33h` / `?33l`: iCE colors on/off for the whole document
//! - 4 and 18: the two style flags outside the SGR namespace
//! - `=n h`: screen modes 0..=19 are recorded, not emulated

use super::super::performer::RowPerformer;
use super::log_unhandled_param;

const ICE_COLORS: u16 = 33;
const LAST_SCREEN_MODE: u16 = 19;

/// Bits of colour a screen mode can show.
fn screen_mode_depth(mode: u16) -> Option<u8> {
    match mode {
        0 | 2 | 5 | 6 | 15 | 17 => Some(1),
        4 => Some(2),
        1 | 3 | 13 | 14 | 16 | 18 => Some(4),
        19 => Some(8),
        _ => None,
    }
}

impl RowPerformer<'_> {
    pub fn handle_set_mode(&mut self, private: Option<char>, modes: &[u16], enable: bool) {
        if private == Some('?') && modes == [ICE_COLORS] {
            *self.ice_colors = enable;
            tracing::debug!(enabled = enable, row = self.cursor.row, "iCE colors toggled");
            return;
        }

        for &mode in modes {
            let mut handled = false;
            match mode {
                4 => {
                    self.cursor.style.mode_4 = enable;
                    handled = true;
                }
                18 => {
                    self.cursor.style.mode_18 = enable;
                    handled = true;
                }
                _ => {}
            }
            if private == Some('=') && enable && mode <= LAST_SCREEN_MODE {
                self.stats.screen_mode = Some(mode);
                if let Some(depth) = screen_mode_depth(mode) {
                    self.stats.color_depth = depth;
                }
                handled = true;
            }
            if !handled {
                self.stats.other += 1;
                log_unhandled_param(if enable { 'h' } else { 'l' }, mode);
            }
        }
    }
}
