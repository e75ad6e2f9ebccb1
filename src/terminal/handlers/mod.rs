//! Control sequence handlers.
//!
//! This module contains handlers for the supported sequence categories:
//! - cursor: Cursor movement and positioning (A, B, C, D, H/f, I)
//! - editing: Erase in page and erase in line (J, K)
//! - style: SGR (Select Graphic Rendition) and PabloDraw true colour
//! - mode: Set/reset mode toggles and iCE colors (h, l)

pub mod cursor;
pub mod editing;
pub mod mode;
pub mod style;

use tracing::trace;

use super::parser::Control;

/// Log a recognized sequence that is deliberately not acted on.
pub fn log_unhandled_csi(control: &Control) {
    trace!(control = ?control, "Ignored CSI sequence");
}

/// Log a single parameter a handler has no meaning for.
pub fn log_unhandled_param(action: char, param: u16) {
    trace!(action = %action, param = param, "Unhandled CSI parameter");
}
