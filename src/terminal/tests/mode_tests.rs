//! Mode toggle tests.

use super::run;
use crate::terminal::{interpret, InterpreterOptions};

#[test]
fn ice_colors_toggle_is_document_wide() {
    let doc = run("\x1b[?33hblink\x1b[5m");
    assert!(doc.ice_colors);
    let doc = run("\x1b[?33h\x1b[?33l");
    assert!(!doc.ice_colors);
}

#[test]
fn ice_colors_start_from_options() {
    let options = InterpreterOptions {
        ice_colors: true,
        ..Default::default()
    };
    assert!(interpret("x", options).ice_colors);
    assert!(!interpret("\x1b[?33lx", options).ice_colors);
}

#[test]
fn ice_colors_do_not_touch_run_styles() {
    let doc = run("\x1b[5ma\x1b[?33hb");
    let runs = &doc.rows[0].runs;
    assert_eq!(runs.len(), 1);
    assert!(runs[0].style.blink);
}

#[test]
fn modes_4_and_18_toggle_style_flags() {
    let doc = run("\x1b[4ha\x1b[18hb\x1b[4lc\x1b[=18ld");
    let runs = &doc.rows[0].runs;
    assert!(runs[0].style.mode_4 && !runs[0].style.mode_18);
    assert!(runs[1].style.mode_4 && runs[1].style.mode_18);
    assert!(!runs[2].style.mode_4 && runs[2].style.mode_18);
    assert!(!runs[3].style.mode_4 && !runs[3].style.mode_18);
}

#[test]
fn mode_flags_are_not_cleared_by_sgr_flags() {
    let doc = run("\x1b[4h\x1b[24mx");
    assert!(doc.rows[0].runs[0].style.mode_4);
}

#[test]
fn screen_modes_are_recorded() {
    let doc = run("\x1b[=1hx");
    assert_eq!(doc.stats.screen_mode, Some(1));
    assert_eq!(doc.stats.screen_columns(), Some(40));
    assert_eq!(doc.stats.color_depth, 4);
    let doc = run("\x1b[=19hx");
    assert_eq!(doc.stats.color_depth, 8);
}

#[test]
fn other_modes_are_ignored() {
    let doc = run("\x1b[?7h\x1b[?25lx");
    assert_eq!(doc.rows[0].text(), "x");
    assert_eq!(doc.stats.other, 2);
}
