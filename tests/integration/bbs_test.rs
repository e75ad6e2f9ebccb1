//! BBS colour code rendering through the public API.

use retroscope::bbs;
use retroscope::terminal::{Color, InterpreterOptions};
use retroscope::BbsFormat;

#[test]
fn labels_and_names_agree() {
    for format in BbsFormat::ALL {
        assert_eq!(BbsFormat::from_label(format.name()), Some(format));
    }
    assert_eq!(BbsFormat::from_label("PCBoard"), Some(BbsFormat::PcBoard));
    assert_eq!(BbsFormat::from_label("fidonet"), None);
}

#[test]
fn pcboard_menu_renders_in_colour() {
    let text = "@CLS@@X0B[@X0FM@X0B]@X07essages\r\n@X0B[@X0FG@X0B]@X07oodbye";
    let doc = bbs::interpret(text, BbsFormat::PcBoard, InterpreterOptions::default());
    assert_eq!(doc.text(), "[M]essages\n[G]oodbye");
    let first = &doc.rows[0].runs[0];
    assert_eq!(first.text, "[");
    assert_eq!(first.style.fg, Color::Cyan);
    assert!(first.style.bold);
}

#[test]
fn detection_ignores_ansi_documents() {
    assert_eq!(BbsFormat::detect("\x1b[1m|07"), None);
    assert_eq!(BbsFormat::detect("|07hello"), Some(BbsFormat::Renegade));
}
