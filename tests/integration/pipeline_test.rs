//! End-to-end rendering through the public entry points.

use retroscope::terminal::{Color, StyleAttributes};
use retroscope::{render, render_file, BbsFormat, CodePage, Input, RenderOptions};

use crate::helpers::{sauce_record, with_sauce};

fn bytes(input: &[u8]) -> Input {
    Input::Bytes(input.to_vec())
}

#[test]
fn cp437_ansi_art_renders_styled_rows() {
    let art = b"\x1b[0;1;34m\xdb\xdb\xdb\x1b[0m\r\n\x1b[44m \xb0\xb1\xb2 \x1b[0m";
    let rendered = render(&bytes(art), &RenderOptions::default()).unwrap();

    assert_eq!(rendered.code_page, Some(CodePage::Cp437));
    assert_eq!(rendered.text(), "███\n ░▒▓ ");
    let first = &rendered.rows[0].runs[0];
    assert_eq!(first.style.fg, Color::Blue);
    assert!(first.style.bold);
    assert_eq!(rendered.rows[1].runs[0].style.bg, Color::Blue);
}

#[test]
fn cursor_forward_leaves_a_positioning_gap() {
    let rendered = render(&bytes(b"a\x1b[3Cb"), &RenderOptions::default()).unwrap();
    assert_eq!(rendered.text(), "a   b");
    assert!(rendered.rows[0].runs.iter().any(|run| run.is_positioning()));
}

#[test]
fn long_lines_wrap_at_the_line_width() {
    let options = RenderOptions {
        line_width: 4,
        ..RenderOptions::default()
    };
    let rendered = render(&bytes(b"abcdefgh"), &options).unwrap();
    assert_eq!(rendered.text(), "abcd\nefgh");
}

#[test]
fn zero_width_disables_wrapping() {
    let line = vec![b'x'; 300];
    let options = RenderOptions {
        line_width: 0,
        ..RenderOptions::default()
    };
    let rendered = render(&bytes(&line), &options).unwrap();
    assert_eq!(rendered.rows.len(), 1);
}

#[test]
fn oversized_line_width_is_rejected() {
    let options = RenderOptions {
        line_width: 10_000,
        ..RenderOptions::default()
    };
    assert!(render(&bytes(b"x"), &options).is_err());
}

#[test]
fn sauce_record_is_reported_and_not_rendered() {
    let buf = with_sauce(
        b"\x1b[5;41mblink",
        &["first comment"],
        sauce_record("Dawn", "Ripper", "IBM VGA", 1),
    );
    let rendered = render(&bytes(&buf), &RenderOptions::default()).unwrap();

    assert_eq!(rendered.text(), "blink");
    let sauce = rendered.sauce.as_ref().unwrap();
    assert_eq!(sauce.title, "Dawn");
    assert_eq!(sauce.author, "Ripper");
    assert_eq!(sauce.comments, vec!["first comment"]);
    assert!(rendered.ice_colors);
}

#[test]
fn sauce_font_selects_nordic_page() {
    // 0x9B is ø in CP865 and ¢ in CP437.
    let buf = with_sauce(&[0x9B], &[], sauce_record("", "", "IBM VGA 865", 0));
    let rendered = render(&bytes(&buf), &RenderOptions::default()).unwrap();
    assert_eq!(rendered.code_page, Some(CodePage::Cp865));
    assert_eq!(rendered.text(), "ø");
}

#[test]
fn host_decoded_latin1_maps_back_to_cp437() {
    let input = Input::decode(&[0xC9, 0xCD, 0xCD, 0xBB], "iso-8859-1");
    let rendered = render(&input, &RenderOptions::default()).unwrap();
    assert_eq!(rendered.code_page, Some(CodePage::Cp437));
    assert_eq!(rendered.text(), "╔══╗");
}

#[test]
fn declared_dos_page_is_reported() {
    let input = Input::decode(&[0xC9, 0xCD, 0xBB], "cp437");
    let rendered = render(&input, &RenderOptions::default()).unwrap();
    assert!(!rendered.guess.is_unicode());
    assert_eq!(rendered.code_page, Some(CodePage::Cp437));
    assert_eq!(rendered.text(), "╔═╗");
}

#[test]
fn sauce_font_applies_to_text_declared_as_cp437() {
    let buf = with_sauce(&[0x9B], &[], sauce_record("", "", "IBM VGA 865", 0));
    let rendered = render(&Input::decode(&buf, "cp437"), &RenderOptions::default()).unwrap();
    assert_eq!(rendered.code_page, Some(CodePage::Cp865));
    assert_eq!(rendered.text(), "ø");
}

#[test]
fn bbs_codes_are_detected_without_escape_sequences() {
    let rendered = render(&bytes(b"@X0EYellow@X07 plain"), &RenderOptions::default()).unwrap();
    assert_eq!(rendered.bbs, Some(BbsFormat::PcBoard));
    assert_eq!(rendered.text(), "Yellow plain");
    assert_eq!(rendered.rows[0].runs[0].style.fg, Color::Yellow);
    assert!(rendered.rows[0].runs[0].style.bold);
}

#[test]
fn bbs_override_applies_to_ambiguous_text() {
    let options = RenderOptions::default().with_bbs_label("renegade").unwrap();
    let rendered = render(&bytes(b"|04red"), &options).unwrap();
    assert_eq!(rendered.bbs, Some(BbsFormat::Renegade));
    assert_eq!(rendered.rows[0].runs[0].style.fg, Color::Red);
}

#[test]
fn pipes_in_plain_text_are_not_colour_codes() {
    let rendered = render(&bytes(b"Released |by Group| 1996"), &RenderOptions::default()).unwrap();
    assert_eq!(rendered.bbs, None);
    assert_eq!(rendered.text(), "Released |by Group| 1996");
    assert_eq!(rendered.rows[0].runs.len(), 1);
    assert_eq!(rendered.rows[0].runs[0].style, StyleAttributes::default());

    let readme = b"Install notes\n\nTo follow the log:\ncat log |grep error";
    let rendered = render(&bytes(readme), &RenderOptions::default()).unwrap();
    assert_eq!(rendered.bbs, None);
    assert_eq!(rendered.text(), "Install notes\n\nTo follow the log:\ncat log |grep error");
}

#[test]
fn render_file_reads_from_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("logo.ans");
    std::fs::write(&path, b"\x1b[32mok").unwrap();
    let rendered = render_file(&path, &RenderOptions::default()).unwrap();
    assert_eq!(rendered.text(), "ok");
    assert!(render_file(dir.path().join("nope.ans"), &RenderOptions::default()).is_err());
}

#[test]
fn rows_snapshot() {
    let rendered = render(
        &bytes(b"+--+\r\n|\xdb |\r\n+--+"),
        &RenderOptions::default(),
    )
    .unwrap();
    insta::assert_snapshot!(rendered.text(), @r"
    +--+
    |█ |
    +--+
    ");
}
