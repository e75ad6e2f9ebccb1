//! Code page lookup, guessing and transcoding through the public API.

use retroscope::guess::guess;
use retroscope::transcode::{decode_bytes, encode, transcode};
use retroscope::{render, Charset, CodePage, Input, RenderOptions, UnicodeForm};

#[test]
fn labels_resolve_regardless_of_case_and_separators() {
    assert_eq!(CodePage::from_label("IBM437"), Some(CodePage::Cp437));
    assert_eq!(CodePage::from_label("cp-865"), Some(CodePage::Cp865));
    assert_eq!(CodePage::from_label("Windows_1252"), Some(CodePage::Windows1252));
    assert_eq!(CodePage::from_label("Latin1"), Some(CodePage::Iso8859_1));
    assert_eq!(CodePage::from_label("x-mac-klingon"), None);
    assert_eq!(
        Charset::from_label("UTF-16BE"),
        Some(Charset::Unicode(UnicodeForm::Utf16Be))
    );
}

#[test]
fn every_page_lists_its_own_name_as_a_label() {
    for page in CodePage::ALL {
        assert_eq!(CodePage::from_label(page.name()), Some(page), "{page}");
    }
}

#[test]
fn cp437_bytes_decode_to_box_drawing() {
    assert_eq!(decode_bytes(&[0xC9, 0xCD, 0xBB], CodePage::Cp437, false), "╔═╗");
    assert_eq!(decode_bytes(&[0x01, 0x02], CodePage::Cp437, true), "☺☻");
}

#[test]
fn encode_reverses_decode_for_dos_pages() {
    let text = decode_bytes(&[0xB0, 0xB1, 0xB2, 0xDB], CodePage::Cp437, false);
    assert_eq!(encode(&text, CodePage::Cp437), vec![0xB0, 0xB1, 0xB2, 0xDB]);
    assert_eq!(encode("€", CodePage::Cp437), vec![b'?']);
}

#[test]
fn transcode_reinterprets_host_decoded_text() {
    // Bytes B0..B2 read as Latin-1 by the host.
    assert_eq!(
        transcode("°±²", Some(CodePage::Iso8859_1), Some(CodePage::Cp437), false),
        "░▒▓"
    );
}

#[test]
fn guess_prefers_unicode_for_wide_characters() {
    let g = guess("smile ☺", Some("utf-8"));
    assert!(g.is_unicode());
    assert!(g.guaranteed);
}

#[test]
fn unknown_declared_charset_is_not_guaranteed() {
    let g = guess("text", Some("x-unknown"));
    assert_eq!(g.charset, Charset::Legacy(CodePage::UsAscii));
    assert!(!g.guaranteed);
}

#[test]
fn quotes_outside_windows_1252_text_stay_unicode() {
    let g = guess("it’s “quoted”", Some("utf-8"));
    assert!(g.is_unicode());

    // „Привет“ in CP1251: the quotes share bytes with Windows-1252 glyphs.
    let bytes = [0x84, 0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2, 0x93];
    let input = Input::decode(&bytes, "windows-1251");
    let rendered = render(&input, &RenderOptions::default()).unwrap();
    assert!(rendered.guess.is_unicode());
    assert_eq!(rendered.code_page, None);
    assert_eq!(rendered.text(), "„Привет“");
}
