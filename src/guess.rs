//! Best-effort detection of the code page a document was authored in.
//!
//! The host hands over text it already decoded with some declared charset.
//! Characters that landed in the box-drawing range, stray C0 controls and
//! Latin-1 letters each hint at a different legacy origin. The heuristic is
//! explicitly overridable by the caller and by SAUCE metadata.

use serde::Serialize;
use tracing::debug;

use crate::codepage::{Charset, CodePage, UnicodeForm};

/// Maximum number of characters inspected.
pub const SCAN_LIMIT: usize = 10_000;

/// C0 controls common in any plain text file: BS, TAB, LF, FF, CR, SUB.
const COMMON_CONTROLS: [u32; 6] = [0x08, 0x09, 0x0A, 0x0C, 0x0D, 0x1A];

/// Windows-1252 glyphs at 0x80..=0x9F that no other supported page produces
/// when a browser decodes with that charset.
const WINDOWS_1252_GLYPHS: [char; 27] = [
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•',
    '–', '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

/// Tallies gathered while scanning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub cp437: usize,
    pub iso8859: usize,
    pub us_ascii: usize,
    pub unsure: usize,
}

/// Outcome of the encoding heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Guess {
    /// Charset the original bytes most likely came from.
    pub charset: Charset,
    /// False when the declared charset was not recognized and the result is
    /// a fallback the host should flag as a soft warning.
    pub guaranteed: bool,
    pub counts: Counts,
}

impl Guess {
    fn certain(charset: Charset, counts: Counts) -> Self {
        Self {
            charset,
            guaranteed: true,
            counts,
        }
    }

    /// True when the document needs no legacy transcoding.
    pub fn is_unicode(&self) -> bool {
        matches!(self.charset, Charset::Unicode(_))
    }
}

/// Classify a byte-order mark at the start of the text.
///
/// Raw 8-bit input carries the mark as individual code units
/// (`ï»¿`, `ÿþ`, `þÿ`), decoded input as a single U+FEFF.
pub fn byte_order_mark(text: &str) -> Option<UnicodeForm> {
    let mut units = text.chars().take(3).map(u32::from);
    match (units.next(), units.next(), units.next()) {
        (Some(0xEF), Some(0xBB), Some(0xBF)) => Some(UnicodeForm::Utf8),
        (Some(0xFF), Some(0xFE), _) => Some(UnicodeForm::Utf16Le),
        (Some(0xFE), Some(0xFF), _) => Some(UnicodeForm::Utf16Be),
        (Some(0xFEFF), _, _) => Some(UnicodeForm::Utf8),
        _ => None,
    }
}

fn is_art_glyph(code: u32) -> bool {
    matches!(
        code,
        176..=180 | 185..=188 | 191..=197 | 200..=206 | 217..=223 | 249 | 250 | 254
    )
}

fn is_uncommon_control(code: u32) -> bool {
    code < 0x20 && code != 0x00 && code != 0x1B && !COMMON_CONTROLS.contains(&code)
}

/// Guess the original charset of `text`, decoded by the host as `declared`.
///
/// `declared` is `None` for raw 8-bit input where each byte became the
/// character with the same code point.
pub fn guess(text: &str, declared: Option<&str>) -> Guess {
    let counts = Counts::default();

    if let Some(form) = byte_order_mark(text) {
        debug!(charset = form.name(), "byte order mark found");
        return Guess::certain(Charset::Unicode(form), counts);
    }

    let declared_charset = match declared {
        None => None,
        Some(label) => match Charset::from_label(label) {
            Some(charset) => Some(charset),
            None => {
                debug!(label, "unsupported declared charset, falling back to US-ASCII");
                return Guess {
                    charset: Charset::Legacy(CodePage::UsAscii),
                    guaranteed: false,
                    counts,
                };
            }
        },
    };
    // A DOS page decodes its art glyphs above U+00FF, which would otherwise
    // read as Unicode. The declared page is the answer; the bytes are
    // still tallied for reporting.
    let declared_dos = declared_charset
        .and_then(Charset::code_page)
        .filter(|page| page.is_dos());
    if let Some(page) = declared_dos {
        let bytes: String = text
            .chars()
            .map(|c| page.encode_char(c).map_or(c, char::from))
            .collect();
        let counts = match scan(&bytes, false) {
            Scan::Decided(_, counts) | Scan::Counted(counts) => counts,
        };
        debug!(charset = page.name(), ?counts, "declared DOS code page");
        return Guess::certain(Charset::Legacy(page), counts);
    }
    let check_1252 = declared_charset == Some(Charset::Legacy(CodePage::Windows1252));

    let counts = match scan(text, check_1252) {
        Scan::Decided(charset, counts) => {
            debug!(charset = charset.name(), ?counts, "scan short-circuited");
            return Guess::certain(charset, counts);
        }
        Scan::Counted(counts) => counts,
    };

    let charset = decide(&counts);
    debug!(charset = charset.name(), ?counts, "encoding guess");
    Guess::certain(charset, counts)
}

enum Scan {
    Decided(Charset, Counts),
    Counted(Counts),
}

fn scan(text: &str, check_1252: bool) -> Scan {
    let mut counts = Counts::default();
    for c in text.chars().take(SCAN_LIMIT) {
        let code = u32::from(c);
        if check_1252 && WINDOWS_1252_GLYPHS.contains(&c) {
            return Scan::Decided(Charset::Legacy(CodePage::Windows1252), counts);
        }
        if code >= 256 {
            return Scan::Decided(Charset::Unicode(UnicodeForm::Utf8), counts);
        }
        if is_art_glyph(code) || is_uncommon_control(code) {
            counts.cp437 += 1;
        } else if (160..=255).contains(&code) {
            counts.iso8859 += 1;
        } else if code <= 127 {
            counts.us_ascii += 1;
        } else {
            counts.unsure += 1;
        }
    }
    Scan::Counted(counts)
}

// ISO-8859 evidence outranks CP437 even when CP437 evidence is stronger.
// Existing art corpora were rendered with this order, so it stays.
fn decide(counts: &Counts) -> Charset {
    let page = if counts.iso8859 > 0 {
        CodePage::Iso8859_1
    } else if counts.cp437 > counts.iso8859 {
        CodePage::Cp437
    } else if counts.unsure > 0 {
        CodePage::Windows1252
    } else {
        CodePage::UsAscii
    };
    Charset::Legacy(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latin1(bytes: &[u8]) -> String {
        bytes.iter().map(|&b| char::from(b)).collect()
    }

    #[test]
    fn plain_ascii_is_us_ascii() {
        let g = guess("Hello world.\r\n", None);
        assert_eq!(g.charset, Charset::Legacy(CodePage::UsAscii));
        assert!(g.guaranteed);
        assert_eq!(g.counts.us_ascii, 14);
    }

    #[test]
    fn box_drawing_bytes_select_cp437() {
        let g = guess(&latin1(&[0xC9, 0xCD, 0xCD, 0xBB, b'\n', 0xB0, 0xB1, 0xB2]), None);
        assert_eq!(g.charset, Charset::Legacy(CodePage::Cp437));
        assert_eq!(g.counts.cp437, 7);
    }

    #[test]
    fn uncommon_controls_count_as_cp437() {
        let g = guess(&latin1(&[0x01, 0x02, b'a']), None);
        assert_eq!(g.charset, Charset::Legacy(CodePage::Cp437));
    }

    #[test]
    fn escape_and_common_controls_are_not_evidence() {
        let g = guess("\x1b[0m\t\r\n\x0c\x08", None);
        assert_eq!(g.charset, Charset::Legacy(CodePage::UsAscii));
        assert_eq!(g.counts.cp437, 0);
    }

    #[test]
    fn latin1_letters_outrank_stronger_cp437_evidence() {
        let g = guess(&latin1(&[0xB0, 0xB1, 0xB2, 0xDB, 0xE9]), None);
        assert_eq!(g.charset, Charset::Legacy(CodePage::Iso8859_1));
    }

    #[test]
    fn c1_range_alone_selects_windows_1252() {
        let g = guess(&latin1(&[b'a', 0x93, 0x94]), None);
        assert_eq!(g.charset, Charset::Legacy(CodePage::Windows1252));
        assert_eq!(g.counts.unsure, 2);
    }

    #[test]
    fn code_points_above_latin1_mean_unicode() {
        let g = guess("already ░▒▓ decoded", Some("utf-8"));
        assert!(g.is_unicode());
    }

    #[test]
    fn windows_1252_glyphs_short_circuit_when_declared() {
        let g = guess("“quoted”", Some("windows-1252"));
        assert_eq!(g.charset, Charset::Legacy(CodePage::Windows1252));
        let g = guess("“quoted”", Some("utf-8"));
        assert!(g.is_unicode());
    }

    #[test]
    fn byte_order_mark_overrides_everything() {
        let g = guess(&latin1(&[0xEF, 0xBB, 0xBF, 0xB0]), None);
        assert_eq!(g.charset, Charset::Unicode(UnicodeForm::Utf8));
        let g = guess(&latin1(&[0xFF, 0xFE, b'a', 0]), Some("bogus"));
        assert_eq!(g.charset, Charset::Unicode(UnicodeForm::Utf16Le));
        let g = guess(&latin1(&[0xFE, 0xFF, 0, b'a']), None);
        assert_eq!(g.charset, Charset::Unicode(UnicodeForm::Utf16Be));
    }

    #[test]
    fn unsupported_declared_charset_falls_back_unguaranteed() {
        let g = guess("text", Some("shift_jis"));
        assert_eq!(g.charset, Charset::Legacy(CodePage::UsAscii));
        assert!(!g.guaranteed);
    }

    #[test]
    fn declared_dos_page_is_kept() {
        let g = guess("╔═╗ ░▒▓", Some("cp437"));
        assert_eq!(g.charset, Charset::Legacy(CodePage::Cp437));
        assert!(g.guaranteed);
        assert_eq!(g.counts.cp437, 6);
        assert_eq!(g.counts.us_ascii, 1);

        let g = guess("ø", Some("ibm865"));
        assert_eq!(g.charset, Charset::Legacy(CodePage::Cp865));
    }

    #[test]
    fn scan_stops_at_limit() {
        let mut text = "a".repeat(SCAN_LIMIT);
        text.push('\u{2591}');
        let g = guess(&text, None);
        assert_eq!(g.charset, Charset::Legacy(CodePage::UsAscii));
        assert_eq!(g.counts.us_ascii, SCAN_LIMIT);
    }
}
