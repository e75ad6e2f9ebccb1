//! Legacy 8-bit code pages and their Unicode mappings.
//!
//! Every supported page maps the 256 byte values to exactly one Unicode
//! scalar value:
//! - 0x00..=0x7F are shared US-ASCII (control positions map to themselves)
//! - 0x80..=0xFF come from the per-page tables in [`tables`]
//!
//! The reverse direction is built lazily once per process and is read-only
//! afterwards, so lookups are safe from any number of threads.

mod tables;

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// First code point of the private use block that stands in for bytes a
/// code page leaves undefined.
pub const PLACEHOLDER_BASE: u32 = 0xF700;

/// A legacy 8-bit code page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodePage {
    #[serde(rename = "CP437")]
    Cp437,
    #[serde(rename = "CP865")]
    Cp865,
    #[serde(rename = "CP1250")]
    Cp1250,
    #[serde(rename = "CP1251")]
    Cp1251,
    #[serde(rename = "Windows-1252")]
    Windows1252,
    #[serde(rename = "ISO-8859-1")]
    Iso8859_1,
    #[serde(rename = "ISO-8859-5")]
    Iso8859_5,
    #[serde(rename = "ISO-8859-10")]
    Iso8859_10,
    #[serde(rename = "ISO-8859-15")]
    Iso8859_15,
    #[serde(rename = "Macintosh")]
    MacRoman,
    #[serde(rename = "US-ASCII")]
    UsAscii,
}

impl CodePage {
    /// Every supported code page, in menu order.
    pub const ALL: [CodePage; 11] = [
        CodePage::Cp437,
        CodePage::Cp865,
        CodePage::Cp1250,
        CodePage::Cp1251,
        CodePage::Windows1252,
        CodePage::Iso8859_1,
        CodePage::Iso8859_5,
        CodePage::Iso8859_10,
        CodePage::Iso8859_15,
        CodePage::MacRoman,
        CodePage::UsAscii,
    ];

    /// Formal name of the code page.
    pub fn name(self) -> &'static str {
        match self {
            CodePage::Cp437 => "CP437",
            CodePage::Cp865 => "CP865",
            CodePage::Cp1250 => "CP1250",
            CodePage::Cp1251 => "CP1251",
            CodePage::Windows1252 => "Windows-1252",
            CodePage::Iso8859_1 => "ISO-8859-1",
            CodePage::Iso8859_5 => "ISO-8859-5",
            CodePage::Iso8859_10 => "ISO-8859-10",
            CodePage::Iso8859_15 => "ISO-8859-15",
            CodePage::MacRoman => "Macintosh",
            CodePage::UsAscii => "US-ASCII",
        }
    }

    /// Informal description shown next to the name in listings.
    pub fn description(self) -> &'static str {
        match self {
            CodePage::Cp437 => "IBM PC / MS-DOS (US)",
            CodePage::Cp865 => "MS-DOS Nordic",
            CodePage::Cp1250 => "Windows Central European",
            CodePage::Cp1251 => "Windows Cyrillic",
            CodePage::Windows1252 => "Windows Western European",
            CodePage::Iso8859_1 => "Latin-1 Western European",
            CodePage::Iso8859_5 => "Latin/Cyrillic",
            CodePage::Iso8859_10 => "Latin-6 Nordic",
            CodePage::Iso8859_15 => "Latin-9 Western European",
            CodePage::MacRoman => "Mac OS Roman",
            CodePage::UsAscii => "7-bit ASCII",
        }
    }

    /// Labels accepted by [`CodePage::from_label`], already normalized.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            CodePage::Cp437 => &[
                "cp437",
                "ibm437",
                "437",
                "dos",
                "msdos",
                "ibmpc",
                "cspc8codepage437",
            ],
            CodePage::Cp865 => &["cp865", "ibm865", "865", "csibm865"],
            CodePage::Cp1250 => &["cp1250", "windows1250", "xcp1250"],
            CodePage::Cp1251 => &["cp1251", "windows1251", "xcp1251"],
            CodePage::Windows1252 => &["windows1252", "cp1252", "xcp1252", "win1252"],
            CodePage::Iso8859_1 => &[
                "iso88591",
                "latin1",
                "l1",
                "iso885911987",
                "isoir100",
                "cp819",
                "ibm819",
            ],
            CodePage::Iso8859_5 => &["iso88595", "cyrillic", "iso885951988", "isoir144"],
            CodePage::Iso8859_10 => &["iso885910", "latin6", "l6", "iso8859101992", "isoir157"],
            CodePage::Iso8859_15 => &["iso885915", "latin9", "l9", "csisolatin9"],
            CodePage::MacRoman => &["macintosh", "macroman", "mac", "xmacroman", "csmacintosh"],
            CodePage::UsAscii => &["usascii", "ascii", "ansix3.41968", "iso646us", "us"],
        }
    }

    /// Resolve a charset label such as `IBM437`, `cp-437` or `windows-1252`.
    ///
    /// Matching ignores case and the separators `-`, `_` and space.
    pub fn from_label(label: &str) -> Option<CodePage> {
        let normalized = normalize_label(label);
        CodePage::ALL
            .into_iter()
            .find(|page| page.labels().contains(&normalized.as_str()))
    }

    /// MS-DOS pages draw the C0 control positions and DEL as glyphs.
    pub fn is_dos(self) -> bool {
        matches!(self, CodePage::Cp437 | CodePage::Cp865)
    }

    fn upper_half(self) -> &'static [char; 128] {
        match self {
            CodePage::Cp437 => &tables::CP437,
            CodePage::Cp865 => &tables::CP865,
            CodePage::Cp1250 => &tables::CP1250,
            CodePage::Cp1251 => &tables::CP1251,
            CodePage::Windows1252 => &tables::WINDOWS_1252,
            CodePage::Iso8859_1 => &tables::ISO_8859_1,
            CodePage::Iso8859_5 => &tables::ISO_8859_5,
            CodePage::Iso8859_10 => &tables::ISO_8859_10,
            CodePage::Iso8859_15 => &tables::ISO_8859_15,
            CodePage::MacRoman => &tables::MAC_ROMAN,
            CodePage::UsAscii => &tables::US_ASCII,
        }
    }

    /// Decode one byte to its Unicode scalar value.
    pub fn decode_byte(self, byte: u8) -> char {
        if byte < 0x80 {
            char::from(byte)
        } else {
            self.upper_half()[usize::from(byte - 0x80)]
        }
    }

    /// Decode a byte slice, one character per byte.
    pub fn decode(self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| self.decode_byte(b)).collect()
    }

    /// Find the byte a character occupies in this code page.
    ///
    /// Placeholders for undefined positions encode back to their byte.
    pub fn encode_char(self, c: char) -> Option<u8> {
        if c.is_ascii() {
            return Some(c as u8);
        }
        INVERSE[self as usize].get(&c).copied()
    }

    /// True when the byte has a defined character in this code page.
    pub fn is_mapped(self, byte: u8) -> bool {
        !is_placeholder(self.decode_byte(byte))
    }
}

impl fmt::Display for CodePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static INVERSE: Lazy<Vec<HashMap<char, u8>>> = Lazy::new(|| {
    CodePage::ALL
        .iter()
        .map(|page| {
            page.upper_half()
                .iter()
                .zip(0x80u8..=0xFF)
                .map(|(&c, byte)| (c, byte))
                .collect()
        })
        .collect()
});

static DOS_GLYPH_INVERSE: Lazy<HashMap<char, u8>> = Lazy::new(|| {
    let mut map: HashMap<char, u8> = tables::DOS_CONTROL_GLYPHS
        .iter()
        .zip(0u8..)
        .map(|(&c, byte)| (c, byte))
        .collect();
    map.insert(tables::DOS_DELETE_GLYPH, 0x7F);
    map
});

/// Private use placeholder for a byte a code page leaves undefined.
pub fn placeholder(byte: u8) -> char {
    char::from_u32(PLACEHOLDER_BASE + u32::from(byte)).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// True when `c` is one of the undefined-position placeholders.
pub fn is_placeholder(c: char) -> bool {
    (PLACEHOLDER_BASE..=PLACEHOLDER_BASE + 0xFF).contains(&u32::from(c))
}

/// MS-DOS display glyph for a C0 control byte or DEL.
///
/// Returns `None` for every other byte.
pub fn dos_control_glyph(byte: u8) -> Option<char> {
    match byte {
        0x00..=0x1F => Some(tables::DOS_CONTROL_GLYPHS[usize::from(byte)]),
        0x7F => Some(tables::DOS_DELETE_GLYPH),
        _ => None,
    }
}

/// Byte whose MS-DOS display glyph is `c`.
pub fn dos_control_byte(c: char) -> Option<u8> {
    DOS_GLYPH_INVERSE.get(&c).copied()
}

/// Unicode transformation formats recognized next to the legacy pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnicodeForm {
    #[serde(rename = "UTF-8")]
    Utf8,
    #[serde(rename = "UTF-16LE")]
    Utf16Le,
    #[serde(rename = "UTF-16BE")]
    Utf16Be,
}

impl UnicodeForm {
    pub fn name(self) -> &'static str {
        match self {
            UnicodeForm::Utf8 => "UTF-8",
            UnicodeForm::Utf16Le => "UTF-16LE",
            UnicodeForm::Utf16Be => "UTF-16BE",
        }
    }
}

/// A document character set: a legacy code page or a Unicode form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Charset {
    Legacy(CodePage),
    Unicode(UnicodeForm),
}

impl Charset {
    /// Resolve a host charset label, legacy or Unicode.
    pub fn from_label(label: &str) -> Option<Charset> {
        match normalize_label(label).as_str() {
            "utf8" | "unicode11utf8" | "xunicode20utf8" => {
                Some(Charset::Unicode(UnicodeForm::Utf8))
            }
            "utf16" | "utf16le" | "unicode" | "ucs2" => {
                Some(Charset::Unicode(UnicodeForm::Utf16Le))
            }
            "utf16be" | "unicodefffe" => Some(Charset::Unicode(UnicodeForm::Utf16Be)),
            _ => CodePage::from_label(label).map(Charset::Legacy),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Charset::Legacy(page) => page.name(),
            Charset::Unicode(form) => form.name(),
        }
    }

    pub fn code_page(self) -> Option<CodePage> {
        match self {
            Charset::Legacy(page) => Some(page),
            Charset::Unicode(_) => None,
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize_label(label: &str) -> String {
    label
        .trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cp437_light_shade_is_u2591() {
        assert_eq!(CodePage::Cp437.decode_byte(0xB0), '\u{2591}');
    }

    #[test]
    fn ascii_half_is_shared_by_every_page() {
        for page in CodePage::ALL {
            for byte in 0x20u8..0x7F {
                assert_eq!(page.decode_byte(byte), char::from(byte), "{page} {byte:#x}");
            }
        }
    }

    #[test]
    fn every_byte_round_trips_in_every_page() {
        for page in CodePage::ALL {
            for byte in 0u8..=0xFF {
                let c = page.decode_byte(byte);
                assert_eq!(page.encode_char(c), Some(byte), "{page} {byte:#x} -> {c:?}");
            }
        }
    }

    #[test]
    fn undefined_positions_decode_to_placeholders() {
        assert!(!CodePage::Windows1252.is_mapped(0x81));
        assert_eq!(CodePage::Windows1252.decode_byte(0x81), placeholder(0x81));
        assert!(CodePage::Windows1252.is_mapped(0x80));
        assert_eq!(CodePage::Windows1252.decode_byte(0x80), '€');
        assert!(CodePage::UsAscii.decode(&[0xC9]).chars().all(is_placeholder));
    }

    #[test]
    fn cp865_differs_from_cp437_in_three_positions() {
        let differing: Vec<u8> = (0x80u8..=0xFF)
            .filter(|&b| CodePage::Cp437.decode_byte(b) != CodePage::Cp865.decode_byte(b))
            .collect();
        assert_eq!(differing, vec![0x9B, 0x9D, 0xAF]);
        assert_eq!(CodePage::Cp865.decode_byte(0x9B), 'ø');
    }

    #[test]
    fn latin9_replaces_euro_position() {
        assert_eq!(CodePage::Iso8859_15.decode_byte(0xA4), '€');
        assert_eq!(CodePage::Iso8859_1.decode_byte(0xA4), '¤');
    }

    #[test]
    fn labels_resolve_case_and_separator_insensitive() {
        assert_eq!(CodePage::from_label("IBM437"), Some(CodePage::Cp437));
        assert_eq!(CodePage::from_label("cp-437"), Some(CodePage::Cp437));
        assert_eq!(CodePage::from_label("Windows_1252"), Some(CodePage::Windows1252));
        assert_eq!(CodePage::from_label("ISO-8859-15"), Some(CodePage::Iso8859_15));
        assert_eq!(CodePage::from_label("MACINTOSH"), Some(CodePage::MacRoman));
        assert_eq!(CodePage::from_label("shift_jis"), None);
    }

    #[test]
    fn charset_labels_cover_unicode_forms() {
        assert_eq!(
            Charset::from_label("UTF-8"),
            Some(Charset::Unicode(UnicodeForm::Utf8))
        );
        assert_eq!(
            Charset::from_label("utf-16be"),
            Some(Charset::Unicode(UnicodeForm::Utf16Be))
        );
        assert_eq!(
            Charset::from_label("us-ascii"),
            Some(Charset::Legacy(CodePage::UsAscii))
        );
    }

    #[test]
    fn dos_glyphs_cover_controls_and_delete() {
        assert_eq!(dos_control_glyph(0x01), Some('☺'));
        assert_eq!(dos_control_glyph(0x1A), Some('→'));
        assert_eq!(dos_control_glyph(0x7F), Some('⌂'));
        assert_eq!(dos_control_glyph(0x41), None);
        assert_eq!(dos_control_byte('♥'), Some(0x03));
    }
}
