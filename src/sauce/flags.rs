//! SAUCE type codes, ANSi flags and font lookup.

use serde::Serialize;

use crate::codepage::CodePage;

/// `TFlags` byte of a character or binary text record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnsiFlags(pub u8);

const NON_BLINK: u8 = 0b0000_0001;
const LETTER_SPACING_MASK: u8 = 0b0000_0110;
const ASPECT_RATIO_MASK: u8 = 0b0001_1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LetterSpacing {
    Legacy,
    EightPixel,
    NinePixel,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AspectRatio {
    Legacy,
    LegacyDevice,
    Square,
    Invalid,
}

impl AnsiFlags {
    /// Blink bit reinterpreted as a bright background (iCE colors).
    pub fn non_blink(self) -> bool {
        self.0 & NON_BLINK != 0
    }

    pub fn letter_spacing(self) -> LetterSpacing {
        match (self.0 & LETTER_SPACING_MASK) >> 1 {
            0 => LetterSpacing::Legacy,
            1 => LetterSpacing::EightPixel,
            2 => LetterSpacing::NinePixel,
            _ => LetterSpacing::Invalid,
        }
    }

    pub fn aspect_ratio(self) -> AspectRatio {
        match (self.0 & ASPECT_RATIO_MASK) >> 3 {
            0 => AspectRatio::Legacy,
            1 => AspectRatio::LegacyDevice,
            2 => AspectRatio::Square,
            _ => AspectRatio::Invalid,
        }
    }
}

pub(crate) const DATA_TYPE_CHARACTER: u8 = 1;
pub(crate) const DATA_TYPE_BINARY_TEXT: u8 = 5;
pub(crate) const DATA_TYPE_XBIN: u8 = 6;

pub(crate) fn data_type_name(data_type: u8) -> &'static str {
    match data_type {
        0 => "None",
        DATA_TYPE_CHARACTER => "Character",
        2 => "Bitmap",
        3 => "Vector",
        4 => "Audio",
        DATA_TYPE_BINARY_TEXT => "BinaryText",
        DATA_TYPE_XBIN => "XBin",
        7 => "Archive",
        8 => "Executable",
        _ => "Unknown",
    }
}

pub(crate) fn file_type_name(data_type: u8, file_type: u8) -> &'static str {
    match (data_type, file_type) {
        (DATA_TYPE_CHARACTER, 0) => "ASCII text",
        (DATA_TYPE_CHARACTER, 1) => "ANSI text",
        (DATA_TYPE_CHARACTER, 2) => "ANSiMation",
        (DATA_TYPE_CHARACTER, 3) => "RIPscript",
        (DATA_TYPE_CHARACTER, 4) => "PCBoard text",
        (DATA_TYPE_CHARACTER, 5) => "Avatar text",
        (DATA_TYPE_CHARACTER, 6) => "HTML markup",
        (DATA_TYPE_CHARACTER, 7) => "Source code",
        (DATA_TYPE_CHARACTER, 8) => "TundraDraw",
        (DATA_TYPE_BINARY_TEXT, _) => "Binary text",
        (DATA_TYPE_XBIN, 0) => "eXtended BIN",
        _ => "Unknown",
    }
}

/// Character file types drawn on a character-cell grid whose width is
/// given by `TInfo1`.
pub(crate) fn is_character_cell(data_type: u8, file_type: u8) -> bool {
    data_type == DATA_TYPE_CHARACTER && matches!(file_type, 0 | 1 | 2 | 4 | 5 | 8)
}

/// Split `IBM VGA 865` into the font and its trailing code page number.
fn split_font_name(name: &str) -> (&str, Option<u16>) {
    let name = name.trim();
    if let Some((base, last)) = name.rsplit_once(' ') {
        if base.starts_with("IBM") {
            if let Ok(code_page) = last.parse::<u16>() {
                return (base, Some(code_page));
            }
        }
    }
    (name, None)
}

/// Font family for a SAUCE font name, honoring the letter spacing flag.
pub(crate) fn font_family(font_name: &str, spacing: LetterSpacing) -> &'static str {
    let eight_pixel = spacing == LetterSpacing::EightPixel;
    let (base, _) = split_font_name(font_name);
    match base {
        "" | "IBM VGA" if eight_pixel => "ibm_vga_8x16",
        "" | "IBM VGA" => "ibm_vga_9x16",
        "IBM VGA50" if eight_pixel => "ibm_ega_8x8",
        "IBM VGA50" => "ibm_vga_9x8",
        "IBM VGA25G" => "ast_premiumexec",
        "IBM EGA" => "ibm_ega_8x14",
        "IBM EGA43" => "ibm_ega_8x8",
        "Amiga Topaz 1" => "topaza500",
        "Amiga Topaz 1+" => "topazplusa500",
        "Amiga Topaz 2" => "topaza1200",
        "Amiga Topaz 2+" => "topazplusa1200",
        "Amiga P0T-NOoDLE" => "potnoodle",
        "Amiga MicroKnight" => "microknight",
        "Amiga MicroKnight+" => "microknightplus",
        "Amiga mOsOul" => "mosoul",
        "C64 PETSCII unshifted" | "C64 PETSCII shifted" => "petme64",
        "Atari ATASCII" => "candyantics",
        _ if eight_pixel => "ibm_vga_8x16",
        _ => "ibm_vga_9x16",
    }
}

/// Code page implied by a SAUCE font name, when it implies one.
pub(crate) fn code_page_hint(font_name: &str) -> Option<CodePage> {
    let (base, number) = split_font_name(font_name);
    if base.starts_with("IBM") {
        return Some(match number {
            Some(865) => CodePage::Cp865,
            Some(819) => CodePage::Windows1252,
            _ => CodePage::Cp437,
        });
    }
    if base.starts_with("Amiga") || base.starts_with("Atari") {
        return Some(CodePage::Windows1252);
    }
    None
}
