//! BBS colour code interpreter.
//!
//! Bulletin board packages predating ANSI.SYS art embedded colour changes as
//! printable codes. Each scheme is recognized here and replayed through the
//! terminal [`Interpreter`] as style changes, so the output is the same row
//! model ANSI documents produce.
//!
//! | Format    | Code                    | Meaning                              |
//! |-----------|-------------------------|--------------------------------------|
//! | PCBoard   | `@X<bg><fg>`            | hex PC attribute nibbles             |
//! | Wildcat   | `@<bg><fg>@`            | hex PC attribute nibbles             |
//! | Telegard  | `` `<bg><fg> ``         | hex PC attribute nibbles             |
//! | Renegade  | `\|00`..`\|23`          | 0-15 foreground, 16-23 background    |
//! | Celerity  | `\|k`..`\|W`, `\|S`     | colour letters, `S` swaps the target |
//! | WWIV      | `\|#0`..`\|#9`          | foreground 0-9                       |
//! | WWIV      | `0x03` then `0`..`9`    | foreground 0-9                       |

use serde::Serialize;

use crate::terminal::{Color, Document, Interpreter, InterpreterOptions, StyleAttributes};

/// PC attribute order (black, blue, green, cyan, red, magenta, brown, grey)
/// to ANSI palette order.
const PC_TO_ANSI: [u8; 8] = [0, 4, 2, 6, 1, 5, 3, 7];

/// Codes that clear the screen or wait for a key, dropped from the output.
const SCREEN_CODES: [&str; 3] = ["@CLS@", "@CLS @", "@PAUSE@"];

/// Colour code scheme of a BBS text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BbsFormat {
    PcBoard,
    Wildcat,
    Telegard,
    Renegade,
    Celerity,
    WwivHash,
    WwivHeart,
}

/// One recognized code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Code {
    /// Background and foreground PC attribute nibbles.
    Attribute { background: u8, foreground: u8 },
    Foreground(u8),
    Background(u8),
    /// Celerity colour, applied to whichever side is selected.
    Letter(u8),
    /// Celerity `|S`.
    Swap,
    /// Screen control, removed without effect.
    Screen,
}

impl BbsFormat {
    pub const ALL: [BbsFormat; 7] = [
        BbsFormat::PcBoard,
        BbsFormat::Wildcat,
        BbsFormat::Telegard,
        BbsFormat::Renegade,
        BbsFormat::Celerity,
        BbsFormat::WwivHash,
        BbsFormat::WwivHeart,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BbsFormat::PcBoard => "pcboard",
            BbsFormat::Wildcat => "wildcat",
            BbsFormat::Telegard => "telegard",
            BbsFormat::Renegade => "renegade",
            BbsFormat::Celerity => "celerity",
            BbsFormat::WwivHash => "wwivhash",
            BbsFormat::WwivHeart => "wwivheart",
        }
    }

    pub fn from_label(label: &str) -> Option<BbsFormat> {
        let label = label.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|format| format.name() == label)
    }

    /// Find the scheme from the colour code the text opens with.
    ///
    /// Only the start of the text is inspected, after any leading whitespace
    /// and screen codes such as `@CLS@`. Codes further in are ordinary
    /// characters: a `|b` in a plain readme must not turn it into a BBS
    /// text. Text containing a CSI sequence is ANSI art and is never a BBS
    /// text.
    pub fn detect(text: &str) -> Option<BbsFormat> {
        if text.contains("\x1b[") {
            return None;
        }
        let mut start = text.trim_start();
        while let Some(len) = screen_code(start) {
            start = start[len..].trim_start();
        }
        let format = detect_at(start);
        if let Some(format) = format {
            tracing::debug!(format = format.name(), "BBS colour codes detected");
        }
        format
    }

    /// Match a code of this scheme at the start of `text`, returning its
    /// length in bytes.
    fn match_code(self, text: &str) -> Option<(usize, Code)> {
        if let Some(len) = screen_code(text) {
            return Some((len, Code::Screen));
        }
        let bytes = text.as_bytes();
        match self {
            // Wildcat codes are accepted in PCBoard texts and vice versa;
            // boards often mixed the two.
            BbsFormat::PcBoard | BbsFormat::Wildcat => {
                if let Some(attribute) = pcboard_code(bytes) {
                    Some((4, attribute))
                } else {
                    wildcat_code(bytes).map(|attribute| (4, attribute))
                }
            }
            BbsFormat::Telegard => match bytes {
                [b'`', bg, fg, ..] => hex_attribute(*bg, *fg).map(|attribute| (3, attribute)),
                _ => None,
            },
            BbsFormat::Renegade => renegade_code(bytes).map(|code| (3, code)),
            BbsFormat::Celerity => match bytes {
                [b'|', b'S', ..] => Some((2, Code::Swap)),
                [b'|', letter, ..] => celerity_colour(*letter).map(|c| (2, Code::Letter(c))),
                _ => None,
            },
            BbsFormat::WwivHash => match bytes {
                [b'|', b'#', digit @ b'0'..=b'9', ..] => {
                    Some((3, Code::Foreground(digit - b'0')))
                }
                _ => None,
            },
            BbsFormat::WwivHeart => match bytes {
                [0x03, digit @ b'0'..=b'9', ..] => Some((2, Code::Foreground(digit - b'0'))),
                _ => None,
            },
        }
    }
}

impl std::fmt::Display for BbsFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn detect_at(text: &str) -> Option<BbsFormat> {
    let bytes = text.as_bytes();
    if screen_code(text).is_some() {
        return None;
    }
    if pcboard_code(bytes).is_some() {
        return Some(BbsFormat::PcBoard);
    }
    if wildcat_code(bytes).is_some() {
        return Some(BbsFormat::Wildcat);
    }
    match bytes {
        [b'`', bg, fg, ..] if hex_attribute(*bg, *fg).is_some() => Some(BbsFormat::Telegard),
        [b'|', b'#', b'0'..=b'9', ..] => Some(BbsFormat::WwivHash),
        [0x03, b'0'..=b'9', ..] => Some(BbsFormat::WwivHeart),
        [b'|', b'0'..=b'9', b'0'..=b'9', ..] if renegade_code(bytes).is_some() => {
            Some(BbsFormat::Renegade)
        }
        [b'|', b'S', ..] => Some(BbsFormat::Celerity),
        [b'|', letter, ..] if celerity_colour(*letter).is_some() => Some(BbsFormat::Celerity),
        _ => None,
    }
}

fn screen_code(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    SCREEN_CODES
        .iter()
        .find(|code| {
            bytes.len() >= code.len() && bytes[..code.len()].eq_ignore_ascii_case(code.as_bytes())
        })
        .map(|code| code.len())
}

fn pcboard_code(bytes: &[u8]) -> Option<Code> {
    match bytes {
        [b'@', b'X' | b'x', bg, fg, ..] => hex_attribute(*bg, *fg),
        _ => None,
    }
}

fn wildcat_code(bytes: &[u8]) -> Option<Code> {
    match bytes {
        [b'@', bg, fg, b'@', ..] => hex_attribute(*bg, *fg),
        _ => None,
    }
}

fn renegade_code(bytes: &[u8]) -> Option<Code> {
    let [b'|', tens @ b'0'..=b'9', ones @ b'0'..=b'9', ..] = bytes else {
        return None;
    };
    match (tens - b'0') * 10 + (ones - b'0') {
        n @ 0..=15 => Some(Code::Foreground(n)),
        n @ 16..=23 => Some(Code::Background(n - 16)),
        _ => None,
    }
}

fn hex_attribute(bg: u8, fg: u8) -> Option<Code> {
    let background = char::from(bg).to_digit(16)?;
    let foreground = char::from(fg).to_digit(16)?;
    Some(Code::Attribute {
        background: background as u8,
        foreground: foreground as u8,
    })
}

fn celerity_colour(letter: u8) -> Option<u8> {
    b"kbgcrmywdBGCRMYW"
        .iter()
        .position(|&c| c == letter)
        .map(|index| index as u8)
}

/// Standard ANSI colour of a PC attribute nibble, plus whether the bright
/// bit was set.
fn pc_colour(nibble: u8) -> (Color, bool) {
    let ansi = PC_TO_ANSI[usize::from(nibble & 7)];
    (Color::standard(ansi), nibble & 8 != 0)
}

fn set_foreground(style: &mut StyleAttributes, nibble: u8) {
    let (color, bright) = pc_colour(nibble);
    style.fg = color;
    style.bold = bright;
}

/// A bright background is only reachable with iCE colors, where it is
/// expressed as blink.
fn set_background(style: &mut StyleAttributes, nibble: u8) {
    let (color, bright) = pc_colour(nibble);
    style.bg = color;
    style.blink = bright;
}

/// Interpret a BBS text into rows.
pub fn interpret(text: &str, format: BbsFormat, options: InterpreterOptions) -> Document {
    let mut interpreter = Interpreter::new(options);
    let mut style = StyleAttributes::default();
    let mut swapped = false;
    let mut codes = 0usize;

    let mut text_start = 0;
    let mut index = 0;
    while index < text.len() {
        let rest = &text[index..];
        let Some((len, code)) = format.match_code(rest) else {
            index += rest.chars().next().map_or(1, char::len_utf8);
            continue;
        };

        interpreter.process(&text[text_start..index]);
        match code {
            Code::Attribute {
                background,
                foreground,
            } => {
                set_background(&mut style, background);
                set_foreground(&mut style, foreground);
            }
            Code::Foreground(nibble) => set_foreground(&mut style, nibble),
            Code::Background(nibble) => set_background(&mut style, nibble),
            Code::Letter(nibble) if swapped => set_background(&mut style, nibble),
            Code::Letter(nibble) => set_foreground(&mut style, nibble),
            Code::Swap => swapped = !swapped,
            Code::Screen => {}
        }
        interpreter.set_style(style);
        codes += 1;
        index += len;
        text_start = index;
    }
    interpreter.process(&text[text_start..]);

    tracing::debug!(format = format.name(), codes, "BBS text interpreted");
    interpreter.finish()
}
