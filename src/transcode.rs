//! Code page transcoding.
//!
//! Text arrives decoded under some charset. Each character is mapped back
//! to the byte it occupied in that charset and then forward through the
//! selected code page table, in a single pass per character. Output of one
//! lookup is never fed to another, so pages whose tables overlap cannot
//! re-match each other's glyphs.

use crate::codepage::{self, CodePage};

/// Stateless per-document transcoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transcoder {
    /// Charset the text was decoded with. `None` is the byte identity view:
    /// every character up to U+00FF stands for the byte of the same value.
    from: Option<CodePage>,
    /// Page the bytes are reinterpreted with. `None` leaves non-ASCII
    /// characters as they are and only applies presentation rules.
    to: Option<CodePage>,
    display_control_glyphs: bool,
}

impl Transcoder {
    pub fn new(from: Option<CodePage>, to: Option<CodePage>) -> Self {
        Self {
            from,
            to,
            display_control_glyphs: false,
        }
    }

    /// Show C0 controls (other than LF, CR, TAB and ESC) and DEL as MS-DOS glyphs.
    pub fn with_control_glyphs(mut self, enabled: bool) -> Self {
        self.display_control_glyphs = enabled;
        self
    }

    pub fn transcode(&self, text: &str) -> String {
        text.chars().map(|c| self.transcode_char(c)).collect()
    }

    pub fn transcode_char(&self, c: char) -> char {
        match c {
            '\x1b' => return c,
            '\0' | char::REPLACEMENT_CHARACTER => return ' ',
            _ => {}
        }
        let Some(byte) = self.source_byte(c) else {
            return c;
        };
        match byte {
            0x00 => ' ',
            0x1B => '\x1b',
            b'\n' | b'\r' | b'\t' => char::from(byte),
            0x01..=0x1F if self.display_control_glyphs => {
                codepage::dos_control_glyph(byte).unwrap_or(c)
            }
            0x01..=0x1F => char::from(byte),
            0x7F if self.display_control_glyphs => {
                codepage::dos_control_glyph(byte).unwrap_or(' ')
            }
            0x7F => ' ',
            0x20..=0x7E => char::from(byte),
            _ => match self.to {
                Some(page) => page.decode_byte(byte),
                None => c,
            },
        }
    }

    fn source_byte(&self, c: char) -> Option<u8> {
        match self.from {
            Some(page) => page.encode_char(c),
            None => u8::try_from(u32::from(c)).ok(),
        }
    }
}

/// Reinterpret `text`, decoded with `from`, under the `to` page.
pub fn transcode(
    text: &str,
    from: Option<CodePage>,
    to: Option<CodePage>,
    display_control_glyphs: bool,
) -> String {
    Transcoder::new(from, to)
        .with_control_glyphs(display_control_glyphs)
        .transcode(text)
}

/// Decode raw bytes with `page`, applying the same presentation rules as
/// [`Transcoder::transcode`].
pub fn decode_bytes(bytes: &[u8], page: CodePage, display_control_glyphs: bool) -> String {
    let transcoder = Transcoder::new(None, Some(page)).with_control_glyphs(display_control_glyphs);
    bytes
        .iter()
        .map(|&b| transcoder.transcode_char(char::from(b)))
        .collect()
}

/// Re-encode Unicode text toward a legacy page.
///
/// MS-DOS pages also accept their control glyphs. Characters without a
/// position become `?`.
pub fn encode(text: &str, page: CodePage) -> Vec<u8> {
    text.chars()
        .map(|c| {
            page.encode_char(c)
                .or_else(|| page.is_dos().then(|| codepage::dos_control_byte(c)).flatten())
                .unwrap_or(b'?')
        })
        .collect()
}
