//! End-to-end rendering of one document.
//!
//! Stages run in a fixed order, each on the output of the previous one:
//!
//! 1. encoding guess (byte-order mark, then character statistics)
//! 2. SAUCE extraction on the one-byte-per-character view of the input
//! 3. code page selection: explicit override, then SAUCE font hint, then guess
//! 4. transcoding of the content before the SAUCE boundary
//! 5. pre-cleaning of producer artifacts
//! 6. interpretation as ANSI art or BBS colour codes
//!
//! Every stage is pure. Nothing here reads configuration or touches the
//! display; hosts pass a [`RenderOptions`] and receive a [`Rendered`].

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::bbs::{self, BbsFormat};
use crate::codepage::{Charset, CodePage, UnicodeForm};
use crate::error::{validate_line_width, Error, Result, Warning};
use crate::guess::{self, Guess};
use crate::sauce::{self, SauceRecord};
use crate::terminal::{self, InterpreterOptions, Row, Statistics, DEFAULT_LINE_WIDTH};
use crate::transcode::Transcoder;

const BOM: char = '\u{FEFF}';

/// A document handed over by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Raw file bytes. Each byte stands for the character of the same value.
    Bytes(Vec<u8>),
    /// Text the host already decoded with the charset named by `charset`.
    Text { text: String, charset: String },
}

impl Input {
    /// Read a file as raw bytes.
    pub fn read(path: impl AsRef<Path>) -> Result<Input> {
        Ok(Input::Bytes(std::fs::read(path)?))
    }

    /// Decode `bytes` with `label` the way a browser would before handing
    /// the text over. Unknown labels keep the byte identity view, and the
    /// label is still reported so the guess can flag it.
    pub fn decode(bytes: &[u8], label: &str) -> Input {
        let text = match Charset::from_label(label) {
            Some(Charset::Unicode(form)) => decode_unicode(bytes, form),
            Some(Charset::Legacy(page)) => page.decode(bytes),
            None => bytes.iter().map(|&b| char::from(b)).collect(),
        };
        Input::Text {
            text,
            charset: label.to_string(),
        }
    }

    fn declared(&self) -> Option<&str> {
        match self {
            Input::Bytes(_) => None,
            Input::Text { charset, .. } => Some(charset),
        }
    }

    /// Legacy page the characters must be mapped back through to recover
    /// their bytes. `None` is the identity view.
    fn source_page(&self) -> Option<CodePage> {
        self.declared()
            .and_then(Charset::from_label)
            .and_then(Charset::code_page)
    }
}

/// Read-only options for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Explicit code page, outranking SAUCE and the guess.
    pub code_page: Option<CodePage>,
    /// Explicit BBS scheme. Without one the scheme is detected.
    pub bbs: Option<BbsFormat>,
    /// Columns before wrapping, 0 disables wrapping.
    pub line_width: usize,
    /// iCE colors before the document or SAUCE turn them on.
    pub ice_colors: bool,
    pub display_control_glyphs: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            code_page: None,
            bbs: None,
            line_width: DEFAULT_LINE_WIDTH,
            ice_colors: false,
            display_control_glyphs: false,
        }
    }
}

impl RenderOptions {
    /// Set the code page override from a host label.
    pub fn with_code_page_label(mut self, label: &str) -> Result<Self> {
        let page = CodePage::from_label(label).ok_or_else(|| Error::UnknownCodePage {
            label: label.to_string(),
        })?;
        self.code_page = Some(page);
        Ok(self)
    }

    /// Set the BBS scheme override from a host label.
    pub fn with_bbs_label(mut self, label: &str) -> Result<Self> {
        let format = BbsFormat::from_label(label).ok_or_else(|| Error::UnknownBbsFormat {
            label: label.to_string(),
        })?;
        self.bbs = Some(format);
        Ok(self)
    }
}

/// Everything one render produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub rows: Vec<Row>,
    pub sauce: Option<SauceRecord>,
    pub guess: Guess,
    /// Legacy page the text was read with; `None` for Unicode text or an
    /// unsupported declared charset.
    pub code_page: Option<CodePage>,
    pub bbs: Option<BbsFormat>,
    pub stats: Statistics,
    pub ice_colors: bool,
    pub warnings: Vec<Warning>,
}

impl Rendered {
    /// Plain text of every row, one line per row.
    pub fn text(&self) -> String {
        self.rows
            .iter()
            .map(Row::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The input as a character string plus the byte each character stood for.
/// Indexes agree: character `n` came from byte `n`.
struct ByteView {
    chars: String,
    bytes: Vec<u8>,
}

impl ByteView {
    fn new(input: &Input) -> Self {
        match input {
            Input::Bytes(bytes) => Self {
                chars: bytes.iter().map(|&b| char::from(b)).collect(),
                bytes: bytes.clone(),
            },
            Input::Text { text, .. } => {
                let page = input.source_page();
                let bytes = text
                    .chars()
                    .map(|c| match page {
                        Some(page) => page.encode_char(c).unwrap_or(b'?'),
                        None => u8::try_from(u32::from(c)).unwrap_or(b'?'),
                    })
                    .collect();
                Self {
                    chars: text.clone(),
                    bytes,
                }
            }
        }
    }

    /// Both views cut to the first `len` units.
    fn content(&self, len: usize) -> (&str, &[u8]) {
        let end = self
            .chars
            .char_indices()
            .nth(len)
            .map_or(self.chars.len(), |(index, _)| index);
        (&self.chars[..end], &self.bytes[..len.min(self.bytes.len())])
    }
}

fn decode_unicode(bytes: &[u8], form: UnicodeForm) -> String {
    let to_units = |bytes: &[u8], little_endian: bool| -> Vec<u16> {
        bytes
            .chunks_exact(2)
            .map(|pair| {
                let pair = [pair[0], pair[1]];
                if little_endian {
                    u16::from_le_bytes(pair)
                } else {
                    u16::from_be_bytes(pair)
                }
            })
            .collect()
    };
    match form {
        UnicodeForm::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        UnicodeForm::Utf16Le | UnicodeForm::Utf16Be => {
            let units = to_units(bytes, form == UnicodeForm::Utf16Le);
            char::decode_utf16(units)
                .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect()
        }
    }
}

/// Override, then SAUCE hint, then guess. Unicode text and unsupported
/// declared charsets are only transcoded on explicit request.
fn select_code_page(
    options: &RenderOptions,
    record: Option<&SauceRecord>,
    guess: &Guess,
) -> Option<CodePage> {
    if let Some(page) = options.code_page {
        debug!(code_page = page.name(), "code page from override");
        return Some(page);
    }
    if guess.is_unicode() || !guess.guaranteed {
        return None;
    }
    if let Some(page) = record.and_then(SauceRecord::code_page) {
        debug!(code_page = page.name(), "code page from SAUCE font");
        return Some(page);
    }
    let page = guess.charset.code_page();
    debug!(code_page = ?page.map(CodePage::name), "code page from guess");
    page
}

/// Render one document.
pub fn render(input: &Input, options: &RenderOptions) -> Result<Rendered> {
    let line_width = validate_line_width(options.line_width)?;
    let declared = input.declared();
    let view = ByteView::new(input);

    let guess = guess::guess(&view.chars, declared);
    let mut warnings = Vec::new();
    if !guess.guaranteed {
        let label = declared.unwrap_or_default().to_string();
        warn!(label = %label, "unsupported charset, text shown as-is");
        warnings.push(Warning::UnsupportedCharset { label });
    }

    let located = sauce::locate(&view.bytes);
    let (content_chars, content_bytes) = match &located {
        Some(located) => view.content(located.content_len),
        None => (view.chars.as_str(), view.bytes.as_slice()),
    };
    let record = located.map(|located| located.record);

    let code_page = select_code_page(options, record.as_ref(), &guess);
    let text = match code_page {
        Some(page) => Transcoder::new(input.source_page(), Some(page))
            .with_control_glyphs(options.display_control_glyphs)
            .transcode(content_chars),
        None => {
            let unicode = match (input, guess.charset) {
                (Input::Bytes(_), Charset::Unicode(form)) => decode_unicode(content_bytes, form),
                _ => content_chars.to_string(),
            };
            let unicode = unicode.strip_prefix(BOM).unwrap_or(&unicode);
            Transcoder::new(None, None)
                .with_control_glyphs(options.display_control_glyphs)
                .transcode(unicode)
        }
    };
    let text = terminal::clean_sequences(&text);

    let interpreter_options = InterpreterOptions {
        line_width,
        ice_colors: options.ice_colors || record.as_ref().is_some_and(SauceRecord::ice_colors),
    };
    let bbs = options.bbs.or_else(|| BbsFormat::detect(&text));
    let document = match bbs {
        Some(format) => bbs::interpret(&text, format, interpreter_options),
        None => terminal::interpret(&text, interpreter_options),
    };
    debug!(
        rows = document.rows.len(),
        other = document.stats.other,
        unknown = document.stats.unknown,
        "document interpreted"
    );

    Ok(Rendered {
        rows: document.rows,
        sauce: record,
        guess,
        code_page,
        bbs,
        stats: document.stats,
        ice_colors: document.ice_colors,
        warnings,
    })
}

/// Read and render a file.
pub fn render_file(path: impl AsRef<Path>, options: &RenderOptions) -> Result<Rendered> {
    render(&Input::read(path)?, options)
}
