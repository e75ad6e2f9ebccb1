//! SAUCE metadata extraction.
//!
//! A SAUCE record is a fixed 128-byte trailer at the end of a file,
//! optionally preceded by a `COMNT` block of 64-byte comment lines and an
//! EOF byte (0x1A). Records failing any validation step are discarded as a
//! whole: callers see either a fully populated record or nothing.

mod flags;

pub use flags::{AnsiFlags, AspectRatio, LetterSpacing};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::codepage::CodePage;

pub const RECORD_LEN: usize = 128;
pub const COMMENT_LINE_LEN: usize = 64;
const COMMENT_ID: &[u8] = b"COMNT";
const SAUCE_ID: &[u8] = b"SAUCE";
const SAUCE_V00: &[u8] = b"SAUCE00";
const EOF: u8 = 0x1A;
/// Bytes at the end of a buffer searched for the record identifier.
const TAIL_WINDOW: usize = 2500;
const MAX_COLUMNS: u16 = 9999;
const DEFAULT_COLUMNS: u16 = 80;

/// A validated SAUCE record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SauceRecord {
    pub version: String,
    pub title: String,
    pub author: String,
    pub group: String,
    /// Creation date as `YYYYMMDD`.
    pub date: String,
    pub file_size: u32,
    pub data_type: u8,
    pub file_type: u8,
    pub t_info1: u16,
    pub t_info2: u16,
    pub t_info3: u16,
    pub t_info4: u16,
    pub comment_lines: u8,
    pub flags: AnsiFlags,
    pub font_name: String,
    pub comments: Vec<String>,
}

/// A record together with where the document content ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub record: SauceRecord,
    /// Length of the content before the EOF byte, comments and record.
    pub content_len: usize,
}

/// Step at which a candidate record was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    NotFound,
    Version,
    Field(&'static str),
    Date,
}

/// Extract the SAUCE record at the end of `buf`, if a valid one exists.
pub fn extract(buf: &[u8]) -> Option<SauceRecord> {
    locate(buf).map(|located| located.record)
}

/// Extract the record and report where the document content ends.
pub fn locate(buf: &[u8]) -> Option<Located> {
    match parse(buf) {
        Ok(located) => {
            debug!(
                title = %located.record.title,
                content_len = located.content_len,
                "SAUCE record found"
            );
            Some(located)
        }
        Err(Rejection::NotFound) => None,
        Err(rejection) => {
            debug!(?rejection, "SAUCE record rejected");
            None
        }
    }
}

/// Offsets where a record may start, most likely first: the last 128
/// bytes, then every `SAUCE00` in the tail window that still leaves room
/// for a full record, searching backward.
fn candidates(buf: &[u8]) -> impl Iterator<Item = usize> + '_ {
    let last_start = buf.len().checked_sub(RECORD_LEN);
    let window_start = buf.len().saturating_sub(TAIL_WINDOW);
    let at_end = last_start.filter(|&start| buf[start..].starts_with(SAUCE_ID));
    let earlier = last_start
        .into_iter()
        .flat_map(move |last| (window_start..last).rev())
        .filter(move |&start| buf[start..].starts_with(SAUCE_V00));
    at_end.into_iter().chain(earlier)
}

/// The first candidate that validates wins. When none does, the rejection
/// of the most likely candidate is reported.
fn parse(buf: &[u8]) -> Result<Located, Rejection> {
    let mut first_rejection = None;
    for start in candidates(buf) {
        match parse_at(buf, start) {
            Ok(located) => return Ok(located),
            Err(rejection) => {
                first_rejection.get_or_insert(rejection);
            }
        }
    }
    Err(first_rejection.unwrap_or(Rejection::NotFound))
}

fn parse_at(buf: &[u8], start: usize) -> Result<Located, Rejection> {
    let rec = &buf[start..];

    if &rec[5..7] != b"00" {
        return Err(Rejection::Version);
    }

    let title = text_field(&rec[7..42], 35).ok_or(Rejection::Field("title"))?;
    let author = text_field(&rec[42..62], 20).ok_or(Rejection::Field("author"))?;
    let group = text_field(&rec[62..82], 20).ok_or(Rejection::Field("group"))?;
    let date = date_field(&rec[82..90]).ok_or(Rejection::Date)?;
    let font_name = text_field(&rec[106..128], 22).ok_or(Rejection::Field("font name"))?;
    let comment_lines = rec[104];

    let (comments, comments_start) = comment_block(buf, start, comment_lines);
    let content_len = match comments_start.checked_sub(1) {
        Some(last) if buf[last] == EOF => last,
        _ => comments_start,
    };

    let record = SauceRecord {
        version: "00".to_string(),
        title,
        author,
        group,
        date,
        file_size: u32::from_le_bytes([rec[90], rec[91], rec[92], rec[93]]),
        data_type: rec[94],
        file_type: rec[95],
        t_info1: u16::from_le_bytes([rec[96], rec[97]]),
        t_info2: u16::from_le_bytes([rec[98], rec[99]]),
        t_info3: u16::from_le_bytes([rec[100], rec[101]]),
        t_info4: u16::from_le_bytes([rec[102], rec[103]]),
        comment_lines,
        flags: AnsiFlags(rec[105]),
        font_name,
        comments,
    };
    Ok(Located {
        record,
        content_len,
    })
}

/// Decode a fixed-width CP437 field, trimming NUL and space padding.
fn text_field(bytes: &[u8], max_len: usize) -> Option<String> {
    if bytes.len() > max_len {
        return None;
    }
    let end = bytes
        .iter()
        .rposition(|&b| b != 0 && b != b' ')
        .map_or(0, |i| i + 1);
    let text: String = bytes[..end]
        .iter()
        .map(|&b| if b == 0 { ' ' } else { CodePage::Cp437.decode_byte(b) })
        .collect();
    Some(text)
}

fn date_field(bytes: &[u8]) -> Option<String> {
    if bytes.len() != 8 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let digits = std::str::from_utf8(bytes).ok()?;
    let year: u16 = digits[0..4].parse().ok()?;
    let month: u8 = digits[4..6].parse().ok()?;
    let day: u8 = digits[6..8].parse().ok()?;
    let valid =
        (1980..=2100).contains(&year) && (1..=12).contains(&month) && (1..=31).contains(&day);
    valid.then(|| digits.to_string())
}

/// Comment lines preceding the record, and the offset where they begin.
///
/// A missing or malformed block leaves the comments empty and the record
/// start as the boundary.
fn comment_block(buf: &[u8], record_start: usize, lines: u8) -> (Vec<String>, usize) {
    if lines == 0 {
        return (Vec::new(), record_start);
    }
    let block_len = COMMENT_ID.len() + usize::from(lines) * COMMENT_LINE_LEN;
    let Some(block_start) = record_start.checked_sub(block_len) else {
        return (Vec::new(), record_start);
    };
    let block = &buf[block_start..record_start];
    if !block.starts_with(COMMENT_ID) {
        return (Vec::new(), record_start);
    }
    let comments = block[COMMENT_ID.len()..]
        .chunks(COMMENT_LINE_LEN)
        .filter_map(|line| text_field(line, COMMENT_LINE_LEN))
        .collect();
    (comments, block_start)
}

impl SauceRecord {
    /// Creation date, when it names a real calendar day.
    pub fn date(&self) -> Option<NaiveDate> {
        let year = self.date.get(0..4)?.parse().ok()?;
        let month = self.date.get(4..6)?.parse().ok()?;
        let day = self.date.get(6..8)?.parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    pub fn data_type_name(&self) -> &'static str {
        flags::data_type_name(self.data_type)
    }

    pub fn file_type_name(&self) -> &'static str {
        flags::file_type_name(self.data_type, self.file_type)
    }

    fn is_text(&self) -> bool {
        matches!(
            self.data_type,
            flags::DATA_TYPE_CHARACTER | flags::DATA_TYPE_BINARY_TEXT
        )
    }

    /// Font family the author intended, with 9-pixel variants by default.
    pub fn font_family(&self) -> &'static str {
        flags::font_family(&self.font_name, self.flags.letter_spacing())
    }

    /// Code page implied by the font name.
    pub fn code_page(&self) -> Option<CodePage> {
        flags::code_page_hint(&self.font_name)
    }

    /// Whether the record asks for iCE colors (blink as bright background).
    pub fn ice_colors(&self) -> bool {
        self.is_text() && self.flags.non_blink()
    }

    /// Intended character columns.
    pub fn columns(&self) -> u16 {
        let columns = match self.data_type {
            flags::DATA_TYPE_BINARY_TEXT if self.file_type > 0 => u16::from(self.file_type) * 2,
            flags::DATA_TYPE_XBIN if self.t_info1 > 0 => self.t_info1,
            _ if flags::is_character_cell(self.data_type, self.file_type) && self.t_info1 > 0 => {
                self.t_info1
            }
            _ => DEFAULT_COLUMNS,
        };
        columns.min(MAX_COLUMNS)
    }

    /// Intended number of lines, when the record declares one.
    pub fn lines(&self) -> Option<u16> {
        let character = flags::is_character_cell(self.data_type, self.file_type)
            || self.data_type == flags::DATA_TYPE_XBIN;
        (character && self.t_info2 > 0).then_some(self.t_info2)
    }
}
