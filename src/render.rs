//! Output renderers for a [`Rendered`] document.
//!
//! - `ansi`: styled terminal output through crossterm commands
//! - `text`: plain text, one line per row
//! - `json`: the full render result, rows and metadata, via serde_json

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{
    Attribute as TermAttribute, Color as TermColor, Print, ResetColor, SetAttribute,
    SetBackgroundColor, SetForegroundColor,
};
use serde::{Deserialize, Serialize};

use crate::codepage;
use crate::pipeline::Rendered;
use crate::terminal::{Color, Row, Run, StyleAttributes};

/// Output format for rendered documents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Styled text for a terminal
    #[default]
    Ansi,
    /// Plain text without styling
    Text,
    /// Rows and metadata as JSON
    Json,
}

/// Presentation choices that do not change the render result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    /// Include rows an erase-in-page cleared.
    pub show_erased: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self { show_erased: true }
    }
}

/// Write `rendered` in `format`.
pub fn write(
    out: &mut impl Write,
    rendered: &Rendered,
    format: OutputFormat,
    options: OutputOptions,
) -> io::Result<()> {
    match format {
        OutputFormat::Ansi => write_ansi(out, rendered, options),
        OutputFormat::Text => write_text(out, rendered, options),
        OutputFormat::Json => write_json(out, rendered),
    }
}

fn visible_rows<'a>(
    rendered: &'a Rendered,
    options: OutputOptions,
) -> impl Iterator<Item = &'a Row> {
    rendered
        .rows
        .iter()
        .filter(move |row| options.show_erased || !row.erased)
}

pub fn write_text(
    out: &mut impl Write,
    rendered: &Rendered,
    options: OutputOptions,
) -> io::Result<()> {
    for row in visible_rows(rendered, options) {
        writeln!(out, "{}", row.text())?;
    }
    Ok(())
}

pub fn write_json(out: &mut impl Write, rendered: &Rendered) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, rendered)?;
    writeln!(out)
}

pub fn write_ansi(
    out: &mut impl Write,
    rendered: &Rendered,
    options: OutputOptions,
) -> io::Result<()> {
    for row in visible_rows(rendered, options) {
        for run in &row.runs {
            write_run(out, run, rendered.ice_colors)?;
        }
        queue!(out, SetAttribute(TermAttribute::Reset), ResetColor, Print("\n"))?;
    }
    out.flush()
}

fn write_run(out: &mut impl Write, run: &Run, ice_colors: bool) -> io::Result<()> {
    queue!(out, SetAttribute(TermAttribute::Reset), ResetColor)?;
    if !run.is_positioning() {
        apply_style(out, &run.style, ice_colors)?;
    }
    queue!(out, Print(safe_text(&run.text)))
}

/// Controls left in the text would drive the host terminal; show them as
/// their MS-DOS glyphs instead.
fn safe_text(text: &str) -> String {
    text.chars()
        .map(|c| match u8::try_from(u32::from(c)) {
            Ok(byte @ (0x00..=0x1F | 0x7F)) => codepage::dos_control_glyph(byte).unwrap_or(c),
            _ => c,
        })
        .collect()
}

fn apply_style(out: &mut impl Write, style: &StyleAttributes, ice_colors: bool) -> io::Result<()> {
    let fg = match style.foreground_code() {
        Some(code @ 90..=97) => TermColor::AnsiValue((code - 90 + 8) as u8),
        Some(code) => TermColor::AnsiValue((code - 30) as u8),
        None => term_color(style.fg),
    };
    let bg = match style.background_code(ice_colors) {
        Some(code @ 100..=107) => TermColor::AnsiValue((code - 100 + 8) as u8),
        Some(code) => TermColor::AnsiValue((code - 40) as u8),
        None => term_color(style.bg),
    };
    let (fg, bg) = if style.reverse { (bg, fg) } else { (fg, bg) };
    queue!(out, SetForegroundColor(fg), SetBackgroundColor(bg))?;

    // Bold on a standard colour and blink under iCE colors are already
    // expressed through the bright palette.
    let bright_fg = style.fg.standard_index().is_some();
    let bright_bg = ice_colors && style.bg.standard_index().is_some();
    let attributes = [
        (style.bold && !bright_fg, TermAttribute::Bold),
        (style.faint, TermAttribute::Dim),
        (style.italic, TermAttribute::Italic),
        (style.underline, TermAttribute::Underlined),
        (style.double_underline, TermAttribute::DoubleUnderlined),
        (style.blink && !bright_bg, TermAttribute::SlowBlink),
        (style.rapid_blink, TermAttribute::RapidBlink),
        (style.conceal, TermAttribute::Hidden),
        (style.crossed_out, TermAttribute::CrossedOut),
        (style.framed, TermAttribute::Framed),
        (style.encircled, TermAttribute::Encircled),
        (style.overlined, TermAttribute::OverLined),
    ];
    for (_, attribute) in attributes.into_iter().filter(|(on, _)| *on) {
        queue!(out, SetAttribute(attribute))?;
    }
    Ok(())
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Default => TermColor::Reset,
        Color::Indexed(index) => TermColor::AnsiValue(index),
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        standard => TermColor::AnsiValue(standard.standard_index().unwrap_or(7)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{render, Input, RenderOptions};

    fn rendered(bytes: &[u8]) -> Rendered {
        render(&Input::Bytes(bytes.to_vec()), &RenderOptions::default()).unwrap()
    }

    fn output(rendered: &Rendered, format: OutputFormat, options: OutputOptions) -> String {
        let mut out = Vec::new();
        write(&mut out, rendered, format, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_output_is_one_line_per_row() {
        let doc = rendered(b"\x1b[1;31mHello\r\nworld.");
        let text = output(&doc, OutputFormat::Text, OutputOptions::default());
        assert_eq!(text, "Hello\nworld.\n");
    }

    #[test]
    fn erased_rows_can_be_hidden() {
        let doc = rendered(b"old\x1b[2Jnew");
        let shown = output(&doc, OutputFormat::Text, OutputOptions::default());
        assert_eq!(shown, "old\nnew\n");
        let hidden = output(&doc, OutputFormat::Text, OutputOptions { show_erased: false });
        assert_eq!(hidden, "new\n");
    }

    #[test]
    fn ansi_output_uses_bright_palette_for_bold() {
        let doc = rendered(b"\x1b[1;31mred");
        let ansi = output(&doc, OutputFormat::Ansi, OutputOptions::default());
        // Bright red is palette entry 9.
        assert!(ansi.contains("\x1b[38;5;9m"), "{ansi:?}");
        assert!(ansi.contains("red"));
        assert!(!ansi.contains("\x1b[1m"), "{ansi:?}");
    }

    #[test]
    fn ansi_output_neutralizes_controls() {
        let doc = rendered(b"a\x1b[6nb");
        let ansi = output(&doc, OutputFormat::Ansi, OutputOptions::default());
        assert!(ansi.contains("a←[6nb"), "{ansi:?}");
    }

    #[test]
    fn json_output_carries_metadata() {
        let doc = rendered(b"\x1b[32mgreen");
        let json = output(&doc, OutputFormat::Json, OutputOptions::default());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rows"][0]["runs"][0]["text"], "green");
        assert_eq!(value["rows"][0]["runs"][0]["style"]["fg"], "green");
        assert_eq!(value["code_page"], "US-ASCII");
        assert_eq!(value["stats"]["color_depth"], 4);
    }

    #[test]
    fn format_names_parse_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: OutputFormat,
        }
        let parsed: Wrapper = toml::from_str("format = \"json\"").unwrap();
        assert_eq!(parsed.format, OutputFormat::Json);
    }
}
