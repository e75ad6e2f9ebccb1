//! Row model data types.
//!
//! Contains the structures the interpreter emits:
//! - Color: 16-color, 256-color palette and true colour selectors
//! - StyleAttributes: SGR flags plus the two mode flags
//! - Run: contiguous text sharing one style snapshot
//! - Row: ordered runs plus erase markers
//! - Document: rows and document-wide state

use serde::Serialize;

/// Color selector. `Default` means "no explicit color" (SGR 39/49).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    /// 256-color palette index, stored verbatim
    Indexed(u8),
    /// True colour
    Rgb(u8, u8, u8),
}

impl Color {
    /// Standard color for an ANSI palette index 0..=7.
    pub fn standard(index: u8) -> Color {
        match index & 7 {
            0 => Color::Black,
            1 => Color::Red,
            2 => Color::Green,
            3 => Color::Yellow,
            4 => Color::Blue,
            5 => Color::Magenta,
            6 => Color::Cyan,
            _ => Color::White,
        }
    }

    /// ANSI palette index of a standard color.
    pub fn standard_index(self) -> Option<u8> {
        match self {
            Color::Black => Some(0),
            Color::Red => Some(1),
            Color::Green => Some(2),
            Color::Yellow => Some(3),
            Color::Blue => Some(4),
            Color::Magenta => Some(5),
            Color::Cyan => Some(6),
            Color::White => Some(7),
            _ => None,
        }
    }
}

/// Independent SGR flags addressed by the mutation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Bold,
    Faint,
    Italic,
    Underline,
    DoubleUnderline,
    Blink,
    RapidBlink,
    Reverse,
    Conceal,
    CrossedOut,
    Framed,
    Encircled,
    Overlined,
}

/// Style snapshot shared by the characters of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StyleAttributes {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub faint: bool,
    pub italic: bool,
    pub underline: bool,
    pub double_underline: bool,
    pub blink: bool,
    pub rapid_blink: bool,
    pub reverse: bool,
    pub conceal: bool,
    pub crossed_out: bool,
    pub framed: bool,
    pub encircled: bool,
    pub overlined: bool,
    /// Set with `CSI 4 h`, cleared with `CSI 4 l`.
    pub mode_4: bool,
    /// Set with `CSI 18 h`, cleared with `CSI 18 l`.
    pub mode_18: bool,
}

impl StyleAttributes {
    pub fn is_default(&self) -> bool {
        *self == StyleAttributes::default()
    }

    pub fn set(&mut self, attribute: Attribute, on: bool) {
        let flag = match attribute {
            Attribute::Bold => &mut self.bold,
            Attribute::Faint => &mut self.faint,
            Attribute::Italic => &mut self.italic,
            Attribute::Underline => &mut self.underline,
            Attribute::DoubleUnderline => &mut self.double_underline,
            Attribute::Blink => &mut self.blink,
            Attribute::RapidBlink => &mut self.rapid_blink,
            Attribute::Reverse => &mut self.reverse,
            Attribute::Conceal => &mut self.conceal,
            Attribute::CrossedOut => &mut self.crossed_out,
            Attribute::Framed => &mut self.framed,
            Attribute::Encircled => &mut self.encircled,
            Attribute::Overlined => &mut self.overlined,
        };
        *flag = on;
    }

    /// SGR foreground code a legacy renderer paints with.
    ///
    /// Bold on a standard color selects the bright 90-series.
    pub fn foreground_code(&self) -> Option<u16> {
        let index = u16::from(self.fg.standard_index()?);
        Some(if self.bold { 90 + index } else { 30 + index })
    }

    /// SGR background code a legacy renderer paints with.
    ///
    /// With iCE colors, blink on a standard color selects the bright 100-series.
    pub fn background_code(&self, ice_colors: bool) -> Option<u16> {
        let index = u16::from(self.bg.standard_index()?);
        Some(if ice_colors && self.blink {
            100 + index
        } else {
            40 + index
        })
    }
}

/// What a run stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunKind {
    /// Text the document printed.
    #[default]
    Content,
    /// Spaces inserted to emulate cursor positioning.
    Positioning,
}

/// Contiguous text sharing one style snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub text: String,
    pub style: StyleAttributes,
    pub kind: RunKind,
}

impl Run {
    pub fn content(text: impl Into<String>, style: StyleAttributes) -> Self {
        Self {
            text: text.into(),
            style,
            kind: RunKind::Content,
        }
    }

    /// Positioning runs carry the neutral default style.
    pub fn positioning(width: usize) -> Self {
        Self {
            text: " ".repeat(width),
            style: StyleAttributes::default(),
            kind: RunKind::Positioning,
        }
    }

    pub fn is_positioning(&self) -> bool {
        self.kind == RunKind::Positioning
    }
}

/// One output row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    pub runs: Vec<Run>,
    /// Erased by an erase-in-page or erase-in-line of the whole row.
    pub erased: bool,
    /// The remainder of the row was erased with the last background.
    pub erased_to_end: bool,
}

impl Row {
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Concatenated text of every run.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Document-wide facts gathered while interpreting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Recognized sequences that were deliberately ignored.
    pub other: usize,
    /// Unrecognized sequences emitted verbatim.
    pub unknown: usize,
    /// Bits of colour the document used: 1, 2, 4, 8 or 24.
    pub color_depth: u8,
    /// Alternative font 0..=10 selected with SGR 10..=20.
    pub font: Option<u8>,
    /// Last `CSI = n h` screen mode.
    pub screen_mode: Option<u16>,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            other: 0,
            unknown: 0,
            color_depth: 4,
            font: None,
            screen_mode: None,
        }
    }
}

impl Statistics {
    /// Columns implied by the screen mode (modes 0 and 1 are 40 columns).
    pub fn screen_columns(&self) -> Option<u16> {
        match self.screen_mode? {
            0 | 1 => Some(40),
            2 | 3 | 14 | 16 | 18 => Some(80),
            _ => None,
        }
    }

    /// Font family for the alternative font selected with SGR 11..=20.
    pub fn font_family(&self) -> Option<&'static str> {
        match self.font? {
            1 => Some("ibm_bios"),
            2 => Some("ibm_cga"),
            3 => Some("ibm_cgathin"),
            4 => Some("topaza500"),
            5 => Some("ibm_ega_8x14"),
            6 => Some("ibm_ega_9x14"),
            7 => Some("ibm_vga_8x14"),
            8 => Some("ibm_vga_9x14"),
            9 => Some("ibm_mda"),
            10 => Some("eaglespcga_alt3"),
            _ => None,
        }
    }
}

/// Interpreter output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub rows: Vec<Row>,
    /// Final state of the iCE colors toggle.
    pub ice_colors: bool,
    pub stats: Statistics,
}

impl Document {
    /// Plain text of every row, one line per row.
    pub fn text(&self) -> String {
        self.rows
            .iter()
            .map(Row::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
