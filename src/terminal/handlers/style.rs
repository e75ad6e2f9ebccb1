//! SGR (Select Graphic Rendition) handler.
//!
//! Handles CSI m sequences through one static table mapping each SGR code
//! to an [`AttributeMutation`]:
//! - Attribute flags and their clearing codes
//! - 16-color, 256-color and true colour selectors
//! - Alternative font selection
//!
//! Also handles the PabloDraw true colour extension (CSI t).

use once_cell::sync::Lazy;

use super::super::performer::RowPerformer;
use super::super::types::{Attribute, Color};

/// Effect of a single SGR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeMutation {
    /// Clear every flag and both color selectors.
    Reset,
    Set(Attribute),
    Clear(&'static [Attribute]),
    Foreground(Color),
    Background(Color),
    /// aixterm bright foreground: bold plus a standard color.
    BrightForeground(Color),
    /// aixterm bright background: blink plus a standard color.
    BrightBackground(Color),
    /// Extended color follows (`5;n` or `2;r;g;b`).
    ExtendedForeground,
    ExtendedBackground,
    /// Alternative font 0..=10.
    Font(u8),
    /// Reserved codes accepted without effect.
    Nothing,
}

const SGR_TABLE_LEN: usize = 108;

static SGR_TABLE: Lazy<[Option<AttributeMutation>; SGR_TABLE_LEN]> = Lazy::new(|| {
    use AttributeMutation::*;

    let mut table = [None; SGR_TABLE_LEN];
    table[0] = Some(Reset);
    table[1] = Some(Set(Attribute::Bold));
    table[2] = Some(Set(Attribute::Faint));
    table[3] = Some(Set(Attribute::Italic));
    table[4] = Some(Set(Attribute::Underline));
    table[5] = Some(Set(Attribute::Blink));
    table[6] = Some(Set(Attribute::RapidBlink));
    table[7] = Some(Set(Attribute::Reverse));
    table[8] = Some(Set(Attribute::Conceal));
    table[9] = Some(Set(Attribute::CrossedOut));
    for code in 10..=20u8 {
        table[usize::from(code)] = Some(Font(code - 10));
    }
    table[21] = Some(Set(Attribute::DoubleUnderline));
    table[22] = Some(Clear(&[Attribute::Bold, Attribute::Faint]));
    table[23] = Some(Clear(&[Attribute::Italic]));
    table[24] = Some(Clear(&[Attribute::Underline, Attribute::DoubleUnderline]));
    table[25] = Some(Clear(&[Attribute::Blink, Attribute::RapidBlink]));
    table[26] = Some(Nothing);
    table[27] = Some(Clear(&[Attribute::Reverse]));
    table[28] = Some(Nothing);
    table[29] = Some(Clear(&[Attribute::CrossedOut]));
    for index in 0..8u8 {
        let color = Color::standard(index);
        table[30 + usize::from(index)] = Some(Foreground(color));
        table[40 + usize::from(index)] = Some(Background(color));
        table[90 + usize::from(index)] = Some(BrightForeground(color));
        table[100 + usize::from(index)] = Some(BrightBackground(color));
    }
    table[38] = Some(ExtendedForeground);
    table[39] = Some(Foreground(Color::Default));
    table[48] = Some(ExtendedBackground);
    table[49] = Some(Background(Color::Default));
    table[51] = Some(Set(Attribute::Framed));
    table[52] = Some(Set(Attribute::Encircled));
    table[53] = Some(Set(Attribute::Overlined));
    table[54] = Some(Clear(&[Attribute::Framed, Attribute::Encircled]));
    table[55] = Some(Clear(&[Attribute::Overlined]));
    table
});

/// Look up the mutation for an SGR code. Unknown codes yield `None`.
pub fn sgr_mutation(code: u16) -> Option<AttributeMutation> {
    SGR_TABLE.get(usize::from(code)).copied().flatten()
}

impl RowPerformer<'_> {
    /// Handle SGR (Select Graphic Rendition) - CSI m.
    /// An empty parameter list is a reset.
    pub fn handle_sgr(&mut self, params: &[u16]) {
        if params.is_empty() {
            self.apply_mutation(AttributeMutation::Reset);
            return;
        }

        let mut iter = params.iter().copied();
        while let Some(code) = iter.next() {
            match sgr_mutation(code) {
                Some(AttributeMutation::ExtendedForeground) => {
                    if let Some(color) = self.parse_extended_color(&mut iter) {
                        self.cursor.style.fg = color;
                    }
                }
                Some(AttributeMutation::ExtendedBackground) => {
                    if let Some(color) = self.parse_extended_color(&mut iter) {
                        self.cursor.style.bg = color;
                    }
                }
                Some(mutation) => self.apply_mutation(mutation),
                None => tracing::trace!(code, "Unknown SGR code ignored"),
            }
        }
    }

    fn apply_mutation(&mut self, mutation: AttributeMutation) {
        let style = &mut self.cursor.style;
        match mutation {
            AttributeMutation::Reset => *style = Default::default(),
            AttributeMutation::Set(attribute) => style.set(attribute, true),
            AttributeMutation::Clear(attributes) => {
                for &attribute in attributes {
                    style.set(attribute, false);
                }
            }
            AttributeMutation::Foreground(color) => style.fg = color,
            AttributeMutation::Background(color) => style.bg = color,
            AttributeMutation::BrightForeground(color) => {
                style.bold = true;
                style.fg = color;
            }
            AttributeMutation::BrightBackground(color) => {
                style.blink = true;
                style.bg = color;
            }
            AttributeMutation::Font(font) => self.stats.font = Some(font),
            AttributeMutation::ExtendedForeground
            | AttributeMutation::ExtendedBackground
            | AttributeMutation::Nothing => {}
        }
    }

    /// Parse extended color (256-color or RGB) from SGR parameters.
    fn parse_extended_color(&mut self, iter: &mut impl Iterator<Item = u16>) -> Option<Color> {
        match iter.next()? {
            5 => {
                let index = clamp_u8(iter.next()?);
                self.raise_color_depth(8);
                Some(Color::Indexed(index))
            }
            2 => {
                let r = clamp_u8(iter.next().unwrap_or(0));
                let g = clamp_u8(iter.next().unwrap_or(0));
                let b = clamp_u8(iter.next().unwrap_or(0));
                self.raise_color_depth(24);
                Some(Color::Rgb(r, g, b))
            }
            _ => None,
        }
    }

    /// Handle CSI t. PabloDraw uses `0;r;g;b t` for the background and
    /// `1;r;g;b t` for the foreground; other forms are window operations.
    pub fn handle_true_color(&mut self, params: &[u16]) {
        match params {
            [layer @ (0 | 1), r, g, b] => {
                let color = Color::Rgb(clamp_u8(*r), clamp_u8(*g), clamp_u8(*b));
                if *layer == 0 {
                    self.cursor.style.bg = color;
                } else {
                    self.cursor.style.fg = color;
                }
                self.raise_color_depth(24);
            }
            _ => {
                self.stats.other += 1;
                tracing::trace!(params = ?params, "Window manipulation ignored");
            }
        }
    }

    fn raise_color_depth(&mut self, bits: u8) {
        self.stats.color_depth = self.stats.color_depth.max(bits);
    }
}

fn clamp_u8(value: u16) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}
