//! Control sequence parser.
//!
//! A three-state machine over characters: `Normal` text, `EscapeSeen` after
//! ESC, and `InSequence` while a CSI parameter string accumulates. Each
//! character yields at most one [`Event`]. Nothing is ever dropped:
//! malformed or unrecognized sequences come back as [`Event::Literal`].

use std::mem;

/// Largest value a numeric parameter can take.
pub const MAX_PARAM: u16 = 9999;

const ESC: char = '\x1b';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    EscapeSeen,
    InSequence,
}

/// A recognized control sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    CursorUp(u16),
    CursorDown(u16),
    CursorForward(u16),
    CursorBack(u16),
    /// 1-based target.
    CursorPosition { row: u16, column: u16 },
    ForwardTab(u16),
    EraseInPage(u16),
    EraseInLine(u16),
    /// Raw SGR parameters; an empty list means reset.
    SelectGraphicRendition(Vec<u16>),
    SetMode {
        private: Option<char>,
        modes: Vec<u16>,
        enable: bool,
    },
    SaveCursor,
    RestoreCursor,
    /// `CSI Ps ; Ps ; ... t`, PabloDraw true colour when well formed.
    WindowOrTrueColor(Vec<u16>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Print(char),
    LineFeed,
    CarriageReturn,
    Control(Control),
    /// Text emitted verbatim, escape character included.
    Literal(String),
}

#[derive(Debug)]
pub struct Parser {
    state: State,
    buf: String,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::Normal,
            buf: String::new(),
        }
    }

    /// Feed a whole string, collecting events.
    pub fn feed(&mut self, text: &str) -> Vec<Event> {
        let mut out = Vec::new();
        for c in text.chars() {
            if let Some(event) = self.step(c) {
                out.push(event);
            }
        }
        out
    }

    /// Advance by one character.
    pub fn step(&mut self, c: char) -> Option<Event> {
        match self.state {
            State::Normal => self.step_normal(c),
            State::EscapeSeen => self.step_escape(c),
            State::InSequence => self.step_sequence(c),
        }
    }

    /// Flush a sequence still in flight at end of input as literal text.
    pub fn finish(&mut self) -> Option<Event> {
        if self.state == State::Normal {
            return None;
        }
        self.state = State::Normal;
        Some(Event::Literal(self.take_buf()))
    }

    fn step_normal(&mut self, c: char) -> Option<Event> {
        match c {
            ESC => {
                self.state = State::EscapeSeen;
                self.buf.clear();
                self.buf.push(ESC);
                None
            }
            '\n' => Some(Event::LineFeed),
            '\r' => Some(Event::CarriageReturn),
            _ => Some(Event::Print(c)),
        }
    }

    fn step_escape(&mut self, c: char) -> Option<Event> {
        match c {
            '[' => {
                self.buf.push(c);
                self.state = State::InSequence;
                None
            }
            // A second ESC releases the first and starts over.
            ESC => Some(Event::Literal(mem::replace(&mut self.buf, ESC.to_string()))),
            _ => {
                self.buf.push(c);
                self.state = State::Normal;
                Some(Event::Literal(self.take_buf()))
            }
        }
    }

    fn step_sequence(&mut self, c: char) -> Option<Event> {
        self.buf.push(c);
        if is_parameter_char(c) {
            return None;
        }
        self.state = State::Normal;
        let seq = self.take_buf();
        Some(match decode_csi(&seq) {
            Some(control) => Event::Control(control),
            None => Event::Literal(seq),
        })
    }

    fn take_buf(&mut self) -> String {
        let mut out = String::new();
        mem::swap(&mut out, &mut self.buf);
        out
    }
}

fn is_parameter_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, ';' | '?' | '=' | '>')
}

/// Decode `ESC [ params final` into a control, or `None` when the final
/// character is not one the interpreter acts on.
fn decode_csi(seq: &str) -> Option<Control> {
    let body = seq.strip_prefix("\x1b[")?;
    let action = body.chars().last()?;
    let params = &body[..body.len() - action.len_utf8()];
    let (private, params) = match params.chars().next() {
        Some(marker @ ('?' | '=' | '>')) => (Some(marker), &params[1..]),
        _ => (None, params),
    };
    let values = parse_params(params);
    let first = values.first().copied();

    let control = match action {
        'A' => Control::CursorUp(count_or_one(first)),
        'B' => Control::CursorDown(count_or_one(first)),
        'C' => Control::CursorForward(count_or_one(first)),
        'D' => Control::CursorBack(count_or_one(first)),
        'H' | 'f' => Control::CursorPosition {
            row: count_or_one(first),
            column: count_or_one(values.get(1).copied()),
        },
        'I' => Control::ForwardTab(count_or_one(first)),
        'J' => Control::EraseInPage(first.unwrap_or(0)),
        'K' => Control::EraseInLine(first.unwrap_or(0)),
        'm' => Control::SelectGraphicRendition(values),
        'h' | 'l' => Control::SetMode {
            private,
            modes: values,
            enable: action == 'h',
        },
        's' => Control::SaveCursor,
        'u' => Control::RestoreCursor,
        't' => Control::WindowOrTrueColor(values),
        _ => return None,
    };
    Some(control)
}

/// Split on `;`, empty parts read as 0, values clamp to [`MAX_PARAM`].
/// Private marker characters after the first position are skipped.
fn parse_params(params: &str) -> Vec<u16> {
    if params.is_empty() {
        return Vec::new();
    }
    params
        .split(';')
        .map(|part| {
            part.chars()
                .filter_map(|c| c.to_digit(10))
                .fold(0u16, |acc, d| {
                    acc.saturating_mul(10)
                        .saturating_add(d as u16)
                        .min(MAX_PARAM)
                })
        })
        .collect()
}

fn count_or_one(value: Option<u16>) -> u16 {
    match value {
        None | Some(0) => 1,
        Some(n) => n,
    }
}
