//! Crate-level errors.
//!
//! Only contract violations by the host are errors. Malformed input never is:
//! a broken SAUCE record is absent, a broken escape sequence is text, and an
//! unsupported charset is a [`Warning`] on the rendered output.

use serde::Serialize;

use crate::terminal::MAX_PARAM;

/// Errors returned by the rendering entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown code page: {label}. Run `retroscope codepages` for the supported labels.")]
    UnknownCodePage { label: String },

    #[error("Unknown BBS colour code format: {label}")]
    UnknownBbsFormat { label: String },

    #[error("Invalid line width {width}: expected 0 (no wrap) or 1..={max}", max = MAX_PARAM)]
    InvalidLineWidth { width: usize },

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Check a line width supplied by a host.
pub fn validate_line_width(width: usize) -> Result<usize> {
    if width > usize::from(MAX_PARAM) {
        return Err(Error::InvalidLineWidth { width });
    }
    Ok(width)
}

/// Soft failure carried on the rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// The declared charset has no table; the text was left untranscoded.
    UnsupportedCharset { label: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UnsupportedCharset { label } => {
                write!(f, "unsupported charset '{label}', text shown as-is")
            }
        }
    }
}
