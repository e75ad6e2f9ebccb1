//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use crate::render::OutputFormat;
use crate::terminal::DEFAULT_LINE_WIDTH;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Show C0 controls and DEL as MS-DOS glyphs instead of passing them through
    #[serde(default)]
    pub display_control_glyphs: bool,
    /// Columns before wrapping, 0 disables wrapping
    #[serde(default = "default_line_width")]
    pub line_width: usize,
    /// Treat blink as bright background unless the document says otherwise
    #[serde(default)]
    pub ice_colors_default: bool,
    /// Keep rows cleared by an erase-in-page in the output
    #[serde(default = "default_show_erased")]
    pub show_erased: bool,
}

pub fn default_line_width() -> usize {
    DEFAULT_LINE_WIDTH
}

pub fn default_show_erased() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            display_control_glyphs: false,
            line_width: default_line_width(),
            ice_colors_default: false,
            show_erased: default_show_erased(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}
