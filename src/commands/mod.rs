//! Command handlers for the retroscope CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod codepages;
pub mod completions;
pub mod config;
pub mod info;
pub mod render;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use retroscope::cli::RenderArgs;
use retroscope::error::validate_line_width;
use retroscope::{Config, Input, RenderOptions};

/// Combine config defaults with command line overrides.
pub fn render_options(config: &Config, args: &RenderArgs) -> Result<RenderOptions> {
    let mut options = config.render_options();
    if let Some(label) = &args.codepage {
        options = options.with_code_page_label(label)?;
    }
    if let Some(label) = &args.bbs {
        options = options.with_bbs_label(label)?;
    }
    if let Some(width) = args.width {
        options.line_width = validate_line_width(width)?;
    }
    options.display_control_glyphs |= args.controls;
    options.ice_colors |= args.ice;
    Ok(options)
}

/// Read a file, decoding it first when a charset is given.
pub fn read_input(path: &Path, charset: Option<&str>) -> Result<Input> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(match charset {
        Some(label) => Input::decode(&bytes, label),
        None => Input::Bytes(bytes),
    })
}
