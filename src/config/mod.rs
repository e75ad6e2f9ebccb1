//! Configuration management for retroscope

mod io;
mod types;

pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::error::validate_line_width;
use crate::pipeline::RenderOptions;

impl Config {
    /// Get the config file path (~/.config/retroscope/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/retroscope)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load_from(&io::config_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        io::save_to(self, &io::config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Check values serde cannot express as types.
    pub fn validate(&self) -> crate::Result<()> {
        validate_line_width(self.render.line_width)?;
        Ok(())
    }

    /// Pipeline options carried by this configuration.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            line_width: self.render.line_width,
            ice_colors: self.render.ice_colors_default,
            display_control_glyphs: self.render.display_control_glyphs,
            ..RenderOptions::default()
        }
    }
}
