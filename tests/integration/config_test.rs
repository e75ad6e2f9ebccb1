//! Configuration file loading and saving.

use std::fs;

use retroscope::{Config, OutputFormat};
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.render.line_width, 80);
    assert!(config.render.show_erased);
    assert_eq!(config.output.format, OutputFormat::Ansi);
}

#[test]
fn save_then_load_preserves_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let mut config = Config::default();
    config.render.line_width = 160;
    config.render.ice_colors_default = true;
    config.output.format = OutputFormat::Text;

    config.save_to(&path).unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[output]\nformat = \"json\"\n").unwrap();
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.output.format, OutputFormat::Json);
    assert_eq!(config.render.line_width, 80);
}

#[test]
fn invalid_line_width_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[render]\nline_width = 50000\n").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{err:#}").contains("50000"));
}

#[test]
fn malformed_toml_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[render\n").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("config.toml"));
}
