//! Config subcommands handler

use anyhow::{bail, Result};

use retroscope::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("# {}", Config::config_path()?.display());
    print!("{}", toml_str);
    Ok(())
}

/// Write the default configuration file.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(force: bool) -> Result<()> {
    let config_path = Config::config_path()?;
    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            config_path.display()
        );
    }
    Config::default().save()?;
    println!("Wrote {}", config_path.display());
    Ok(())
}
