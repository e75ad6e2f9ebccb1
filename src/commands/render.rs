//! Render command handler

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use retroscope::cli::RenderArgs;
use retroscope::{Config, OutputFormat, OutputOptions, RenderOptions};

/// Render every file and print the results in input order.
///
/// Files are rendered in parallel; a failing file is reported and the
/// others are still printed.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    files: &[PathBuf],
    args: &RenderArgs,
    format: Option<OutputFormat>,
    hide_erased: bool,
) -> Result<()> {
    let config = Config::load()?;
    let options = super::render_options(&config, args)?;
    let format = format.unwrap_or(config.output.format);
    let output = OutputOptions {
        show_erased: config.render.show_erased && !hide_erased,
    };

    let results: Vec<Result<Vec<u8>>> = files
        .par_iter()
        .map(|path| render_one(path, args.charset.as_deref(), &options, format, output))
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0;
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(bytes) => {
                if files.len() > 1 && format != OutputFormat::Json {
                    writeln!(out, "==> {} <==", path.display())?;
                }
                out.write_all(&bytes)?;
            }
            Err(e) => {
                eprintln!("{}: {:#}", path.display(), e);
                failures += 1;
            }
        }
    }
    out.flush()?;

    if failures > 0 {
        bail!("{} of {} files failed to render", failures, files.len());
    }
    Ok(())
}

/// Render one file into an in-memory buffer.
pub(crate) fn render_one(
    path: &Path,
    charset: Option<&str>,
    options: &RenderOptions,
    format: OutputFormat,
    output: OutputOptions,
) -> Result<Vec<u8>> {
    let input = super::read_input(path, charset)?;
    let rendered = retroscope::render(&input, options)
        .with_context(|| format!("Failed to render {}", path.display()))?;
    for warning in &rendered.warnings {
        tracing::warn!(file = %path.display(), "{}", warning);
    }

    let mut buf = Vec::new();
    retroscope::render::write(&mut buf, &rendered, format, output)?;
    Ok(buf)
}
