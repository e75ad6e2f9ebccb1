//! Info command handler

use anyhow::{Context, Result};
use std::path::Path;

use retroscope::cli::RenderArgs;
use retroscope::{Config, Rendered, SauceRecord};

/// Print what the pipeline found in a file.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, args: &RenderArgs) -> Result<()> {
    let config = Config::load()?;
    let options = super::render_options(&config, args)?;
    let input = super::read_input(file, args.charset.as_deref())?;
    let rendered = retroscope::render(&input, &options)
        .with_context(|| format!("Failed to render {}", file.display()))?;
    print!("{}", describe(file, &rendered));
    Ok(())
}

/// Build the report printed by `retroscope info`.
pub(crate) fn describe(file: &Path, rendered: &Rendered) -> String {
    let mut lines = vec![format!("File:        {}", file.display())];

    let guess = &rendered.guess;
    let certainty = if guess.guaranteed { "" } else { " (fallback)" };
    lines.push(format!("Guess:       {}{}", guess.charset, certainty));
    lines.push(format!(
        "Evidence:    cp437 {}, iso-8859 {}, ascii {}, unsure {}",
        guess.counts.cp437, guess.counts.iso8859, guess.counts.us_ascii, guess.counts.unsure
    ));
    lines.push(format!(
        "Code page:   {}",
        rendered
            .code_page
            .map_or("none (Unicode or as-is)".to_string(), |page| {
                format!("{} - {}", page, page.description())
            })
    ));
    if let Some(format) = rendered.bbs {
        lines.push(format!("BBS codes:   {}", format));
    }
    lines.push(format!("Rows:        {}", rendered.rows.len()));
    lines.push(format!(
        "iCE colors:  {}",
        if rendered.ice_colors { "on" } else { "off" }
    ));

    let stats = &rendered.stats;
    lines.push(format!("Colour depth: {} bit", stats.color_depth));
    lines.push(format!(
        "Sequences:   {} ignored, {} unknown",
        stats.other, stats.unknown
    ));
    if let Some(mode) = stats.screen_mode {
        lines.push(format!("Screen mode: {}", mode));
    }
    if let Some(family) = stats.font_family() {
        lines.push(format!("Font select: {}", family));
    }

    match &rendered.sauce {
        Some(record) => lines.extend(describe_sauce(record)),
        None => lines.push("SAUCE:       none".to_string()),
    }
    for warning in &rendered.warnings {
        lines.push(format!("Warning:     {}", warning));
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

fn describe_sauce(record: &SauceRecord) -> Vec<String> {
    let date = record
        .date()
        .map_or_else(|| record.date.clone(), |d| d.format("%Y-%m-%d").to_string());
    let mut lines = vec![
        "SAUCE:".to_string(),
        format!("  Title:     {}", record.title),
        format!("  Author:    {}", record.author),
        format!("  Group:     {}", record.group),
        format!("  Date:      {}", date),
        format!(
            "  Size:      {}",
            humansize::format_size(record.file_size, humansize::BINARY)
        ),
        format!(
            "  Type:      {} / {}",
            record.data_type_name(),
            record.file_type_name()
        ),
        format!("  Columns:   {}", record.columns()),
    ];
    if let Some(rows) = record.lines() {
        lines.push(format!("  Lines:     {}", rows));
    }
    lines.push(format!(
        "  Font:      {} ({})",
        if record.font_name.is_empty() {
            "default"
        } else {
            &record.font_name
        },
        record.font_family()
    ));
    if !record.comments.is_empty() {
        lines.push("  Comments:".to_string());
        lines.extend(record.comments.iter().map(|c| format!("    {}", c)));
    }
    lines
}
