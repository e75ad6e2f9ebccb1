//! xtask - Build tasks for retroscope
//!
//! Run with: cargo xtask <command>
//!
//! Commands:
//! - gen-docs: Generate documentation (man pages, COMMANDS.md)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser, Subcommand};

use retroscope::cli::Cli;

const BIN: &str = "retroscope";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build tasks for retroscope")]
struct Xtask {
    #[command(subcommand)]
    command: XtaskCommand,
}

#[derive(Subcommand)]
enum XtaskCommand {
    /// Generate documentation from CLI definitions
    #[command(name = "gen-docs")]
    GenDocs {
        /// Output directory (default: docs/)
        #[arg(long, short, default_value = "docs")]
        output: PathBuf,

        /// Generate man pages
        #[arg(long)]
        man: bool,

        /// Generate COMMANDS.md
        #[arg(long)]
        markdown: bool,
    },
}

fn main() -> Result<()> {
    let args = Xtask::parse();

    match args.command {
        XtaskCommand::GenDocs {
            output,
            man,
            markdown,
        } => {
            let gen_all = !man && !markdown;
            if gen_all || man {
                generate_man_pages(&output)?;
            }
            if gen_all || markdown {
                generate_markdown(&output)?;
            }
        }
    }

    Ok(())
}

fn visible(cmd: &Command) -> impl Iterator<Item = &Command> {
    cmd.get_subcommands().filter(|sub| !sub.is_hide_set())
}

fn write_man_page(cmd: &Command, path: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;
    fs::write(path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Generated: {}", path.display());
    Ok(())
}

/// Generate man pages using clap_mangen, one per (nested) subcommand.
fn generate_man_pages(output: &Path) -> Result<()> {
    let man_dir = output.join("man");
    fs::create_dir_all(&man_dir).context("Failed to create man directory")?;

    let cmd = Cli::command();
    write_man_page(&cmd, &man_dir.join(format!("{BIN}.1")))?;
    for sub in visible(&cmd) {
        let name = sub.get_name();
        write_man_page(sub, &man_dir.join(format!("{BIN}-{name}.1")))?;
        for nested in visible(sub) {
            let file = format!("{BIN}-{name}-{}.1", nested.get_name());
            write_man_page(nested, &man_dir.join(file))?;
        }
    }
    Ok(())
}

/// Argument list of a command as markdown bullets.
fn arguments_markdown(cmd: &Command) -> String {
    let mut out = String::new();
    for arg in cmd.get_arguments() {
        let id = arg.get_id().as_str();
        if id == "help" || id == "version" {
            continue;
        }
        let flag = if arg.is_positional() {
            format!("<{}>", id.to_uppercase())
        } else {
            match (arg.get_short(), arg.get_long()) {
                (Some(s), Some(l)) => format!("-{s}, --{l}"),
                (None, Some(l)) => format!("--{l}"),
                (Some(s), None) => format!("-{s}"),
                (None, None) => continue,
            }
        };
        let help = arg.get_help().map(ToString::to_string).unwrap_or_default();
        out.push_str(&format!("- `{flag}`: {help}\n"));
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn command_markdown(cmd: &Command, path: &str, level: usize) -> String {
    let mut out = format!("{} {path}\n\n", "#".repeat(level));
    if let Some(about) = cmd.get_about() {
        out.push_str(&format!("{about}\n\n"));
    }
    out.push_str(&arguments_markdown(cmd));
    if let Some(long_about) = cmd.get_long_about() {
        out.push_str(&format!("```\n{long_about}\n```\n\n"));
    }
    out
}

/// Generate COMMANDS.md
fn generate_markdown(output: &Path) -> Result<()> {
    fs::create_dir_all(output).context("Failed to create output directory")?;
    let cmd = Cli::command();

    let mut markdown = String::from("# retroscope Command Reference\n\n");
    for sub in visible(&cmd) {
        let name = sub.get_name();
        markdown.push_str(&format!("- [{name}](#{BIN}-{name})\n"));
    }
    markdown.push_str("\n---\n\n");
    markdown.push_str(&command_markdown(&cmd, BIN, 2));

    for sub in visible(&cmd) {
        let path = format!("{BIN} {}", sub.get_name());
        markdown.push_str(&command_markdown(sub, &path, 2));
        for nested in visible(sub) {
            let nested_path = format!("{path} {}", nested.get_name());
            markdown.push_str(&command_markdown(nested, &nested_path, 3));
        }
        markdown.push_str("---\n\n");
    }
    markdown.push_str("\n*Generated by `cargo xtask gen-docs`*\n");

    let output_path = output.join("COMMANDS.md");
    fs::write(&output_path, markdown)?;
    println!("Generated: {}", output_path.display());
    Ok(())
}
