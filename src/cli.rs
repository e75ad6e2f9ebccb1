//! CLI definitions for retroscope
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be accessed by xtask for documentation generation (man pages, markdown).

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

use crate::render::OutputFormat;

/// Build clap styles.
///
/// - Green: headers, usage, command names (accent color)
/// - White: descriptions, placeholders (renders as light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "retroscope")]
#[command(about = "[ retroscope ] - view ANSI art, NFO and BBS text files in a modern terminal")]
#[command(
    long_about = "retroscope - render legacy text art in a modern terminal.

Reads ANSI art, NFO/DIZ files and BBS colour-code texts, detects the code page
they were authored in, splits off SAUCE metadata, and replays the ANSI.SYS
control sequences into styled rows.

QUICK START:
    retroscope render art.ans            Render a file to the terminal
    retroscope render *.nfo -f text      Plain text, no colours
    retroscope info art.ans              Show SAUCE and encoding details
    retroscope codepages                 List supported code pages"
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render one or more files
    #[command(long_about = "Render text art files to standard output.

Each file is read as raw bytes. The code page is chosen from, in order:
--codepage, the SAUCE font name, and the encoding guess. Several files are
rendered in parallel and printed in the order given.

EXAMPLES:
    retroscope render art.ans
    retroscope render art.ans --codepage cp865
    retroscope render readme.nfo --format text
    retroscope render wide.ans --width 160
    retroscope render board.txt --bbs pcboard
    retroscope render page.txt --charset windows-1252")]
    Render {
        /// Files to render
        #[arg(required = true, help = "Files to render")]
        files: Vec<PathBuf>,

        #[command(flatten)]
        options: RenderArgs,

        /// Output format (defaults to the config file setting)
        #[arg(long, short, value_enum, help = "Output format")]
        format: Option<OutputFormat>,

        /// Hide rows cleared by an erase-in-page sequence
        #[arg(long, help = "Hide rows cleared by an erase-in-page")]
        hide_erased: bool,
    },

    /// Show encoding, SAUCE and interpreter details for a file
    #[command(long_about = "Show what retroscope found in a file.

Prints the encoding guess and its evidence, the chosen code page, every
SAUCE field with derived values (columns, font, iCE colors), and the
interpreter statistics.

EXAMPLE:
    retroscope info art.ans")]
    Info {
        /// File to inspect
        #[arg(help = "File to inspect")]
        file: PathBuf,

        #[command(flatten)]
        options: RenderArgs,
    },

    /// List supported code pages and their labels
    Codepages,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(long_about = "Print a shell completion script to standard output.

EXAMPLES:
    retroscope completions bash > ~/.local/share/bash-completion/completions/retroscope
    retroscope completions zsh > ~/.zfunc/_retroscope")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum, help = "Shell to generate completions for")]
        shell: CompletionShell,
    },
}

/// Options shared by commands that render.
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Code page override, e.g. cp437, cp865, windows-1252, latin1
    #[arg(long, short, value_name = "LABEL")]
    pub codepage: Option<String>,

    /// Decode the file with this charset first, as a browser would
    #[arg(long, value_name = "LABEL")]
    pub charset: Option<String>,

    /// BBS colour code scheme override, e.g. pcboard, wildcat, renegade
    #[arg(long, value_name = "FORMAT")]
    pub bbs: Option<String>,

    /// Columns before wrapping, 0 disables wrapping
    #[arg(long, short, value_name = "N")]
    pub width: Option<usize>,

    /// Show C0 control characters as MS-DOS glyphs
    #[arg(long)]
    pub controls: bool,

    /// Start with iCE colors on (blink as bright background)
    #[arg(long)]
    pub ice: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    #[command(long_about = "Display the effective configuration in TOML format.

Config file location: ~/.config/retroscope/config.toml

EXAMPLE:
    retroscope config show")]
    Show,
    /// Write the default configuration file
    #[command(long_about = "Write a configuration file with every default value.

An existing file is left alone unless --force is given.

EXAMPLE:
    retroscope config init")]
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_accepts_shared_options() {
        let cli = Cli::try_parse_from([
            "retroscope",
            "render",
            "a.ans",
            "b.ans",
            "--codepage",
            "cp865",
            "--width",
            "160",
            "--format",
            "json",
            "--ice",
        ])
        .unwrap();
        let Commands::Render {
            files,
            options,
            format,
            hide_erased,
        } = cli.command
        else {
            panic!("expected render");
        };
        assert_eq!(files.len(), 2);
        assert_eq!(options.codepage.as_deref(), Some("cp865"));
        assert_eq!(options.width, Some(160));
        assert!(options.ice);
        assert!(!options.controls);
        assert_eq!(format, Some(OutputFormat::Json));
        assert!(!hide_erased);
    }

    #[test]
    fn render_requires_a_file() {
        assert!(Cli::try_parse_from(["retroscope", "render"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["retroscope", "-vv", "codepages"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
