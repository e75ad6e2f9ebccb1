//! Completions command handler

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell as CompletionShell};
use std::io::{self, Write};

/// Print a completion script for `shell`.
#[cfg(not(tarpaulin_include))]
pub fn handle<C: CommandFactory>(shell: CompletionShell) -> Result<()> {
    generate_completions::<C>(shell, &mut io::stdout())
}

/// Generate shell completion script.
pub(crate) fn generate_completions<C: CommandFactory>(
    shell: CompletionShell,
    out: &mut impl Write,
) -> Result<()> {
    let mut cmd = C::command();
    generate(shell, &mut cmd, "retroscope", out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use retroscope::cli::Cli;

    #[test]
    fn bash_completions_mention_subcommands() {
        let mut out = Vec::new();
        generate_completions::<Cli>(CompletionShell::Bash, &mut out).unwrap();
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("retroscope"));
        assert!(script.contains("render"));
        assert!(script.contains("codepages"));
    }
}
