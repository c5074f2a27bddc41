//! # Completions Command Implementation
//!
//! Generates a shell completion script for `submodule-sync` with
//! `clap_complete`, on stdout or into a file.
//!
//! ```bash
//! submodule-sync completions bash > ~/.local/share/bash-completion/completions/submodule-sync
//! submodule-sync completions zsh --output ~/.zfunc/_submodule-sync
//! ```

use anyhow::{Context as _, Result};
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::Cli;

const BIN_NAME: &str = "submodule-sync";

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

fn write_completions(shell: Shell, sink: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, sink);
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    match &args.output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_completions(args.shell, &mut file);
        }
        None => write_completions(args.shell, &mut io::stdout()),
    }
    Ok(())
}
