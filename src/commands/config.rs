//! # Config Command Implementation
//!
//! Prints the effective configuration as TOML, or saves it to
//! `<repo>/.submodule-sync.toml` with `--write` so it can be edited.

use anyhow::{Context as _, Result};
use clap::Args;

use submodule_sync::defaults::CONFIG_FILENAME;
use submodule_sync::output::Glyph;

use crate::cli::Context;

/// Show or save the effective configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write the configuration to .submodule-sync.toml in the repository
    #[arg(long)]
    pub write: bool,
}

/// Execute the `config` command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    if args.write {
        let path = ctx.repo.join(CONFIG_FILENAME);
        ctx.config
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{} Configuration written to {}", ctx.output.glyph(Glyph::Ok), path.display());
        return Ok(());
    }

    match &ctx.config_source {
        Some(source) => println!("# Loaded from {}", source.display()),
        None => println!("# Built-in defaults"),
    }
    print!("{}", toml::to_string_pretty(&ctx.config)?);
    Ok(())
}
