//! # Remove Command Implementation
//!
//! Removes one submodule from the repository: its sections in `.gitmodules`
//! and `.git/config`, its index entry, its checkout and its `.git/modules`
//! metadata. Asks for confirmation unless `--yes` is given.

use anyhow::{bail, Result};
use clap::Args;

use submodule_sync::cleaner;
use submodule_sync::output::Glyph;

use crate::cli::Context;
use crate::commands::clean::confirm;

/// Remove a submodule from the repository
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Path of the submodule, as written in .gitmodules
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Remove without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the `remove` command.
pub fn execute(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let out = &ctx.output;
    let path = args.path.trim_end_matches('/');
    if path.is_empty() {
        bail!("Submodule path must not be empty");
    }

    println!("{} Removing submodule: {}", out.glyph(Glyph::Delete), path);
    if !args.yes && !confirm(&format!("Remove {} and delete its files?", path)) {
        println!("{} Removal cancelled", out.glyph(Glyph::Fail));
        return Ok(());
    }

    let git = ctx.git(&ctx.config);
    match cleaner::remove_submodule(&git, &ctx.repo, path) {
        Ok(report) => {
            for (failed, error) in &report.failed {
                println!("{} Failed to delete {}: {}", out.glyph(Glyph::Fail), failed, error);
            }
            if report.failed.is_empty() {
                println!("{} Removed {}", out.glyph(Glyph::Ok), path);
            }
        }
        Err(e) => println!("{} Error while removing {}: {}", out.glyph(Glyph::Fail), path, e),
    }
    Ok(())
}
