//! # Ignore Command Implementation
//!
//! Sets `submodule.<path>.ignore = all` in `.git/config` for every declared
//! submodule, so `git status` in the superproject stops reporting local
//! modifications inside them.
//!
//! To see submodule changes again for one command, use
//! `git status --ignore-submodules=none`; to undo the setting, use
//! `git config --unset submodule.<path>.ignore`.

use anyhow::{Context as _, Result};
use clap::Args;

use submodule_sync::backend::SubmoduleBackend;
use submodule_sync::output::Glyph;

use crate::cli::Context;

/// Make `git status` ignore local changes inside every submodule
#[derive(Args, Debug)]
pub struct IgnoreArgs {}

/// Execute the `ignore` command.
pub fn execute(_args: IgnoreArgs, ctx: &Context) -> Result<()> {
    let out = &ctx.output;
    let git = ctx.git(&ctx.config);
    let decls = git
        .list_submodules()
        .with_context(|| format!("Failed to read {}", ctx.config.gitmodules.display()))?;

    if decls.is_empty() {
        println!("{} No submodules found", out.glyph(Glyph::Empty));
        return Ok(());
    }

    println!("Found {} submodules\n", decls.len());

    let mut succeeded = 0;
    for (i, decl) in decls.iter().enumerate() {
        match git.ignore_changes(&decl.path) {
            Ok(()) => {
                println!("[{}/{}] {} {}", i + 1, decls.len(), decl.path, out.glyph(Glyph::Ok));
                succeeded += 1;
            }
            Err(e) => {
                log::warn!("{}", e);
                println!(
                    "[{}/{}] {} {} {}",
                    i + 1,
                    decls.len(),
                    decl.path,
                    out.glyph(Glyph::Fail),
                    e.detail()
                );
            }
        }
    }

    println!("\nDone: {}/{} submodules configured", succeeded, decls.len());

    if succeeded > 0 {
        println!(
            "\n{} git status no longer shows local changes inside submodules.",
            out.glyph(Glyph::Hint)
        );
        println!("To see them anyway: git status --ignore-submodules=none");
        println!("To undo for one submodule: git config --unset submodule.<path>.ignore");
    }
    Ok(())
}
