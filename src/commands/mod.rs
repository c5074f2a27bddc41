//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `submodule-sync` command-line tool. Each subcommand is defined in its own
//! file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and the shared
//!   [`crate::cli::Context`] and performs the command's logic.

pub mod clean;
pub mod completions;
pub mod config;
pub mod ignore;
pub mod remove;
pub mod status;
pub mod update;
