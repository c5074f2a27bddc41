//! # Submodule Sync Library
//!
//! This library reconciles the git submodules declared in a repository's
//! `.gitmodules` with their live state. It backs the `submodule-sync`
//! command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use submodule_sync::gitmodules;
//! use submodule_sync::status::{parse_status_line, SubmoduleStatus};
//!
//! let decls = gitmodules::parse(r#"
//! [submodule "plugins/foo"]
//!     path = plugins/foo
//!     url = https://github.com/example/foo.git
//! "#);
//! assert_eq!(decls[0].path, "plugins/foo");
//!
//! let (status, _) = parse_status_line("-0123456789abcdef0123456789abcdef01234567 plugins/foo");
//! assert_eq!(status, SubmoduleStatus::Uninitialized);
//! ```
//!
//! ## Core Concepts
//!
//! - **Declarations (`gitmodules`)**: `[submodule "name"]` sections with a
//!   `path` and a `url`.
//! - **Backend (`backend`, `git`)**: the narrow interface to the
//!   version-control tool, implemented by `GitCli` on top of the `git`
//!   binary with per-command timeouts.
//! - **Classification (`status`)**: each declared submodule gets exactly one
//!   state: up to date, has changes, uninitialized or merge conflict.
//! - **Execution (`executor`)**: init when needed, then update, with an
//!   outer retry loop over failed paths.
//! - **Cleanup (`cleaner`)**: finds and deletes directories that are no
//!   longer declared submodules.
//! - **Log (`report`)**: the JSON record of an update run.
//! - **Configuration (`config`)**: the explicit `SyncConfig` value every
//!   operation receives.

pub mod backend;
pub mod cleaner;
pub mod config;
pub mod defaults;
pub mod error;
pub mod executor;
pub mod git;
pub mod gitmodules;
pub mod output;
pub mod report;
pub mod status;
