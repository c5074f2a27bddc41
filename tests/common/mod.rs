//! Shared test utilities for CLI end-to-end tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_git_dir().with_gitmodules(gitmodules::TWO);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::gitmodules;
    pub use super::TestFixture;
}

/// `.gitmodules` snippets for testing.
#[allow(dead_code)]
pub mod gitmodules {
    /// Two plugins that do not exist anywhere.
    pub const TWO: &str = r#"[submodule "plugins/alpha"]
	path = plugins/alpha
	url = https://example.invalid/alpha.git
[submodule "plugins/beta"]
	path = plugins/beta
	url = https://example.invalid/beta.git
"#;

    /// One plugin.
    pub const ONE: &str = r#"[submodule "plugins/alpha"]
	path = plugins/alpha
	url = https://example.invalid/alpha.git
"#;
}

/// A temporary repository root.
pub struct TestFixture {
    pub temp: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp: assert_fs::TempDir::new().unwrap(),
        }
    }

    /// Mark the directory as a repository root without running git.
    pub fn with_git_dir(self) -> Self {
        self.temp.child(".git").create_dir_all().unwrap();
        self
    }

    /// Run `git init` in the fixture. Needs a git binary.
    pub fn with_git_init(self) -> Self {
        let status = Command::new("git")
            .args(["init", "-q"])
            .current_dir(self.temp.path())
            .status()
            .expect("git must be installed for integration tests");
        assert!(status.success());
        self
    }

    pub fn with_gitmodules(self, content: &str) -> Self {
        self.temp.child(".gitmodules").write_str(content).unwrap();
        self
    }

    pub fn with_dir(self, path: &str) -> Self {
        self.temp.child(path).create_dir_all().unwrap();
        self
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp.child(path).write_str(content).unwrap();
        self
    }

    pub fn path(&self) -> &std::path::Path {
        self.temp.path()
    }

    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp.child(path)
    }

    /// The CLI binary, run in the fixture with a predictable environment.
    pub fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("submodule-sync");
        cmd.current_dir(self.path())
            .env("NO_COLOR", "1")
            .env_remove("SUBMODULE_SYNC_CONFIG")
            .env("GIT_CEILING_DIRECTORIES", self.path().parent().unwrap());
        cmd
    }
}
