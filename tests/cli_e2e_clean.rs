//! End-to-end tests for the `clean` and `remove` commands.

mod common;
use common::prelude::*;

/// Declared paths stay, undeclared directories and their metadata go
#[test]
fn test_clean_yes_deletes_only_orphans() {
    let fixture = TestFixture::new()
        .with_git_dir()
        .with_gitmodules(gitmodules::TWO)
        .with_dir("plugins/alpha")
        .with_dir("plugins/beta")
        .with_file("plugins/gamma/main.py", "print('hi')")
        .with_dir(".git/modules/plugins/gamma")
        .with_dir("scripts/.hidden")
        .with_dir("vendor/untouched");

    fixture
        .cmd()
        .args(["clean", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 orphaned directories"))
        .stdout(predicate::str::contains("Deleted: plugins/gamma"));

    fixture.child("plugins/alpha").assert(predicate::path::is_dir());
    fixture.child("plugins/beta").assert(predicate::path::is_dir());
    fixture.child("plugins/gamma").assert(predicate::path::missing());
    fixture
        .child(".git/modules/plugins/gamma")
        .assert(predicate::path::missing());
    fixture.child("scripts/.hidden").assert(predicate::path::is_dir());
    fixture.child("vendor/untouched").assert(predicate::path::is_dir());
}

/// Without a terminal and without --yes nothing is deleted
#[test]
fn test_clean_without_confirmation_keeps_directories() {
    let fixture = TestFixture::new()
        .with_git_dir()
        .with_dir("modules/orphan");

    fixture
        .cmd()
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("modules/orphan"))
        .stdout(predicate::str::contains("--yes"))
        .stdout(predicate::str::contains("Deletion cancelled"));

    fixture.child("modules/orphan").assert(predicate::path::is_dir());
}

/// Nothing to clean
#[test]
fn test_clean_nothing_found() {
    let fixture = TestFixture::new()
        .with_git_dir()
        .with_gitmodules(gitmodules::ONE)
        .with_dir("plugins/alpha");

    fixture
        .cmd()
        .args(["clean", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No orphaned directories found"));
}

/// Scan dirs come from the configuration file
#[test]
fn test_clean_uses_configured_scan_dirs() {
    let fixture = TestFixture::new()
        .with_git_dir()
        .with_file(".submodule-sync.toml", "scan_dirs = [\"vendor\"]\n")
        .with_dir("vendor/stale")
        .with_dir("plugins/kept");

    fixture.cmd().args(["clean", "--yes"]).assert().success();

    fixture.child("vendor/stale").assert(predicate::path::missing());
    fixture.child("plugins/kept").assert(predicate::path::is_dir());
}

/// remove needs confirmation when not interactive
#[test]
fn test_remove_requires_confirmation() {
    let fixture = TestFixture::new()
        .with_git_dir()
        .with_gitmodules(gitmodules::ONE)
        .with_dir("plugins/alpha");

    fixture
        .cmd()
        .args(["remove", "plugins/alpha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removal cancelled"));

    fixture.child("plugins/alpha").assert(predicate::path::is_dir());
}

/// remove --yes deregisters the submodule and deletes its files
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_remove_yes_deletes_submodule() {
    let fixture = TestFixture::new()
        .with_git_init()
        .with_gitmodules(gitmodules::TWO)
        .with_dir("plugins/alpha")
        .with_dir(".git/modules/plugins/alpha");

    fixture
        .cmd()
        .args(["remove", "plugins/alpha", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed plugins/alpha"));

    fixture.child("plugins/alpha").assert(predicate::path::missing());
    fixture
        .child(".git/modules/plugins/alpha")
        .assert(predicate::path::missing());
    fixture
        .child(".gitmodules")
        .assert(predicate::str::contains("plugins/alpha").not());
    fixture
        .child(".gitmodules")
        .assert(predicate::str::contains("plugins/beta"));
}
