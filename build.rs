//! Build script for git-conform.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let cargo_version = env!("CARGO_PKG_VERSION");
    let version = version_with_git(cargo_version)
        .unwrap_or_else(|| String::from(cargo_version));

    println!("cargo:rustc-env=VERSION_WITH_GIT={version}");
}

/// Builds the version shown by `git conform --version`.
///
/// Releases built from their tag show the bare cargo version. Any other build
/// gets the short revision as build metadata, suffixed with `-modified` when
/// the worktree is dirty:
///
/// * 0.1.0 on a clean v0.1.0 tag => `0.1.0`
/// * 0.2.0-dev on any commit => `0.2.0-dev+abcd1234`
/// * 0.2.0-dev with local changes => `0.2.0-dev+abcd1234-modified`
///
/// Returns `None` when Git is not available, like in a crates.io tarball.
fn version_with_git(cargo_version: &str) -> Option<String> {
    let describe = git(&["describe", "--always", "--dirty=-modified"])?;

    // `cargo install --git` checks out the sources with only this file.
    let status = git(&["status", "--porcelain"])?;
    let is_cargo_checkout = status == "?? .cargo-ok";

    if describe == format!("v{cargo_version}")
        || is_cargo_checkout && !cargo_version.contains("-dev")
    {
        return Some(String::from(cargo_version));
    }

    let revision = git(&["rev-parse", "--short", "HEAD"])?;
    let build = if !status.is_empty() && !is_cargo_checkout {
        format!("{revision}-modified")
    } else {
        revision
    };

    Some(format!("{cargo_version}+{build}"))
}

/// Runs git and returns its trimmed output on success.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }

    String::from_utf8(output.stdout)
        .ok()
        .map(|stdout| stdout.trim().to_owned())
}
