// git-conform - A Git extension to lint and author conventional commits.
// Copyright (C) 2026 Jean-Philippe Cugnet <jean-philippe@cugnet.eu>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3 of the License.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

// NOTE: The fake git used by the tests is a shell script, so let’s just not
// compile the CLI tests on Windows.
//! CLI tests for `git conform lint`.
#![cfg(not(target_os = "windows"))]
#![allow(clippy::pedantic, clippy::restriction)]

use std::{env, fs, path::PathBuf};

use assert_cmd::Command;
use assert_fs::{TempDir, prelude::*};
use eyre::Result;
use indoc::indoc;
use predicates::prelude::*;

////////////////////////////////////////////////////////////////////////////////
//                                  Helpers                                   //
////////////////////////////////////////////////////////////////////////////////

fn res_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("res")
}

fn test_path() -> Result<String> {
    let fake_git = res_dir().join("bin");
    Ok(format!("{}:{}", fake_git.display(), env::var("PATH")?))
}

fn setup_temp_dir() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;
    temp_dir.child(".git").create_dir_all()?;
    Ok(temp_dir)
}

fn install_config(temp_dir: &TempDir, name: &str) -> Result<()> {
    let config_file = res_dir().join("config").join(name);
    temp_dir
        .child("git-conform.toml")
        .write_file(&config_file)?;
    Ok(())
}

fn set_git_log(temp_dir: &TempDir, messages: &[&str]) -> Result<()> {
    let log = messages
        .iter()
        .map(|message| format!("{message}\n\0\n"))
        .collect::<String>();

    temp_dir.child(".git").child("log").write_str(&log)?;
    Ok(())
}

fn git_conform_lint(temp_dir: &TempDir) -> Result<Command> {
    let mut cmd = Command::cargo_bin("git-conform")?;
    cmd.current_dir(temp_dir)
        .env("PATH", test_path()?)
        .env("NO_COLOR", "1")
        .env_remove("GIT_CONFORM_LOG")
        .arg("lint");

    Ok(cmd)
}

////////////////////////////////////////////////////////////////////////////////
//                                   stdin                                    //
////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_lint_accepts_a_conventional_message() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .write_stdin("feat: add a lint command\n")
        .assert()
        .success()
        .stdout("");

    Ok(())
}

#[test]
fn test_lint_rejects_an_uppercase_type() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .write_stdin("Feat: add a lint command\n")
        .assert()
        .code(65)
        .stdout(predicate::str::contains("⧗   input: Feat: add a lint command"))
        .stdout(predicate::str::contains(
            "✖   type must be lower-case [type-case]",
        ))
        .stdout(predicate::str::contains("found 2 problems, 0 warnings"));

    Ok(())
}

#[test]
fn test_lint_prints_the_invalid_message_on_errors() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .write_stdin("Feat: add a lint command\n")
        .assert()
        .code(65)
        .stderr(predicate::str::contains(
            "Error: invalid commit message, try again",
        ));

    Ok(())
}

#[test]
fn test_lint_does_not_print_the_invalid_message_for_warnings() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .write_stdin("fix: correct the parser\nIt was wrong.\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("invalid commit message").not());

    Ok(())
}

#[test]
fn test_lint_rejects_a_subject_ending_with_a_full_stop() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .write_stdin("fix: correct bug.")
        .assert()
        .code(65)
        .stdout(predicate::str::contains(
            "✖   subject may not end with full stop [subject-full-stop]",
        ));

    Ok(())
}

#[test]
fn test_lint_rejects_an_unknown_type() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .write_stdin("feature: add x")
        .assert()
        .code(65)
        .stdout(predicate::str::contains("[type-enum]"));

    Ok(())
}

#[test]
fn test_lint_rejects_an_empty_header() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .write_stdin("feat:")
        .assert()
        .code(65)
        .stdout(predicate::str::contains("[subject-empty]"))
        .stdout(predicate::str::contains("[type-empty]"));

    Ok(())
}

#[test]
fn test_lint_prints_warnings_without_failing() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .write_stdin("fix: correct the parser\nIt was wrong.\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "⚠   body must have leading blank line [body-leading-blank]",
        ))
        .stdout(predicate::str::contains("found 0 problems, 1 warnings"));

    Ok(())
}

#[test]
fn test_lint_hides_warnings_when_quiet() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .arg("--quiet")
        .write_stdin("fix: correct the parser\nIt was wrong.\n")
        .assert()
        .success()
        .stdout("");

    Ok(())
}

#[test]
fn test_lint_prints_a_report_for_valid_messages_when_verbose() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .arg("--verbose")
        .write_stdin("fix: correct the parser")
        .assert()
        .success()
        .stdout(predicate::str::contains("✔   found 0 problems, 0 warnings"));

    Ok(())
}

#[test]
fn test_lint_ignores_comments_and_the_scissors() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    let message = indoc! {"
        fix: correct the parser

        # Please enter the commit message for your changes.
        # ------------------------ >8 ------------------------
        diff --git a/README.md b/README.md
        This line is far too long to be part of a commit message body, but it is below the scissors.
    "};

    git_conform_lint(&temp_dir)?
        .write_stdin(message)
        .assert()
        .success();

    Ok(())
}

#[test]
fn test_lint_fails_on_empty_input() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .write_stdin("\n\n")
        .assert()
        .code(64)
        .stderr(predicate::str::contains(
            "Error: there is no commit message to lint",
        ));

    Ok(())
}

//////////////////////////////// Default ignores ///////////////////////////////

#[test]
fn test_lint_ignores_merge_commits() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .write_stdin("Merge branch 'develop' into main")
        .assert()
        .success()
        .stdout("");

    Ok(())
}

#[test]
fn test_lint_ignores_fixups() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .write_stdin("fixup! feat: add a lint command")
        .assert()
        .success();

    Ok(())
}

#[test]
fn test_lint_checks_merge_commits_without_default_ignores() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .arg("--no-default-ignores")
        .write_stdin("Merge branch 'develop' into main")
        .assert()
        .code(65);

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
//                                   --edit                                   //
////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_lint_reads_the_message_from_a_file() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    let message = temp_dir.child(".git").child("COMMIT_EDITMSG");
    message.write_str("feat: Add New Feature\n")?;

    git_conform_lint(&temp_dir)?
        .arg("--edit")
        .arg(message.path())
        .assert()
        .code(65)
        .stdout(predicate::str::contains("[subject-case]"));

    Ok(())
}

#[test]
fn test_lint_prints_an_error_if_the_file_does_not_exist() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .args(["--edit", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to read the commit message from missing",
        ));

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
//                                   --from                                   //
////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_lint_checks_every_commit_in_the_range() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    set_git_log(&temp_dir, &[
        "fix: correct bug.",
        "feat: add a lint command",
        "Feat: add the commit command",
    ])?;

    git_conform_lint(&temp_dir)?
        .args(["--from", "v0.1.0"])
        .assert()
        .code(65)
        .stdout(predicate::str::contains(
            "input: Feat: add the commit command",
        ))
        .stdout(predicate::str::contains("input: fix: correct bug."))
        .stdout(predicate::str::contains("add a lint command").not());

    let range = fs::read_to_string(temp_dir.child(".git").child("log_range"))?;
    assert_eq!(range, "v0.1.0..HEAD");

    Ok(())
}

#[test]
fn test_lint_prints_the_oldest_commit_first() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    set_git_log(&temp_dir, &["Fix: newest", "Feat: oldest"])?;

    let output = git_conform_lint(&temp_dir)?
        .args(["--from", "v0.1.0", "--to", "develop"])
        .output()?;

    let stdout = String::from_utf8(output.stdout)?;
    let oldest = stdout.find("Feat: oldest").unwrap();
    let newest = stdout.find("Fix: newest").unwrap();
    assert!(oldest < newest);

    let range = fs::read_to_string(temp_dir.child(".git").child("log_range"))?;
    assert_eq!(range, "v0.1.0..develop");

    Ok(())
}

#[test]
fn test_lint_accepts_a_range_of_valid_commits() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    set_git_log(&temp_dir, &[
        "feat: add a lint command",
        "Merge branch 'feature/lint' into develop",
    ])?;

    git_conform_lint(&temp_dir)?
        .args(["--from", "v0.1.0"])
        .assert()
        .success()
        .stdout("");

    Ok(())
}

#[test]
fn test_lint_warns_about_an_empty_range() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    set_git_log(&temp_dir, &[])?;

    git_conform_lint(&temp_dir)?
        .args(["--from", "HEAD"])
        .assert()
        .success()
        .stderr(predicate::str::contains("There is no commit in HEAD..HEAD"));

    Ok(())
}

#[test]
fn test_lint_prints_an_error_if_git_log_fails() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .args(["--from", "unknown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fatal: bad revision"));

    Ok(())
}

#[test]
fn test_lint_refuses_to_without_from() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .args(["--to", "HEAD"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--from <REV>"));

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
//                               Configuration                                //
////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_lint_uses_the_config_from_the_repo_root() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    install_config(&temp_dir, "custom-types.toml")?;

    git_conform_lint(&temp_dir)?
        .write_stdin("wip: try something")
        .assert()
        .success();

    git_conform_lint(&temp_dir)?
        .write_stdin("fix: correct the parser")
        .assert()
        .code(65)
        .stdout(predicate::str::contains(
            "✖   type must be one of [feat, wip] [type-enum]",
        ));

    Ok(())
}

#[test]
fn test_lint_uses_an_explicit_config_file() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .arg("--config")
        .arg(res_dir().join("config").join("custom-types.toml"))
        .write_stdin("wip: try something")
        .assert()
        .success();

    Ok(())
}

#[test]
fn test_lint_uses_the_invalid_message_from_the_config() -> Result<()> {
    let temp_dir = setup_temp_dir()?;

    git_conform_lint(&temp_dir)?
        .arg("--config")
        .arg(res_dir().join("config").join("custom-keywords.toml"))
        .write_stdin("Feat: x")
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Error: nope, try again"));

    Ok(())
}

#[test]
fn test_lint_prints_an_error_if_the_severity_is_invalid() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    install_config(&temp_dir, "invalid-severity.toml")?;

    git_conform_lint(&temp_dir)?
        .write_stdin("feat: add a lint command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration in"))
        .stderr(predicate::str::contains("Invalid severity 3"));

    Ok(())
}

#[test]
fn test_lint_prints_an_error_if_a_rule_is_unknown() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    install_config(&temp_dir, "unknown-rule.toml")?;

    git_conform_lint(&temp_dir)?
        .write_stdin("feat: add a lint command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("scope-enum"));

    Ok(())
}

#[test]
fn test_lint_prints_an_error_if_the_version_is_unsupported() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    install_config(&temp_dir, "unsupported-version.toml")?;

    git_conform_lint(&temp_dir)?
        .write_stdin("feat: add a lint command")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Configuration version 0.0 is not supported",
        ));

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
//                                print-config                                //
////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_print_config_prints_the_effective_rules() -> Result<()> {
    let temp_dir = setup_temp_dir()?;
    install_config(&temp_dir, "custom-types.toml")?;

    let mut cmd = Command::cargo_bin("git-conform")?;
    cmd.current_dir(&temp_dir)
        .env("PATH", test_path()?)
        .arg("print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"version = "0.1""#))
        .stdout(predicate::str::contains("header-max-length"))
        .stdout(predicate::str::contains("[types.wip]"));

    Ok(())
}
