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

//! Cargo xtasks for git-conform.

use std::{env, process};

use colored::Colorize;
use xshell::{cmd, Cmd, Shell};

/// The checks, in the order `all` runs them.
const CHECKS: [&str; 4] = ["commits", "format", "build", "test"];

/// Counts the passed and failed steps.
#[derive(Default)]
struct Report {
    passed: usize,
    failed: usize,
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let checks = match args.as_slice() {
        ["check", "all"] => CHECKS.to_vec(),
        ["check", check] if CHECKS.contains(check) => vec![*check],
        _ => usage(),
    };

    let sh = Shell::new().unwrap();
    let mut report = Report::default();

    for check in checks {
        match check {
            "commits" => check_commits(&sh, &mut report),
            "format" => check_format(&sh, &mut report),
            "build" => build(&sh, &mut report),
            _ => test(&sh, &mut report),
        }
    }

    report.conclude();
}

fn usage() -> ! {
    eprintln!("usage: cargo xtask check <{}|all>", CHECKS.join("|"));
    process::exit(1);
}

/// Lints the commits of the branch with git-conform itself.
fn check_commits(sh: &Shell, report: &mut Report) {
    let to = if env::var("IS_PULL_REQUEST").is_ok_and(|val| val == "true") {
        "HEAD^2"
    } else {
        "HEAD"
    };

    let from = if to == "HEAD^2" {
        String::from("HEAD~")
    } else {
        let branch = git(cmd!(sh, "git branch --show-current"));
        if branch == "main" {
            return;
        }
        git(cmd!(sh, "git merge-base origin/main HEAD"))
    };

    run(
        report,
        "Linting the commit messages",
        cmd!(sh, "cargo run --quiet -- lint --from {from} --to {to}"),
    );
}

fn check_format(sh: &Shell, report: &mut Report) {
    run(
        report,
        "Checking the Rust code is formatted",
        cmd!(sh, "cargo fmt --check"),
    );
}

fn build(sh: &Shell, report: &mut Report) {
    run(
        report,
        "Building all packages",
        cmd!(sh, "cargo build --workspace --all-targets"),
    );
    run(
        report,
        "Checking for clippy warnings",
        cmd!(sh, "cargo clippy --workspace --all-targets -- -D warnings"),
    );
}

fn test(sh: &Shell, report: &mut Report) {
    run(
        report,
        "Running the tests",
        cmd!(sh, "cargo test --workspace"),
    );
}

/// Runs one step and records its outcome.
fn run(report: &mut Report, name: &str, command: Cmd<'_>) {
    println!("{}", format!("==> {name}...").bold());

    if command.run().is_ok() {
        report.passed += 1;
        println!("{}\n", "✅ PASSED".bold().green());
    } else {
        report.failed += 1;
        println!("{}\n", "❌ FAILED".bold().red());
    }
}

/// Returns the trimmed output of a git command.
fn git(command: Cmd<'_>) -> String {
    command.read().unwrap().trim().to_owned()
}

impl Report {
    fn conclude(&self) {
        let total = self.passed + self.failed;

        if self.failed == 0 {
            let message = format!("✅ {total}/{total} steps passed!");
            println!("{}", message.bold().green());
        } else {
            let message = format!("❌ {}/{total} steps failed!", self.failed);
            eprintln!("{}", message.bold().red());
            process::exit(1);
        }
    }
}
