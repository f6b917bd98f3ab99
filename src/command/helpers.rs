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

//! Helpers for the subcommands.

use std::{io, path::Path, process::Command};

use colored::Colorize as _;
use eyre::Result;
use terminal_size::{Height, terminal_size};
use thiserror::Error;

use crate::{
    config::{Config, rules::Severity},
    lint::Report,
    tracing::LogResult as _,
};

/// The maximum size of a page in the terminal.
const MAX_PAGE_SIZE: usize = 15;

/// Lines kept free around a list for the prompt and its help message.
const PAGE_MARGIN: usize = 4;

/// Errors that can occur when not inside a Git worktree.
#[derive(Debug, Error)]
pub enum NotInGitWorktree {
    /// Git cannot be run.
    #[error("Failed to run the git command")]
    CannotRunGit(#[from] io::Error),
    /// The command is not run from inside a Git repository.
    #[error("Not in a Git repository")]
    NotInRepo,
    /// The command is not run from inside a Git worktree.
    #[error("Not inside a Git worktree")]
    NotInWorktree,
}

/// Ensures the command is run from a Git worktree.
#[tracing::instrument(level = "trace")]
pub fn ensure_in_git_worktree() -> Result<(), NotInGitWorktree> {
    let is_inside_work_tree = Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .output()
        .log_err()?;

    if !is_inside_work_tree.status.success() {
        return Err(NotInGitWorktree::NotInRepo).log_err();
    }

    if is_inside_work_tree.stdout == b"true\n" {
        Ok(())
    } else {
        Err(NotInGitWorktree::NotInWorktree).log_err()
    }
}

/// Loads the configuration from `path`, or from the repository.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    Ok(config)
}

/// Returns how many items of a list fit in the terminal.
pub fn page_size() -> usize {
    terminal_size().map_or(MAX_PAGE_SIZE, |(_, Height(height))| {
        usize::from(height)
            .saturating_sub(PAGE_MARGIN)
            .clamp(1, MAX_PAGE_SIZE)
    })
}

/// Prints a lint report.
///
/// In quiet mode, only the errors are printed.
pub fn print_report(report: &Report, quiet: bool) {
    println!("{}   input: {}", "⧗".bold(), report.input.bold());

    for problem in &report.problems {
        let (sign, rule) = match problem.severity {
            Severity::Error => ("✖".red(), problem.rule.as_str().red()),
            Severity::Warning if !quiet => {
                ("⚠".yellow(), problem.rule.as_str().yellow())
            }
            Severity::Warning | Severity::Off => continue,
        };

        println!("{sign}   {} [{rule}]", problem.message);
    }

    let summary = format!(
        "found {} problems, {} warnings",
        report.error_count(),
        report.warning_count()
    );

    println!();
    if !report.is_valid() {
        println!("{}   {}", "✖".red(), summary.red());
    } else if report.warning_count() > 0 {
        println!("{}   {}", "⚠".yellow(), summary.yellow());
    } else {
        println!("{}   {}", "✔".green(), summary.green());
    }
}
