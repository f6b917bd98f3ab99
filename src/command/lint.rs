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

//! The `lint` subcommand.

use std::{
    fs,
    io::{self, Read as _},
    path::PathBuf,
    process::Command,
};

use clap::Parser;
use eyre::{Result, bail};
use thiserror::Error;

use super::helpers::{load_config, print_report};
use crate::{error, lint::Linter, tracing::LogResult as _, warning};

/// The lint command.
#[derive(Debug, Parser)]
pub struct Lint {
    /// Read the message from a file, like `.git/COMMIT_EDITMSG`.
    #[arg(long, short = 'e', value_name = "FILE", conflicts_with = "from")]
    edit: Option<PathBuf>,
    /// Lint the commits reachable from `--to` but not from this revision.
    #[arg(long, value_name = "REV")]
    from: Option<String>,
    /// The last commit to lint when using `--from`.
    #[arg(long, value_name = "REV", requires = "from", default_value = "HEAD")]
    to: String,
    /// Use this configuration file instead of the repository one.
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
    /// Also lint merge commits, reverts, fixups and squashes.
    #[arg(long)]
    no_default_ignores: bool,
    /// Only print the errors.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    quiet: bool,
    /// Print a report for valid messages too.
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Usage errors of `git conform lint`.
#[derive(Debug, Error)]
pub enum LintError {
    /// Some messages are invalid.
    #[error("{invalid} of {total} commit messages are invalid")]
    Invalid {
        /// The number of invalid messages.
        invalid: usize,
        /// The number of linted messages.
        total: usize,
    },
    /// There is no message to lint.
    #[error("There is no commit message to lint")]
    EmptyInput,
    /// The message cannot be read.
    #[error("Failed to read the commit message from {source_name}")]
    ReadMessage {
        /// Where the message was read from.
        source_name: String,
        /// The OS error.
        #[source]
        os_error: io::Error,
    },
    /// The commits cannot be listed.
    #[error("Failed to list the commits in {range}: {reason}")]
    GitLog {
        /// The range of commits.
        range: String,
        /// What went wrong.
        reason: String,
    },
}

impl super::Command for Lint {
    #[tracing::instrument(name = "lint_command", level = "trace", skip_all)]
    fn run(&self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;

        let linter = if self.no_default_ignores {
            Linter::new(&config).without_default_ignores()
        } else {
            Linter::new(&config)
        };

        let messages = self.read_messages()?;

        if messages.is_empty() {
            if let Some(from) = &self.from {
                warning!("There is no commit in {from}..{}", self.to);
                return Ok(());
            }
        }

        if messages.iter().all(|message| message.trim().is_empty()) {
            bail!(LintError::EmptyInput);
        }

        let mut invalid = 0_usize;
        for message in &messages {
            let report = linter.lint(message);

            if !report.is_valid() {
                invalid += 1;
            }

            let has_output = if self.quiet {
                !report.is_valid()
            } else {
                !report.problems.is_empty()
            };

            if !report.ignored && (has_output || self.verbose) {
                print_report(&report, self.quiet);
            }
        }

        if invalid > 0 {
            error!("{}", config.prompt.messages.invalid);
            bail!(LintError::Invalid {
                invalid,
                total: messages.len(),
            });
        }

        Ok(())
    }
}

impl Lint {
    /// Reads the messages to lint from the selected source.
    fn read_messages(&self) -> Result<Vec<String>, LintError> {
        if let Some(path) = &self.edit {
            tracing::debug!(?path, "reading the message from a file");
            let message = fs::read_to_string(path)
                .map_err(|os_error| LintError::ReadMessage {
                    source_name: path.display().to_string(),
                    os_error,
                })
                .log_err()?;
            Ok(vec![message])
        } else if let Some(from) = &self.from {
            commit_messages(&format!("{from}..{}", self.to))
        } else {
            tracing::debug!("reading the message from stdin");
            let mut message = String::new();
            io::stdin()
                .read_to_string(&mut message)
                .map_err(|os_error| LintError::ReadMessage {
                    source_name: String::from("stdin"),
                    os_error,
                })
                .log_err()?;
            Ok(vec![message])
        }
    }
}

/// Returns the messages of the commits in `range`, oldest first.
#[tracing::instrument(level = "debug")]
fn commit_messages(range: &str) -> Result<Vec<String>, LintError> {
    let git_log = Command::new("git")
        .args(["log", "--format=%B%x00", range])
        .output()
        .map_err(|os_error| LintError::GitLog {
            range: range.to_owned(),
            reason: os_error.to_string(),
        })
        .log_err()?;

    if !git_log.status.success() {
        return Err(LintError::GitLog {
            range: range.to_owned(),
            reason: String::from_utf8_lossy(&git_log.stderr).trim().to_owned(),
        })
        .log_err();
    }

    let mut messages: Vec<String> = String::from_utf8_lossy(&git_log.stdout)
        .split('\0')
        .map(|message| message.trim_matches('\n').to_owned())
        .filter(|message| !message.trim().is_empty())
        .collect();

    messages.reverse();
    tracing::debug!(count = messages.len(), "commits to lint");

    Ok(messages)
}
