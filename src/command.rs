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

//! The command line interface.

mod commit;
mod helpers;
mod init;
mod lint;
mod print_config;

use clap::Parser;
use eyre::Result;

use self::{
    commit::{Commit, CommitError},
    init::{Init, InitError},
    lint::{Lint, LintError},
    print_config::PrintConfig,
};
use crate::{error, hint};

/// A Git extension to lint and author conventional commits.
#[derive(Debug, Parser)]
#[command(author, version = env!("VERSION_WITH_GIT"))]
pub enum GitConform {
    /// Lints commit messages.
    Lint(Lint),
    /// Runs the commit wizard.
    Commit(Commit),
    /// Initialises the configuration.
    Init(Init),
    /// Prints the effective configuration.
    PrintConfig(PrintConfig),
}

/// A subcommand.
trait Command {
    /// Runs the command.
    fn run(&self) -> Result<()>;
}

impl GitConform {
    /// Runs git-conform.
    pub fn run() -> Result<()> {
        let result = match Self::parse() {
            Self::Lint(lint) => lint.run(),
            Self::Commit(commit) => commit.run(),
            Self::Init(init) => init.run(),
            Self::PrintConfig(print_config) => print_config.run(),
        };

        match result {
            Err(e) => handle_errors(e),
            Ok(()) => Ok(()),
        }
    }
}

/// Prints usage errors nicely and exits, or forwards the other errors.
#[expect(clippy::exit, reason = "Usage errors are reported with an exit code.")]
fn handle_errors(e: color_eyre::Report) -> Result<()> {
    if let Some(lint_error) = e.downcast_ref::<LintError>() {
        match lint_error {
            LintError::Invalid { .. } => {
                // The reports have already been printed.
                tracing::debug!("{lint_error}");
                std::process::exit(exitcode::DATAERR);
            }
            LintError::EmptyInput => {
                error!("{lint_error}");
                hint!(
                    "Pipe a message on stdin, or use `--edit <FILE>` or \
                    `--from <REV>`."
                );
                std::process::exit(exitcode::USAGE);
            }
            LintError::ReadMessage { .. } | LintError::GitLog { .. } => {}
        }
    }

    if let Some(CommitError::InvalidMessage) = e.downcast_ref::<CommitError>()
    {
        std::process::exit(exitcode::DATAERR);
    }

    if let Some(init_error) = e.downcast_ref::<InitError>() {
        match init_error {
            InitError::ExistingConfig => {
                error!("{init_error}");
                hint!(
                    "You can force the command by running `git conform init -f`."
                );
            }
            InitError::NoType => error!("{init_error}"),
        }
        std::process::exit(exitcode::CANTCREAT);
    }

    Err(e)
}
