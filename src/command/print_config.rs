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

//! The `print-config` subcommand.

use std::path::PathBuf;

use clap::Parser;
use eyre::Result;

use super::helpers::load_config;

/// The print-config command.
#[derive(Debug, Parser)]
pub struct PrintConfig {
    /// Use this configuration file instead of the repository one.
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

impl super::Command for PrintConfig {
    #[tracing::instrument(
        name = "print_config_command",
        level = "trace",
        skip_all
    )]
    fn run(&self) -> Result<()> {
        let config = load_config(self.config.as_deref())?;
        print!("{}", toml::to_string_pretty(&config)?);
        Ok(())
    }
}
