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

//! The `init` subcommand.

use std::fs;

use askama::Template;
use clap::Parser;
use eyre::{Result, bail};
use inquire::{Confirm, MultiSelect};
use thiserror::Error;

use super::helpers::{ensure_in_git_worktree, page_size};
use crate::{
    config::{CONFIG_FILE_NAME, TypeCatalog, VERSION, config_file},
    hint, success,
};

/// The init command.
#[derive(Debug, Parser)]
pub struct Init {
    /// Use the default configuration.
    #[arg(long, short = 'd')]
    default: bool,
    /// Overwrite an existing configuration.
    #[arg(long, short = 'f')]
    force: bool,
}

/// Usage errors of `git conform init`.
#[derive(Debug, Error)]
pub enum InitError {
    /// A configuration already exists.
    #[error("There is already a git-conform.toml in the current repository")]
    ExistingConfig,
    /// No type has been selected.
    #[error("At least one commit type must be selected")]
    NoType,
}

/// Parameters to generate a `git-conform.toml`.
#[derive(Debug, Template)]
#[template(
    path = "git-conform.toml.jinja",
    syntax = "template",
    escape = "none"
)]
struct ConfigTemplate {
    /// The version of the configuration.
    version: &'static str,
    /// The types to write, in menu order.
    types: Vec<TypeEntry>,
}

/// A commit type, with its fields already written as TOML strings.
#[derive(Debug)]
struct TypeEntry {
    /// The type identifier.
    name: String,
    /// The description, as a TOML string.
    description: String,
    /// The changelog title, as a TOML string.
    title: String,
    /// Whether to write the emoji.
    has_emoji: bool,
    /// The emoji, as a TOML string.
    emoji: String,
}

impl super::Command for Init {
    #[tracing::instrument(name = "init_command", level = "trace", skip_all)]
    fn run(&self) -> Result<()> {
        ensure_in_git_worktree()?;

        let config_file = config_file()?;

        if !self.force && config_file.exists() {
            bail!(InitError::ExistingConfig);
        }

        let template = if self.default {
            ConfigTemplate::new(&TypeCatalog::default(), true)
        } else {
            ConfigTemplate::run_wizard()?
        };

        tracing::debug!(?config_file, "writing the configuration");
        fs::write(config_file, format!("{}\n", template.render()?))?;

        success!("A {CONFIG_FILE_NAME} has been created!");
        hint!("You can now edit it to adjust the rules and the prompt.");

        Ok(())
    }
}

impl ConfigTemplate {
    /// Builds the template parameters from a type catalog.
    fn new(types: &TypeCatalog, with_emoji: bool) -> Self {
        let types = types
            .iter()
            .map(|(name, info)| TypeEntry {
                name: name.to_owned(),
                description: toml_string(&info.description),
                title: toml_string(&info.title),
                has_emoji: with_emoji && info.emoji.is_some(),
                emoji: info
                    .emoji
                    .as_deref()
                    .map(toml_string)
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            version: VERSION,
            types,
        }
    }

    /// Runs the wizard to choose the types and their presentation.
    fn run_wizard() -> Result<Self> {
        let catalog = TypeCatalog::default();
        let names = catalog.names();
        let all = (0..names.len()).collect::<Vec<_>>();

        let selected =
            MultiSelect::new("Which commit types do you use?", names)
                .with_default(&all)
                .with_page_size(page_size())
                .prompt()?;

        if selected.is_empty() {
            bail!(InitError::NoType);
        }

        let with_emoji = Confirm::new("Show emoji in the type menu?")
            .with_default(true)
            .prompt()?;

        let catalog =
            catalog.filter(|name| selected.iter().any(|kept| kept == name));
        Ok(Self::new(&catalog, with_emoji))
    }
}

/// Writes a string as a TOML basic string, quotes included.
fn toml_string(s: &str) -> String {
    toml::Value::String(s.to_owned()).to_string()
}

#[cfg(test)]
mod test {
    #![allow(clippy::pedantic, clippy::restriction)]

    use super::*;
    use crate::config::Config;

    #[test]
    fn the_default_template_is_the_default_config() {
        let rendered = ConfigTemplate::new(&TypeCatalog::default(), true)
            .render()
            .unwrap();

        assert_eq!(Config::from_toml(&rendered).unwrap(), Config::default());
    }

    #[test]
    fn selected_types_are_the_only_ones_allowed() {
        let catalog = TypeCatalog::default()
            .filter(|name| ["feat", "fix"].contains(&name));
        let rendered = ConfigTemplate::new(&catalog, false).render().unwrap();

        let config = Config::from_toml(&rendered).unwrap();
        assert_eq!(config.types.names(), ["feat", "fix"]);
        assert_eq!(config.allowed_types(), ["feat", "fix"]);
        assert!(config.types.iter().all(|(_, info)| info.emoji.is_none()));
    }

    #[test]
    fn strings_with_quotes_are_valid_toml() {
        let value = r#"say "hi" to 'them'"#;
        let table: toml::Table =
            toml::from_str(&format!("key = {}", toml_string(value))).unwrap();

        assert_eq!(table["key"].as_str(), Some(value));
    }
}
