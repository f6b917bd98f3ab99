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

//! Configuration for git-conform.
//!
//! The configuration is an immutable descriptor built once at startup. It
//! declares the lint rules, the catalog of commit types and the copy of the
//! interactive prompt. When the repository does not provide a
//! `git-conform.toml`, the built-in descriptor is used.

pub mod rules;

mod v0_1;

// NOTE: When you switch to a new version:
//
// - write a new version module,
// - switch the version here,
// - update VERSION below,
// - write a new `impl From<previous::Config> for Config` implementation,
// - handle the previous config in `Config::from_toml`.
pub use v0_1::{
    Config, Messages, Preset, Prompt, Question, Questions, Templates,
    TypeCatalog, TypeInfo,
};

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::Command,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use self::rules::{Applicability, Case, Parameter, Rule, RuleName, RuleSet};
use crate::tracing::LogResult as _;

/// An error that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The path of the configuration file cannot be resolved.
    #[error("Failed to get the configuration file path")]
    ConfigFileError(#[from] ConfigFileError),
    /// The configuration file cannot be read.
    #[error("Failed to read {path}")]
    ReadError {
        /// The path of the configuration file.
        path: PathBuf,
        /// The OS error.
        #[source]
        os_error: io::Error,
    },
    /// The configuration is invalid.
    #[error("Invalid configuration in {path}")]
    InvalidConfig {
        /// The path of the configuration file.
        path: PathBuf,
        /// The reason why the configuration is invalid.
        #[source]
        error: FromTomlError,
    },
}

/// An error that can occur when parsing the TOML.
#[derive(Debug, Error)]
pub enum FromTomlError {
    /// The version of the configuration is not supported.
    #[error("Configuration version {0} is not supported")]
    UnsupportedVersion(String),
    /// The configuration cannot be parsed.
    #[error("Failed to parse into a valid configuration")]
    ParseError(#[from] toml::de::Error),
    /// A commit type in the catalog is invalid.
    #[error("Invalid commit type `{name}`: {reason}")]
    InvalidType {
        /// The name of the type.
        name: String,
        /// Why the type is invalid.
        reason: &'static str,
    },
}

/// An error that can occur when building the config file path.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The root of the repository cannot be found.
    #[error("Failed to get the Git repo root")]
    RepoRootError(#[from] RepoRootError),
}

/// An error that can occur when getting the Git repo root.
#[derive(Debug, Error)]
pub enum RepoRootError {
    /// The `git` command cannot be run.
    #[error("Failed to run the git command")]
    CannotRunGit(#[from] io::Error),
    /// Git has returned an error.
    #[error("{0}")]
    GitError(String),
    /// The output of the git command is not proper UTF-8.
    #[error("The output of the git command is not proper UTF-8")]
    EncodingError(#[from] std::string::FromUtf8Error),
}

/// A minimal configuration to get the version.
///
/// The configuration format for git-conform can evolve with time. It is
/// versioned for this purpose, so that git-conform is able to select the proper
/// parser. This struct allows to parse any configuration as long as it contains
/// a version field.
#[derive(Debug, Serialize, Deserialize)]
struct MinimalConfig {
    /// The version of the configuration.
    version: String,
}

/// The name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "git-conform.toml";
/// The current version of the configuration file.
pub const VERSION: &str = "0.1";
/// The maximum length of the header, body lines and footer lines.
pub const MAX_LINE_LENGTH: usize = 100;

/// The default commit message template.
const DEFAULT_TEMPLATE: &str = include_str!("../templates/COMMIT_EDITMSG");

impl Default for Config {
    fn default() -> Self {
        let overrides = RuleSet::from([
            (
                RuleName::TypeEnum,
                Rule::error(
                    Applicability::Always,
                    Parameter::Types(TypeCatalog::default().names()),
                ),
            ),
            (
                RuleName::SubjectCase,
                Rule::error(
                    Applicability::Never,
                    Parameter::Cases(vec![
                        Case::Start,
                        Case::Pascal,
                        Case::Upper,
                    ]),
                ),
            ),
            (
                RuleName::SubjectEmpty,
                Rule::error(Applicability::Never, Parameter::None),
            ),
            (
                RuleName::SubjectFullStop,
                Rule::error(
                    Applicability::Never,
                    Parameter::Text(String::from(".")),
                ),
            ),
            (
                RuleName::TypeCase,
                Rule::error(
                    Applicability::Always,
                    Parameter::Cases(vec![Case::Lower]),
                ),
            ),
            (
                RuleName::TypeEmpty,
                Rule::error(Applicability::Never, Parameter::None),
            ),
        ]);

        Self {
            version: String::from(VERSION),
            extends: Some(Preset::Conventional),
            rules: Preset::Conventional.rules().merge(overrides),
            types: TypeCatalog::default(),
            prompt: Prompt::default(),
            templates: Templates::default(),
        }
    }
}

impl Preset {
    /// Returns the rules of the preset.
    pub fn rules(self) -> RuleSet {
        match self {
            Self::Conventional => conventional_rules(),
        }
    }
}

/// The rules of the conventional commits preset.
fn conventional_rules() -> RuleSet {
    let types = [
        "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor",
        "revert", "style", "test",
    ];

    RuleSet::from([
        (
            RuleName::BodyLeadingBlank,
            Rule::warning(Applicability::Always, Parameter::None),
        ),
        (
            RuleName::BodyMaxLineLength,
            Rule::error(
                Applicability::Always,
                Parameter::Length(MAX_LINE_LENGTH),
            ),
        ),
        (
            RuleName::FooterLeadingBlank,
            Rule::warning(Applicability::Always, Parameter::None),
        ),
        (
            RuleName::FooterMaxLineLength,
            Rule::error(
                Applicability::Always,
                Parameter::Length(MAX_LINE_LENGTH),
            ),
        ),
        (
            RuleName::HeaderMaxLength,
            Rule::error(
                Applicability::Always,
                Parameter::Length(MAX_LINE_LENGTH),
            ),
        ),
        (
            RuleName::HeaderTrim,
            Rule::error(Applicability::Always, Parameter::None),
        ),
        (
            RuleName::SubjectCase,
            Rule::error(
                Applicability::Never,
                Parameter::Cases(vec![
                    Case::Sentence,
                    Case::Start,
                    Case::Pascal,
                    Case::Upper,
                ]),
            ),
        ),
        (
            RuleName::SubjectEmpty,
            Rule::error(Applicability::Never, Parameter::None),
        ),
        (
            RuleName::SubjectFullStop,
            Rule::error(Applicability::Never, Parameter::Text(String::from("."))),
        ),
        (
            RuleName::TypeCase,
            Rule::error(
                Applicability::Always,
                Parameter::Cases(vec![Case::Lower]),
            ),
        ),
        (
            RuleName::TypeEmpty,
            Rule::error(Applicability::Never, Parameter::None),
        ),
        (
            RuleName::TypeEnum,
            Rule::error(
                Applicability::Always,
                Parameter::Types(types.into_iter().map(String::from).collect()),
            ),
        ),
    ])
}

impl Default for TypeCatalog {
    fn default() -> Self {
        let types = [
            ("feat", "A new feature", "Features", "✨"),
            ("fix", "A bug fix", "Bug Fixes", "🐛"),
            ("docs", "Documentation only changes", "Documentation", "📚"),
            (
                "style",
                "Changes that do not affect the meaning of the code",
                "Styles",
                "💅",
            ),
            (
                "refactor",
                "A code change that neither fixes a bug nor adds a feature",
                "Code Refactoring",
                "♻️",
            ),
            (
                "perf",
                "A code change that improves performance",
                "Performance Improvements",
                "⚡",
            ),
            (
                "test",
                "Adding missing tests or correcting existing tests",
                "Tests",
                "✅",
            ),
            (
                "ci",
                "Changes to CI/CD configuration files and scripts",
                "CI/CD",
                "🤖",
            ),
            (
                "chore",
                "Other changes that don't modify src or test files",
                "Chores",
                "🔧",
            ),
            ("revert", "Reverts a previous commit", "Reverts", "⏮️"),
        ];

        Self(
            types
                .into_iter()
                .map(|(name, description, title, emoji)| {
                    let info = TypeInfo {
                        description: String::from(description),
                        title: String::from(title),
                        emoji: Some(String::from(emoji)),
                    };
                    (String::from(name), info)
                })
                .collect(),
        )
    }
}

impl TypeCatalog {
    /// Returns the names of the types, in menu order.
    pub fn names(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    /// Iterates over the types and their documentation.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeInfo)> {
        self.0.iter().map(|(name, info)| (name.as_str(), info))
    }

    /// Returns whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keeps only the types for which `keep` returns `true`.
    #[must_use]
    pub fn filter(self, keep: impl Fn(&str) -> bool) -> Self {
        Self(self.0.into_iter().filter(|(name, _)| keep(name)).collect())
    }

    /// Checks that every type name is usable in a commit header.
    fn validate(&self) -> Result<(), FromTomlError> {
        for name in self.0.keys() {
            let reason = if name.is_empty() {
                Some("the name is empty")
            } else if name.to_lowercase() != *name {
                Some("the name must be lowercase")
            } else if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                Some("the name must only contain letters, digits or `_`")
            } else {
                None
            };

            if let Some(reason) = reason {
                return Err(FromTomlError::InvalidType {
                    name: name.to_owned(),
                    reason,
                })
                .log_err();
            }
        }

        Ok(())
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            skip: String::from(":skip"),
            commit: String::from(":commit"),
            invalid: String::from("invalid commit message, try again"),
        }
    }
}

impl Default for Questions {
    fn default() -> Self {
        Self {
            r#type: Question::new(
                "Select the type of change that you're committing",
            ),
            scope: Question::new("What is the scope of this change (optional)"),
            subject: Question::new(
                "Write a short, imperative tense description of the change",
            ),
            body: Question::new(
                "Provide a longer description of the changes (optional). \
                Use \"|\" to break new line",
            ),
            is_breaking: Question::new("Are there any breaking changes?"),
            breaking_body: Question::new(
                "A BREAKING CHANGE commit requires a body. Please enter a \
                longer description of the commit itself",
            ),
            breaking: Question::new("Describe the breaking changes"),
            is_issue_affected: Question::new(
                "Does this change affect any open issues? (optional)",
            ),
            issues_body: Question::new(
                "If issues are closed, the commit requires a body. Please \
                enter a longer description of the commit itself",
            ),
            issues: Question::new(
                "Add issue references (e.g. \"fixes #123\", \"closes #456\")",
            ),
        }
    }
}

impl Question {
    /// Builds a question from its description.
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_owned(),
        }
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            commit: String::from(DEFAULT_TEMPLATE),
        }
    }
}

impl Config {
    /// Loads the configuration the repo or fallbacks to the default.
    #[tracing::instrument(name = "load_config", level = "trace")]
    pub fn load() -> Result<Self, LoadError> {
        let config_file = config_file()?;
        match fs::read_to_string(&config_file) {
            Ok(config) => {
                tracing::debug!(?config_file, "loading the configuration");
                Self::from_toml(&config)
                    .map_err(|error| LoadError::InvalidConfig {
                        path: config_file,
                        error,
                    })
                    .log_err()
            }

            Err(error) => match error.kind() {
                io::ErrorKind::NotFound => {
                    tracing::debug!("no configuration file, using the default");
                    Ok(Self::default())
                }
                _ => Err(LoadError::ReadError {
                    path: config_file,
                    os_error: error,
                })
                .log_err(),
            },
        }
    }

    /// Loads the configuration from an explicit file.
    #[tracing::instrument(name = "load_config_from", level = "trace")]
    pub fn load_from(path: &Path) -> Result<Self, LoadError> {
        let config = fs::read_to_string(path)
            .map_err(|os_error| LoadError::ReadError {
                path: path.to_owned(),
                os_error,
            })
            .log_err()?;

        Self::from_toml(&config)
            .map_err(|error| LoadError::InvalidConfig {
                path: path.to_owned(),
                error,
            })
            .log_err()
    }

    /// Builds the configuration from its TOML representation.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn from_toml(toml: &str) -> Result<Self, FromTomlError> {
        let minimal_config: MinimalConfig =
            toml::from_str(toml).log_err()?;

        let mut config: Self = match minimal_config.version.as_str() {
            VERSION => toml::from_str(toml).log_err()?,
            version => {
                return Err(FromTomlError::UnsupportedVersion(
                    version.to_owned(),
                ))
                .log_err();
            }
        };

        config.types.validate()?;

        if let Some(preset) = config.extends {
            tracing::debug!(?preset, "merging the rules on top of the preset");
            config.rules = preset.rules().merge(config.rules);
        }

        config.warn_about_unlisted_types();

        tracing::trace!(?config);
        Ok(config)
    }

    /// Returns the types accepted by `type-enum`.
    ///
    /// When the rule does not list any type, the type catalog is used.
    pub fn allowed_types(&self) -> Vec<String> {
        match self.rules.get(RuleName::TypeEnum) {
            Some(Rule {
                parameter: Parameter::Types(types),
                ..
            }) if !types.is_empty() => types.clone(),
            _ => self.types.names(),
        }
    }

    /// Warns about types proposed by the prompt but refused by the linter.
    fn warn_about_unlisted_types(&self) {
        let Some(rule) = self.rules.get(RuleName::TypeEnum) else {
            return;
        };

        if !rule.is_enabled() || rule.is_negated() {
            return;
        }

        let allowed = self.allowed_types();
        for (name, _) in self.types.iter() {
            if !allowed.iter().any(|allowed| allowed == name) {
                tracing::warn!(
                    commit_type = name,
                    "the type is in the catalog but not allowed by type-enum"
                );
            }
        }
    }
}

/// Returns the path of the configuration file.
pub fn config_file() -> Result<PathBuf, ConfigFileError> {
    Ok(repo_root()?.join(CONFIG_FILE_NAME))
}

/// Returns the root of the current Git repository.
#[tracing::instrument(level = "trace")]
fn repo_root() -> Result<PathBuf, RepoRootError> {
    let git_rev_parse = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .log_err()?;

    if git_rev_parse.status.success() {
        let repo_root = String::from_utf8(git_rev_parse.stdout)?;
        Ok(PathBuf::from(repo_root.trim()))
    } else {
        let git_error = String::from_utf8(git_rev_parse.stderr)?;
        Err(RepoRootError::GitError(git_error.trim().to_owned())).log_err()
    }
}
