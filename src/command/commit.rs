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

//! The `commit` subcommand.

mod backend;

use std::{fmt, path::PathBuf};

use clap::Parser;
use eyre::{Result, bail};
use inquire::{Confirm, CustomUserError, Select, Text, validator::Validation};
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use self::backend::{Backend, GitBackend, PrintBackend};
use super::helpers::{
    ensure_in_git_worktree, load_config, page_size, print_report,
};
use crate::{
    config::{
        Config, Question,
        rules::{RuleName, Severity},
    },
    error,
    lint::Linter,
    warning,
};

/// The name of the commit template in Tera.
const TEMPLATE_NAME: &str = "templates.commit";

/// The result of an Inquire validator.
type ValidationResult = Result<Validation, CustomUserError>;

/// The commit command.
#[derive(Debug, Parser)]
pub struct Commit {
    /// Print the commit message instead of calling `git commit`.
    #[arg(long)]
    print_only: bool,
    /// Use this configuration file instead of the repository one.
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
    /// Extra arguments to be passed to `git commit`.
    #[arg(last = true)]
    extra_args: Vec<String>,
}

/// Usage errors of `git conform commit`.
#[derive(Debug, Error)]
pub enum CommitError {
    /// The commit template is invalid.
    #[error("Failed to parse the commit template")]
    Template(#[from] tera::Error),
    /// There is no type to choose from.
    #[error("The configuration does not define any commit type")]
    NoType,
    /// The assembled message does not pass the lint.
    #[error("The commit message is invalid")]
    InvalidMessage,
}

/// The answers to the wizard.
#[derive(Debug, Default, Serialize)]
struct Answers {
    /// The type of commit.
    r#type: String,
    /// The optional scope of the commit.
    scope: Option<String>,
    /// The short description of the change.
    subject: String,
    /// The optional longer description.
    body: Option<String>,
    /// The optional breaking change description.
    breaking_change: Option<String>,
    /// The optional issue references.
    issues: Option<String>,
}

/// A commit type in the selection menu.
#[derive(Debug, Clone)]
struct TypeChoice {
    /// The type identifier.
    name: String,
    /// The label shown in the menu.
    label: String,
}

/// The answer to a text question.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    /// Some text.
    Text(String),
    /// The question has been skipped.
    Skipped,
    /// The user wants to commit without answering the other questions.
    CommitNow,
}

/// The commit wizard.
struct Wizard<'a> {
    /// The configuration.
    config: &'a Config,
}

impl super::Command for Commit {
    #[tracing::instrument(name = "commit_command", level = "trace", skip_all)]
    fn run(&self) -> Result<()> {
        if !self.print_only {
            ensure_in_git_worktree()?;
        }

        let config = load_config(self.config.as_deref())?;
        if config.types.is_empty() {
            bail!(CommitError::NoType);
        }

        let tera = build_and_check_template(&config)?;
        let answers = Wizard { config: &config }.run()?;
        let message = render(&tera, &answers)?;

        let report =
            Linter::new(&config).without_default_ignores().lint(&message);
        if !report.is_valid() {
            error!("{}", config.prompt.messages.invalid);
            print_report(&report, false);
            bail!(CommitError::InvalidMessage);
        }

        let backend: Box<dyn Backend> = if self.print_only {
            Box::new(PrintBackend)
        } else {
            Box::new(GitBackend::new(&self.extra_args))
        };

        backend.call(&message)?;

        Ok(())
    }
}

impl Answers {
    /// Builds dummy answers filling every field of the template.
    fn dummy() -> Self {
        Self {
            r#type: String::from("dummy"),
            scope: Some(String::from("dummy")),
            subject: String::from("dummy commit"),
            body: Some(String::from("Dummy body.")),
            breaking_change: Some(String::from("Dummy breaking change.")),
            issues: Some(String::from("Closes #0")),
        }
    }

    /// Returns the header prefix, like `feat(scope): ` or `feat(scope)!: `.
    fn header_prefix(
        r#type: &str,
        scope: Option<&str>,
        breaking: bool,
    ) -> String {
        let mark = if breaking { "!" } else { "" };
        match scope {
            Some(scope) => format!("{}({scope}){mark}: ", r#type),
            None => format!("{}{mark}: ", r#type),
        }
    }
}

impl fmt::Display for TypeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

impl Wizard<'_> {
    /// Runs the wizard, stopping early when the user commits.
    #[tracing::instrument(name = "wizard", level = "trace", skip_all)]
    fn run(&self) -> Result<Answers> {
        let questions = &self.config.prompt.questions;

        let r#type = self.ask_type()?;
        let scope = match self.ask_optional(&questions.scope, false)? {
            Input::Text(scope) => Some(scope),
            Input::Skipped | Input::CommitNow => None,
        };
        let subject = self.ask_subject(&r#type, scope.as_deref(), false)?;

        let mut answers = Answers {
            r#type,
            scope,
            subject,
            ..Answers::default()
        };

        match self.ask_optional(&questions.body, true)? {
            Input::Text(body) => answers.body = Some(multiline(&body)),
            Input::Skipped => {}
            Input::CommitNow => return Ok(answers),
        }

        if confirm(&questions.is_breaking)? {
            let prefix = Answers::header_prefix(
                &answers.r#type,
                answers.scope.as_deref(),
                true,
            );

            // The `!` mark can push the header over its maximum length.
            if let Some(problem) =
                header_problem(self.config, &prefix, &answers.subject)
            {
                warning!(
                    "The subject does not fit a breaking change: {problem}"
                );
                answers.subject = self.ask_subject(
                    &answers.r#type,
                    answers.scope.as_deref(),
                    true,
                )?;
            }

            if answers.body.is_none() {
                match self.ask_required(&questions.breaking_body)? {
                    Input::Text(body) => answers.body = Some(multiline(&body)),
                    Input::Skipped | Input::CommitNow => return Ok(answers),
                }
            }

            match self.ask_required(&questions.breaking)? {
                Input::Text(breaking) => {
                    answers.breaking_change = Some(multiline(&breaking));
                }
                Input::Skipped | Input::CommitNow => return Ok(answers),
            }
        }

        if confirm(&questions.is_issue_affected)? {
            if answers.body.is_none() {
                match self.ask_required(&questions.issues_body)? {
                    Input::Text(body) => answers.body = Some(multiline(&body)),
                    Input::Skipped | Input::CommitNow => return Ok(answers),
                }
            }

            if let Input::Text(issues) = self.ask_required(&questions.issues)? {
                answers.issues = Some(issues);
            }
        }

        Ok(answers)
    }

    /// Asks the user which type of commit they want.
    fn ask_type(&self) -> Result<String> {
        let choice = Select::new(
            &self.config.prompt.questions.r#type.description,
            type_choices(self.config),
        )
        .with_page_size(page_size())
        .with_formatter(&|choice| choice.value.name.clone())
        .prompt()?;

        tracing::debug!(commit_type = %choice.name);
        Ok(choice.name)
    }

    /// Asks for the subject, checking the resulting header as it is typed.
    fn ask_subject(
        &self,
        r#type: &str,
        scope: Option<&str>,
        breaking: bool,
    ) -> Result<String> {
        let prefix = Answers::header_prefix(r#type, scope, breaking);
        let config = self.config.clone();
        let keywords = self.keywords();

        let validator = move |subject: &str| -> ValidationResult {
            if keywords.iter().any(|keyword| keyword == subject.trim()) {
                return Ok(Validation::Invalid(
                    "The subject cannot be skipped".into(),
                ));
            }

            Ok(header_problem(&config, &prefix, subject)
                .map_or(Validation::Valid, |problem| {
                    Validation::Invalid(problem.into())
                }))
        };

        Ok(Text::new(&self.config.prompt.questions.subject.description)
            .with_validator(validator)
            .prompt()?
            .trim()
            .to_owned())
    }

    /// Asks an optional question.
    ///
    /// The commit keyword is only accepted when `can_commit` is true.
    fn ask_optional(
        &self,
        question: &Question,
        can_commit: bool,
    ) -> Result<Input> {
        let messages = &self.config.prompt.messages;
        let help = if can_commit {
            format!(
                "Leave empty or type {} to skip, {} to commit now.",
                messages.skip, messages.commit
            )
        } else {
            format!("Leave empty or type {} to skip.", messages.skip)
        };

        let skip = messages.skip.clone();
        let commit = messages.commit.clone();
        let validator = move |input: &str| -> ValidationResult {
            if !can_commit && input.trim() == commit {
                Ok(Validation::Invalid(
                    format!("Answer the subject before using {commit}").into(),
                ))
            } else {
                Ok(Validation::Valid)
            }
        };

        let answer = Text::new(&question.description)
            .with_help_message(&help)
            .with_validator(validator)
            .prompt()?;

        Ok(self.classify(answer.trim(), &skip))
    }

    /// Asks a question needing a non-empty answer.
    fn ask_required(&self, question: &Question) -> Result<Input> {
        let messages = &self.config.prompt.messages;
        let help = format!("Type {} to commit now.", messages.commit);

        let skip = messages.skip.clone();
        let validator = move |input: &str| -> ValidationResult {
            let input = input.trim();
            if input.is_empty() || input == skip {
                Ok(Validation::Invalid("An answer is required".into()))
            } else {
                Ok(Validation::Valid)
            }
        };

        let answer = Text::new(&question.description)
            .with_help_message(&help)
            .with_validator(validator)
            .prompt()?;

        Ok(self.classify(answer.trim(), &messages.skip))
    }

    /// Turns a raw answer into an input.
    fn classify(&self, answer: &str, skip: &str) -> Input {
        if answer.is_empty() || answer == skip {
            Input::Skipped
        } else if answer == self.config.prompt.messages.commit {
            Input::CommitNow
        } else {
            Input::Text(answer.to_owned())
        }
    }

    /// Returns the keywords understood by the prompt.
    fn keywords(&self) -> [String; 2] {
        let messages = &self.config.prompt.messages;
        [messages.skip.clone(), messages.commit.clone()]
    }
}

/// Returns the first error in the header made of `prefix` and `subject`.
fn header_problem(
    config: &Config,
    prefix: &str,
    subject: &str,
) -> Option<String> {
    let header = format!("{prefix}{}", subject.trim());
    Linter::new(config)
        .without_default_ignores()
        .lint_with(&header, |name: RuleName| name.applies_to_header())
        .problems
        .into_iter()
        .find(|problem| problem.severity == Severity::Error)
        .map(|problem| problem.message)
}

/// Asks a yes / no question, defaulting to no.
fn confirm(question: &Question) -> Result<bool> {
    Ok(Confirm::new(&question.description)
        .with_default(false)
        .prompt()?)
}

/// Builds the type menu, aligning the descriptions.
fn type_choices(config: &Config) -> Vec<TypeChoice> {
    let max_name_len = config
        .types
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or_default();

    config
        .types
        .iter()
        .map(|(name, info)| {
            let padding = " ".repeat(max_name_len - name.chars().count());
            let label = match &info.emoji {
                Some(emoji) => {
                    format!("{emoji} {name}{padding}  {}", info.description)
                }
                None => format!("{name}{padding}  {}", info.description),
            };

            TypeChoice {
                name: name.to_owned(),
                label,
            }
        })
        .collect()
}

/// Turns the `|` separators typed by the user into newlines.
fn multiline(input: &str) -> String {
    input.split('|').map(str::trim).collect::<Vec<_>>().join("\n")
}

/// Loads the commit template and checks for errors.
fn build_and_check_template(config: &Config) -> Result<Tera> {
    let mut tera = Tera::default();

    tera.add_raw_template(TEMPLATE_NAME, &config.templates.commit)
        .map_err(CommitError::Template)?;

    // Render dummy answers to catch early any variable error.
    render(&tera, &Answers::dummy())?;

    Ok(tera)
}

/// Renders the commit message.
fn render(tera: &Tera, answers: &Answers) -> Result<String> {
    let context = Context::from_serialize(answers)?;
    let message = tera
        .render(TEMPLATE_NAME, &context)
        .map_err(CommitError::Template)?;

    Ok(message.trim_end().to_owned())
}
