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

//! Commit message linting.
//!
//! The [`Linter`] evaluates the rules of a [`Config`] against commit messages
//! and produces a [`Report`] for each of them.

pub mod case;
pub mod message;
pub mod rules;

use std::sync::LazyLock;

use regex::RegexSet;

use self::message::Message;
use crate::config::{
    Config,
    rules::{RuleName, Severity},
};

/// Messages generated by Git or forges, which are never linted.
#[expect(clippy::expect_used, reason = "The regexes are known to be valid.")]
static DEFAULT_IGNORES: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"^((Merge pull request)|(Merge (.*?) into (.*?)|(Merge branch (.*?))))",
        r"^(R|r)evert (.*)",
        r"^(amend|fixup|squash)!",
        r"^(Merged (.*?)(in|into) (.*)|Merged PR (.*): (.*))",
        r"^Merge remote-tracking branch(\s*)(.*)",
        r"^Automatic merge(.*)",
        r"^Auto-merged (.*?) into (.*)",
    ])
    .expect("invalid ignore regexes")
});

/// A commit message linter.
#[derive(Debug)]
pub struct Linter<'a> {
    /// The configuration holding the rules.
    config: &'a Config,
    /// The types accepted by `type-enum`.
    allowed_types: Vec<String>,
    /// Whether to skip messages generated by Git or forges.
    default_ignores: bool,
}

/// The result of linting one commit message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The header of the linted message.
    pub input: String,
    /// Whether the message has been ignored.
    pub ignored: bool,
    /// The rule violations.
    pub problems: Vec<Problem>,
}

/// A rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// The violated rule.
    pub rule: RuleName,
    /// The severity of the rule.
    pub severity: Severity,
    /// A description of the violation.
    pub message: String,
}

impl<'a> Linter<'a> {
    /// Builds a linter for the rules in `config`.
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            allowed_types: config.allowed_types(),
            default_ignores: true,
        }
    }

    /// Lints messages generated by Git or forges as well.
    #[must_use]
    pub const fn without_default_ignores(mut self) -> Self {
        self.default_ignores = false;
        self
    }

    /// Lints a raw commit message against all the rules.
    pub fn lint(&self, raw: &str) -> Report {
        self.lint_with(raw, |_| true)
    }

    /// Lints a raw commit message against the rules accepted by `filter`.
    #[tracing::instrument(name = "lint", level = "debug", skip_all)]
    pub fn lint_with(
        &self,
        raw: &str,
        filter: impl Fn(RuleName) -> bool,
    ) -> Report {
        let message = Message::parse(raw);
        tracing::trace!(?message);

        if self.default_ignores && is_ignored(&message.header) {
            tracing::debug!(header = %message.header, "ignoring the message");
            return Report {
                input: message.header,
                ignored: true,
                problems: vec![],
            };
        }

        let problems = self
            .config
            .rules
            .iter()
            .filter(|(name, rule)| rule.is_enabled() && filter(*name))
            .filter_map(|(name, rule)| {
                rules::evaluate(name, rule, &message, &self.allowed_types)
                    .err()
                    .map(|description| Problem {
                        rule: name,
                        severity: rule.severity,
                        message: description,
                    })
            })
            .collect::<Vec<_>>();

        tracing::debug!(header = %message.header, problems = problems.len());

        Report {
            input: message.header,
            ignored: false,
            problems,
        }
    }
}

impl Report {
    /// Returns whether the message has no error-level problem.
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns the number of error-level problems.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Returns the number of warning-level problems.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Counts the problems of a given severity.
    fn count(&self, severity: Severity) -> usize {
        self.problems
            .iter()
            .filter(|problem| problem.severity == severity)
            .count()
    }
}

/// Returns whether a header has been generated by Git or a forge.
pub fn is_ignored(header: &str) -> bool {
    DEFAULT_IGNORES.is_match(header)
}
