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

//! Lint rule declarations.
//!
//! A rule is declared in the configuration as a `[severity, applicability,
//! parameter]` array, keyed by its name:
//!
//! ```toml
//! [rules]
//! type-enum = [2, "always", ["feat", "fix"]]
//! subject-full-stop = [2, "never", "."]
//! header-trim = [2, "always"]
//! ```
//!
//! The shape of the parameter depends on the rule. It is checked when the rule
//! set is deserialised, so that an invalid declaration is rejected at load
//! time.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, SeqAccess, Visitor},
    ser::SerializeSeq as _,
};
use thiserror::Error;

/// The set of declared rules, in declaration order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IndexMap<RuleName, RawRule>")]
pub struct RuleSet(IndexMap<RuleName, Rule>);

/// A rule declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// The enforcement level.
    pub severity: Severity,
    /// Whether the rule requires or forbids its condition.
    pub applicability: Applicability,
    /// The rule-specific parameter.
    pub parameter: Parameter,
}

/// The name of a rule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum RuleName {
    /// The type must be in a list.
    TypeEnum,
    /// The type must be in a given case.
    TypeCase,
    /// The type must not be empty.
    TypeEmpty,
    /// The subject must (not) be in a given case.
    SubjectCase,
    /// The subject must not be empty.
    SubjectEmpty,
    /// The subject must not end with a given character.
    SubjectFullStop,
    /// The header must not exceed a given length.
    HeaderMaxLength,
    /// The header must not be surrounded by whitespace.
    HeaderTrim,
    /// The body must be preceded by a blank line.
    BodyLeadingBlank,
    /// The lines of the body must not exceed a given length.
    BodyMaxLineLength,
    /// The footer must be preceded by a blank line.
    FooterLeadingBlank,
    /// The lines of the footer must not exceed a given length.
    FooterMaxLineLength,
}

/// The enforcement level of a rule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Severity {
    /// The rule is disabled.
    Off = 0,
    /// A violation is reported but does not invalidate the message.
    Warning = 1,
    /// A violation invalidates the message.
    Error = 2,
}

/// The direction of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    /// The rule requires its condition.
    Always,
    /// The rule forbids its condition.
    Never,
}

/// The parameter of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    /// No parameter.
    None,
    /// A list of commit types.
    Types(Vec<String>),
    /// A list of letter cases.
    Cases(Vec<Case>),
    /// A piece of text.
    Text(String),
    /// A length, in characters.
    Length(usize),
}

/// A letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// `lower case`
    Lower,
    /// `UPPER CASE`
    Upper,
    /// `camelCase`
    Camel,
    /// `kebab-case`
    Kebab,
    /// `PascalCase`
    Pascal,
    /// `Sentence case`
    Sentence,
    /// `snake_case`
    Snake,
    /// `Start Case`
    Start,
}

/// A rule as written in the configuration, before its parameter is checked.
#[derive(Debug)]
pub struct RawRule {
    /// The enforcement level.
    severity: Severity,
    /// The direction of the rule.
    applicability: Applicability,
    /// The parameter, if any.
    parameter: Option<RawParameter>,
}

/// A parameter as written in the configuration.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawParameter {
    /// An integer.
    Length(usize),
    /// A string.
    Text(String),
    /// A list of strings.
    List(Vec<String>),
}

/// The kind of parameter expected by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParameterKind {
    /// The rule takes no parameter.
    Nothing,
    /// An optional list of types.
    Types,
    /// One case or a list of cases.
    Cases,
    /// An optional piece of text.
    Text,
    /// A mandatory length.
    Length,
}

/// An error in a rule declaration.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The rule does not take any parameter.
    #[error("Rule `{rule}` does not take any parameter")]
    UnexpectedParameter {
        /// The rule.
        rule: RuleName,
    },
    /// The rule requires a parameter.
    #[error("Rule `{rule}` requires {expected}")]
    MissingParameter {
        /// The rule.
        rule: RuleName,
        /// A description of the expected parameter.
        expected: &'static str,
    },
    /// The parameter has not the expected shape.
    #[error("Rule `{rule}` expects {expected}")]
    WrongParameter {
        /// The rule.
        rule: RuleName,
        /// A description of the expected parameter.
        expected: &'static str,
    },
    /// A case name is unknown.
    #[error("Rule `{rule}` uses an unknown case `{case}`")]
    UnknownCase {
        /// The rule.
        rule: RuleName,
        /// The unknown case name.
        case: String,
    },
}

/// An invalid severity level.
#[derive(Debug, Error)]
#[error("Invalid severity {0}, expected 0 (off), 1 (warning) or 2 (error)")]
pub struct InvalidSeverity(u8);

/// An unknown case name.
#[derive(Debug, Error)]
#[error("Unknown case `{0}`")]
pub struct UnknownCase(String);

/// The default full stop for `subject-full-stop`.
const DEFAULT_FULL_STOP: &str = ".";

impl RuleSet {
    /// Returns the declaration of a rule, if any.
    pub fn get(&self, name: RuleName) -> Option<&Rule> {
        self.0.get(&name)
    }

    /// Iterates over the declared rules.
    pub fn iter(&self) -> impl Iterator<Item = (RuleName, &Rule)> {
        self.0.iter().map(|(name, rule)| (*name, rule))
    }

    /// Returns the number of declared rules.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no rule is declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overrides the rules in `self` with the ones declared in `overrides`.
    ///
    /// Overridden rules keep their position. New rules are appended.
    #[must_use]
    pub fn merge(mut self, overrides: Self) -> Self {
        self.0.extend(overrides.0);
        self
    }
}

impl<const N: usize> From<[(RuleName, Rule); N]> for RuleSet {
    fn from(rules: [(RuleName, Rule); N]) -> Self {
        Self(rules.into_iter().collect())
    }
}

impl TryFrom<IndexMap<RuleName, RawRule>> for RuleSet {
    type Error = RuleError;

    fn try_from(raw: IndexMap<RuleName, RawRule>) -> Result<Self, Self::Error> {
        raw.into_iter()
            .map(|(name, raw)| {
                Rule::from_raw(name, raw).map(|rule| (name, rule))
            })
            .collect::<Result<IndexMap<_, _>, _>>()
            .map(Self)
    }
}

impl Serialize for RuleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl Rule {
    /// Builds an error-level rule.
    pub const fn error(
        applicability: Applicability,
        parameter: Parameter,
    ) -> Self {
        Self {
            severity: Severity::Error,
            applicability,
            parameter,
        }
    }

    /// Builds a warning-level rule.
    pub const fn warning(
        applicability: Applicability,
        parameter: Parameter,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            applicability,
            parameter,
        }
    }

    /// Returns whether the rule is enabled.
    pub fn is_enabled(&self) -> bool {
        self.severity != Severity::Off
    }

    /// Returns whether the rule forbids its condition.
    pub fn is_negated(&self) -> bool {
        self.applicability == Applicability::Never
    }

    /// Checks the raw parameter of `name` and builds the rule.
    fn from_raw(name: RuleName, raw: RawRule) -> Result<Self, RuleError> {
        let RawRule {
            severity,
            applicability,
            parameter,
        } = raw;

        let kind = name.parameter_kind();
        let parameter = match (kind, parameter) {
            (ParameterKind::Nothing, None) => Parameter::None,
            (ParameterKind::Nothing, Some(_)) => {
                return Err(RuleError::UnexpectedParameter { rule: name });
            }

            (ParameterKind::Types, None) => Parameter::Types(vec![]),
            (ParameterKind::Types, Some(RawParameter::List(types))) => {
                Parameter::Types(types)
            }

            (ParameterKind::Cases, Some(RawParameter::Text(case))) => {
                Parameter::Cases(vec![parse_case(name, &case)?])
            }
            (ParameterKind::Cases, Some(RawParameter::List(cases))) => {
                let cases = cases
                    .iter()
                    .map(|case| parse_case(name, case))
                    .collect::<Result<_, _>>()?;
                Parameter::Cases(cases)
            }

            (ParameterKind::Text, None) => {
                Parameter::Text(String::from(DEFAULT_FULL_STOP))
            }
            (ParameterKind::Text, Some(RawParameter::Text(text))) => {
                Parameter::Text(text)
            }

            (ParameterKind::Length, Some(RawParameter::Length(length))) => {
                Parameter::Length(length)
            }

            (ParameterKind::Cases | ParameterKind::Length, None) => {
                return Err(RuleError::MissingParameter {
                    rule: name,
                    expected: kind.describe(),
                });
            }
            (_, Some(_)) => {
                return Err(RuleError::WrongParameter {
                    rule: name,
                    expected: kind.describe(),
                });
            }
        };

        Ok(Self {
            severity,
            applicability,
            parameter,
        })
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.parameter == Parameter::None { 2 } else { 3 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.severity)?;
        seq.serialize_element(&self.applicability)?;

        match &self.parameter {
            Parameter::None => (),
            Parameter::Types(types) => seq.serialize_element(types)?,
            Parameter::Cases(cases) => match cases.as_slice() {
                [case] => seq.serialize_element(case.as_str())?,
                cases => seq.serialize_element(
                    &cases.iter().map(|case| case.as_str()).collect::<Vec<_>>(),
                )?,
            },
            Parameter::Text(text) => seq.serialize_element(text)?,
            Parameter::Length(length) => seq.serialize_element(length)?,
        }

        seq.end()
    }
}

impl<'de> Deserialize<'de> for RawRule {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(RawRuleVisitor)
    }
}

/// A visitor for `[severity, applicability, parameter?]` arrays.
struct RawRuleVisitor;

impl<'de> Visitor<'de> for RawRuleVisitor {
    type Value = RawRule;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an array [severity, applicability, parameter?]")
    }

    fn visit_seq<A: SeqAccess<'de>>(
        self,
        mut seq: A,
    ) -> Result<Self::Value, A::Error> {
        let severity = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let applicability = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        let parameter = seq.next_element()?;

        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(4, &self));
        }

        Ok(RawRule {
            severity,
            applicability,
            parameter,
        })
    }
}

/// Parses a case name for `rule`.
fn parse_case(rule: RuleName, case: &str) -> Result<Case, RuleError> {
    case.parse().map_err(|UnknownCase(case)| RuleError::UnknownCase {
        rule,
        case,
    })
}

impl RuleName {
    /// All the known rules.
    pub const ALL: [Self; 12] = [
        Self::TypeEnum,
        Self::TypeCase,
        Self::TypeEmpty,
        Self::SubjectCase,
        Self::SubjectEmpty,
        Self::SubjectFullStop,
        Self::HeaderMaxLength,
        Self::HeaderTrim,
        Self::BodyLeadingBlank,
        Self::BodyMaxLineLength,
        Self::FooterLeadingBlank,
        Self::FooterMaxLineLength,
    ];

    /// Returns the name of the rule as written in the configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeEnum => "type-enum",
            Self::TypeCase => "type-case",
            Self::TypeEmpty => "type-empty",
            Self::SubjectCase => "subject-case",
            Self::SubjectEmpty => "subject-empty",
            Self::SubjectFullStop => "subject-full-stop",
            Self::HeaderMaxLength => "header-max-length",
            Self::HeaderTrim => "header-trim",
            Self::BodyLeadingBlank => "body-leading-blank",
            Self::BodyMaxLineLength => "body-max-line-length",
            Self::FooterLeadingBlank => "footer-leading-blank",
            Self::FooterMaxLineLength => "footer-max-line-length",
        }
    }

    /// Returns whether the rule only looks at the header.
    pub const fn applies_to_header(self) -> bool {
        !matches!(
            self,
            Self::BodyLeadingBlank
                | Self::BodyMaxLineLength
                | Self::FooterLeadingBlank
                | Self::FooterMaxLineLength
        )
    }

    /// Returns the kind of parameter the rule expects.
    const fn parameter_kind(self) -> ParameterKind {
        match self {
            Self::TypeEnum => ParameterKind::Types,
            Self::TypeCase | Self::SubjectCase => ParameterKind::Cases,
            Self::SubjectFullStop => ParameterKind::Text,
            Self::HeaderMaxLength
            | Self::BodyMaxLineLength
            | Self::FooterMaxLineLength => ParameterKind::Length,
            Self::TypeEmpty
            | Self::SubjectEmpty
            | Self::HeaderTrim
            | Self::BodyLeadingBlank
            | Self::FooterLeadingBlank => ParameterKind::Nothing,
        }
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ParameterKind {
    /// Describes the expected parameter for error messages.
    const fn describe(self) -> &'static str {
        match self {
            Self::Nothing => "no parameter",
            Self::Types => "a list of types",
            Self::Cases => "a case or a list of cases",
            Self::Text => "a string",
            Self::Length => "a length",
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = InvalidSeverity;

    fn try_from(level: u8) -> Result<Self, InvalidSeverity> {
        match level {
            0 => Ok(Self::Off),
            1 => Ok(Self::Warning),
            2 => Ok(Self::Error),
            level => Err(InvalidSeverity(level)),
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Off => 0,
            Severity::Warning => 1,
            Severity::Error => 2,
        }
    }
}

impl Case {
    /// Returns the canonical name of the case.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lower => "lower-case",
            Self::Upper => "upper-case",
            Self::Camel => "camel-case",
            Self::Kebab => "kebab-case",
            Self::Pascal => "pascal-case",
            Self::Sentence => "sentence-case",
            Self::Snake => "snake-case",
            Self::Start => "start-case",
        }
    }
}

impl FromStr for Case {
    type Err = UnknownCase;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "lower-case" | "lowercase" | "lowerCase" => Ok(Self::Lower),
            "upper-case" | "uppercase" => Ok(Self::Upper),
            "camel-case" => Ok(Self::Camel),
            "kebab-case" => Ok(Self::Kebab),
            "pascal-case" => Ok(Self::Pascal),
            "sentence-case" | "sentencecase" => Ok(Self::Sentence),
            "snake-case" => Ok(Self::Snake),
            "start-case" => Ok(Self::Start),
            name => Err(UnknownCase(name.to_owned())),
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
