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

//! Evaluation of the lint rules.

use itertools::Itertools as _;

use super::{case::is_case, message::Message};
use crate::config::rules::{Case, Parameter, Rule, RuleName};

/// The outcome of a rule: `Err` holds the description of the violation.
pub type Outcome = Result<(), String>;

/// Evaluates `rule` against `message`.
///
/// `allowed_types` is the list used by `type-enum`.
pub fn evaluate(
    name: RuleName,
    rule: &Rule,
    message: &Message,
    allowed_types: &[String],
) -> Outcome {
    let negated = rule.is_negated();

    match (name, &rule.parameter) {
        (RuleName::TypeEnum, _) => type_enum(message, negated, allowed_types),
        (RuleName::TypeCase, Parameter::Cases(cases)) => {
            ensure_cases("type", message.r#type.as_deref(), cases, negated)
        }
        (RuleName::TypeEmpty, _) => {
            ensure_empty("type", message.r#type.as_deref(), negated)
        }
        (RuleName::SubjectCase, Parameter::Cases(cases)) => {
            subject_case(message, cases, negated)
        }
        (RuleName::SubjectEmpty, _) => {
            ensure_empty("subject", message.subject.as_deref(), negated)
        }
        (RuleName::SubjectFullStop, Parameter::Text(stop)) => {
            subject_full_stop(message, stop, negated)
        }
        (RuleName::HeaderMaxLength, Parameter::Length(max)) => {
            header_max_length(message, *max)
        }
        (RuleName::HeaderTrim, _) => header_trim(message),
        (RuleName::BodyLeadingBlank, _) => ensure_leading_blank(
            "body",
            message.body.is_some(),
            message.has_body_leading_blank(),
            negated,
        ),
        (RuleName::BodyMaxLineLength, Parameter::Length(max)) => {
            max_line_length("body", message.body.as_deref(), *max)
        }
        (RuleName::FooterLeadingBlank, _) => ensure_leading_blank(
            "footer",
            message.footer.is_some(),
            message.has_footer_leading_blank(),
            negated,
        ),
        (RuleName::FooterMaxLineLength, Parameter::Length(max)) => {
            max_line_length("footer", message.footer.as_deref(), *max)
        }
        (name, parameter) => {
            tracing::warn!(%name, ?parameter, "mismatched rule parameter");
            Ok(())
        }
    }
}

/// Builds a `<field> must [not ]<predicate>` message.
fn must(field: &str, negated: bool, predicate: &str) -> String {
    if negated {
        format!("{field} must not {predicate}")
    } else {
        format!("{field} must {predicate}")
    }
}

/// Builds a `<field> may not|must <predicate>` message.
fn may(field: &str, negated: bool, predicate: &str) -> String {
    if negated {
        format!("{field} may not {predicate}")
    } else {
        format!("{field} must {predicate}")
    }
}

/// Returns `Ok` when `condition` matches the direction of the rule.
fn outcome(
    condition: bool,
    negated: bool,
    message: impl FnOnce() -> String,
) -> Outcome {
    if condition == negated {
        Err(message())
    } else {
        Ok(())
    }
}

/// `type-enum`: the type must be one of the allowed types.
fn type_enum(message: &Message, negated: bool, allowed: &[String]) -> Outcome {
    let Some(r#type) = message.r#type.as_deref() else {
        return Ok(());
    };

    let listed = allowed.iter().any(|allowed| allowed == r#type);
    outcome(listed, negated, || {
        must("type", negated, &format!("be one of [{}]", allowed.join(", ")))
    })
}

/// `*-case`: the value must be in one of the cases.
fn ensure_cases(
    field: &str,
    value: Option<&str>,
    cases: &[Case],
    negated: bool,
) -> Outcome {
    let Some(value) = value.filter(|value| !value.is_empty()) else {
        return Ok(());
    };

    let matches = cases.iter().any(|case| is_case(value, *case));
    outcome(matches, negated, || {
        must(field, negated, &format!("be {}", cases.iter().join(", ")))
    })
}

/// `subject-case`, which ignores subjects not starting with a letter.
fn subject_case(message: &Message, cases: &[Case], negated: bool) -> Outcome {
    let subject = message
        .subject
        .as_deref()
        .filter(|subject| subject.starts_with(char::is_alphabetic));

    ensure_cases("subject", subject, cases, negated)
}

/// `*-empty`: the value must (not) be empty.
fn ensure_empty(field: &str, value: Option<&str>, negated: bool) -> Outcome {
    let empty = value.is_none_or(str::is_empty);
    outcome(empty, negated, || may(field, negated, "be empty"))
}

/// `subject-full-stop`: the header must (not) end with `stop`.
fn subject_full_stop(message: &Message, stop: &str, negated: bool) -> Outcome {
    let header = message.header.as_str();

    // A header like `feat:` has no subject to check.
    if header.ends_with(':') && header.find(':') == Some(header.len() - 1) {
        return Ok(());
    }

    let has_stop = header.ends_with(stop) && !header.ends_with("...");
    outcome(has_stop, negated, || {
        may("subject", negated, "end with full stop")
    })
}

/// `header-max-length`: the header must not be longer than `max`.
fn header_max_length(message: &Message, max: usize) -> Outcome {
    let length = message.header.chars().count();

    if length <= max {
        Ok(())
    } else {
        Err(format!(
            "header must not be longer than {max} characters, \
            current length is {length}"
        ))
    }
}

/// `header-trim`: the header must not be surrounded by whitespace.
fn header_trim(message: &Message) -> Outcome {
    let header = message.header.as_str();
    let leading = header.starts_with(char::is_whitespace);
    let trailing = header.ends_with(char::is_whitespace);

    match (leading, trailing) {
        (false, false) => Ok(()),
        (true, true) => {
            Err(String::from("header must not be surrounded by whitespace"))
        }
        (true, false) => {
            Err(String::from("header must not start with whitespace"))
        }
        (false, true) => Err(String::from("header must not end with whitespace")),
    }
}

/// `*-leading-blank`: the part must be preceded by a blank line.
fn ensure_leading_blank(
    field: &str,
    present: bool,
    has_leading_blank: bool,
    negated: bool,
) -> Outcome {
    if !present {
        return Ok(());
    }

    outcome(has_leading_blank, negated, || {
        may(field, negated, "have leading blank line")
    })
}

/// `*-max-line-length`: every line must not be longer than `max`.
fn max_line_length(field: &str, text: Option<&str>, max: usize) -> Outcome {
    let Some(text) = text else {
        return Ok(());
    };

    if text.lines().all(|line| line.chars().count() <= max) {
        Ok(())
    } else {
        Err(format!(
            "{field}'s lines must not be longer than {max} characters"
        ))
    }
}
