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

//! Parsing of conventional commit messages.

use std::sync::LazyLock;

use regex::Regex;

/// The line after which Git ignores the rest of the message.
const SCISSORS: &str = "# ------------------------ >8 ------------------------";

/// Matches a conventional commit header.
#[expect(clippy::expect_used, reason = "The regex is known to be valid.")]
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w*)(?:\((.*)\))?(!)?: (.*)$").expect("invalid header regex")
});

/// Matches a line that always starts the footer.
#[expect(clippy::expect_used, reason = "The regex is known to be valid.")]
static FOOTER_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:BREAKING[ -]CHANGE: |(?i:close[sd]?|fix(?:e[sd])?|resolve[sd]?) #\d+)",
    )
    .expect("invalid footer keyword regex")
});

/// Matches a trailer line, which starts the footer after a blank line.
#[expect(clippy::expect_used, reason = "The regex is known to be valid.")]
static FOOTER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][\w-]*(?:: | #)").expect("invalid footer token regex")
});

/// A commit message split into its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// The first line.
    pub header: String,
    /// The type, when the header is conventional.
    pub r#type: Option<String>,
    /// The scope, when present.
    pub scope: Option<String>,
    /// Whether the header is marked with `!`.
    pub breaking: bool,
    /// The subject, when the header is conventional.
    pub subject: Option<String>,
    /// The body, when present.
    pub body: Option<String>,
    /// The footer, when present.
    pub footer: Option<String>,
    /// Whether a blank line separates the header from the body.
    body_leading_blank: bool,
    /// Whether a blank line separates the footer from what precedes it.
    footer_leading_blank: bool,
}

impl Message {
    /// Parses a raw commit message.
    ///
    /// Comment lines are dropped, as is anything after the scissors line.
    pub fn parse(raw: &str) -> Self {
        let lines = clean(raw);
        let Some((header, rest)) = lines.split_first() else {
            return Self::default();
        };

        let mut message = Self {
            header: (*header).to_owned(),
            ..Self::default()
        };

        if let Some(captures) = HEADER.captures(header) {
            let group = |index| captures.get(index).map(|group| group.as_str());

            message.r#type = non_empty(group(1));
            message.scope = non_empty(group(2));
            message.breaking = group(3).is_some();
            message.subject = non_empty(group(4));
        }

        let footer_start = rest
            .iter()
            .enumerate()
            .position(|(index, line)| {
                let after_blank = match index.checked_sub(1) {
                    Some(previous) => rest.get(previous).is_some_and(is_blank),
                    None => false,
                };
                FOOTER_KEYWORD.is_match(line)
                    || after_blank && FOOTER_TOKEN.is_match(line)
            })
            .unwrap_or(rest.len());

        let (body, footer) = rest.split_at(footer_start);

        message.body = join(trim_blank(body));
        message.body_leading_blank = rest.first().is_some_and(is_blank);

        message.footer = join(footer);
        message.footer_leading_blank = footer_start
            .checked_sub(1)
            .and_then(|previous| rest.get(previous))
            .is_some_and(is_blank);

        message
    }

    /// Returns whether the body is preceded by a blank line.
    pub const fn has_body_leading_blank(&self) -> bool {
        self.body_leading_blank
    }

    /// Returns whether the footer is preceded by a blank line.
    pub const fn has_footer_leading_blank(&self) -> bool {
        self.footer_leading_blank
    }
}

/// Removes comments and surrounding blank lines from a raw message.
fn clean(raw: &str) -> Vec<&str> {
    let lines: Vec<&str> = raw
        .lines()
        .take_while(|line| *line != SCISSORS)
        .filter(|line| !line.starts_with('#'))
        .collect();

    trim_blank(&lines).to_vec()
}

/// Removes leading and trailing blank lines.
fn trim_blank<'a, 'b>(lines: &'a [&'b str]) -> &'a [&'b str] {
    let start = lines
        .iter()
        .position(|line| !is_blank(line))
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|line| !is_blank(line))
        .map_or(start, |last| last + 1);

    lines.get(start..end).unwrap_or_default()
}

/// Returns whether `line` only contains whitespace.
fn is_blank(line: &&str) -> bool {
    line.trim().is_empty()
}

/// Joins lines, returning `None` when there are none.
fn join(lines: &[&str]) -> Option<String> {
    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// Returns `None` for missing or empty values.
fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|value| !value.is_empty()).map(ToOwned::to_owned)
}
