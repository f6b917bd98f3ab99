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

//! Letter case detection.
//!
//! A value is in a given case when converting it to that case leaves it
//! unchanged. Quoted fragments are removed first, as they often contain proper
//! names.

use std::sync::LazyLock;

use itertools::Itertools as _;
use regex::Regex;

use crate::config::rules::Case;

/// Matches quoted or backticked fragments.
#[expect(clippy::expect_used, reason = "The regex is known to be valid.")]
static QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"`.*?`|".*?"|'.*?'"#).expect("invalid quote regex")
});

/// Returns whether `raw` is written in `case`.
///
/// Empty values and values starting with a digit are considered to be in any
/// case.
pub fn is_case(raw: &str, case: Case) -> bool {
    let input = QUOTED.replace_all(raw, "");
    let input = input.trim();
    let transformed = to_case(input, case);

    transformed.is_empty()
        || transformed.starts_with(|c: char| c.is_ascii_digit())
        || transformed == input
}

/// Converts `input` to `case`.
pub fn to_case(input: &str, case: Case) -> String {
    match case {
        Case::Lower => input.to_lowercase(),
        Case::Upper => input.to_uppercase(),
        Case::Sentence => upper_first(input),
        Case::Start => {
            words(input).iter().map(|word| upper_first(word)).join(" ")
        }
        Case::Camel => camel_case(input),
        Case::Pascal => upper_first(&camel_case(input)),
        Case::Kebab => lowercase_words(input).join("-"),
        Case::Snake => lowercase_words(input).join("_"),
    }
}

/// Splits `input` into lowercase words.
fn lowercase_words(input: &str) -> Vec<String> {
    words(input).iter().map(|word| word.to_lowercase()).collect()
}

/// Converts `input` to camelCase.
fn camel_case(input: &str) -> String {
    words(input)
        .iter()
        .enumerate()
        .map(|(index, word)| {
            if index == 0 {
                word.to_lowercase()
            } else {
                capitalise(word)
            }
        })
        .collect()
}

/// Splits `input` into words.
///
/// Words are separated by any non-alphanumeric character, by a lowercase to
/// uppercase transition, at the end of an acronym, and between letters and
/// digits. Apostrophes are dropped.
fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input
        .chars()
        .filter(|c| !matches!(c, '\'' | '’'))
        .collect();

    let mut words = Vec::new();
    let mut current = String::new();

    for (index, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(previous) = current.chars().last() {
            let next = chars.get(index + 1).copied();
            let acronym_end = previous.is_uppercase()
                && c.is_uppercase()
                && next.is_some_and(char::is_lowercase);

            if (previous.is_lowercase() && c.is_uppercase())
                || acronym_end
                || previous.is_alphabetic() && c.is_numeric()
                || previous.is_numeric() && c.is_alphabetic()
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// Uppercases the first character of `s`, keeping the rest as is.
fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Uppercases the first character of `s` and lowercases the rest.
fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => {
            c.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
    }
}

#[cfg(test)]
mod test {
    #![allow(clippy::pedantic, clippy::restriction)]

    use super::*;

    #[test]
    fn splits_words_on_separators_and_case_changes() {
        assert_eq!(words("add new-feature"), ["add", "new", "feature"]);
        assert_eq!(words("addNewFeature"), ["add", "New", "Feature"]);
        assert_eq!(words("XMLHttpRequest"), ["XML", "Http", "Request"]);
        assert_eq!(words("v2ready"), ["v", "2", "ready"]);
        assert_eq!(words("don't panic"), ["dont", "panic"]);
    }

    #[test]
    fn converts_to_each_case() {
        let input = "add new feature";

        assert_eq!(to_case(input, Case::Lower), "add new feature");
        assert_eq!(to_case(input, Case::Upper), "ADD NEW FEATURE");
        assert_eq!(to_case(input, Case::Sentence), "Add new feature");
        assert_eq!(to_case(input, Case::Start), "Add New Feature");
        assert_eq!(to_case(input, Case::Camel), "addNewFeature");
        assert_eq!(to_case(input, Case::Pascal), "AddNewFeature");
        assert_eq!(to_case(input, Case::Kebab), "add-new-feature");
        assert_eq!(to_case(input, Case::Snake), "add_new_feature");
    }

    #[test]
    fn detects_start_case() {
        assert!(is_case("Add New Feature", Case::Start));
        assert!(!is_case("add new feature", Case::Start));
        assert!(!is_case("Add new feature", Case::Start));
    }

    #[test]
    fn detects_pascal_case() {
        assert!(is_case("AddNewFeature", Case::Pascal));
        assert!(!is_case("Add New Feature", Case::Pascal));
    }

    #[test]
    fn detects_upper_and_lower_case() {
        assert!(is_case("ADD FEATURE", Case::Upper));
        assert!(!is_case("Add feature", Case::Upper));
        assert!(is_case("feat", Case::Lower));
        assert!(!is_case("Feat", Case::Lower));
    }

    #[test]
    fn ignores_quoted_fragments() {
        assert!(is_case("update `README` file", Case::Lower));
        assert!(is_case("bump \"Serde\" version", Case::Lower));
    }

    #[test]
    fn empty_and_numeric_values_match_any_case() {
        assert!(is_case("", Case::Start));
        assert!(is_case("`Only Quoted`", Case::Upper));
        assert!(is_case("42 things", Case::Pascal));
    }
}
