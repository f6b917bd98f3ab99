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

//! Configuration for git-conform, version 0.1.

// NOTE: Never update the fields of the types defined in this file. Create a new
// version instead.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::rules::RuleSet;

/// The git-conform configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The version of the configuration.
    pub version: String,
    /// The preset the rules are merged on top of.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Preset>,
    /// The lint rules.
    #[serde(default)]
    pub rules: RuleSet,
    /// The valid commit types.
    #[serde(default)]
    pub types: TypeCatalog,
    /// The interactive prompt.
    #[serde(default)]
    pub prompt: Prompt,
    /// The templates.
    #[serde(default)]
    pub templates: Templates,
}

/// A rule preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// The conventional commits rules.
    Conventional,
}

/// The catalog of commit types, in menu order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeCatalog(pub IndexMap<String, TypeInfo>);

/// The documentation of a commit type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// What the type is used for.
    pub description: String,
    /// The title of the type in a changelog.
    pub title: String,
    /// An optional glyph to show in the menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

/// The interactive prompt configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompt {
    /// The messages shown by the prompt.
    pub messages: Messages,
    /// The questions asked by the prompt.
    pub questions: Questions,
}

/// Messages shown by the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// The input to skip an optional question.
    pub skip: String,
    /// The input to commit without answering the remaining questions.
    pub commit: String,
    /// The message shown when the commit message is invalid.
    pub invalid: String,
}

/// Questions asked by the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Questions {
    /// Asks for the type.
    pub r#type: Question,
    /// Asks for the scope.
    pub scope: Question,
    /// Asks for the subject.
    pub subject: Question,
    /// Asks for the body.
    pub body: Question,
    /// Asks whether there are breaking changes.
    pub is_breaking: Question,
    /// Asks for a body when there is a breaking change.
    pub breaking_body: Question,
    /// Asks for the breaking change description.
    pub breaking: Question,
    /// Asks whether issues are affected.
    pub is_issue_affected: Question,
    /// Asks for a body when issues are affected.
    pub issues_body: Question,
    /// Asks for the issue references.
    pub issues: Question,
}

/// A question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The text shown to the user.
    pub description: String,
}

/// Templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Templates {
    /// The commit message template.
    pub commit: String,
}
