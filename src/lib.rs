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

//! A Git extension to lint and author conventional commits.
//!
//! git-conform reads a declarative descriptor from `git-conform.toml`, or uses
//! its built-in one, and provides:
//!
//! - `git conform lint`, to validate commit messages against the rules,
//! - `git conform commit`, to author a commit message through a guided prompt,
//! - `git conform init`, to write a descriptor in the repository,
//! - `git conform print-config`, to show the effective descriptor.

pub mod command;
pub mod config;
pub mod helpers;
pub mod lint;
pub mod tracing;

pub use command::GitConform;
