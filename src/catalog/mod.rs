// SPDX-License-Identifier: PMPL-1.0-or-later

//! Status catalog: every known status code with its stage, handling service
//! and localized descriptions.
//!
//! The catalog is loaded in one piece, validated, and never mutated
//! afterwards. Loading is all-or-nothing: one bad entry fails the whole
//! document.

mod loader;

pub use loader::CatalogError;

use crate::i18n::Lang;
use crate::types::{Service, Stage, StatusCode};
use serde::Serialize;
use std::path::Path;

const EMBEDDED_CATALOG: &str = include_str!("../../data/status_data.json");

/// One localized description of a status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentEntry {
    pub language: Lang,
    pub comment: String,
}

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<Service>,
    pub api_code: StatusCode,
    pub comments: Vec<CommentEntry>,
}

impl StatusEntry {
    /// Comment text in `lang`, if the entry has a non-blank one.
    pub fn comment(&self, lang: Lang) -> Option<&str> {
        self.comments
            .iter()
            .find(|entry| entry.language == lang)
            .map(|entry| entry.comment.as_str())
            .filter(|text| !text.trim().is_empty())
    }
}

/// Validated, read-only collection of status entries.
///
/// Invariants established at load time: every `api_code` is unique and
/// every entry holds at most one comment per language.
#[derive(Debug, Clone, Serialize)]
pub struct StatusDatabase {
    statuses: Vec<StatusEntry>,
}

impl StatusDatabase {
    /// Load a catalog from disk. `.yaml`/`.yml` files are parsed as YAML,
    /// everything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        loader::load_file(path)
    }

    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        loader::parse_json(content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        loader::parse_yaml(content)
    }

    /// The catalog shipped inside the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json_str(EMBEDDED_CATALOG)
    }

    /// Load `path` when given, the embedded catalog otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }

    pub(crate) fn from_entries(statuses: Vec<StatusEntry>) -> Self {
        Self { statuses }
    }

    /// Entry for `code`, if the catalog has one.
    pub fn find(&self, code: StatusCode) -> Option<&StatusEntry> {
        self.statuses.iter().find(|entry| entry.api_code == code)
    }

    pub fn entries(&self) -> &[StatusEntry] {
        &self.statuses
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_is_valid() {
        let db = StatusDatabase::embedded().expect("embedded catalog should load");
        assert!(!db.is_empty());
        assert!(db.find(StatusCode::Draft).is_some());
    }

    #[test]
    fn embedded_catalog_covers_every_code_in_every_language() {
        let db = StatusDatabase::embedded().expect("embedded catalog should load");
        for code in StatusCode::all() {
            let entry = db
                .find(code)
                .unwrap_or_else(|| panic!("{} missing from embedded catalog", code));
            for lang in Lang::all() {
                assert!(
                    entry.comment(*lang).is_some(),
                    "{} has no {} comment",
                    code,
                    lang
                );
            }
        }
    }

    #[test]
    fn blank_comment_counts_as_missing() {
        let entry = StatusEntry {
            index: None,
            stage: Stage::DepotDemande,
            service: None,
            api_code: StatusCode::Draft,
            comments: vec![CommentEntry {
                language: Lang::En,
                comment: "  ".to_string(),
            }],
        };
        assert_eq!(entry.comment(Lang::En), None);
    }
}
