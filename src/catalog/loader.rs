// SPDX-License-Identifier: PMPL-1.0-or-later

//! Catalog document parsing and validation.
//!
//! Documents are deserialized into loose `*Spec` payloads first, then bound
//! to the closed enumerations. Any value that does not resolve aborts the
//! load.

use super::{CommentEntry, StatusDatabase, StatusEntry};
use crate::i18n::Lang;
use crate::types::{Service, Stage, StatusCode};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("status catalog not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read status catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed status catalog: {0}")]
    Malformed(String),

    #[error("malformed status catalog: entry {entry}: invalid {field} '{value}'")]
    InvalidValue {
        entry: usize,
        field: &'static str,
        value: String,
    },

    #[error("malformed status catalog: entry {entry}: missing {field}")]
    MissingField { entry: usize, field: &'static str },

    #[error("malformed status catalog: status code {code} appears in entries {first} and {second}")]
    DuplicateCode {
        code: StatusCode,
        first: usize,
        second: usize,
    },

    #[error("malformed status catalog: entry {entry} ({code}) has more than one '{lang}' comment")]
    DuplicateComment {
        entry: usize,
        code: StatusCode,
        lang: Lang,
    },
}

impl CatalogError {
    /// True for every failure that means "the document exists but is wrong".
    pub fn is_malformed(&self) -> bool {
        !matches!(self, CatalogError::NotFound(_) | CatalogError::Io { .. })
    }
}

#[derive(Debug, Deserialize)]
struct CatalogSpec {
    statuses: Vec<StatusSpec>,
}

#[derive(Debug, Deserialize)]
struct StatusSpec {
    #[serde(default)]
    index: Option<IndexSpec>,
    #[serde(default)]
    stage: Option<String>,
    #[serde(default)]
    service: Option<String>,
    api_code: String,
    #[serde(default)]
    comments: Option<CommentsSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IndexSpec {
    Text(String),
    Int(i64),
    Float(f64),
}

impl IndexSpec {
    fn into_string(self) -> String {
        match self {
            IndexSpec::Text(text) => text,
            IndexSpec::Int(value) => value.to_string(),
            IndexSpec::Float(value) => value.to_string(),
        }
    }
}

/// Comments are usually a list of `{language, comment}` pairs; the older
/// `{ "fr": "...", "en": "..." }` map form is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CommentsSpec {
    List(Vec<CommentSpec>),
    Map(BTreeMap<String, String>),
}

#[derive(Debug, Deserialize)]
struct CommentSpec {
    language: String,
    comment: String,
}

impl CommentsSpec {
    fn into_pairs(self) -> Vec<(String, String)> {
        match self {
            CommentsSpec::List(list) => list
                .into_iter()
                .map(|spec| (spec.language, spec.comment))
                .collect(),
            CommentsSpec::Map(map) => map.into_iter().collect(),
        }
    }
}

pub(super) fn load_file(path: &Path) -> Result<StatusDatabase, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            CatalogError::NotFound(path.to_path_buf())
        } else {
            CatalogError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let db = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => parse_yaml(&content)?,
        _ => parse_json(&content)?,
    };
    debug!(path = %path.display(), statuses = db.len(), "loaded status catalog");
    Ok(db)
}

pub(super) fn parse_json(content: &str) -> Result<StatusDatabase, CatalogError> {
    let spec: CatalogSpec =
        serde_json::from_str(content).map_err(|err| CatalogError::Malformed(err.to_string()))?;
    build(spec)
}

pub(super) fn parse_yaml(content: &str) -> Result<StatusDatabase, CatalogError> {
    let spec: CatalogSpec =
        serde_yaml::from_str(content).map_err(|err| CatalogError::Malformed(err.to_string()))?;
    build(spec)
}

fn build(spec: CatalogSpec) -> Result<StatusDatabase, CatalogError> {
    let mut seen: HashMap<StatusCode, usize> = HashMap::new();
    let mut statuses = Vec::with_capacity(spec.statuses.len());

    for (position, status) in spec.statuses.into_iter().enumerate() {
        let entry_no = position + 1;
        let entry = bind_entry(entry_no, status)?;
        if let Some(first) = seen.insert(entry.api_code, entry_no) {
            return Err(CatalogError::DuplicateCode {
                code: entry.api_code,
                first,
                second: entry_no,
            });
        }
        statuses.push(entry);
    }

    Ok(StatusDatabase::from_entries(statuses))
}

fn bind_entry(entry: usize, spec: StatusSpec) -> Result<StatusEntry, CatalogError> {
    let api_code =
        StatusCode::from_key(&spec.api_code).ok_or_else(|| CatalogError::InvalidValue {
            entry,
            field: "api_code",
            value: spec.api_code.clone(),
        })?;

    let stage_raw = spec.stage.ok_or(CatalogError::MissingField {
        entry,
        field: "stage",
    })?;
    let stage = Stage::parse(&stage_raw).ok_or_else(|| CatalogError::InvalidValue {
        entry,
        field: "stage",
        value: stage_raw.clone(),
    })?;

    let service = match spec.service {
        Some(raw) => Some(Service::parse(&raw).ok_or_else(|| CatalogError::InvalidValue {
            entry,
            field: "service",
            value: raw.clone(),
        })?),
        None => None,
    };

    let mut comments: Vec<CommentEntry> = Vec::new();
    for (language, comment) in spec.comments.map(CommentsSpec::into_pairs).unwrap_or_default() {
        let language = Lang::from_code(&language).ok_or_else(|| CatalogError::InvalidValue {
            entry,
            field: "language",
            value: language.clone(),
        })?;
        if comments.iter().any(|existing| existing.language == language) {
            return Err(CatalogError::DuplicateComment {
                entry,
                code: api_code,
                lang: language,
            });
        }
        comments.push(CommentEntry { language, comment });
    }

    Ok(StatusEntry {
        index: spec.index.map(IndexSpec::into_string),
        stage,
        service,
        api_code,
        comments,
    })
}
