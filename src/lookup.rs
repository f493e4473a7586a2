// SPDX-License-Identifier: PMPL-1.0-or-later

//! Status description lookup.
//!
//! Maps a raw status token and a language to the text a user should read.
//! Pure function over a loaded [`StatusDatabase`]: no I/O, no caching.

use crate::catalog::StatusDatabase;
use crate::i18n::Lang;
use crate::types::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The token does not normalize to any known status code. Carries the
    /// token exactly as received.
    #[error("Unknown status code: {0}")]
    UnknownCode(String),

    /// The code is known but the catalog has no entry for it.
    #[error("Status not found in catalog: {0}")]
    NotInCatalog(StatusCode),
}

/// Describe a raw status token in `lang`.
///
/// Resolution order:
/// 1. normalize `token` to a [`StatusCode`] (case-insensitive key match),
///    failing with [`LookupError::UnknownCode`];
/// 2. find the catalog entry for that code, failing with
///    [`LookupError::NotInCatalog`];
/// 3. return the entry's comment in `lang`, or the code's French display
///    string when the entry has no such comment.
pub fn describe<'a>(
    token: &str,
    lang: Lang,
    database: &'a StatusDatabase,
) -> Result<&'a str, LookupError> {
    let code =
        StatusCode::from_key(token).ok_or_else(|| LookupError::UnknownCode(token.to_string()))?;
    describe_code(code, lang, database)
}

/// Same as [`describe`] for an already resolved code.
pub fn describe_code(
    code: StatusCode,
    lang: Lang,
    database: &StatusDatabase,
) -> Result<&str, LookupError> {
    let entry = database
        .find(code)
        .ok_or(LookupError::NotInCatalog(code))?;
    Ok(entry.comment(lang).unwrap_or_else(|| code.display()))
}
