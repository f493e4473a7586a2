// SPDX-License-Identifier: PMPL-1.0-or-later

//! Status check orchestration shared by the CLI and the GUI.
//!
//! Validates the credentials, asks a [`StatusSource`] for the dossier,
//! resolves its status token and shapes everything into a
//! [`StatusCheckResult`]. Per-request failures never escape as errors; they
//! become `success: false` results carrying a message for the user.

use crate::automation::{AutomationError, StatusSource};
use crate::catalog::StatusDatabase;
use crate::i18n::Lang;
use crate::lookup::{describe_code, LookupError};
use crate::types::StatusCode;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, error, info};

pub const DEFAULT_BASE_URL: &str = "https://administration-etrangers-en-france.interieur.gouv.fr";

pub const MSG_MISSING_CREDENTIALS: &str = "Username and password must be provided.";
pub const MSG_NO_RESPONSE: &str = "No response received from server.";
pub const MSG_STATUS_NOT_FOUND: &str = "Status not found in response.";

/// A password that stays out of logs and debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("Username and password must be provided.")]
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Secret,
    pub base_url: String,
}

impl Credentials {
    /// Build credentials from optional user input.
    ///
    /// Username and password must be non-empty. A missing or blank URL
    /// falls back to [`DEFAULT_BASE_URL`].
    pub fn validate(
        username: Option<&str>,
        password: Option<&str>,
        url: Option<&str>,
    ) -> Result<Self, CredentialError> {
        let username = username.filter(|value| !value.is_empty());
        let password = password.filter(|value| !value.is_empty());
        let (Some(username), Some(password)) = (username, password) else {
            return Err(CredentialError::Missing);
        };
        let base_url = url
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            username: username.to_string(),
            password: Secret::new(password),
            base_url,
        })
    }
}

/// Outcome of one status check, as shown to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCheckResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_code: Option<StatusCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl StatusCheckResult {
    pub fn success(code: StatusCode, description: impl Into<String>) -> Self {
        Self {
            success: true,
            api_code: Some(code),
            description: Some(description.into()),
            error_message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            api_code: None,
            description: None,
            error_message: Some(message.into()),
        }
    }
}

/// Raw user input for a check. Every field may be missing; validation
/// happens inside [`check_status`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckRequest<'a> {
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
    pub url: Option<&'a str>,
    pub language: Lang,
}

/// Run one complete status check.
///
/// The source is not invoked when the credentials are incomplete.
pub fn check_status(
    request: &CheckRequest<'_>,
    source: &mut dyn StatusSource,
    database: &StatusDatabase,
) -> StatusCheckResult {
    let credentials = match Credentials::validate(request.username, request.password, request.url)
    {
        Ok(credentials) => credentials,
        Err(err) => return StatusCheckResult::failure(err.to_string()),
    };

    info!(username = %credentials.username, "checking naturalization status");
    let dossier = match source.fetch_dossier(&credentials) {
        Ok(Some(dossier)) => dossier,
        Ok(None) => return StatusCheckResult::failure(MSG_NO_RESPONSE),
        Err(AutomationError::Timeout(timeout)) => {
            error!(
                timeout_s = timeout.as_secs(),
                "timed out while checking naturalization status, please check your credentials"
            );
            return StatusCheckResult::failure(MSG_NO_RESPONSE);
        }
        Err(err) => {
            error!(error = %err, "status source failed");
            return StatusCheckResult::failure(format!("Error checking status: {}", err));
        }
    };
    debug!(?dossier, "dossier received");

    process_status_token(dossier.statut.as_deref(), request.language, database)
}

/// Like [`check_status`], but the source is only built once the credentials
/// are known to be complete. A failure to build it becomes the result.
pub fn check_status_with<F, E>(
    request: &CheckRequest<'_>,
    resolve_source: F,
    database: &StatusDatabase,
) -> StatusCheckResult
where
    F: FnOnce() -> Result<Box<dyn StatusSource>, E>,
    E: fmt::Display,
{
    if let Err(err) = Credentials::validate(request.username, request.password, request.url) {
        return StatusCheckResult::failure(err.to_string());
    }
    match resolve_source() {
        Ok(mut source) => check_status(request, source.as_mut(), database),
        Err(err) => StatusCheckResult::failure(err.to_string()),
    }
}

/// Turn the raw status token into a result, for callers that already hold
/// the token.
pub fn process_status_token(
    token: Option<&str>,
    language: Lang,
    database: &StatusDatabase,
) -> StatusCheckResult {
    let Some(token) = token.filter(|value| !value.is_empty()) else {
        return StatusCheckResult::failure(MSG_STATUS_NOT_FOUND);
    };

    let Some(code) = StatusCode::from_key(token) else {
        return StatusCheckResult::failure(LookupError::UnknownCode(token.to_string()).to_string());
    };

    match describe_code(code, language, database) {
        Ok(description) => StatusCheckResult::success(code, description),
        Err(err) => StatusCheckResult::failure(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_url_uses_default() {
        let creds = Credentials::validate(Some("user"), Some("pass"), Some("  ")).unwrap();
        assert_eq!(creds.base_url, DEFAULT_BASE_URL);
        let creds = Credentials::validate(Some("user"), Some("pass"), None).unwrap();
        assert_eq!(creds.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let creds =
            Credentials::validate(Some("user"), Some("pass"), Some("https://example.test/"))
                .unwrap();
        assert_eq!(creds.base_url, "https://example.test");
    }

    #[test]
    fn empty_username_or_password_is_rejected() {
        assert_eq!(
            Credentials::validate(Some(""), Some("pass"), None),
            Err(CredentialError::Missing)
        );
        assert_eq!(
            Credentials::validate(Some("user"), None, None),
            Err(CredentialError::Missing)
        );
    }

    #[test]
    fn secret_is_redacted_in_debug() {
        let creds = Credentials::validate(Some("user"), Some("hunter2"), None).unwrap();
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn failure_result_serializes_without_empty_fields() {
        let json = serde_json::to_value(StatusCheckResult::failure("boom")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error_message"], "boom");
        assert!(json.get("api_code").is_none());
    }
}
