// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sources of the raw application status.
//!
//! The portal only exposes the status through a JavaScript object built
//! after login (the "dossier"). Driving a browser to obtain it is left to
//! an external helper; this module defines the seam ([`StatusSource`]) and
//! the sources the CLI and GUI can be pointed at.

mod command;
mod file;

pub use command::{FetchCommand, DEFAULT_FETCH_TIMEOUT};
pub use file::DossierFile;

use crate::workflow::Credentials;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// The application record intercepted from the portal.
///
/// Only `statut` is interpreted; everything else is carried along untouched
/// so verbose logs show the full payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dossier {
    #[serde(default)]
    pub statut: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Dossier {
    pub fn with_status(token: impl Into<String>) -> Self {
        Self {
            statut: Some(token.into()),
            extra: Map::new(),
        }
    }

    /// Parse helper output: either the dossier object itself or a wrapper
    /// `{ "dossier": { ... } }`. Blank input means "nothing obtained".
    pub fn parse(raw: &str) -> Result<Option<Self>, AutomationError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let mut value: Value = serde_json::from_str(raw)
            .map_err(|err| AutomationError::InvalidPayload(err.to_string()))?;
        if let Some(inner) = value.get_mut("dossier").map(Value::take) {
            value = inner;
        }
        match value {
            Value::Null => Ok(None),
            Value::Object(_) => serde_json::from_value(value)
                .map(Some)
                .map_err(|err| AutomationError::InvalidPayload(err.to_string())),
            other => Err(AutomationError::InvalidPayload(format!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("timed out after {}s waiting for the application status", .0.as_secs())]
    Timeout(Duration),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to run status helper '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("status helper exited with {code}: {stderr}")]
    Helper { code: String, stderr: String },

    #[error("invalid dossier payload: {0}")]
    InvalidPayload(String),
}

/// Anything that can log in with [`Credentials`] and hand back the dossier.
///
/// `Ok(None)` means the source ran but obtained nothing.
pub trait StatusSource {
    fn fetch_dossier(&mut self, credentials: &Credentials)
        -> Result<Option<Dossier>, AutomationError>;
}

/// A source that always answers with the same status token.
#[derive(Debug, Clone)]
pub struct FixedToken(pub String);

impl StatusSource for FixedToken {
    fn fetch_dossier(
        &mut self,
        _credentials: &Credentials,
    ) -> Result<Option<Dossier>, AutomationError> {
        Ok(Some(Dossier::with_status(self.0.clone())))
    }
}
