// SPDX-License-Identifier: PMPL-1.0-or-later

//! Dossier saved to disk, e.g. copied from the browser console.

use super::{AutomationError, Dossier, StatusSource};
use crate::workflow::Credentials;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DossierFile {
    path: PathBuf,
}

impl DossierFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StatusSource for DossierFile {
    fn fetch_dossier(
        &mut self,
        _credentials: &Credentials,
    ) -> Result<Option<Dossier>, AutomationError> {
        debug!(path = %self.path.display(), "reading saved dossier");
        let content = fs::read_to_string(&self.path).map_err(|source| AutomationError::Io {
            path: self.path.clone(),
            source,
        })?;
        Dossier::parse(&content)
    }
}
