// SPDX-License-Identifier: PMPL-1.0-or-later

//! Runtime settings resolved from the environment and command-line flags.
//!
//! Precedence is flag > environment > built-in default. The resolved
//! [`Settings`] value is passed explicitly to whoever needs it.

use crate::automation::{DossierFile, FetchCommand, FixedToken, StatusSource, DEFAULT_FETCH_TIMEOUT};
use crate::catalog::{CatalogError, StatusDatabase};
use crate::i18n::Lang;
use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_USERNAME: &str = "ANEF_WEB_USERNAME";
pub const ENV_PASSWORD: &str = "ANEF_WEB_PASSWORD";
pub const ENV_URL: &str = "ANEF_WEB_URL";
pub const ENV_CATALOG: &str = "ANEF_STATUS_CATALOG";
pub const ENV_FETCH_COMMAND: &str = "ANEF_FETCH_COMMAND";
pub const ENV_FETCH_TIMEOUT: &str = "ANEF_FETCH_TIMEOUT";
pub const ENV_LANGUAGE: &str = "ANEF_LANGUAGE";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub username: Option<String>,
    pub password: Option<String>,
    pub url: Option<String>,
    pub language: Lang,
    /// Catalog file; `None` selects the embedded catalog.
    pub catalog: Option<PathBuf>,
    /// Helper command line, split on whitespace into program and arguments.
    pub fetch_command: Option<String>,
    pub fetch_timeout: Option<Duration>,
    pub dossier: Option<PathBuf>,
    pub status_token: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve settings through an arbitrary variable lookup. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let language = env_language(get(ENV_LANGUAGE))?;
        let fetch_timeout = match get(ENV_FETCH_TIMEOUT) {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };

        Ok(Self {
            username: get(ENV_USERNAME),
            password: get(ENV_PASSWORD),
            url: get(ENV_URL),
            language,
            catalog: get(ENV_CATALOG).map(PathBuf::from),
            fetch_command: get(ENV_FETCH_COMMAND),
            fetch_timeout,
            dossier: None,
            status_token: None,
        })
    }

    pub fn offline_from_env(language: Option<Lang>) -> Result<Self> {
        Self::offline_from_lookup(|key| env::var(key).ok(), language)
    }

    /// Settings for commands that never contact the portal. Only the
    /// catalog path is read, plus the language when none was given.
    pub fn offline_from_lookup<F>(lookup: F, language: Option<Lang>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let language = match language {
            Some(lang) => lang,
            None => env_language(get(ENV_LANGUAGE))?,
        };
        Ok(Self {
            language,
            catalog: get(ENV_CATALOG).map(PathBuf::from),
            ..Self::default()
        })
    }

    pub fn load_catalog(&self) -> Result<StatusDatabase, CatalogError> {
        StatusDatabase::load(self.catalog.as_deref())
    }

    /// True when [`Settings::status_source`] would succeed.
    pub fn has_status_source(&self) -> bool {
        self.status_token.is_some() || self.dossier.is_some() || self.fetch_command.is_some()
    }

    /// Pick the status source: a fixed token first, then a saved dossier,
    /// then the fetch helper.
    pub fn status_source(&self) -> Result<Box<dyn StatusSource>> {
        if let Some(token) = &self.status_token {
            return Ok(Box::new(FixedToken(token.clone())));
        }
        if let Some(path) = &self.dossier {
            return Ok(Box::new(DossierFile::new(path.clone())));
        }
        if let Some(command_line) = &self.fetch_command {
            let mut parts = command_line.split_whitespace().map(str::to_string);
            let program = parts
                .next()
                .ok_or_else(|| anyhow!("{} is empty", ENV_FETCH_COMMAND))?;
            let command = FetchCommand::new(program)
                .with_args(parts.collect())
                .with_timeout(self.fetch_timeout.unwrap_or(DEFAULT_FETCH_TIMEOUT));
            return Ok(Box::new(command));
        }
        Err(anyhow!(
            "no status source configured: pass --fetch-command (or set {}), --dossier or --status",
            ENV_FETCH_COMMAND
        ))
    }
}

fn env_language(raw: Option<String>) -> Result<Lang> {
    match raw {
        Some(code) => Lang::from_code(&code)
            .ok_or_else(|| anyhow!("{} must be one of en, fr, es (got '{}')", ENV_LANGUAGE, code)),
        None => Ok(Lang::default()),
    }
}

pub fn parse_timeout(raw: &str) -> Result<Duration> {
    let seconds: u64 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid timeout '{}': expected whole seconds", raw))?;
    if seconds == 0 {
        return Err(anyhow!("timeout must be at least one second"));
    }
    Ok(Duration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let settings = settings_from(&[]).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.language, Lang::Fr);
        assert!(!settings.has_status_source());
    }

    #[test]
    fn reads_every_variable() {
        let settings = settings_from(&[
            (ENV_USERNAME, "jane"),
            (ENV_PASSWORD, "pw"),
            (ENV_URL, "https://example.test"),
            (ENV_CATALOG, "/tmp/catalog.yaml"),
            (ENV_FETCH_COMMAND, "node fetch.js"),
            (ENV_FETCH_TIMEOUT, "30"),
            (ENV_LANGUAGE, "EN"),
        ])
        .unwrap();
        assert_eq!(settings.username.as_deref(), Some("jane"));
        assert_eq!(settings.password.as_deref(), Some("pw"));
        assert_eq!(settings.catalog, Some(PathBuf::from("/tmp/catalog.yaml")));
        assert_eq!(settings.fetch_timeout, Some(Duration::from_secs(30)));
        assert_eq!(settings.language, Lang::En);
        assert!(settings.has_status_source());
    }

    #[test]
    fn blank_values_are_unset() {
        let settings = settings_from(&[(ENV_USERNAME, "  ")]).unwrap();
        assert_eq!(settings.username, None);
    }

    #[test]
    fn bad_language_or_timeout_is_rejected() {
        assert!(settings_from(&[(ENV_LANGUAGE, "de")]).is_err());
        assert!(settings_from(&[(ENV_FETCH_TIMEOUT, "soon")]).is_err());
        assert!(parse_timeout("0").is_err());
    }

    #[test]
    fn offline_settings_ignore_portal_variables() {
        let vars: HashMap<&str, &str> = [
            (ENV_FETCH_TIMEOUT, "soon"),
            (ENV_LANGUAGE, "de"),
            (ENV_CATALOG, "/tmp/catalog.json"),
            (ENV_USERNAME, "jane"),
        ]
        .into_iter()
        .collect();
        let lookup = |key: &str| vars.get(key).map(|v| v.to_string());

        let settings = Settings::offline_from_lookup(lookup, Some(Lang::En)).unwrap();
        assert_eq!(settings.language, Lang::En);
        assert_eq!(settings.catalog, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(settings.username, None);
        assert_eq!(settings.fetch_timeout, None);

        // the language variable still matters when no flag overrides it
        assert!(Settings::offline_from_lookup(lookup, None).is_err());
    }

    #[test]
    fn no_source_is_an_error() {
        assert!(Settings::default().status_source().is_err());
    }

    #[test]
    fn embedded_catalog_when_no_path() {
        let db = Settings::default().load_catalog().unwrap();
        assert!(!db.is_empty());
    }
}
