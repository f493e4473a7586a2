// SPDX-License-Identifier: PMPL-1.0-or-later

//! Interface label catalog for anef-checker.
//!
//! Embeds the user-facing labels for every supported language as a
//! compile-time static table. Lookup is a linear scan, which is fine for
//! the couple dozen keys we have.
//!
//! ## Adding a new key
//!
//! 1. Add the English entry to `EN`
//! 2. Add translations to FR and ES (missing keys fall back to English)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages status descriptions and labels can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    Fr,
    Es,
}

impl Lang {
    /// ISO 639-1 two-letter code for this language.
    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Fr => "fr",
            Lang::Es => "es",
        }
    }

    /// Parse a language code. Case-insensitive, surrounding whitespace ignored.
    pub fn from_code(code: &str) -> Option<Lang> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Lang::En),
            "fr" => Some(Lang::Fr),
            "es" => Some(Lang::Es),
            _ => None,
        }
    }

    /// All supported languages, in display order.
    pub fn all() -> &'static [Lang] {
        &[Lang::Fr, Lang::En, Lang::Es]
    }

    /// Name of the language in that language, for selectors.
    pub fn native_name(&self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::Fr => "Français",
            Lang::Es => "Español",
        }
    }
}

impl Default for Lang {
    fn default() -> Self {
        Lang::Fr
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ─── Label Lookup ───────────────────────────────────────────────────

/// Look up an interface label in the specified language.
///
/// Falls back to English, then to the key itself. Never panics.
///
/// # Examples
///
/// ```
/// use anef_checker::i18n::{t, Lang};
/// assert_eq!(t(Lang::En, "result.api_code"), "API code");
/// assert_eq!(t(Lang::Fr, "result.api_code"), "Code API");
/// assert_eq!(t(Lang::Es, "no.such.key"), "no.such.key");
/// ```
pub fn t<'a>(lang: Lang, key: &'a str) -> &'a str {
    if let Some(value) = lookup(catalog_for(lang), key) {
        return value;
    }
    if lang != Lang::En {
        if let Some(value) = lookup(EN, key) {
            return value;
        }
    }
    key
}

fn lookup(catalog: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    catalog.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn catalog_for(lang: Lang) -> &'static [(&'static str, &'static str)] {
    match lang {
        Lang::En => EN,
        Lang::Fr => FR,
        Lang::Es => ES,
    }
}

// ─── English (all keys defined here) ────────────────────────────────

const EN: &[(&str, &str)] = &[
    ("app.title", "Naturalization Status Checker"),
    ("app.about", "About"),
    ("app.about_body", "A simple checker to follow the naturalisation process."),
    ("check.progress", "Checking naturalization status for"),
    ("check.button", "Check Status"),
    ("result.api_code", "API code"),
    ("result.description", "Description"),
    ("result.failed", "Status check failed"),
    ("field.username", "Username"),
    ("field.password", "Password"),
    ("field.url", "ANEF URL"),
    ("field.language", "Result language"),
    ("codes.index", "Index"),
    ("codes.stage", "Stage"),
    ("codes.service", "Service"),
    ("codes.code", "Code"),
    ("codes.total", "Statuses in catalog"),
    ("common.ok", "OK"),
    ("common.none", "none"),
];

// ─── French ─────────────────────────────────────────────────────────

const FR: &[(&str, &str)] = &[
    ("app.title", "Suivi de demande de naturalisation"),
    ("app.about", "À propos"),
    ("app.about_body", "Un outil simple pour suivre la demande de naturalisation."),
    ("check.progress", "Vérification du statut de naturalisation pour"),
    ("check.button", "Vérifier le statut"),
    ("result.api_code", "Code API"),
    ("result.description", "Description"),
    ("result.failed", "Échec de la vérification"),
    ("field.username", "Identifiant"),
    ("field.password", "Mot de passe"),
    ("field.url", "URL ANEF"),
    ("field.language", "Langue du résultat"),
    ("codes.index", "Index"),
    ("codes.stage", "Étape"),
    ("codes.service", "Service"),
    ("codes.code", "Code"),
    ("codes.total", "Statuts dans le catalogue"),
    ("common.none", "aucun"),
];

// ─── Spanish ────────────────────────────────────────────────────────

const ES: &[(&str, &str)] = &[
    ("app.title", "Consulta del estado de naturalización"),
    ("app.about", "Acerca de"),
    ("app.about_body", "Una herramienta sencilla para seguir el proceso de naturalización."),
    ("check.progress", "Consultando el estado de naturalización de"),
    ("check.button", "Consultar estado"),
    ("result.api_code", "Código API"),
    ("result.description", "Descripción"),
    ("result.failed", "La consulta ha fallado"),
    ("field.username", "Usuario"),
    ("field.password", "Contraseña"),
    ("field.url", "URL de ANEF"),
    ("field.language", "Idioma del resultado"),
    ("codes.index", "Índice"),
    ("codes.stage", "Etapa"),
    ("codes.service", "Servicio"),
    ("codes.code", "Código"),
    ("codes.total", "Estados en el catálogo"),
    ("common.none", "ninguno"),
];
