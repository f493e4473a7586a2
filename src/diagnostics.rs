// SPDX-License-Identifier: PMPL-1.0-or-later

//! `doctor` self-check: is the tool ready to run a status check?

use crate::catalog::StatusDatabase;
use crate::config::{Settings, ENV_FETCH_COMMAND, ENV_PASSWORD, ENV_USERNAME};
use crate::types::StatusCode;
use anyhow::{anyhow, Result};
use std::env;
use std::path::Path;

pub fn run_self_diagnostics(settings: &Settings) -> Result<()> {
    println!("anef-checker self-diagnostics");

    let checks = collect(settings);

    println!();
    for entry in &checks {
        entry.print();
    }

    if checks
        .iter()
        .any(|entry| matches!(entry.level, Level::Error))
    {
        Err(anyhow!("self-diagnostics reported issues"))
    } else {
        Ok(())
    }
}

fn collect(settings: &Settings) -> Vec<Diagnostic> {
    vec![
        Diagnostic::ok(
            "version",
            format!("anef-checker {}", env!("CARGO_PKG_VERSION")),
        ),
        check_catalog(settings),
        check_credential("username", ENV_USERNAME, settings.username.as_deref()),
        check_credential("password", ENV_PASSWORD, settings.password.as_deref()),
        check_fetch_command(settings.fetch_command.as_deref()),
    ]
}

#[derive(Debug, PartialEq, Eq)]
enum Level {
    Ok,
    Warn,
    Error,
}

struct Diagnostic {
    label: &'static str,
    level: Level,
    detail: String,
}

impl Diagnostic {
    fn new(label: &'static str, level: Level, detail: String) -> Self {
        Self {
            label,
            level,
            detail,
        }
    }

    fn ok(label: &'static str, detail: String) -> Self {
        Self::new(label, Level::Ok, detail)
    }

    fn warning(label: &'static str, detail: String) -> Self {
        Self::new(label, Level::Warn, detail)
    }

    fn error(label: &'static str, detail: String) -> Self {
        Self::new(label, Level::Error, detail)
    }

    fn print(&self) {
        println!("  [{}] {:16} {}", self.level.tag(), self.label, self.detail);
    }
}

impl Level {
    fn tag(&self) -> &'static str {
        match self {
            Level::Ok => "OK",
            Level::Warn => "WARN",
            Level::Error => "ERR",
        }
    }
}

fn check_catalog(settings: &Settings) -> Diagnostic {
    let origin = settings
        .catalog
        .as_deref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "embedded".to_string());

    match settings.load_catalog() {
        Ok(db) => {
            let missing = missing_codes(&db);
            if missing.is_empty() {
                Diagnostic::ok(
                    "status catalog",
                    format!("{} ({} statuses)", origin, db.len()),
                )
            } else {
                Diagnostic::warning(
                    "status catalog",
                    format!(
                        "{} ({} statuses, no entry for {})",
                        origin,
                        db.len(),
                        missing.join(", ")
                    ),
                )
            }
        }
        Err(err) => Diagnostic::error("status catalog", err.to_string()),
    }
}

fn missing_codes(db: &StatusDatabase) -> Vec<&'static str> {
    StatusCode::all()
        .filter(|code| db.find(*code).is_none())
        .map(|code| code.key())
        .collect()
}

fn check_credential(label: &'static str, env_key: &str, value: Option<&str>) -> Diagnostic {
    match value {
        Some(_) => Diagnostic::ok(label, format!("configured ({})", env_key)),
        None => Diagnostic::warning(
            label,
            format!("not configured (set {} or pass it on the command line)", env_key),
        ),
    }
}

fn check_fetch_command(command_line: Option<&str>) -> Diagnostic {
    let Some(command_line) = command_line else {
        return Diagnostic::warning(
            "fetch helper",
            format!("not configured (set {} or use --dossier/--status)", ENV_FETCH_COMMAND),
        );
    };
    let program = command_line.split_whitespace().next().unwrap_or_default();
    if find_program(program) {
        Diagnostic::ok("fetch helper", format!("{} found", program))
    } else {
        Diagnostic::error("fetch helper", format!("{} not found", program))
    }
}

fn find_program(program: &str) -> bool {
    if program.is_empty() {
        return false;
    }
    let path = Path::new(program);
    if path.components().count() > 1 {
        return path.is_file();
    }
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}
