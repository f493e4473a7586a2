// SPDX-License-Identifier: PMPL-1.0-or-later

//! Console and JSON rendering of status check results

use crate::catalog::StatusDatabase;
use crate::i18n::{t, Lang};
use crate::workflow::StatusCheckResult;
use anyhow::Result;
use colored::*;
use serde::Serialize;

/// JSON envelope written by `check --json`.
#[derive(Debug, Serialize)]
pub struct StatusReport<'a> {
    pub checked_at: String,
    pub language: Lang,
    #[serde(flatten)]
    pub result: &'a StatusCheckResult,
}

pub struct ReportFormatter {
    lang: Lang,
}

impl ReportFormatter {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    /// Human-readable lines for a result. Successes go to stdout,
    /// failures are returned for the caller to send to stderr.
    pub fn result_lines(&self, result: &StatusCheckResult) -> Vec<String> {
        if !result.success {
            let message = result.error_message.as_deref().unwrap_or_default();
            return vec![format!(
                "{}: {}",
                t(self.lang, "result.failed").bold().red(),
                message
            )];
        }

        let mut lines = Vec::new();
        if let Some(code) = result.api_code {
            lines.push(format!(
                "{:>12}: {}",
                t(self.lang, "result.api_code"),
                code.key().bold().green()
            ));
        }
        if let Some(description) = &result.description {
            lines.push(format!(
                "{:>12}: {}",
                t(self.lang, "result.description"),
                description.green()
            ));
        }
        lines
    }

    pub fn print_result(&self, result: &StatusCheckResult) {
        for line in self.result_lines(result) {
            if result.success {
                println!("{}", line);
            } else {
                eprintln!("{}", line);
            }
        }
    }

    pub fn to_json(&self, result: &StatusCheckResult) -> Result<String> {
        let report = StatusReport {
            checked_at: chrono::Utc::now().to_rfc3339(),
            language: self.lang,
            result,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    /// One line per catalog entry: index, stage, service, key, description.
    pub fn catalog_lines(&self, database: &StatusDatabase) -> Vec<String> {
        let none = t(self.lang, "common.none");
        let mut lines = vec![format!(
            "{:<6} {:<24} {:<11} {}",
            t(self.lang, "codes.index"),
            t(self.lang, "codes.stage"),
            t(self.lang, "codes.service"),
            t(self.lang, "codes.code"),
        )
        .bold()
        .to_string()];

        for entry in database.entries() {
            let description = entry
                .comment(self.lang)
                .unwrap_or_else(|| entry.api_code.display());
            lines.push(format!(
                "{:<6} {:<24} {:<11} {}",
                entry.index.as_deref().unwrap_or("-"),
                entry.stage.key(),
                entry.service.map(|s| s.as_str()).unwrap_or(none),
                entry.api_code.key().cyan(),
            ));
            lines.push(format!("       {}", description));
        }
        lines.push(format!("{}: {}", t(self.lang, "codes.total"), database.len()));
        lines
    }

    pub fn print_catalog(&self, database: &StatusDatabase) {
        for line in self.catalog_lines(database) {
            println!("{}", line);
        }
    }
}
