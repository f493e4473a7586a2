// SPDX-License-Identifier: PMPL-1.0-or-later

//! Result presentation: console, JSON and GUI.

pub mod formatter;
pub mod gui;

use crate::i18n::Lang;
use crate::workflow::StatusCheckResult;
use anyhow::Result;

pub use formatter::{ReportFormatter, StatusReport};
pub use gui::{CheckForm, CheckerGui};

/// Print a result to the console in `lang`.
pub fn print_result(result: &StatusCheckResult, lang: Lang) {
    ReportFormatter::new(lang).print_result(result);
}

/// Render a result as the pretty-printed JSON report.
pub fn result_json(result: &StatusCheckResult, lang: Lang) -> Result<String> {
    ReportFormatter::new(lang).to_json(result)
}
