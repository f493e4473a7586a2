// SPDX-License-Identifier: PMPL-1.0-or-later

//! anef-checker: follow a French naturalisation application.
//!
//! The portal reports the state of an application as an opaque status
//! code. This crate turns that code into something a person can read.
//!
//! PIECES:
//! 1. **Catalog**: a validated, read-only table of every known status code
//!    with its process stage, handling service and descriptions in French,
//!    English and Spanish.
//! 2. **Lookup**: a pure function from (status token, language) to
//!    description, degrading to the French display string when a
//!    translation is missing.
//! 3. **Workflow**: the boundary shared by the CLI and the GUI. It checks
//!    credentials, asks a status source for the dossier and shapes a
//!    success/failure result.

pub mod automation;
pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod i18n;
pub mod lookup;
pub mod report;
pub mod types;
pub mod workflow;
