// SPDX-License-Identifier: PMPL-1.0-or-later

//! Internationalisation module for anef-checker.
//!
//! Two kinds of localized text exist in this crate:
//!
//! - status descriptions, which live in the status catalog
//!   (see [`crate::catalog`]) because they are data maintained outside the
//!   code;
//! - interface labels (CLI headings, GUI field names), which are embedded
//!   here as static tables.
//!
//! ## Supported languages
//!
//! | Code | Language | Native name |
//! |------|----------|-------------|
//! | fr   | French   | Français    |
//! | en   | English  | English     |
//! | es   | Spanish  | Español     |
//!
//! Label lookups fall back to English when a key is missing in the requested
//! language, and to the key itself when English lacks it too.

mod catalog;

pub use catalog::{t, Lang};
