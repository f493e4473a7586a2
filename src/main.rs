// SPDX-License-Identifier: PMPL-1.0-or-later

//! anef-checker: check the status of a French naturalisation application
//!
//! Obtains the application dossier through a configurable status source,
//! resolves the portal status code against the status catalog and prints
//! a localized description.

use anef_checker::catalog::StatusDatabase;
use anef_checker::config::{parse_timeout, Settings};
use anef_checker::diagnostics;
use anef_checker::i18n::Lang;
use anef_checker::report::{self, CheckerGui, ReportFormatter};
use anef_checker::workflow::{
    check_status_with, process_status_token, CheckRequest, StatusCheckResult,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "anef-checker")]
#[command(version)]
#[command(about = "Check the status of a naturalisation application on the ANEF portal")]
#[command(long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Status catalog file (JSON or YAML); defaults to the built-in catalog
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and report the current application status
    Check {
        /// ANEF web username [env: ANEF_WEB_USERNAME]
        #[arg(short = 'n', long)]
        username: Option<String>,

        /// ANEF web password [env: ANEF_WEB_PASSWORD]
        #[arg(short, long)]
        password: Option<String>,

        /// ANEF web URL [env: ANEF_WEB_URL]
        #[arg(short, long)]
        url: Option<String>,

        /// Language for the status description
        #[arg(short, long, value_enum)]
        language: Option<LangArg>,

        /// Helper program that logs in and prints the dossier JSON [env: ANEF_FETCH_COMMAND]
        #[arg(long, value_name = "PROGRAM")]
        fetch_command: Option<String>,

        /// Read the dossier from a saved JSON file instead of running a helper
        #[arg(long, value_name = "FILE", conflicts_with = "fetch_command")]
        dossier: Option<PathBuf>,

        /// Use this raw status token instead of contacting the portal
        #[arg(long, value_name = "TOKEN", conflicts_with_all = ["fetch_command", "dossier"])]
        status: Option<String>,

        /// Helper timeout in seconds [env: ANEF_FETCH_TIMEOUT]
        #[arg(long, value_name = "SECS")]
        timeout: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Describe a status code without contacting the portal
    Describe {
        /// Status code, e.g. EA_EN_ATTENTE_EA (case-insensitive)
        #[arg(value_name = "CODE")]
        code: String,

        /// Language for the description
        #[arg(short, long, value_enum)]
        language: Option<LangArg>,
    },

    /// List every status in the catalog
    Codes {
        /// Language for the descriptions
        #[arg(short, long, value_enum)]
        language: Option<LangArg>,

        /// Dump the validated catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a status catalog file
    Validate {
        /// Catalog file (JSON or YAML)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Open the graphical form
    Gui,

    /// Check configuration and catalog
    Doctor,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LangArg {
    Fr,
    En,
    Es,
}

impl From<LangArg> for Lang {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::Fr => Lang::Fr,
            LangArg::En => Lang::En,
            LangArg::Es => Lang::Es,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(settings: &Settings) -> Result<StatusDatabase> {
    settings.load_catalog().context("loading status catalog")
}

fn finish(result: &StatusCheckResult, lang: Lang, json: bool) -> Result<ExitCode> {
    if json {
        println!("{}", report::result_json(result, lang)?);
    } else {
        report::print_result(result, lang);
    }
    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog_flag = cli.catalog;
    let with_catalog = |mut settings: Settings| {
        if catalog_flag.is_some() {
            settings.catalog = catalog_flag.clone();
        }
        settings
    };

    match cli.command {
        Commands::Check {
            username,
            password,
            url,
            language,
            fetch_command,
            dossier,
            status,
            timeout,
            json,
        } => {
            let mut settings = with_catalog(Settings::from_env()?);
            settings.username = username.or(settings.username);
            settings.password = password.or(settings.password);
            settings.url = url.or(settings.url);
            settings.fetch_command = fetch_command.or(settings.fetch_command);
            settings.dossier = dossier;
            settings.status_token = status;
            if let Some(raw) = timeout {
                settings.fetch_timeout = Some(parse_timeout(&raw)?);
            }
            if let Some(lang) = language {
                settings.language = lang.into();
            }

            let database = load_catalog(&settings)?;
            let request = CheckRequest {
                username: settings.username.as_deref(),
                password: settings.password.as_deref(),
                url: settings.url.as_deref(),
                language: settings.language,
            };
            let result = check_status_with(&request, || settings.status_source(), &database);
            finish(&result, settings.language, json)
        }

        Commands::Describe { code, language } => {
            let settings = with_catalog(Settings::offline_from_env(language.map(Lang::from))?);
            let lang = settings.language;
            let database = load_catalog(&settings)?;
            let result = process_status_token(Some(code.as_str()), lang, &database);
            finish(&result, lang, false)
        }

        Commands::Codes { language, json } => {
            let settings = with_catalog(Settings::offline_from_env(language.map(Lang::from))?);
            let lang = settings.language;
            let database = load_catalog(&settings)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&database)?);
            } else {
                ReportFormatter::new(lang).print_catalog(&database);
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Validate { file } => {
            let database = StatusDatabase::from_file(&file)
                .with_context(|| format!("validating {}", file.display()))?;
            println!(
                "{}: {} statuses, all codes valid and unique",
                file.display(),
                database.len()
            );
            Ok(ExitCode::SUCCESS)
        }

        Commands::Gui => {
            let settings = with_catalog(Settings::from_env()?);
            let database = load_catalog(&settings)?;
            CheckerGui::run(settings, database)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Doctor => {
            let settings = with_catalog(Settings::from_env()?);
            diagnostics::run_self_diagnostics(&settings)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
