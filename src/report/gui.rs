// SPDX-License-Identifier: PMPL-1.0-or-later

//! Form GUI for running a status check.

use crate::catalog::StatusDatabase;
use crate::config::Settings;
use crate::i18n::{t, Lang};
use crate::workflow::{check_status_with, CheckRequest, StatusCheckResult, DEFAULT_BASE_URL};
use anyhow::{anyhow, Result};
use eframe::{egui, App, Frame, NativeOptions};
use tracing::debug;

/// Named bindings for every form field.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckForm {
    pub username: String,
    pub password: String,
    pub url: String,
    pub language: Lang,
}

impl CheckForm {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            username: settings.username.clone().unwrap_or_default(),
            password: settings.password.clone().unwrap_or_default(),
            url: settings
                .url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            language: settings.language,
        }
    }

    pub fn request(&self) -> CheckRequest<'_> {
        CheckRequest {
            username: Some(self.username.as_str()),
            password: Some(self.password.as_str()),
            url: Some(self.url.as_str()),
            language: self.language,
        }
    }
}

pub struct CheckerGui {
    settings: Settings,
    database: StatusDatabase,
    form: CheckForm,
    outcome: Option<StatusCheckResult>,
    show_about: bool,
}

impl CheckerGui {
    pub fn new(settings: Settings, database: StatusDatabase) -> Self {
        let form = CheckForm::from_settings(&settings);
        Self {
            settings,
            database,
            form,
            outcome: None,
            show_about: false,
        }
    }

    pub fn run(settings: Settings, database: StatusDatabase) -> Result<()> {
        let options = NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([560.0, 520.0])
                .with_resizable(false),
            ..Default::default()
        };
        let app = Self::new(settings, database);
        eframe::run_native(
            "anef-checker",
            options,
            Box::new(|_cc| Box::new(app)),
        )
        .map_err(|err| anyhow!("failed to launch GUI: {err}"))?;
        Ok(())
    }

    /// Run the check for the current form content. Never panics: every
    /// failure ends up in the returned result.
    pub fn submit(&mut self) -> &StatusCheckResult {
        debug!(username = %self.form.username, language = %self.form.language, "check requested");
        let settings = &self.settings;
        let outcome = check_status_with(
            &self.form.request(),
            || settings.status_source(),
            &self.database,
        );
        self.outcome.insert(outcome)
    }

    pub fn form_mut(&mut self) -> &mut CheckForm {
        &mut self.form
    }
}

impl App for CheckerGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let lang = self.form.language;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(t(lang, "app.title"));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(t(lang, "app.about")).clicked() {
                        self.show_about = true;
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Grid::new("check-form")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(t(lang, "field.username"));
                    ui.text_edit_singleline(&mut self.form.username);
                    ui.end_row();

                    ui.label(t(lang, "field.password"));
                    ui.add(egui::TextEdit::singleline(&mut self.form.password).password(true));
                    ui.end_row();

                    ui.label(t(lang, "field.url"));
                    ui.text_edit_singleline(&mut self.form.url);
                    ui.end_row();

                    ui.label(t(lang, "field.language"));
                    egui::ComboBox::from_id_source("language")
                        .selected_text(self.form.language.native_name())
                        .show_ui(ui, |ui| {
                            for option in Lang::all() {
                                ui.selectable_value(
                                    &mut self.form.language,
                                    *option,
                                    option.native_name(),
                                );
                            }
                        });
                    ui.end_row();
                });

            ui.add_space(12.0);
            if ui.button(t(lang, "check.button")).clicked() {
                self.submit();
            }
            ui.separator();

            match &self.outcome {
                Some(result) if result.success => {
                    if let Some(code) = result.api_code {
                        ui.label(egui::RichText::new(t(lang, "result.api_code")).strong());
                        ui.label(code.key());
                    }
                    if let Some(description) = &result.description {
                        ui.add_space(6.0);
                        ui.label(egui::RichText::new(t(lang, "result.description")).strong());
                        ui.label(description.as_str());
                    }
                }
                Some(result) => {
                    let message = result.error_message.as_deref().unwrap_or_default();
                    ui.colored_label(egui::Color32::from_rgb(220, 80, 80), message);
                }
                None => {}
            }
        });

        if self.show_about {
            egui::Window::new(t(lang, "app.about"))
                .collapsible(false)
                .resizable(false)
                .open(&mut self.show_about)
                .show(ctx, |ui| {
                    ui.heading(format!("anef-checker {}", env!("CARGO_PKG_VERSION")));
                    ui.label(t(lang, "app.about_body"));
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gui(settings: Settings) -> CheckerGui {
        CheckerGui::new(settings, StatusDatabase::embedded().unwrap())
    }

    #[test]
    fn form_starts_from_settings() {
        let settings = Settings {
            username: Some("jane".to_string()),
            language: Lang::Es,
            ..Settings::default()
        };
        let form = CheckForm::from_settings(&settings);
        assert_eq!(form.username, "jane");
        assert_eq!(form.password, "");
        assert_eq!(form.url, DEFAULT_BASE_URL);
        assert_eq!(form.language, Lang::Es);
    }

    #[test]
    fn submit_without_source_reports_inline() {
        let mut app = gui(Settings::default());
        app.form_mut().username = "jane".to_string();
        app.form_mut().password = "pw".to_string();
        let result = app.submit();
        assert!(!result.success);
        assert!(result
            .error_message
            .as_deref()
            .unwrap()
            .contains("no status source configured"));
    }

    #[test]
    fn missing_username_is_reported_before_missing_source() {
        let mut app = gui(Settings::default());
        app.form_mut().password = "pw".to_string();
        let result = app.submit();
        assert_eq!(
            result.error_message.as_deref(),
            Some("Username and password must be provided.")
        );
    }

    #[test]
    fn submit_with_fixed_token() {
        let mut app = gui(Settings {
            status_token: Some("draft".to_string()),
            ..Settings::default()
        });
        app.form_mut().username = "jane".to_string();
        app.form_mut().password = "pw".to_string();
        app.form_mut().language = Lang::En;
        let result = app.submit().clone();
        assert!(result.success);
        assert_eq!(result.api_code.map(|c| c.key()), Some("DRAFT"));
    }

    #[test]
    fn submit_with_empty_password_fails() {
        let mut app = gui(Settings {
            status_token: Some("draft".to_string()),
            ..Settings::default()
        });
        app.form_mut().username = "jane".to_string();
        let result = app.submit();
        assert_eq!(
            result.error_message.as_deref(),
            Some("Username and password must be provided.")
        );
    }
}
