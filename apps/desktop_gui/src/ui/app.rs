use eframe::egui;
use form_core::{FormController, FormMessage};
use storage::{KeyValueStore, RecordStore};

use crate::controller::events::UiError;
use crate::controller::orchestration::dispatch_queued;
use crate::ui::panels::{self, FormPanelProps, FormPanelState};
use crate::ui::theme::{self, PersistedGuiSettings, SETTINGS_STORAGE_KEY};

pub type LocalStorage = Box<dyn KeyValueStore>;

const FORM_PANEL_DEFAULT_WIDTH: f32 = 440.0;
const FORM_PANEL_MIN_WIDTH: f32 = 340.0;

pub struct FeedbackApp {
    store: RecordStore<LocalStorage>,
    form: FormController,
    form_panel: FormPanelState,
    outbox: Vec<FormMessage>,
    status: String,
    status_banner: Option<UiError>,
    settings: PersistedGuiSettings,
    applied_settings: Option<PersistedGuiSettings>,
}

impl FeedbackApp {
    pub fn new(
        store: RecordStore<LocalStorage>,
        persisted_settings: Option<PersistedGuiSettings>,
        startup_error: Option<UiError>,
    ) -> Self {
        let status = match store.len() {
            0 => "No feedback records yet".to_string(),
            1 => "Loaded 1 feedback record".to_string(),
            n => format!("Loaded {n} feedback records"),
        };
        Self {
            store,
            form: FormController::new(),
            form_panel: FormPanelState::default(),
            outbox: Vec::new(),
            status,
            status_banner: startup_error,
            settings: persisted_settings.unwrap_or_default().clamped(),
            applied_settings: None,
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_settings == Some(self.settings) {
            return;
        }
        theme::apply(ctx, self.settings);
        self.applied_settings = Some(self.settings);
    }

    fn process_outbox(&mut self) {
        if self.outbox.is_empty() {
            return;
        }
        match dispatch_queued(
            &mut self.form,
            &mut self.store,
            &mut self.outbox,
            &mut self.status,
        ) {
            Ok(()) => {}
            Err(err) => self.status_banner = Some(err),
        }
    }

    fn show_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut dismiss = false;
            match &self.status_banner {
                Some(banner) => {
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        format!("{}: {}", banner.title(), banner.message()),
                    );
                    dismiss = ui.small_button("Dismiss").clicked();
                }
                None => {
                    ui.weak(&self.status);
                }
            }
            if dismiss {
                self.status_banner = None;
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .small_button(self.settings.theme_preset.toggle_label())
                    .clicked()
                {
                    self.settings.theme_preset = self.settings.theme_preset.toggled();
                }
                if ui.small_button("A+").clicked() {
                    self.settings = self.settings.scaled_by(1.0);
                }
                if ui.small_button("A-").clicked() {
                    self.settings = self.settings.scaled_by(-1.0);
                }
                ui.separator();
                ui.weak(format!("{} records", self.store.len()));
            });
        });
    }
}

impl eframe::App for FeedbackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme_if_needed(ctx);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| self.show_status_bar(ui));

        egui::SidePanel::left("feedback_form_panel")
            .resizable(true)
            .default_width(FORM_PANEL_DEFAULT_WIDTH)
            .min_width(FORM_PANEL_MIN_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let props = FormPanelProps {
                        draft: self.form.draft(),
                        is_editing: self.form.is_editing(),
                        submit_label: self.form.submit_label(),
                    };
                    panels::form_panel(ui, props, &mut self.form_panel, &mut self.outbox);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            panels::records_panel(
                ui,
                self.store.records(),
                self.form.edit_index(),
                &mut self.outbox,
            );
        });

        // Applied after drawing so every message in this frame sees the same
        // store the widgets rendered from.
        if !self.outbox.is_empty() {
            self.process_outbox();
            ctx.request_repaint();
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(serialized) = serde_json::to_string(&self.settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}
