use eframe::egui;
use serde::{Deserialize, Serialize};

pub const SETTINGS_STORAGE_KEY: &str = "registration_feedback_gui_settings";

const MIN_TEXT_SCALE: f32 = 0.8;
const MAX_TEXT_SCALE: f32 = 1.4;
const TEXT_SCALE_STEP: f32 = 0.1;

pub const DANGER_FILL: egui::Color32 = egui::Color32::from_rgb(0xdc, 0x35, 0x45);
pub const INFO_FILL: egui::Color32 = egui::Color32::from_rgb(0x0d, 0xca, 0xf0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreset {
    #[default]
    Light,
    Dark,
}

impl ThemePreset {
    pub fn toggled(self) -> Self {
        match self {
            ThemePreset::Light => ThemePreset::Dark,
            ThemePreset::Dark => ThemePreset::Light,
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            ThemePreset::Light => "🌙 Dark",
            ThemePreset::Dark => "☀ Light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedGuiSettings {
    pub theme_preset: ThemePreset,
    pub text_scale: f32,
}

impl Default for PersistedGuiSettings {
    fn default() -> Self {
        Self {
            theme_preset: ThemePreset::Light,
            text_scale: 1.0,
        }
    }
}

impl PersistedGuiSettings {
    pub fn from_json(text: &str) -> Option<Self> {
        serde_json::from_str::<Self>(text).ok().map(Self::clamped)
    }

    pub fn clamped(self) -> Self {
        let text_scale = if self.text_scale.is_finite() {
            self.text_scale.clamp(MIN_TEXT_SCALE, MAX_TEXT_SCALE)
        } else {
            1.0
        };
        Self { text_scale, ..self }
    }

    pub fn scaled_by(self, steps: f32) -> Self {
        Self {
            text_scale: self.text_scale + steps * TEXT_SCALE_STEP,
            ..self
        }
        .clamped()
    }
}

pub fn apply(ctx: &egui::Context, settings: PersistedGuiSettings) {
    let visuals = match settings.theme_preset {
        ThemePreset::Light => egui::Visuals::light(),
        ThemePreset::Dark => egui::Visuals::dark(),
    };
    ctx.set_visuals(visuals);
    ctx.set_zoom_factor(settings.text_scale);
}

#[cfg(test)]
#[path = "tests/theme_tests.rs"]
mod tests;
