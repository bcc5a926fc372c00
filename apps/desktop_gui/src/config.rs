use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

pub const CONFIG_FILE: &str = "feedback.toml";
const DEFAULT_STORAGE_FILE: &str = "local_storage.json";
const DEFAULT_LOG_FILTER: &str = "info";
const APP_DIR_NAME: &str = "registration_feedback";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: Option<PathBuf>,
    pub storage_file: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_file: DEFAULT_STORAGE_FILE.into(),
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

impl Settings {
    /// Command-line flags win over everything else.
    pub fn apply_overrides(
        &mut self,
        data_dir: Option<PathBuf>,
        storage_file: Option<String>,
        log_filter: Option<String>,
    ) {
        if let Some(v) = data_dir {
            self.data_dir = Some(v);
        }
        if let Some(v) = storage_file.filter(|v| !v.trim().is_empty()) {
            self.storage_file = v;
        }
        if let Some(v) = log_filter.filter(|v| !v.trim().is_empty()) {
            self.log_filter = v;
        }
    }
}

/// Settings plus the reason the config file was ignored, if it was.
/// Settings are read before the subscriber exists, so the caller logs it.
#[derive(Debug)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub file_error: Option<String>,
}

pub fn load_settings(config_path: &Path) -> LoadedSettings {
    load_settings_with(config_path, |name| std::env::var(name).ok())
}

/// Defaults, then the optional TOML file, then environment variables.
pub fn load_settings_with(
    config_path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> LoadedSettings {
    let mut settings = Settings::default();
    let mut file_error = None;

    if let Ok(raw) = fs::read_to_string(config_path) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("data_dir") {
                    settings.data_dir = Some(PathBuf::from(v));
                }
                if let Some(v) = file_cfg.get("storage_file") {
                    settings.storage_file = v.clone();
                }
                if let Some(v) = file_cfg.get("log_filter") {
                    settings.log_filter = v.clone();
                }
            }
            Err(err) => file_error = Some(err.to_string()),
        }
    }

    let non_empty = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("FEEDBACK_DATA_DIR") {
        settings.data_dir = Some(PathBuf::from(v));
    }
    if let Some(v) = non_empty("APP__DATA_DIR") {
        settings.data_dir = Some(PathBuf::from(v));
    }

    if let Some(v) = non_empty("FEEDBACK_STORAGE_FILE") {
        settings.storage_file = v;
    }
    if let Some(v) = non_empty("APP__STORAGE_FILE") {
        settings.storage_file = v;
    }

    if let Some(v) = non_empty("FEEDBACK_LOG") {
        settings.log_filter = v;
    }

    LoadedSettings {
        settings,
        file_error,
    }
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_root: PathBuf,
    pub storage_path: PathBuf,
}

impl AppPaths {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let root = match &settings.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_local_dir()
                .context("unable to resolve local app data dir")?
                .join(APP_DIR_NAME),
        };

        let storage_file = settings.storage_file.trim();
        let storage_file = if storage_file.is_empty() {
            DEFAULT_STORAGE_FILE
        } else {
            storage_file
        };

        Ok(Self {
            storage_path: root.join(storage_file),
            data_root: root,
        })
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
