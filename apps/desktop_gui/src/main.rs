use std::path::PathBuf;

mod config;
mod controller;
mod ui;

use clap::Parser;
use eframe::egui;
use storage::{JsonFileStore, MemoryStore, RecordStore};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use config::{load_settings, AppPaths, Settings, CONFIG_FILE};
use controller::events::UiError;
use ui::{theme::PersistedGuiSettings, theme::SETTINGS_STORAGE_KEY, FeedbackApp, LocalStorage};

const APP_TITLE: &str = "User Registration Feedback";

#[derive(Parser, Debug)]
#[command(about = "Collect and review user registration feedback")]
struct Args {
    /// Optional TOML file with data_dir / storage_file / log_filter.
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long)]
    storage_file: Option<String>,
    #[arg(long)]
    log_filter: Option<String>,
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Opens the file-backed store. When the file cannot be used the session
/// falls back to memory and the returned error is shown in the UI.
fn open_record_store(settings: &Settings) -> (RecordStore<LocalStorage>, Option<UiError>) {
    let opened = AppPaths::from_settings(settings).and_then(|paths| {
        info!(
            data_root = %paths.data_root.display(),
            storage = %paths.storage_path.display(),
            "resolved local storage paths"
        );
        JsonFileStore::open(&paths.storage_path)
    });

    match opened {
        Ok(backend) => {
            let backend: LocalStorage = Box::new(backend);
            (RecordStore::open(backend), None)
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "local storage unavailable; records will not persist");
            let backend: LocalStorage = Box::new(MemoryStore::new());
            let notice = UiError::storage_unavailable(format!(
                "local storage unavailable ({err:#}); records from this session will not be saved"
            ));
            (RecordStore::open(backend), Some(notice))
        }
    }
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let loaded = load_settings(&args.config);
    let mut settings = loaded.settings;
    settings.apply_overrides(args.data_dir, args.storage_file, args.log_filter);
    init_tracing(&settings.log_filter);
    if let Some(problem) = loaded.file_error {
        warn!(
            config = %args.config.display(),
            error = %problem,
            "ignoring malformed config file"
        );
    }

    let (store, startup_error) = open_record_store(&settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([900.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| {
            let persisted_settings = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| PersistedGuiSettings::from_json(&text))
            });
            Ok(Box::new(FeedbackApp::new(
                store,
                persisted_settings,
                startup_error,
            )))
        }),
    )
}
