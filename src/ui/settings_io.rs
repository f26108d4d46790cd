use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::ui::settings::ClientSettings;

fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("coach-chat");
    path.push("settings.json");
    path
}

/// Falls back to defaults when the file is missing or unreadable.
pub fn load_settings() -> ClientSettings {
    let path = settings_path();
    match read_settings(&path) {
        Ok(settings) => settings,
        Err(e) => {
            if path.exists() {
                log::warn!("using default settings: {:#}", e);
            } else {
                log::info!("no settings at {}, using defaults", path.display());
            }
            ClientSettings::default()
        }
    }
}

pub fn save_settings(settings: &ClientSettings) {
    if let Err(e) = write_settings(&settings_path(), settings) {
        log::warn!("could not save settings: {:#}", e);
    }
}

fn read_settings(path: &Path) -> anyhow::Result<ClientSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn write_settings(path: &Path, settings: &ClientSettings) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
