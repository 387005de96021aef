use crate::error::{AppError, AppResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

// Global monotonically increasing version for settings writes
static SETTINGS_VERSION: Lazy<AtomicU64> = Lazy::new(|| AtomicU64::new(0));

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Reuse a neighbouring pane instead of always splitting a new one
    #[serde(default)]
    pub open_in_adjacent_pane: bool,
    /// Default width for text wrapping, 0 disables wrapping
    #[serde(default)]
    pub wrap_line_length: usize,
    #[serde(default)]
    pub force_wrap: bool,
    /// Where downloads land; platform download folder when unset
    #[serde(default)]
    pub download_folder: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            open_in_adjacent_pane: false,
            wrap_line_length: 0,
            force_wrap: false,
            download_folder: None,
        }
    }
}

/// Current settings write version
pub fn settings_version() -> u64 {
    SETTINGS_VERSION.load(Ordering::Relaxed)
}

/// Load settings from `path`, writing defaults there if the file is missing.
pub fn load_settings(path: &Path) -> AppResult<Settings> {
    if !path.exists() {
        let defaults = Settings::default();
        save_settings(path, &defaults)?;
        return Ok(defaults);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| AppError::SettingsLoad(format!("{}: {}", path.display(), e)))?;

    let parsed: Settings = serde_json::from_str(&content)
        .map_err(|e| AppError::SettingsLoad(format!("{}: {}", path.display(), e)))?;
    crate::log_debug!("settings", "loaded {} (version {})", path.display(), settings_version());
    Ok(parsed)
}

pub fn save_settings(path: &Path, settings: &Settings) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AppError::SettingsSave(e.to_string()))?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).map_err(|e| AppError::SettingsSave(format!("{}: {}", path.display(), e)))?;

    let ver = SETTINGS_VERSION.fetch_add(1, Ordering::Relaxed) + 1;
    crate::log_info!("settings", "saved {} (version {})", path.display(), ver);
    Ok(())
}
