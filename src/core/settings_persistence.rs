//! Settings persistence
//!
//! Saves and loads [`EndgameSettings`] to/from a JSON file.
//!
//! # File Location
//!
//! An explicit path (the `--settings` flag) wins. Otherwise `settings.json` in the user's
//! configuration directory is used, falling back to the working directory when the system
//! config dir cannot be found.
//!
//! # Error Handling
//!
//! - [`load_settings`] falls back to default settings on a missing or unreadable file
//! - [`save_settings`] reports failures to the caller; nothing is half-written on a
//!   serialization error

use crate::core::error::CoreResult;
use crate::core::settings::EndgameSettings;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Resolve the default settings file path
///
/// E.g. `~/.config/xfendgame/settings.json` on Linux.
pub fn default_settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "trilltino", "xfendgame") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Load settings, using defaults when the file is missing or invalid
///
/// # Examples
///
/// ```rust,ignore
/// let settings = load_settings(&default_settings_path());
/// ```
pub fn load_settings(path: &Path) -> EndgameSettings {
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return EndgameSettings::default();
    }

    match try_load_settings(path) {
        Ok(settings) => {
            info!("[SETTINGS] Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!("[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.", path, e);
            EndgameSettings::default()
        }
    }
}

/// Load settings, reporting any read or parse failure
pub fn try_load_settings(path: &Path) -> CoreResult<EndgameSettings> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write settings as pretty JSON, creating parent directories as needed
pub fn save_settings(settings: &EndgameSettings, path: &Path) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("[SETTINGS] Failed to create settings directory at {:?}: {}", parent, e);
                return Err(e.into());
            }
        }
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}
