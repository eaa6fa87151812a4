//! Optional JSON configuration file.
//!
//! `~/.config/shelfsync/config.json` (`%APPDATA%\shelfsync\config.json`
//! on Windows) can supply the same directory overrides as the CLI
//! options; explicit flags always win.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub steam_userdata: Option<PathBuf>,
    pub gog_library: Option<PathBuf>,
    pub epic_manifests: Option<PathBuf>,
    pub gog_username: Option<String>,
}

impl Config {
    /// Loads the config file, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read config, using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str(&data) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "configuration loaded");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }
        }
    }
}

fn config_path() -> Option<PathBuf> {
    config_base().map(|base| base.join("shelfsync").join("config.json"))
}

#[cfg(target_os = "windows")]
fn config_base() -> Option<PathBuf> {
    std::env::var_os("APPDATA").map(PathBuf::from)
}

#[cfg(not(target_os = "windows"))]
fn config_base() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
}
