//! Steam userdata directory paths.

use std::fs;
use std::path::{Path, PathBuf};

use crate::SteamError;

/// Provides access to per-profile Steam paths under a userdata directory.
#[derive(Debug, Clone)]
pub struct SteamPaths {
    userdata_dir: PathBuf,
}

impl SteamPaths {
    /// Creates a `SteamPaths` with an auto-detected userdata directory.
    pub fn discover() -> Result<Self, SteamError> {
        Ok(Self {
            userdata_dir: default_userdata_dir()?,
        })
    }

    /// Creates a `SteamPaths` rooted at a custom userdata directory.
    pub fn with_userdata(dir: impl Into<PathBuf>) -> Self {
        Self {
            userdata_dir: dir.into(),
        }
    }

    pub fn userdata_dir(&self) -> &Path {
        &self.userdata_dir
    }

    /// Returns the directory for a specific profile.
    pub fn profile_dir(&self, profile_id: &str) -> PathBuf {
        self.userdata_dir.join(profile_id)
    }

    /// Returns the config directory for a profile.
    pub fn config_dir(&self, profile_id: &str) -> PathBuf {
        self.profile_dir(profile_id).join("config")
    }

    /// Returns the path to shortcuts.vdf for a profile.
    pub fn shortcuts_path(&self, profile_id: &str) -> PathBuf {
        self.config_dir(profile_id).join("shortcuts.vdf")
    }

    /// Returns the grid artwork directory for a profile.
    pub fn grid_dir(&self, profile_id: &str) -> PathBuf {
        self.config_dir(profile_id).join("grid")
    }

    /// Returns true if the profile has a shortcuts.vdf file.
    pub fn has_shortcuts(&self, profile_id: &str) -> bool {
        self.shortcuts_path(profile_id).exists()
    }

    /// Creates the grid directory if it doesn't exist.
    pub fn ensure_grid_dir(&self, profile_id: &str) -> Result<(), SteamError> {
        fs::create_dir_all(self.grid_dir(profile_id))
            .map_err(|e| SteamError::Io(format!("failed to create grid dir: {e}")))
    }
}

#[cfg(target_os = "windows")]
fn default_userdata_dir() -> Result<PathBuf, SteamError> {
    let program_files = std::env::var_os("ProgramFiles(x86)").ok_or(SteamError::NotFound)?;
    let dir = PathBuf::from(program_files).join("Steam").join("userdata");
    if dir.is_dir() {
        return Ok(dir);
    }
    Err(SteamError::NotFound)
}

#[cfg(not(target_os = "windows"))]
fn default_userdata_dir() -> Result<PathBuf, SteamError> {
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .ok_or(SteamError::NotFound)?;

    // Primary location: ~/.steam/steam
    let candidates = [
        home.join(".steam").join("steam").join("userdata"),
        home.join(".local").join("share").join("Steam").join("userdata"),
        // Flatpak Steam
        home.join(".var")
            .join("app")
            .join("com.valvesoftware.Steam")
            .join(".steam")
            .join("steam")
            .join("userdata"),
    ];

    for dir in candidates {
        if dir.is_dir() {
            return Ok(dir);
        }
    }

    Err(SteamError::NotFound)
}
