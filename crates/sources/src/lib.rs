//! Installed-game discovery.
//!
//! One adapter per launcher platform, each producing normalized
//! [`GameRecord`]s. A single unreadable game is skipped with a warning;
//! an unreadable platform base directory fails the whole scan.

pub mod epic;
pub mod gog;

use std::path::PathBuf;

/// Errors from game discovery.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot read platform directory {path}: {source}")]
    BaseDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no default {0} path on this system; pass the directory explicitly")]
    NoDefault(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Source launcher a game was discovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Gog,
    Epic,
}

impl Platform {
    /// The tag written on managed shortcuts to mark ownership.
    pub fn tag(self) -> &'static str {
        match self {
            Platform::Gog => "GOG",
            Platform::Epic => "EPIC",
        }
    }

    /// All platforms a sync run manages.
    pub fn all() -> &'static [Platform] {
        &[Platform::Gog, Platform::Epic]
    }
}

/// A normalized installed-game record. One per discovered game, built
/// fresh each sync run.
///
/// `launch_path` invokes the platform's own client so DRM and
/// achievements keep working; `icon_path` is the real game executable,
/// kept separately for icon extraction and shortcut matching.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub platform: Platform,
    /// Stable per-platform catalog identifier.
    pub id: String,
    pub name: String,
    pub launch_path: String,
    pub launch_args: String,
    pub working_dir: String,
    pub icon_path: String,
}
