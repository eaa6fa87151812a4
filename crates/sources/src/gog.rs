//! GOG Galaxy game discovery.
//!
//! Galaxy installs each game under the library directory with a
//! `goggame-<id>.info` JSON file next to the binaries. DLC ships its own
//! info file whose `gameId` differs from `rootGameId`; those never become
//! records.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{GameRecord, Platform, SourceError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameInfo {
    game_id: String,
    root_game_id: String,
    name: String,
    #[serde(default)]
    play_tasks: Vec<PlayTask>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayTask {
    #[serde(default)]
    is_primary: bool,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    working_dir: Option<String>,
}

/// Scans the Galaxy library directory for installed base games.
pub fn discover(library_dir: &Path, galaxy_exe: &Path) -> Result<Vec<GameRecord>, SourceError> {
    let entries = fs::read_dir(library_dir).map_err(|e| SourceError::BaseDir {
        path: library_dir.to_path_buf(),
        source: e,
    })?;

    let mut game_dirs: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            game_dirs.push(entry.path());
        }
    }
    game_dirs.sort();

    let mut games = Vec::new();
    for dir in game_dirs {
        for info_path in info_files(&dir)? {
            match read_game(&info_path, galaxy_exe) {
                Ok(Some(game)) => {
                    tracing::debug!(id = %game.id, name = %game.name, "found GOG game");
                    games.push(game);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(path = %info_path.display(), error = %e, "skipping unreadable GOG metadata");
                }
            }
        }
    }

    Ok(games)
}

/// Returns the `goggame-*.info` files directly inside a game directory.
fn info_files(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with("goggame-") && name.ends_with(".info") {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

fn read_game(info_path: &Path, galaxy_exe: &Path) -> Result<Option<GameRecord>, SourceError> {
    let data = fs::read_to_string(info_path)?;
    let info: GameInfo = serde_json::from_str(&data)?;

    // DLC: its own info file, but not a base game.
    if info.game_id != info.root_game_id {
        tracing::debug!(id = %info.game_id, name = %info.name, "ignoring DLC");
        return Ok(None);
    }

    let Some(game_dir) = info_path.parent() else {
        return Ok(None);
    };

    let Some(primary) = info.play_tasks.iter().find(|t| t.is_primary) else {
        tracing::warn!(path = %info_path.display(), "no primary play task, skipping");
        return Ok(None);
    };
    let Some(task_path) = primary.path.as_deref() else {
        tracing::warn!(path = %info_path.display(), "primary play task has no path, skipping");
        return Ok(None);
    };

    let icon_path = game_dir.join(task_path);
    let working_dir = match primary.working_dir.as_deref() {
        Some(sub) if !sub.is_empty() => game_dir.join(sub),
        _ => game_dir.to_path_buf(),
    };

    let launch_args = format!(
        "/command=runGame /gameId={} /path=\"{}\"",
        info.game_id,
        working_dir.display()
    );

    Ok(Some(GameRecord {
        platform: Platform::Gog,
        id: info.game_id,
        name: info.name,
        launch_path: galaxy_exe.to_string_lossy().into_owned(),
        launch_args,
        working_dir: working_dir.to_string_lossy().into_owned(),
        icon_path: icon_path.to_string_lossy().into_owned(),
    }))
}

/// Reads Galaxy's own config to locate the game library directory.
pub fn default_library_dir() -> Result<PathBuf, SourceError> {
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct GalaxyConfig {
        library_path: String,
    }

    let program_data =
        std::env::var_os("ProgramData").ok_or(SourceError::NoDefault("GOG library"))?;
    let config_path = PathBuf::from(program_data)
        .join("GOG.com")
        .join("Galaxy")
        .join("config.json");

    let data = fs::read_to_string(config_path)?;
    let config: GalaxyConfig = serde_json::from_str(&data)?;
    Ok(PathBuf::from(config.library_path))
}

/// Default install location of the Galaxy client executable.
pub fn default_galaxy_exe() -> Result<PathBuf, SourceError> {
    let program_files =
        std::env::var_os("ProgramFiles(x86)").ok_or(SourceError::NoDefault("GOG Galaxy"))?;
    Ok(PathBuf::from(program_files)
        .join("GOG Galaxy")
        .join("GalaxyClient.exe"))
}
