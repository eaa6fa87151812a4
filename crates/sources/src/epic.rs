//! Epic Games Launcher game discovery.
//!
//! The launcher keeps one `<guid>.item` JSON manifest per installed game.
//! Every manifest becomes a record; the source exposes no DLC concept.
//! Games launch through the `com.epicgames.launcher://` protocol, the
//! same way the launcher's own desktop shortcuts work.

use std::fs;
use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;

use crate::{GameRecord, Platform, SourceError};

/// Characters kept verbatim in the launcher URI path segment.
const URI_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Manifest {
    catalog_item_id: String,
    catalog_namespace: String,
    app_name: String,
    display_name: String,
    install_location: String,
    launch_executable: String,
}

/// Scans the launcher's manifests directory for installed games.
pub fn discover(manifests_dir: &Path) -> Result<Vec<GameRecord>, SourceError> {
    let entries = fs::read_dir(manifests_dir).map_err(|e| SourceError::BaseDir {
        path: manifests_dir.to_path_buf(),
        source: e,
    })?;

    let mut manifest_paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "item") {
            manifest_paths.push(path);
        }
    }
    manifest_paths.sort();

    let mut games = Vec::new();
    for path in manifest_paths {
        match read_game(&path) {
            Ok(game) => {
                tracing::debug!(id = %game.id, name = %game.name, "found Epic game");
                games.push(game);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable Epic manifest");
            }
        }
    }

    Ok(games)
}

fn read_game(manifest_path: &Path) -> Result<GameRecord, SourceError> {
    let data = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&data)?;

    let icon_path = Path::new(&manifest.install_location).join(&manifest.launch_executable);
    let working_dir = icon_path
        .parent()
        .unwrap_or_else(|| Path::new(&manifest.install_location))
        .to_path_buf();

    Ok(GameRecord {
        platform: Platform::Epic,
        launch_path: launcher_uri(&manifest),
        launch_args: String::new(),
        working_dir: working_dir.to_string_lossy().into_owned(),
        icon_path: icon_path.to_string_lossy().into_owned(),
        id: manifest.catalog_item_id,
        name: manifest.display_name,
    })
}

/// Builds the protocol URI that asks the Epic launcher to start a game.
fn launcher_uri(manifest: &Manifest) -> String {
    let target = format!(
        "apps/{}:{}:{}",
        manifest.catalog_namespace, manifest.catalog_item_id, manifest.app_name
    );
    let encoded = utf8_percent_encode(&target, URI_SEGMENT);
    format!("com.epicgames.launcher://{encoded}?action=launch&silent=true")
}

/// Default manifests location under ProgramData.
pub fn default_manifests_dir() -> Result<PathBuf, SourceError> {
    let program_data =
        std::env::var_os("ProgramData").ok_or(SourceError::NoDefault("Epic manifests"))?;
    Ok(PathBuf::from(program_data)
        .join("Epic")
        .join("EpicGamesLauncher")
        .join("Data")
        .join("Manifests"))
}
