//! Grid cover-art fetching for managed shortcuts.
//!
//! Peripheral to the sync itself: iterates the discovered GOG games,
//! downloads covers from the public GOG stats API and writes crop-resized
//! grid images next to the profile's shortcuts. Per-image failures are
//! warnings; only the stats lookup itself can fail the feature.

pub mod resize;
pub mod stats;

use std::fs;
use std::path::Path;

use shelfsync_sources::{GameRecord, Platform};
use shelfsync_steam::{SteamPaths, grid_image_id, quote};

/// Errors from grid-image fetching.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("download failed with status {0}")]
    Status(u16),

    #[error("GOG user not found: {0}")]
    UserNotFound(String),

    #[error("steam error: {0}")]
    Steam(#[from] shelfsync_steam::SteamError),
}

/// Downloads and installs grid covers for the discovered GOG games.
///
/// Returns the number of grid images written. Epic games are skipped;
/// their covers have no public stats endpoint.
pub fn fetch_gog_grids(
    paths: &SteamPaths,
    profile_id: &str,
    games: &[GameRecord],
    gog_username: &str,
) -> Result<usize, GridError> {
    let client = reqwest::blocking::Client::new();
    let covers = stats::fetch_covers(&client, gog_username)?;

    paths.ensure_grid_dir(profile_id)?;
    let grid_dir = paths.grid_dir(profile_id);
    let cache_dir = grid_dir.join("gog");
    fs::create_dir_all(&cache_dir)?;

    let mut written = 0;
    for game in games {
        if game.platform != Platform::Gog {
            continue;
        }
        match install_cover(&client, &covers, &grid_dir, &cache_dir, game) {
            Ok(true) => written += 1,
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(game = %game.name, error = %e, "failed to install grid image");
            }
        }
    }

    Ok(written)
}

/// Installs one cover; returns false when nothing needed doing.
fn install_cover(
    client: &reqwest::blocking::Client,
    covers: &stats::CoverMap,
    grid_dir: &Path,
    cache_dir: &Path,
    game: &GameRecord,
) -> Result<bool, GridError> {
    let image_id = grid_image_id(&quote(&game.launch_path), &game.name);
    let grid_path = grid_dir.join(format!("{image_id}.jpg"));
    if grid_path.exists() {
        return Ok(false);
    }

    let cached = cache_dir.join(format!("{}.jpg", game.id));
    if !cached.exists() {
        let Some(url) = covers.get(&game.id).map(|c| c.cover_url()) else {
            tracing::debug!(game = %game.name, "not in GOG account stats");
            return Ok(false);
        };
        let bytes = download(client, &url)?;
        fs::write(&cached, &bytes)?;
        tracing::debug!(game = %game.name, url = %url, "downloaded cover");
    }

    resize::cover_to_grid(&cached, &grid_path)?;
    tracing::info!(game = %game.name, path = %grid_path.display(), "installed grid image");
    Ok(true)
}

fn download(client: &reqwest::blocking::Client, url: &str) -> Result<Vec<u8>, GridError> {
    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(GridError::Status(status.as_u16()));
    }
    Ok(resp.bytes()?.to_vec())
}
