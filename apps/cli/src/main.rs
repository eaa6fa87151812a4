//! shelfsync entry point: one sync pass per invocation.

mod config;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shelfsync_reconcile::reconcile;
use shelfsync_sources::{GameRecord, SourceError, epic, gog};
use shelfsync_steam::{ShortcutStore, SteamPaths, list_profiles, process};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "shelfsync", version)]
#[command(about = "Sync GOG and Epic installed games into Steam's shortcut list")]
struct Args {
    /// Reconcile but don't write shortcuts.vdf
    #[arg(long)]
    dry_run: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Steam userdata directory
    #[arg(long, value_name = "DIR")]
    steam_userdata: Option<PathBuf>,

    /// GOG Galaxy library directory
    #[arg(long, value_name = "DIR")]
    gog_library: Option<PathBuf>,

    /// GOG Galaxy client executable
    #[arg(long, value_name = "EXE")]
    galaxy_exe: Option<PathBuf>,

    /// Epic Games Launcher manifests directory
    #[arg(long, value_name = "DIR")]
    epic_manifests: Option<PathBuf>,

    /// Steam profile id to sync (required when several exist)
    #[arg(long, value_name = "ID")]
    profile: Option<String>,

    /// Wait for the Steam client to exit before writing
    #[arg(long)]
    wait_steam: bool,

    /// Download GOG cover art into the grid directory
    #[arg(long)]
    grid_images: bool,

    /// GOG username for the public stats API
    #[arg(long, value_name = "NAME")]
    gog_username: Option<String>,
}

#[derive(Debug, thiserror::Error)]
enum SyncError {
    #[error(transparent)]
    Steam(#[from] shelfsync_steam::SteamError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Reconcile(#[from] shelfsync_reconcile::ReconcileError),

    #[error("no Steam profiles found under {0}")]
    NoProfiles(String),

    #[error("multiple Steam profiles found ({0}); select one with --profile")]
    AmbiguousProfile(String),

    #[error("unknown Steam profile: {0}")]
    UnknownProfile(String),
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Structured logging; RUST_LOG still wins when set.
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), SyncError> {
    let cfg = config::Config::load();

    let paths = match args.steam_userdata.clone().or(cfg.steam_userdata.clone()) {
        Some(dir) => SteamPaths::with_userdata(dir),
        None => SteamPaths::discover()?,
    };

    let profile = select_profile(&paths, args.profile.as_deref())?;
    tracing::info!(profile = %profile, "syncing Steam profile");

    let store = ShortcutStore::new(paths.clone());
    let existing = store.load(&profile)?;
    tracing::info!(count = existing.len(), "loaded existing shortcuts");

    let games = discover_games(&args, &cfg)?;
    tracing::info!(count = games.len(), "discovered installed games");
    for game in &games {
        tracing::debug!(platform = game.platform.tag(), id = %game.id, name = %game.name, "discovered");
    }

    let merged = reconcile(&games, &existing)?;

    if args.dry_run {
        tracing::info!(count = merged.len(), "dry run, skipping write");
        return Ok(());
    }

    if args.wait_steam && process::is_running() {
        tracing::info!("waiting for the Steam client to exit");
        process::wait_for_exit(Duration::from_secs(1));
    }

    store.save(&profile, &merged)?;
    tracing::info!(count = merged.len(), "saved shortcuts");

    if args.grid_images {
        fetch_grids(&args, &cfg, &paths, &profile, &games);
    }

    Ok(())
}

/// Resolves the profile to sync: an explicit id must exist; otherwise
/// exactly one local profile is required.
fn select_profile(paths: &SteamPaths, explicit: Option<&str>) -> Result<String, SyncError> {
    let profiles = list_profiles(paths)?;

    if let Some(id) = explicit {
        if profiles.iter().any(|p| p.id == id) {
            return Ok(id.to_string());
        }
        return Err(SyncError::UnknownProfile(id.to_string()));
    }

    let mut ids = profiles.into_iter().map(|p| p.id);
    match (ids.next(), ids.next()) {
        (None, _) => Err(SyncError::NoProfiles(
            paths.userdata_dir().display().to_string(),
        )),
        (Some(only), None) => Ok(only),
        (Some(first), Some(second)) => {
            let mut listed = vec![first, second];
            listed.extend(ids);
            Err(SyncError::AmbiguousProfile(listed.join(", ")))
        }
    }
}

fn discover_games(args: &Args, cfg: &config::Config) -> Result<Vec<GameRecord>, SourceError> {
    let gog_library = match args.gog_library.clone().or(cfg.gog_library.clone()) {
        Some(dir) => dir,
        None => gog::default_library_dir()?,
    };
    let galaxy_exe = match args.galaxy_exe.clone() {
        Some(exe) => exe,
        None => gog::default_galaxy_exe()?,
    };
    let epic_manifests = match args.epic_manifests.clone().or(cfg.epic_manifests.clone()) {
        Some(dir) => dir,
        None => epic::default_manifests_dir()?,
    };

    let mut games = gog::discover(&gog_library, &galaxy_exe)?;
    games.extend(epic::discover(&epic_manifests)?);
    Ok(games)
}

fn fetch_grids(
    args: &Args,
    cfg: &config::Config,
    paths: &SteamPaths,
    profile: &str,
    games: &[GameRecord],
) {
    let Some(username) = args.gog_username.clone().or(cfg.gog_username.clone()) else {
        tracing::warn!("--grid-images needs --gog-username (or gogUsername in the config); skipping");
        return;
    };

    match shelfsync_grid::fetch_gog_grids(paths, profile, games, &username) {
        Ok(written) => tracing::info!(count = written, "installed grid images"),
        Err(e) => tracing::warn!(error = %e, "grid image fetch failed"),
    }
}
