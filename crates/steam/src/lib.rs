pub mod paths;
pub mod process;
pub mod profiles;
pub mod shortcuts;
pub mod store;
pub mod vdf;

// Re-export primary types.
pub use paths::SteamPaths;
pub use profiles::{Profile, list_profiles};
pub use shortcuts::{
    FieldValue, ShortcutCollection, ShortcutEntry, generate_app_id, grid_image_id, quote, unquote,
};
pub use store::ShortcutStore;

/// Errors for Steam shortcut operations.
#[derive(Debug, thiserror::Error)]
pub enum SteamError {
    #[error("steam userdata directory not found")]
    NotFound,

    #[error("VDF parse error: {0}")]
    Vdf(String),

    #[error("short write: {written} of {expected} bytes reached disk")]
    ShortWrite { written: usize, expected: usize },

    #[error("I/O error: {0}")]
    Io(String),
}
