//! Per-profile persistence of the shortcut collection.

use std::fs::{self, File};
use std::io::Write;

use crate::SteamError;
use crate::paths::SteamPaths;
use crate::shortcuts::ShortcutCollection;
use crate::vdf;

/// Reads and writes shortcuts.vdf for a profile.
pub struct ShortcutStore {
    paths: SteamPaths,
}

impl ShortcutStore {
    pub fn new(paths: SteamPaths) -> Self {
        Self { paths }
    }

    /// Loads the shortcut collection for a profile.
    ///
    /// A missing file is a normal first run and yields an empty
    /// collection; a present but malformed file is an error.
    pub fn load(&self, profile_id: &str) -> Result<ShortcutCollection, SteamError> {
        let path = self.paths.shortcuts_path(profile_id);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no shortcuts file, starting empty");
                return Ok(ShortcutCollection::default());
            }
            Err(e) => {
                return Err(SteamError::Io(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };
        vdf::parse(&data)
    }

    /// Serializes and writes the collection, replacing the whole file.
    ///
    /// A write that puts fewer bytes on disk than were serialized is a
    /// hard failure, never silent partial success.
    pub fn save(
        &self,
        profile_id: &str,
        collection: &ShortcutCollection,
    ) -> Result<(), SteamError> {
        let bytes = vdf::serialize(collection);
        let path = self.paths.shortcuts_path(profile_id);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SteamError::Io(format!("failed to create {}: {e}", parent.display())))?;
        }

        let mut file = File::create(&path)
            .map_err(|e| SteamError::Io(format!("failed to create {}: {e}", path.display())))?;
        let written = file
            .write(&bytes)
            .map_err(|e| SteamError::Io(format!("failed to write {}: {e}", path.display())))?;

        if written != bytes.len() {
            return Err(SteamError::ShortWrite {
                written,
                expected: bytes.len(),
            });
        }

        file.flush()
            .map_err(|e| SteamError::Io(format!("failed to flush {}: {e}", path.display())))?;

        Ok(())
    }
}
