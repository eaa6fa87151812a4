//! Local Steam profile enumeration.

use std::fs;

use crate::SteamError;
use crate::paths::SteamPaths;

/// A local Steam profile found under userdata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub has_shortcuts: bool,
}

/// Lists the profiles present under the userdata directory.
///
/// Profile directories have numeric names; the "0" directory is a
/// temporary Steam artifact, not a real profile, and is skipped.
pub fn list_profiles(paths: &SteamPaths) -> Result<Vec<Profile>, SteamError> {
    let entries = fs::read_dir(paths.userdata_dir()).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SteamError::NotFound
        } else {
            SteamError::Io(e.to_string())
        }
    })?;

    let mut profiles = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SteamError::Io(e.to_string()))?;

        if !entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
            continue;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();

        if name.parse::<u64>().is_err() || name == "0" {
            continue;
        }

        profiles.push(Profile {
            has_shortcuts: paths.has_shortcuts(&name),
            id: name.into_owned(),
        });
    }

    // read_dir order is platform-dependent
    profiles.sort_by(|a, b| a.id.cmp(&b.id));

    Ok(profiles)
}
