//! Shortcut data model and shortcut identifier generation.

use crc32fast::Hasher;

/// A field value the codec does not recognize.
///
/// Unrecognized fields are carried through a load/save cycle verbatim so
/// a rewrite never drops data written by a newer Steam client.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(u32),
    Map(Vec<(String, FieldValue)>),
}

/// One non-Steam shortcut entry.
///
/// `exe` and `start_dir` are stored pre-quoted (wrapped in a literal `"`
/// pair) the way Steam writes them; the codec never adds or strips the
/// quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortcutEntry {
    pub app_id: u32,
    pub app_name: String,
    pub exe: String,
    pub start_dir: String,
    pub icon: String,
    pub shortcut_path: String,
    pub launch_options: String,
    pub is_hidden: bool,
    pub allow_desktop_config: bool,
    pub allow_overlay: bool,
    pub open_vr: bool,
    pub devkit: bool,
    /// Correlates a managed entry with the game record that produced it.
    /// Empty on user-authored shortcuts.
    pub devkit_game_id: String,
    pub devkit_override_app_id: bool,
    pub last_play_time: u32,
    pub flatpak_app_id: String,
    /// Ordered tag list, serialized with keys "0", "1", ...
    pub tags: Vec<String>,
    /// Unrecognized fields in their original order.
    pub extra: Vec<(String, FieldValue)>,
}

impl Default for ShortcutEntry {
    fn default() -> Self {
        Self {
            app_id: 0,
            app_name: String::new(),
            exe: String::new(),
            start_dir: String::new(),
            icon: String::new(),
            shortcut_path: String::new(),
            launch_options: String::new(),
            is_hidden: false,
            allow_desktop_config: true,
            allow_overlay: true,
            open_vr: false,
            devkit: false,
            devkit_game_id: String::new(),
            devkit_override_app_id: false,
            last_play_time: 0,
            flatpak_app_id: String::new(),
            tags: Vec::new(),
            extra: Vec::new(),
        }
    }
}

/// The ordered shortcut list for one Steam profile.
///
/// Position is display order. Positional string indices ("0".."N-1") are
/// assigned at serialization time, so they are recomputed on every write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortcutCollection {
    pub entries: Vec<ShortcutEntry>,
}

impl ShortcutCollection {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Wraps a path or invocation in the literal quotes Steam expects.
pub fn quote(s: &str) -> String {
    format!("\"{s}\"")
}

/// Strips the surrounding quote pair, if present.
pub fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}

/// Generates the `appid` for a shortcut from its quoted exe and name.
///
/// Matches Steam's algorithm: `CRC32(exe + name) | 0x80000000 | 0x02000000`.
pub fn generate_app_id(quoted_exe: &str, name: &str) -> u32 {
    crc_id(quoted_exe, name) | 0x80000000 | 0x02000000
}

/// Legacy grid-image identifier for a shortcut.
///
/// `CRC32(exe + name) | 0x80000000`, rendered as decimal with a trailing
/// `p`. Grid images in the profile's grid directory are named after it.
pub fn grid_image_id(quoted_exe: &str, name: &str) -> String {
    let id = crc_id(quoted_exe, name) | 0x80000000;
    format!("{id}p")
}

fn crc_id(quoted_exe: &str, name: &str) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(quoted_exe.as_bytes());
    hasher.update(name.as_bytes());
    hasher.finalize()
}
