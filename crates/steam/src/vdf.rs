//! Binary VDF codec for shortcuts.vdf.
//!
//! The format is a nested keyed-value tree: a tag byte (map, string,
//! int32 or map-close), a NUL-terminated key, then the payload. Strings
//! are NUL-terminated, integers are 4-byte little-endian. The root key is
//! `"shortcuts"`, mapping positional string indices to entry maps.

use crate::SteamError;
use crate::shortcuts::{FieldValue, ShortcutCollection, ShortcutEntry};

/// Binary VDF type markers used in shortcuts.vdf.
const VDF_TYPE_MAP: u8 = 0x00;
const VDF_TYPE_STRING: u8 = 0x01;
const VDF_TYPE_INT32: u8 = 0x02;
const VDF_TYPE_END: u8 = 0x08;

/// Parses binary VDF data into a shortcut collection.
///
/// Positional index keys in the file are ignored; order of appearance is
/// authoritative. Entries missing `AppName` or `Exe` fail the parse so a
/// later rewrite cannot corrupt a file we did not fully understand.
pub fn parse(data: &[u8]) -> Result<ShortcutCollection, SteamError> {
    if data.len() < 3 {
        return Err(SteamError::Vdf("shortcuts data too small".into()));
    }

    let mut pos = 0;

    if data[pos] != VDF_TYPE_MAP {
        return Err(SteamError::Vdf(format!(
            "expected map marker at start, got 0x{:02x}",
            data[pos]
        )));
    }
    pos += 1;

    let (root_key, new_pos) = read_string(data, pos)?;
    pos = new_pos;

    if !root_key.eq_ignore_ascii_case("shortcuts") {
        return Err(SteamError::Vdf(format!(
            "expected root key 'shortcuts', got '{root_key}'"
        )));
    }

    let mut collection = ShortcutCollection::default();

    while pos < data.len() {
        if data[pos] == VDF_TYPE_END {
            break;
        }

        if data[pos] != VDF_TYPE_MAP {
            return Err(SteamError::Vdf(format!(
                "expected map marker for entry at pos {pos}, got 0x{:02x}",
                data[pos]
            )));
        }
        pos += 1;

        // Positional index key ("0", "1", ...), recomputed on write.
        let (_, new_pos) = read_string(data, pos)?;
        pos = new_pos;

        let (entry, new_pos) = parse_entry(data, pos, collection.entries.len())?;
        pos = new_pos;

        collection.entries.push(entry);
    }

    Ok(collection)
}

/// Serializes a collection to the binary shortcuts.vdf layout.
///
/// Known fields are written in Steam's canonical order, then preserved
/// unrecognized fields, then tags. Entries are re-indexed "0".."N-1".
pub fn serialize(collection: &ShortcutCollection) -> Vec<u8> {
    let mut buf = Vec::new();

    buf.push(VDF_TYPE_MAP);
    write_cstr(&mut buf, "shortcuts");

    for (index, entry) in collection.entries.iter().enumerate() {
        buf.push(VDF_TYPE_MAP);
        write_cstr(&mut buf, &index.to_string());
        write_entry(&mut buf, entry);
    }

    buf.push(VDF_TYPE_END);
    buf.push(VDF_TYPE_END);
    buf
}

fn parse_entry(
    data: &[u8],
    mut pos: usize,
    index: usize,
) -> Result<(ShortcutEntry, usize), SteamError> {
    let mut entry = ShortcutEntry::default();
    let mut saw_name = false;
    let mut saw_exe = false;

    while pos < data.len() {
        if data[pos] == VDF_TYPE_END {
            pos += 1;
            if !saw_name || !saw_exe {
                return Err(SteamError::Vdf(format!(
                    "entry {index} is missing AppName or Exe"
                )));
            }
            return Ok((entry, pos));
        }

        let type_byte = data[pos];
        pos += 1;

        let (key, new_pos) = read_string(data, pos)?;
        pos = new_pos;

        match type_byte {
            VDF_TYPE_STRING => {
                let (val, new_pos) = read_string(data, pos)?;
                pos = new_pos;

                match key.to_ascii_lowercase().as_str() {
                    "appname" => {
                        entry.app_name = val;
                        saw_name = true;
                    }
                    "exe" => {
                        entry.exe = val;
                        saw_exe = true;
                    }
                    "startdir" => entry.start_dir = val,
                    "icon" => entry.icon = val,
                    "shortcutpath" => entry.shortcut_path = val,
                    "launchoptions" => entry.launch_options = val,
                    "devkitgameid" => entry.devkit_game_id = val,
                    "flatpakappid" => entry.flatpak_app_id = val,
                    _ => entry.extra.push((key, FieldValue::String(val))),
                }
            }
            VDF_TYPE_INT32 => {
                let (val, new_pos) = read_u32(data, pos, &key)?;
                pos = new_pos;

                match key.to_ascii_lowercase().as_str() {
                    "appid" => entry.app_id = val,
                    "ishidden" => entry.is_hidden = val != 0,
                    "allowdesktopconfig" => entry.allow_desktop_config = val != 0,
                    "allowoverlay" => entry.allow_overlay = val != 0,
                    "openvr" => entry.open_vr = val != 0,
                    "devkit" => entry.devkit = val != 0,
                    "devkitoverrideappid" => entry.devkit_override_app_id = val != 0,
                    "lastplaytime" => entry.last_play_time = val,
                    _ => entry.extra.push((key, FieldValue::Int(val))),
                }
            }
            VDF_TYPE_MAP => {
                if key.eq_ignore_ascii_case("tags") {
                    let (tags, new_pos) = parse_tags(data, pos)?;
                    pos = new_pos;
                    entry.tags = tags;
                } else {
                    let (map, new_pos) = parse_map(data, pos)?;
                    pos = new_pos;
                    entry.extra.push((key, FieldValue::Map(map)));
                }
            }
            _ => {
                return Err(SteamError::Vdf(format!(
                    "unknown type marker 0x{type_byte:02x} for key '{key}' at pos {pos}"
                )));
            }
        }
    }

    Err(SteamError::Vdf(
        "unexpected end of data inside shortcut entry".into(),
    ))
}

/// Parses the tags map into an ordered string list, ignoring index keys.
fn parse_tags(data: &[u8], mut pos: usize) -> Result<(Vec<String>, usize), SteamError> {
    let mut tags = Vec::new();

    while pos < data.len() {
        if data[pos] == VDF_TYPE_END {
            pos += 1;
            return Ok((tags, pos));
        }

        let type_byte = data[pos];
        pos += 1;

        let (key, new_pos) = read_string(data, pos)?;
        pos = new_pos;

        match type_byte {
            VDF_TYPE_STRING => {
                let (val, new_pos) = read_string(data, pos)?;
                pos = new_pos;
                tags.push(val);
            }
            VDF_TYPE_INT32 => {
                let (_, new_pos) = read_u32(data, pos, &key)?;
                pos = new_pos;
            }
            VDF_TYPE_MAP => {
                let (_, new_pos) = parse_map(data, pos)?;
                pos = new_pos;
            }
            _ => {
                return Err(SteamError::Vdf(format!(
                    "unknown type marker 0x{type_byte:02x} in tags"
                )));
            }
        }
    }

    Err(SteamError::Vdf("unexpected end of data inside tags".into()))
}

/// Parses an arbitrary nested map, preserving key order.
fn parse_map(data: &[u8], mut pos: usize) -> Result<(Vec<(String, FieldValue)>, usize), SteamError> {
    let mut map = Vec::new();

    while pos < data.len() {
        if data[pos] == VDF_TYPE_END {
            pos += 1;
            return Ok((map, pos));
        }

        let type_byte = data[pos];
        pos += 1;

        let (key, new_pos) = read_string(data, pos)?;
        pos = new_pos;

        match type_byte {
            VDF_TYPE_STRING => {
                let (val, new_pos) = read_string(data, pos)?;
                pos = new_pos;
                map.push((key, FieldValue::String(val)));
            }
            VDF_TYPE_INT32 => {
                let (val, new_pos) = read_u32(data, pos, &key)?;
                pos = new_pos;
                map.push((key, FieldValue::Int(val)));
            }
            VDF_TYPE_MAP => {
                let (nested, new_pos) = parse_map(data, pos)?;
                pos = new_pos;
                map.push((key, FieldValue::Map(nested)));
            }
            _ => {
                return Err(SteamError::Vdf(format!(
                    "unknown type marker 0x{type_byte:02x} for key '{key}'"
                )));
            }
        }
    }

    Err(SteamError::Vdf("unexpected end of data inside map".into()))
}

/// Reads a NUL-terminated string starting at pos.
fn read_string(data: &[u8], pos: usize) -> Result<(String, usize), SteamError> {
    let start = pos;
    let mut i = pos;
    while i < data.len() {
        if data[i] == 0x00 {
            let s = String::from_utf8_lossy(&data[start..i]).into_owned();
            return Ok((s, i + 1));
        }
        i += 1;
    }
    Err(SteamError::Vdf(format!(
        "unterminated string starting at pos {start}"
    )))
}

fn read_u32(data: &[u8], pos: usize, key: &str) -> Result<(u32, usize), SteamError> {
    if pos + 4 > data.len() {
        return Err(SteamError::Vdf(format!(
            "unexpected end of data reading int32 for '{key}'"
        )));
    }
    let val = u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]]);
    Ok((val, pos + 4))
}

fn write_entry(buf: &mut Vec<u8>, entry: &ShortcutEntry) {
    write_int_field(buf, "appid", entry.app_id);
    write_string_field(buf, "AppName", &entry.app_name);
    write_string_field(buf, "Exe", &entry.exe);
    write_string_field(buf, "StartDir", &entry.start_dir);
    write_string_field(buf, "icon", &entry.icon);
    write_string_field(buf, "ShortcutPath", &entry.shortcut_path);
    write_string_field(buf, "LaunchOptions", &entry.launch_options);
    write_int_field(buf, "IsHidden", u32::from(entry.is_hidden));
    write_int_field(buf, "AllowDesktopConfig", u32::from(entry.allow_desktop_config));
    write_int_field(buf, "AllowOverlay", u32::from(entry.allow_overlay));
    write_int_field(buf, "OpenVR", u32::from(entry.open_vr));
    write_int_field(buf, "Devkit", u32::from(entry.devkit));
    write_string_field(buf, "DevkitGameID", &entry.devkit_game_id);
    write_int_field(buf, "DevkitOverrideAppID", u32::from(entry.devkit_override_app_id));
    write_int_field(buf, "LastPlayTime", entry.last_play_time);
    write_string_field(buf, "FlatpakAppID", &entry.flatpak_app_id);

    for (key, value) in &entry.extra {
        write_value(buf, key, value);
    }

    buf.push(VDF_TYPE_MAP);
    write_cstr(buf, "tags");
    for (i, tag) in entry.tags.iter().enumerate() {
        write_string_field(buf, &i.to_string(), tag);
    }
    buf.push(VDF_TYPE_END);

    buf.push(VDF_TYPE_END);
}

fn write_value(buf: &mut Vec<u8>, key: &str, value: &FieldValue) {
    match value {
        FieldValue::String(s) => write_string_field(buf, key, s),
        FieldValue::Int(i) => write_int_field(buf, key, *i),
        FieldValue::Map(map) => {
            buf.push(VDF_TYPE_MAP);
            write_cstr(buf, key);
            for (k, v) in map {
                write_value(buf, k, v);
            }
            buf.push(VDF_TYPE_END);
        }
    }
}

fn write_string_field(buf: &mut Vec<u8>, key: &str, val: &str) {
    buf.push(VDF_TYPE_STRING);
    write_cstr(buf, key);
    write_cstr(buf, val);
}

fn write_int_field(buf: &mut Vec<u8>, key: &str, val: u32) {
    buf.push(VDF_TYPE_INT32);
    write_cstr(buf, key);
    buf.extend_from_slice(&val.to_le_bytes());
}

fn write_cstr(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(s.as_bytes());
    buf.push(0x00);
}
