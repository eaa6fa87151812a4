//! Shortcut-list reconciliation.
//!
//! Merges freshly discovered games into the persisted shortcut
//! collection. Managed entries are rebuilt from discovery every run, so
//! the collection always reflects what is currently installed: play time
//! is the only field carried forward, user-authored shortcuts are
//! appended untouched, and managed entries whose game is gone disappear.

use shelfsync_sources::{GameRecord, Platform};
use shelfsync_steam::{
    ShortcutCollection, ShortcutEntry, generate_app_id, quote, unquote,
};

/// Errors from reconciliation.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("malformed shortcut entry at position {index}: no AppName or Exe")]
    MalformedEntry { index: usize },
}

/// Merges discovered games with the existing collection.
///
/// New managed entries come first in discovery order, then every
/// existing entry not tagged with a managed platform, in its original
/// relative order. Index assignment happens at serialization time.
pub fn reconcile(
    discovered: &[GameRecord],
    existing: &ShortcutCollection,
) -> Result<ShortcutCollection, ReconcileError> {
    // A half-parsed entry must never be rewritten; abort before touching
    // anything rather than apply a partial merge.
    for (index, entry) in existing.entries.iter().enumerate() {
        if entry.app_name.is_empty() && entry.exe.is_empty() {
            return Err(ReconcileError::MalformedEntry { index });
        }
    }

    let mut merged = ShortcutCollection::default();

    for game in discovered {
        let mut entry = build_entry(game);
        if let Some(previous) = find_match(existing, game)
            && previous.last_play_time > 0
        {
            tracing::debug!(game = %game.name, play_time = previous.last_play_time, "restored play time");
            entry.last_play_time = previous.last_play_time;
        }
        merged.entries.push(entry);
    }

    // User-authored shortcuts keep their place at the end, untouched.
    for entry in &existing.entries {
        if is_managed(entry) {
            continue;
        }
        tracing::debug!(name = %entry.app_name, "keeping custom shortcut");
        merged.entries.push(entry.clone());
    }

    Ok(merged)
}

fn build_entry(game: &GameRecord) -> ShortcutEntry {
    let exe = quote(&game.launch_path);
    ShortcutEntry {
        app_id: generate_app_id(&exe, &game.name),
        app_name: game.name.clone(),
        start_dir: quote(&game.working_dir),
        icon: game.icon_path.clone(),
        launch_options: game.launch_args.clone(),
        devkit_game_id: game.id.clone(),
        tags: vec![game.platform.tag().to_string()],
        exe,
        ..ShortcutEntry::default()
    }
}

/// Finds an existing entry for the same game.
///
/// Equivalence signals, first match wins: unquoted exe equals the real
/// executable, display name equals, devkit id equals. Two different
/// games sharing a display name can false-match here; kept as-is for
/// compatibility with previously written files.
fn find_match<'a>(
    existing: &'a ShortcutCollection,
    game: &GameRecord,
) -> Option<&'a ShortcutEntry> {
    existing.entries.iter().find(|entry| {
        unquote(&entry.exe) == game.icon_path
            || entry.app_name == game.name
            || (!entry.devkit_game_id.is_empty() && entry.devkit_game_id == game.id)
    })
}

fn is_managed(entry: &ShortcutEntry) -> bool {
    entry
        .tags
        .iter()
        .any(|tag| Platform::all().iter().any(|p| p.tag() == tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gog_game(id: &str, name: &str) -> GameRecord {
        GameRecord {
            platform: Platform::Gog,
            id: id.into(),
            name: name.into(),
            launch_path: "C:\\GOG\\GalaxyClient.exe".into(),
            launch_args: format!("/command=runGame /gameId={id} /path=\"C:\\Games\\{name}\""),
            working_dir: format!("C:\\Games\\{name}"),
            icon_path: format!("C:\\Games\\{name}\\game.exe"),
        }
    }

    fn epic_game(id: &str, name: &str) -> GameRecord {
        GameRecord {
            platform: Platform::Epic,
            id: id.into(),
            name: name.into(),
            launch_path: format!("com.epicgames.launcher://apps/ns%3A{id}%3Aapp?action=launch&silent=true"),
            launch_args: String::new(),
            working_dir: format!("C:\\Epic\\{name}"),
            icon_path: format!("C:\\Epic\\{name}\\game.exe"),
        }
    }

    fn managed_entry(game: &GameRecord, last_play_time: u32) -> ShortcutEntry {
        let exe = quote(&game.launch_path);
        ShortcutEntry {
            app_name: game.name.clone(),
            start_dir: quote(&game.working_dir),
            icon: game.icon_path.clone(),
            devkit_game_id: game.id.clone(),
            tags: vec![game.platform.tag().to_string()],
            last_play_time,
            exe,
            ..ShortcutEntry::default()
        }
    }

    fn custom_entry(name: &str) -> ShortcutEntry {
        ShortcutEntry {
            app_name: name.into(),
            exe: format!("\"C:\\Custom\\{name}.exe\""),
            start_dir: "\"C:\\Custom\"".into(),
            tags: vec!["OtherLauncher".into()],
            last_play_time: 42,
            ..ShortcutEntry::default()
        }
    }

    #[test]
    fn builds_quoted_entry_from_record() {
        let game = gog_game("abc", "Foo");
        let merged = reconcile(&[game.clone()], &ShortcutCollection::default()).unwrap();

        assert_eq!(merged.len(), 1);
        let entry = &merged.entries[0];
        assert_eq!(entry.app_name, "Foo");
        assert_eq!(entry.exe, "\"C:\\GOG\\GalaxyClient.exe\"");
        assert_eq!(entry.start_dir, "\"C:\\Games\\Foo\"");
        assert_eq!(entry.icon, "C:\\Games\\Foo\\game.exe");
        assert_eq!(entry.devkit_game_id, "abc");
        assert_eq!(entry.tags, vec!["GOG".to_string()]);
        assert_eq!(entry.last_play_time, 0);
        assert_eq!(entry.app_id, generate_app_id(&entry.exe, "Foo"));
    }

    #[test]
    fn play_time_preserved_by_devkit_id() {
        let game = gog_game("g1", "Renamed Everywhere");
        let mut old = managed_entry(&gog_game("g1", "Old Name"), 500);
        old.icon = "C:\\somewhere\\else.exe".into();

        let existing = ShortcutCollection { entries: vec![old] };
        let merged = reconcile(&[game], &existing).unwrap();
        assert_eq!(merged.entries[0].last_play_time, 500);
    }

    #[test]
    fn play_time_preserved_by_name() {
        let game = gog_game("new-id", "Foo");
        let mut old = managed_entry(&gog_game("old-id", "Foo"), 120);
        old.icon = "C:\\moved\\game.exe".into();
        old.exe = "\"C:\\moved\\launcher.exe\"".into();

        let existing = ShortcutCollection { entries: vec![old] };
        let merged = reconcile(&[game], &existing).unwrap();
        assert_eq!(merged.entries[0].last_play_time, 120);
    }

    #[test]
    fn play_time_preserved_by_executable_path() {
        let game = gog_game("new-id", "New Name");
        // Old entry launched the game binary directly, before this tool
        // managed it. Matching unquotes the stored exe.
        let old = ShortcutEntry {
            app_name: "Whatever".into(),
            exe: quote(&game.icon_path),
            last_play_time: 900,
            ..ShortcutEntry::default()
        };

        let existing = ShortcutCollection { entries: vec![old] };
        let merged = reconcile(&[game], &existing).unwrap();
        assert_eq!(merged.entries[0].last_play_time, 900);
    }

    #[test]
    fn zero_play_time_is_not_carried() {
        let game = gog_game("g1", "Foo");
        let old = managed_entry(&game, 0);

        let existing = ShortcutCollection { entries: vec![old] };
        let merged = reconcile(&[game], &existing).unwrap();
        assert_eq!(merged.entries[0].last_play_time, 0);
    }

    #[test]
    fn only_play_time_is_carried_forward() {
        let game = gog_game("g1", "Foo");
        let mut old = managed_entry(&game, 300);
        old.launch_options = "stale options".into();
        old.icon = "C:\\stale\\icon.exe".into();
        old.is_hidden = true;

        let existing = ShortcutCollection { entries: vec![old] };
        let merged = reconcile(&[game.clone()], &existing).unwrap();

        let entry = &merged.entries[0];
        assert_eq!(entry.last_play_time, 300);
        // Discovery is authoritative for everything else.
        assert_eq!(entry.launch_options, game.launch_args);
        assert_eq!(entry.icon, game.icon_path);
        assert!(!entry.is_hidden);
    }

    #[test]
    fn uninstalled_managed_entry_is_dropped() {
        let gone = managed_entry(&gog_game("gone", "Uninstalled"), 999);
        let existing = ShortcutCollection {
            entries: vec![gone],
        };

        let merged = reconcile(&[], &existing).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn custom_shortcuts_survive_untouched_after_managed() {
        let game = gog_game("g1", "Foo");
        let custom = custom_entry("My Emulator");
        let existing = ShortcutCollection {
            entries: vec![custom.clone(), managed_entry(&game, 10)],
        };

        let merged = reconcile(&[game], &existing).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.entries[0].tags, vec!["GOG".to_string()]);
        // Byte-identical preservation, placed after managed entries.
        assert_eq!(merged.entries[1], custom);
    }

    #[test]
    fn custom_shortcuts_keep_relative_order() {
        let existing = ShortcutCollection {
            entries: vec![
                custom_entry("Zeta"),
                managed_entry(&epic_game("e1", "Gone"), 0),
                custom_entry("Alpha"),
            ],
        };

        let merged = reconcile(&[], &existing).unwrap();
        let names: Vec<&str> = merged.entries.iter().map(|e| e.app_name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Alpha"]);
    }

    #[test]
    fn discovery_order_is_display_order() {
        let games = [
            gog_game("g1", "Zulu"),
            gog_game("g2", "Alpha"),
            epic_game("e1", "Mike"),
        ];
        let merged = reconcile(&games, &ShortcutCollection::default()).unwrap();
        let names: Vec<&str> = merged.entries.iter().map(|e| e.app_name.as_str()).collect();
        assert_eq!(names, ["Zulu", "Alpha", "Mike"]);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let games = [gog_game("g1", "Foo"), epic_game("e1", "Bar")];
        let existing = ShortcutCollection {
            entries: vec![custom_entry("Custom"), managed_entry(&games[0], 250)],
        };

        let once = reconcile(&games, &existing).unwrap();
        let twice = reconcile(&games, &once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn spec_scenario_gog_foo() {
        // Existing: {appName: "Foo", devkitGameId: "abc",
        // lastPlayTime: 120, tags: {"0": "GOG"}}; discovery yields the
        // same game with fresh paths.
        let game = gog_game("abc", "Foo");
        let mut old = managed_entry(&game, 120);
        old.exe = "\"C:\\old\\GalaxyClient.exe\"".into();
        old.start_dir = "\"C:\\old\\Foo\"".into();
        old.icon = "C:\\old\\Foo\\game.exe".into();

        let existing = ShortcutCollection { entries: vec![old] };
        let merged = reconcile(&[game.clone()], &existing).unwrap();

        assert_eq!(merged.len(), 1);
        let entry = &merged.entries[0];
        assert_eq!(entry.devkit_game_id, "abc");
        assert_eq!(entry.last_play_time, 120);
        assert_eq!(entry.tags, vec!["GOG".to_string()]);
        assert_eq!(entry.exe, quote(&game.launch_path));
        assert_eq!(entry.start_dir, quote(&game.working_dir));
    }

    #[test]
    fn malformed_existing_entry_aborts() {
        let existing = ShortcutCollection {
            entries: vec![ShortcutEntry::default()],
        };
        let result = reconcile(&[gog_game("g1", "Foo")], &existing);
        assert!(matches!(
            result,
            Err(ReconcileError::MalformedEntry { index: 0 })
        ));
    }

    #[test]
    fn match_precedence_prefers_path_over_id() {
        let game = gog_game("g1", "Foo");

        // First entry matches by path, a later one by devkit id; the
        // path match wins because entries are scanned in order and all
        // three signals are tried per entry.
        let by_path = ShortcutEntry {
            app_name: "Different".into(),
            exe: quote(&game.icon_path),
            last_play_time: 111,
            ..ShortcutEntry::default()
        };
        let by_id = ShortcutEntry {
            app_name: "Also Different".into(),
            exe: "\"C:\\x\\y.exe\"".into(),
            devkit_game_id: "g1".into(),
            last_play_time: 222,
            ..ShortcutEntry::default()
        };

        let existing = ShortcutCollection {
            entries: vec![by_path, by_id],
        };
        let merged = reconcile(&[game], &existing).unwrap();
        assert_eq!(merged.entries[0].last_play_time, 111);
    }
}
