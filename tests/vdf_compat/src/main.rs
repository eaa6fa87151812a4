fn main() {
    println!("Run `cargo test -p vdf-compat` to execute shortcuts.vdf compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use shelfsync_reconcile::reconcile;
    use shelfsync_sources::{GameRecord, Platform};
    use shelfsync_steam::{ShortcutStore, SteamPaths, quote, vdf};

    /// A captured shortcuts.vdf with one GOG-managed entry and one
    /// user-authored entry carrying an unrecognized field.
    fn fixture_bytes() -> Vec<u8> {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("shortcuts.vdf");
        fs::read(&path).unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
    }

    #[test]
    fn fixture_parses() {
        let collection = vdf::parse(&fixture_bytes()).unwrap();
        assert_eq!(collection.len(), 2);

        let managed = &collection.entries[0];
        assert_eq!(managed.app_name, "Witch Hollow");
        assert_eq!(managed.devkit_game_id, "1207664663");
        assert_eq!(managed.last_play_time, 1_690_000_000);
        assert_eq!(managed.tags, vec!["GOG".to_string()]);

        let custom = &collection.entries[1];
        assert_eq!(custom.app_name, "RetroArch");
        assert_eq!(custom.tags, vec!["OtherLauncher".to_string(), "emulator".to_string()]);
        assert_eq!(custom.extra.len(), 1);
        assert_eq!(custom.extra[0].0, "CollectionOrder");
    }

    #[test]
    fn fixture_roundtrips_byte_exact() {
        let bytes = fixture_bytes();
        let collection = vdf::parse(&bytes).unwrap();
        assert_eq!(vdf::serialize(&collection), bytes);
    }

    #[test]
    fn sync_pass_over_fixture_preserves_custom_and_play_time() {
        let tmp = tempfile::TempDir::new().unwrap();
        let paths = SteamPaths::with_userdata(tmp.path());
        let shortcuts_path = paths.shortcuts_path("280467180");
        fs::create_dir_all(shortcuts_path.parent().unwrap()).unwrap();
        fs::write(&shortcuts_path, fixture_bytes()).unwrap();

        let store = ShortcutStore::new(paths);
        let existing = store.load("280467180").unwrap();

        // Same GOG game, reinstalled to a new location.
        let game = GameRecord {
            platform: Platform::Gog,
            id: "1207664663".into(),
            name: "Witch Hollow".into(),
            launch_path: "D:\\GOG\\GalaxyClient.exe".into(),
            launch_args: "/command=runGame /gameId=1207664663 /path=\"D:\\Games\\Witch Hollow\""
                .into(),
            working_dir: "D:\\Games\\Witch Hollow".into(),
            icon_path: "D:\\Games\\Witch Hollow\\game.exe".into(),
        };

        let merged = reconcile(&[game.clone()], &existing).unwrap();
        store.save("280467180", &merged).unwrap();
        let reloaded = store.load("280467180").unwrap();

        assert_eq!(reloaded.len(), 2);

        let managed = &reloaded.entries[0];
        assert_eq!(managed.exe, quote(&game.launch_path));
        assert_eq!(managed.start_dir, quote(&game.working_dir));
        assert_eq!(managed.last_play_time, 1_690_000_000);

        // The custom entry survives a full load/reconcile/save cycle
        // unchanged, unknown field included.
        assert_eq!(&reloaded.entries[1], &existing.entries[1]);
    }
}
