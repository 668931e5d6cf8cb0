use super::*;
use crate::equalizer::{Band, EqualizerSettings, Preset};
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

#[test]
fn window_defaults_when_file_is_missing() {
    let dir = tempdir().unwrap();
    let store = WindowStore::new(dir.path());
    for name in WindowName::ALL {
        assert_eq!(store.load(name), name.default_state());
    }
    assert!(!store.path().exists());
}

#[test]
fn window_geometry_round_trips() {
    let dir = tempdir().unwrap();
    let store = WindowStore::new(dir.path());
    let samples = [
        (WindowName::MainPlayer, -3, 0, 1, 1, WindowFlags::Normal),
        (WindowName::Playlist, 40, 12, 200, 60, WindowFlags::Maximized),
        (WindowName::Config, 0, 7, 33, 9, WindowFlags::Minimized),
    ];

    for (name, x, y, width, height, state) in samples {
        let saved = WindowState {
            x,
            y,
            width,
            height,
            state,
        };
        store.save_all([(name, saved)]).unwrap();
        assert_eq!(store.load(name), saved, "{}", name.key());
    }

    // Earlier saves survive later ones.
    assert_eq!(store.load(WindowName::MainPlayer).x, -3);
}

#[test]
fn corrupt_setting_file_falls_back_and_is_replaced() {
    let dir = tempdir().unwrap();
    let store = WindowStore::new(dir.path());
    fs::write(store.path(), "{ not json").unwrap();

    assert_eq!(
        store.load(WindowName::Playlist),
        WindowName::Playlist.default_state()
    );

    let state = WindowState {
        x: 1,
        y: 2,
        width: 30,
        height: 10,
        state: WindowFlags::Normal,
    };
    store.save_all([(WindowName::Playlist, state)]).unwrap();
    assert_eq!(store.load(WindowName::Playlist), state);
}

#[test]
fn unknown_keys_in_setting_file_are_preserved() {
    let dir = tempdir().unwrap();
    let store = WindowStore::new(dir.path());
    fs::write(
        store.path(),
        r#"{"equalizer_window": {"x": 5}, "config": {"x": 1, "y": 1, "width": 10, "height": 4, "state": 0}}"#,
    )
    .unwrap();

    store
        .save_all([(WindowName::MainPlayer, WindowName::MainPlayer.default_state())])
        .unwrap();

    let doc: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(doc["equalizer_window"]["x"], 5);
    assert_eq!(doc["config"]["width"], 10);
    assert_eq!(doc["main_player"]["width"], 80);
}

#[test]
fn malformed_window_entry_only_affects_that_window() {
    let dir = tempdir().unwrap();
    let store = WindowStore::new(dir.path());
    fs::write(
        store.path(),
        r#"{"playlist": {"x": "left"}, "config": {"x": 2, "y": 3, "width": 0, "height": 4, "state": 0},
            "main_player": {"x": 2, "y": 3, "width": 50, "height": 9, "state": 8}}"#,
    )
    .unwrap();

    assert_eq!(store.load(WindowName::Playlist), WindowName::Playlist.default_state());
    assert_eq!(store.load(WindowName::Config), WindowName::Config.default_state());
    let main = store.load(WindowName::MainPlayer);
    assert_eq!((main.width, main.state), (50, WindowFlags::Normal));
}

#[test]
fn window_flags_read_the_state_bits() {
    assert_eq!(WindowFlags::from(0), WindowFlags::Normal);
    assert_eq!(WindowFlags::from(1), WindowFlags::Minimized);
    assert_eq!(WindowFlags::from(2), WindowFlags::Maximized);
    assert_eq!(WindowFlags::from(3), WindowFlags::MinimizedMaximized);
    assert_eq!(WindowFlags::from(8), WindowFlags::Normal);
    assert_eq!(u32::from(WindowFlags::Maximized), 2);
    assert_eq!(u32::from(WindowFlags::MinimizedMaximized), 3);
    assert!(WindowFlags::MinimizedMaximized.is_minimized());
    assert!(!WindowFlags::Maximized.is_minimized());
}

#[test]
fn preferences_default_and_round_trip() {
    let dir = tempdir().unwrap();
    let store = PreferencesStore::new(dir.path());
    let prefs = store.load();
    assert_eq!(prefs, Preferences::default());
    assert_eq!(prefs.volume, 100);

    let mut eq = EqualizerSettings::from_preset(Preset::Pop);
    eq.set_gain(Band::Khz16, -7);
    let saved = Preferences {
        startup: true,
        minimize_to_tray: true,
        volume: 35,
        equalizer: eq,
    };
    store.save(&saved).unwrap();
    assert_eq!(store.load(), saved);
}

#[test]
fn partial_or_corrupt_preferences_use_defaults() {
    let dir = tempdir().unwrap();
    let store = PreferencesStore::new(dir.path());

    fs::write(store.path(), r#"{"minimize_to_tray": true}"#).unwrap();
    let prefs = store.load();
    assert!(prefs.minimize_to_tray);
    assert_eq!(prefs.volume, 100);

    fs::write(store.path(), "[1, 2").unwrap();
    assert_eq!(store.load(), Preferences::default());
}

#[test]
fn save_creates_the_state_directory() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    PreferencesStore::new(&nested)
        .save(&Preferences::default())
        .unwrap();
    assert!(nested.join("preferences.json").is_file());
}
