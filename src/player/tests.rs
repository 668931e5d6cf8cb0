use super::*;
use crate::audio::ChannelLevels;
use crate::equalizer::{EqualizerSettings, Preset};
use crate::library::LoftyTagReader;
use crate::testing::{BrokenTags, FakeMixer, FixedTags, touch, write_silent_wav};
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

fn controller(duration: u64) -> (PlaybackController, FakeMixer) {
    let mixer = FakeMixer::new();
    let mut ctl = PlaybackController::new(Box::new(mixer.clone()), Box::new(FixedTags(duration)), 50);
    ctl.init_mixer().unwrap();
    (ctl, mixer)
}

fn three_tracks() -> (TempDir, Vec<PathBuf>) {
    let dir = tempdir().unwrap();
    let paths = ["a.mp3", "b.wav", "c.mp3"]
        .iter()
        .map(|n| touch(dir.path(), n))
        .collect();
    (dir, paths)
}

fn names(ctl: &PlaybackController) -> Vec<String> {
    ctl.playlist()
        .tracks()
        .iter()
        .map(|t| t.display.clone())
        .collect()
}

#[test]
fn fresh_controller_has_nothing_enabled() {
    let (ctl, _) = controller(10);
    assert_eq!(ctl.state(), PlaybackState::Stopped);
    assert!(ctl.controls().none_enabled());
    assert_eq!(ctl.volume().percent(), 100);
}

#[test]
fn load_rejects_unsupported_extension_and_missing_files() {
    let dir = tempdir().unwrap();
    let (mut ctl, _) = controller(10);

    let flac = touch(dir.path(), "song.flac");
    let err = ctl.load(&flac).unwrap_err();
    assert!(matches!(
        err,
        PlayerError::InvalidFile {
            reason: InvalidFileReason::UnsupportedExtension,
            ..
        }
    ));

    let err = ctl.load(&dir.path().join("gone.mp3")).unwrap_err();
    assert!(matches!(
        err,
        PlayerError::InvalidFile {
            reason: InvalidFileReason::Missing,
            ..
        }
    ));
    assert!(ctl.playlist().is_empty());
    assert_eq!(ctl.state(), PlaybackState::Stopped);
}

#[test]
fn load_selects_first_track_and_becomes_ready() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, _) = controller(10);

    assert_eq!(ctl.load(&paths[0]).unwrap(), 0);
    assert_eq!(ctl.load(&paths[1]).unwrap(), 1);

    assert_eq!(ctl.state(), PlaybackState::Ready);
    assert_eq!(ctl.current_index(), Some(0));
    let controls = ctl.controls();
    assert!(controls.play && controls.seek);
    assert!(!controls.pause && !controls.stop);
}

#[test]
fn adding_the_same_path_twice_keeps_one_entry() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, _) = controller(10);

    assert!(ctl.add(&paths[0]));
    assert!(!ctl.add(&paths[0]));
    assert_eq!(ctl.load(&paths[0]).unwrap(), 0);
    assert_eq!(ctl.playlist().len(), 1);
}

#[test]
fn add_skips_unplayable_files() {
    let dir = tempdir().unwrap();
    let (mut ctl, _) = controller(10);
    assert!(!ctl.add(&touch(dir.path(), "notes.txt")));
    assert!(ctl.playlist().is_empty());
}

#[test]
fn play_with_empty_playlist_reports_nothing_to_play() {
    let (mut ctl, _) = controller(10);
    assert!(matches!(ctl.play(), Err(PlayerError::NothingToPlay)));
}

#[test]
fn play_resets_the_mixer_before_loading() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, mixer) = controller(10);
    ctl.load(&paths[0]).unwrap();
    mixer.clear_calls();

    ctl.play().unwrap();

    let calls = mixer.calls();
    assert_eq!(&calls[..4], ["stop", "unload", "quit", "init"]);
    assert_eq!(calls[4], format!("load {}", paths[0].display()));
    assert_eq!(calls[5], "play 0");
    assert_eq!(ctl.state(), PlaybackState::Playing);
    let controls = ctl.controls();
    assert!(!controls.play && controls.pause && controls.stop && controls.seek);
}

#[test]
fn pause_then_play_resumes_without_reloading() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, mixer) = controller(10);
    ctl.load(&paths[0]).unwrap();
    ctl.play().unwrap();

    assert!(ctl.pause());
    assert_eq!(ctl.state(), PlaybackState::Paused);
    assert!(ctl.controls().play);

    mixer.clear_calls();
    ctl.play().unwrap();
    assert_eq!(mixer.calls(), ["unpause"]);
    assert_eq!(ctl.state(), PlaybackState::Playing);
}

#[test]
fn pause_is_ignored_unless_playing() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, _) = controller(10);
    ctl.load(&paths[0]).unwrap();
    assert!(!ctl.pause());
    assert_eq!(ctl.state(), PlaybackState::Ready);
}

#[test]
fn stop_keeps_selection_and_rewinds() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, mixer) = controller(10);
    ctl.load(&paths[0]).unwrap();
    ctl.play().unwrap();
    mixer.advance_to(4);
    ctl.tick();
    assert_eq!(ctl.position(), 4);

    ctl.stop().unwrap();
    assert_eq!(ctl.state(), PlaybackState::Stopped);
    assert_eq!(ctl.position(), 0);
    assert_eq!(ctl.current_index(), Some(0));
    assert!(ctl.controls().play);
    assert!(!ctl.controls().stop);
}

#[test]
fn loading_after_stop_makes_the_player_ready() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, _) = controller(10);
    ctl.load(&paths[0]).unwrap();
    ctl.play().unwrap();
    ctl.stop().unwrap();
    assert_eq!(ctl.state(), PlaybackState::Stopped);

    ctl.load(&paths[1]).unwrap();
    assert_eq!(ctl.state(), PlaybackState::Ready);
    assert_eq!(ctl.current_index(), Some(0));

    ctl.stop().unwrap();
    assert!(ctl.add(&paths[2]));
    assert_eq!(ctl.state(), PlaybackState::Ready);
}

#[test]
fn failed_play_keeps_a_ready_player_ready() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, mixer) = controller(10);
    ctl.load(&paths[0]).unwrap();
    mixer.state.borrow_mut().fail_load = true;

    let err = ctl.play().unwrap_err();
    assert!(matches!(err, PlayerError::Mixer(_)));
    assert_eq!(ctl.state(), PlaybackState::Ready);
    assert_eq!(ctl.current_index(), Some(0));
    assert_eq!(ctl.position(), 0);
}

#[test]
fn failed_switch_while_playing_falls_back_to_ready() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, mixer) = controller(10);
    for p in &paths {
        ctl.add(p);
    }
    ctl.play().unwrap();
    mixer.advance_to(3);
    ctl.tick();
    mixer.state.borrow_mut().fail_load = true;

    assert!(ctl.next().is_err());
    assert_eq!(ctl.state(), PlaybackState::Ready);
    assert_eq!(ctl.current_index(), Some(0));
    assert_eq!(ctl.position(), 0);
}

#[test]
fn seek_clamps_to_duration_and_starts_playback() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, mixer) = controller(10);
    ctl.load(&paths[0]).unwrap();

    ctl.seek(99).unwrap();
    assert_eq!(ctl.position(), 10);
    assert_eq!(ctl.state(), PlaybackState::Playing);
    assert_eq!(mixer.calls().last().unwrap(), "play 10");
}

#[test]
fn seek_while_paused_resumes_from_target() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, mixer) = controller(10);
    ctl.load(&paths[0]).unwrap();
    ctl.play().unwrap();
    ctl.pause();
    mixer.clear_calls();

    ctl.seek(3).unwrap();
    assert_eq!(mixer.calls(), ["play 3"]);
    assert_eq!(ctl.state(), PlaybackState::Playing);
}

#[test]
fn seek_by_moves_relative_and_floors_at_zero() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, _) = controller(30);
    ctl.load(&paths[0]).unwrap();
    ctl.seek(10).unwrap();

    ctl.seek_by(5).unwrap();
    assert_eq!(ctl.position(), 15);
    ctl.seek_by(-60).unwrap();
    assert_eq!(ctl.position(), 0);
}

#[test]
fn seek_needs_a_known_duration() {
    let (_dir, paths) = three_tracks();
    let mixer = FakeMixer::new();
    let mut ctl = PlaybackController::new(Box::new(mixer), Box::new(BrokenTags), 50);
    ctl.init_mixer().unwrap();

    assert!(matches!(ctl.seek(1), Err(PlayerError::SeekUnavailable)));
    ctl.load(&paths[0]).unwrap();
    assert_eq!(ctl.duration(), 0);
    assert!(!ctl.controls().seek);
    assert!(matches!(ctl.seek(1), Err(PlayerError::SeekUnavailable)));
}

#[test]
fn seeking_a_real_wav_lands_inside_the_track() {
    let dir = tempdir().unwrap();
    let wav = dir.path().join("ten.wav");
    write_silent_wav(&wav, 10);

    let mixer = FakeMixer::new();
    let mut ctl = PlaybackController::new(Box::new(mixer.clone()), Box::new(LoftyTagReader), 50);
    ctl.init_mixer().unwrap();
    ctl.load(&wav).unwrap();
    assert_eq!(ctl.duration(), 10);

    ctl.seek(5).unwrap();
    ctl.tick();
    assert!((5..=10).contains(&ctl.position()));
}

#[test]
fn next_and_previous_wrap_around() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, _) = controller(10);
    for p in &paths {
        ctl.add(p);
    }

    ctl.previous().unwrap();
    assert_eq!(ctl.current_index(), Some(2));
    ctl.next().unwrap();
    assert_eq!(ctl.current_index(), Some(0));
    ctl.next().unwrap();
    assert_eq!(ctl.current_index(), Some(1));
    assert_eq!(ctl.state(), PlaybackState::Playing);
}

#[test]
fn play_index_checks_bounds_and_existence() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, _) = controller(10);
    for p in &paths {
        ctl.add(p);
    }

    assert!(matches!(
        ctl.play_index(7),
        Err(PlayerError::IndexOutOfRange { index: 7, len: 3 })
    ));

    std::fs::remove_file(&paths[2]).unwrap();
    assert!(matches!(
        ctl.play_index(2),
        Err(PlayerError::InvalidFile {
            reason: InvalidFileReason::Missing,
            ..
        })
    ));

    ctl.play_index(1).unwrap();
    assert_eq!(ctl.current_index(), Some(1));
}

#[test]
fn move_keeps_the_same_set_of_tracks() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, _) = controller(10);
    for p in &paths {
        ctl.add(p);
    }

    ctl.move_entry(0, 2).unwrap();
    assert_eq!(names(&ctl), ["b.wav", "c.mp3", "a.mp3"]);
    ctl.move_entry(2, 1).unwrap();
    assert_eq!(names(&ctl), ["b.wav", "a.mp3", "c.mp3"]);

    let mut sorted = names(&ctl);
    sorted.sort();
    assert_eq!(sorted, ["a.mp3", "b.wav", "c.mp3"]);
    assert!(ctl.move_entry(0, 3).is_err());
}

#[test]
fn moving_the_playing_track_resumes_where_it_was() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, mixer) = controller(60);
    for p in &paths {
        ctl.add(p);
    }
    ctl.play().unwrap();
    mixer.advance_to(12);
    mixer.clear_calls();

    ctl.move_entry(0, 2).unwrap();

    let calls = mixer.calls();
    assert_eq!(calls[0], "stop");
    assert_eq!(calls[1], "unload");
    assert_eq!(calls[2], format!("load {}", paths[0].display()));
    assert_eq!(calls[3], "play 12");
    assert_eq!(ctl.current_index(), Some(2));
    assert_eq!(ctl.position(), 12);
    assert_eq!(ctl.state(), PlaybackState::Playing);
}

#[test]
fn removing_the_current_track_disables_all_controls() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, _) = controller(10);
    for p in &paths {
        ctl.add(p);
    }
    ctl.play_index(1).unwrap();

    let removed = ctl.remove(1).unwrap();
    assert_eq!(removed.path, paths[1]);
    assert_eq!(ctl.current_index(), None);
    assert_eq!(ctl.state(), PlaybackState::Stopped);
    assert!(ctl.controls().none_enabled());
    assert_eq!(ctl.playlist().len(), 2);
}

#[test]
fn removing_another_track_keeps_playback() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, _) = controller(10);
    for p in &paths {
        ctl.add(p);
    }
    ctl.play_index(2).unwrap();

    ctl.remove(0).unwrap();
    assert_eq!(ctl.current_index(), Some(1));
    assert_eq!(ctl.state(), PlaybackState::Playing);
    assert!(ctl.remove(5).is_err());
}

#[test]
fn tick_notices_the_end_of_a_track() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, mixer) = controller(10);
    ctl.load(&paths[0]).unwrap();
    ctl.play().unwrap();
    mixer.advance_to(7);
    ctl.tick();
    assert_eq!(ctl.position(), 7);

    mixer.finish();
    ctl.tick();
    assert_eq!(ctl.state(), PlaybackState::Stopped);
    assert_eq!(ctl.position(), 0);
}

#[test]
fn volume_levels_follow_thresholds() {
    let cases = [
        (0, VolumeLevel::Muted),
        (1, VolumeLevel::Low),
        (32, VolumeLevel::Low),
        (33, VolumeLevel::Medium),
        (65, VolumeLevel::Medium),
        (66, VolumeLevel::High),
        (100, VolumeLevel::High),
    ];
    let (mut ctl, mixer) = controller(10);
    for (percent, level) in cases {
        assert_eq!(ctl.set_volume(percent), level, "volume {percent}");
    }
    assert_eq!(mixer.state.borrow().volume, 1.0);
}

#[test]
fn mute_toggles_back_to_the_last_audible_volume() {
    let (mut ctl, mixer) = controller(10);
    ctl.set_volume(40);
    assert_eq!(ctl.toggle_mute(), VolumeLevel::Muted);
    assert_eq!(mixer.state.borrow().volume, 0.0);

    assert_eq!(ctl.toggle_mute(), VolumeLevel::Medium);
    assert_eq!(ctl.volume().percent(), 40);

    // Turned all the way down by hand: unmute still finds 40.
    ctl.dispatch(Command::ChangeVolume(-100)).unwrap();
    ctl.dispatch(Command::ToggleMute).unwrap();
    assert_eq!(ctl.volume().percent(), 40);
}

#[test]
fn volume_steps_saturate() {
    assert_eq!(Volume::new(250).percent(), 100);
    assert_eq!(Volume::new(3).step(-5).percent(), 0);
    assert_eq!(Volume::new(98).step(5).percent(), 100);
}

#[test]
fn dispatch_routes_commands() {
    let (_dir, paths) = three_tracks();
    let (mut ctl, mixer) = controller(10);

    ctl.dispatch(Command::Add(paths.clone())).unwrap();
    assert_eq!(ctl.playlist().len(), 3);
    ctl.dispatch(Command::TogglePlay).unwrap();
    assert_eq!(ctl.state(), PlaybackState::Playing);
    ctl.dispatch(Command::TogglePlay).unwrap();
    assert_eq!(ctl.state(), PlaybackState::Paused);
    ctl.dispatch(Command::ChangeVolume(-40)).unwrap();
    assert_eq!(ctl.volume().percent(), 60);

    ctl.dispatch(Command::ApplyEqualizer(EqualizerSettings::from_preset(
        Preset::Rock,
    )))
    .unwrap();
    assert_ne!(mixer.state.borrow().levels, ChannelLevels::default());
}
