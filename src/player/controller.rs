use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::audio::{MixerEngine, MixerError};
use crate::equalizer::EqualizerSettings;
use crate::library::{TagReader, Track, display_name, is_supported_audio};

use super::command::Command;
use super::error::{InvalidFileReason, PlayerError};
use super::playlist::Playlist;
use super::state::{Controls, PlaybackState, Volume, VolumeLevel};

/// Check that `path` is something the player can accept.
pub fn validate_audio_path(path: &Path) -> Result<(), PlayerError> {
    let reason = if !is_supported_audio(path) {
        InvalidFileReason::UnsupportedExtension
    } else if !path.is_file() {
        InvalidFileReason::Missing
    } else {
        return Ok(());
    };
    Err(PlayerError::InvalidFile {
        path: path.to_path_buf(),
        reason,
    })
}

/// Owns the playlist, the player state and the mixer session.
///
/// The current track is referenced by path and is always an entry of the
/// playlist (or nothing). The mixer is reset (stop, unload, quit, init)
/// before every new load so a previous session never bleeds into the next.
pub struct PlaybackController {
    mixer: Box<dyn MixerEngine>,
    tags: Box<dyn TagReader>,
    playlist: Playlist,
    current: Option<PathBuf>,
    state: PlaybackState,
    volume: Volume,
    /// Last non-zero volume, restored when unmuting.
    audible: Volume,
    /// Seek position in whole seconds.
    position: u64,
    display_max: usize,
}

impl PlaybackController {
    pub fn new(mixer: Box<dyn MixerEngine>, tags: Box<dyn TagReader>, display_max: usize) -> Self {
        Self {
            mixer,
            tags,
            playlist: Playlist::new(),
            current: None,
            state: PlaybackState::Stopped,
            volume: Volume::default(),
            audible: Volume::default(),
            position: 0,
            display_max,
        }
    }

    /// Open the audio output. On failure the player keeps working without
    /// sound and every `play` reports the mixer error.
    pub fn init_mixer(&mut self) -> Result<(), PlayerError> {
        self.mixer.init()?;
        self.mixer.set_volume(self.volume.gain());
        Ok(())
    }

    pub fn mixer(&self) -> &dyn MixerEngine {
        self.mixer.as_ref()
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn volume(&self) -> Volume {
        self.volume
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
            .as_deref()
            .and_then(|p| self.playlist.position(p))
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_index().and_then(|i| self.playlist.get(i))
    }

    /// Duration of the current track in seconds, 0 when unknown or no track.
    pub fn duration(&self) -> u64 {
        self.current_track().map_or(0, |t| t.duration_secs)
    }

    pub fn controls(&self) -> Controls {
        let has_track = self.current.is_some();
        Controls {
            play: has_track && self.state != PlaybackState::Playing,
            pause: self.state == PlaybackState::Playing,
            stop: matches!(self.state, PlaybackState::Playing | PlaybackState::Paused),
            seek: has_track && self.duration() > 0,
        }
    }

    /// Run one command through the state machine.
    pub fn dispatch(&mut self, cmd: Command) -> Result<(), PlayerError> {
        match cmd {
            Command::Load(path) => self.load(&path).map(|_| ()),
            Command::Add(paths) => {
                for p in &paths {
                    self.add(p);
                }
                Ok(())
            }
            Command::Play => self.play(),
            Command::Pause => {
                self.pause();
                Ok(())
            }
            Command::TogglePlay => {
                if self.state == PlaybackState::Playing {
                    self.pause();
                    Ok(())
                } else {
                    self.play()
                }
            }
            Command::Stop => self.stop(),
            Command::Seek(secs) => self.seek(secs),
            Command::SeekBy(delta) => self.seek_by(delta),
            Command::PlayIndex(i) => self.play_index(i),
            Command::Move { from, to } => self.move_entry(from, to),
            Command::Remove(i) => self.remove(i).map(|_| ()),
            Command::Next => self.next(),
            Command::Previous => self.previous(),
            Command::SetVolume(v) => {
                self.set_volume(v);
                Ok(())
            }
            Command::ChangeVolume(delta) => {
                self.set_volume(self.volume.step(delta).percent());
                Ok(())
            }
            Command::ToggleMute => {
                self.toggle_mute();
                Ok(())
            }
            Command::ApplyEqualizer(eq) => {
                self.apply_equalizer(&eq);
                Ok(())
            }
            Command::Tick => {
                self.tick();
                Ok(())
            }
        }
    }

    /// Add `path` to the playlist (if absent) and select it when nothing is
    /// selected. Returns the playlist index of the track.
    pub fn load(&mut self, path: &Path) -> Result<usize, PlayerError> {
        let (index, _) = self.insert(path)?;
        self.settle_selection(index);
        Ok(index)
    }

    /// Lenient `load` used for drops and scans: unplayable files are skipped.
    /// Returns whether a new entry was added.
    pub fn add(&mut self, path: &Path) -> bool {
        match self.insert(path) {
            Ok((index, added)) => {
                self.settle_selection(index);
                added
            }
            Err(e) => {
                debug!(error = %e, "skipping file");
                false
            }
        }
    }

    fn insert(&mut self, path: &Path) -> Result<(usize, bool), PlayerError> {
        validate_audio_path(path)?;
        if let Some(i) = self.playlist.position(path) {
            return Ok((i, false));
        }

        let duration_secs = match self.tags.duration_secs(path) {
            Ok(secs) => secs,
            Err(e) => {
                warn!(error = %e, "duration unknown, seeking disabled for this track");
                0
            }
        };
        let track = Track {
            path: path.to_path_buf(),
            display: display_name(path, self.display_max),
            duration_secs,
        };
        self.playlist.push(track);
        info!(path = %path.display(), duration_secs, "added to playlist");
        Ok((self.playlist.len() - 1, true))
    }

    /// After an insert: select `index` when nothing is selected, and leave
    /// `Stopped` for `Ready` whenever a track is selected.
    fn settle_selection(&mut self, index: usize) {
        if self.current.is_none() {
            self.select(index);
        } else if self.state == PlaybackState::Stopped {
            self.state = PlaybackState::Ready;
        }
    }

    /// Playback could not be started or continued. The mixer holds nothing
    /// playable any more; the selection is kept.
    fn playback_failed(&mut self) {
        self.position = 0;
        self.state = if self.current.is_some() {
            PlaybackState::Ready
        } else {
            PlaybackState::Stopped
        };
    }

    fn select(&mut self, index: usize) {
        self.current = self.playlist.get(index).map(|t| t.path.clone());
        self.position = 0;
        if self.state == PlaybackState::Stopped {
            self.state = PlaybackState::Ready;
        }
    }

    /// Resume when paused, otherwise start the current track (or the first
    /// entry when nothing is selected) from the beginning.
    pub fn play(&mut self) -> Result<(), PlayerError> {
        if self.state == PlaybackState::Paused {
            self.mixer.unpause();
            self.state = PlaybackState::Playing;
            return Ok(());
        }

        let index = match self.current_index() {
            Some(i) => i,
            None if self.playlist.is_empty() => return Err(PlayerError::NothingToPlay),
            None => 0,
        };
        self.start(index, 0)
    }

    /// Start playlist entry `index` from the beginning and make it current.
    pub fn play_index(&mut self, index: usize) -> Result<(), PlayerError> {
        let track = self
            .playlist
            .get(index)
            .ok_or(PlayerError::IndexOutOfRange {
                index,
                len: self.playlist.len(),
            })?;
        if !track.path.exists() {
            return Err(PlayerError::InvalidFile {
                path: track.path.clone(),
                reason: InvalidFileReason::Missing,
            });
        }
        self.start(index, 0)
    }

    fn start(&mut self, index: usize, from_secs: u64) -> Result<(), PlayerError> {
        let Some(path) = self.playlist.get(index).map(|t| t.path.clone()) else {
            return Err(PlayerError::IndexOutOfRange {
                index,
                len: self.playlist.len(),
            });
        };

        if let Err(e) = self.open_session(&path, from_secs) {
            warn!(error = %e, path = %path.display(), "playback failed");
            self.playback_failed();
            return Err(e.into());
        }

        self.current = Some(path);
        self.position = from_secs;
        self.state = PlaybackState::Playing;
        Ok(())
    }

    fn open_session(&mut self, path: &Path, from_secs: u64) -> Result<(), MixerError> {
        self.reset_session()?;
        self.mixer.load(path)?;
        self.mixer.set_volume(self.volume.gain());
        self.mixer.play(Duration::from_secs(from_secs))
    }

    fn reset_session(&mut self) -> Result<(), MixerError> {
        self.mixer.stop();
        self.mixer.unload();
        self.mixer.quit();
        self.mixer.init()
    }

    /// Pause when playing. Returns whether anything was paused.
    pub fn pause(&mut self) -> bool {
        if self.state == PlaybackState::Playing && self.mixer.is_busy() {
            self.mixer.pause();
            self.state = PlaybackState::Paused;
            return true;
        }
        false
    }

    /// Stop and fully reset the mixer. The current track stays selected.
    pub fn stop(&mut self) -> Result<(), PlayerError> {
        self.state = PlaybackState::Stopped;
        self.position = 0;
        self.reset_session()?;
        Ok(())
    }

    /// Stop playback and release the audio output for good.
    pub fn shutdown(&mut self) {
        self.mixer.stop();
        self.mixer.unload();
        self.mixer.quit();
        self.state = PlaybackState::Stopped;
        self.position = 0;
    }

    /// Jump to `secs` (clamped to the duration) and play from there.
    pub fn seek(&mut self, secs: u64) -> Result<(), PlayerError> {
        let index = self.current_index().ok_or(PlayerError::SeekUnavailable)?;
        let duration = self.duration();
        if duration == 0 {
            return Err(PlayerError::SeekUnavailable);
        }
        let target = secs.min(duration);

        match self.state {
            PlaybackState::Playing | PlaybackState::Paused => {
                if let Err(e) = self.mixer.play(Duration::from_secs(target)) {
                    self.playback_failed();
                    return Err(e.into());
                }
                self.position = target;
                self.state = PlaybackState::Playing;
                Ok(())
            }
            PlaybackState::Stopped | PlaybackState::Ready => self.start(index, target),
        }
    }

    pub fn seek_by(&mut self, delta_secs: i64) -> Result<(), PlayerError> {
        let target = self.position.saturating_add_signed(delta_secs);
        self.seek(target)
    }

    /// Play the entry after the current one, wrapping to the top.
    pub fn next(&mut self) -> Result<(), PlayerError> {
        let len = self.playlist.len();
        if len == 0 {
            return Err(PlayerError::NothingToPlay);
        }
        let next = self.current_index().map_or(0, |i| (i + 1) % len);
        self.start(next, 0)
    }

    /// Play the entry before the current one, wrapping to the bottom.
    pub fn previous(&mut self) -> Result<(), PlayerError> {
        let len = self.playlist.len();
        if len == 0 {
            return Err(PlayerError::NothingToPlay);
        }
        let prev = match self.current_index() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.start(prev, 0)
    }

    /// Move a playlist entry. When the moved track is the one playing, it is
    /// reloaded and resumed where it was.
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<(), PlayerError> {
        let moved = self.playlist.get(from).map(|t| t.path.clone());
        let resume = moved.is_some()
            && moved == self.current
            && self.state == PlaybackState::Playing
            && self.mixer.is_busy();
        let resume_at = self.mixer.position();

        self.playlist.move_entry(from, to)?;

        if resume {
            if let Some(path) = moved {
                self.mixer.stop();
                self.mixer.unload();
                let replay = self
                    .mixer
                    .load(&path)
                    .and_then(|_| self.mixer.play(resume_at));
                if let Err(e) = replay {
                    self.playback_failed();
                    return Err(e.into());
                }
                self.position = resume_at.as_secs();
            }
        }
        Ok(())
    }

    /// Remove a playlist entry. Removing the current track empties the player
    /// state and resets the mixer.
    pub fn remove(&mut self, index: usize) -> Result<Track, PlayerError> {
        let track = self.playlist.remove(index)?;
        if self.current.as_deref() == Some(track.path.as_path()) {
            self.current = None;
            self.position = 0;
            self.state = PlaybackState::Stopped;
            if let Err(e) = self.reset_session() {
                warn!(error = %e, "mixer reset after removal failed");
            }
        }
        info!(path = %track.path.display(), "removed from playlist");
        Ok(track)
    }

    pub fn set_volume(&mut self, percent: u8) -> VolumeLevel {
        self.volume = Volume::new(percent);
        if self.volume.percent() > 0 {
            self.audible = self.volume;
        }
        self.mixer.set_volume(self.volume.gain());
        self.volume.level()
    }

    pub fn toggle_mute(&mut self) -> VolumeLevel {
        if self.volume.percent() == 0 {
            self.set_volume(self.audible.percent())
        } else {
            self.set_volume(0)
        }
    }

    pub fn apply_equalizer(&mut self, eq: &EqualizerSettings) {
        self.mixer.set_channel_levels(eq.channel_levels());
    }

    /// Sample the mixer position; notice when playback ran out.
    pub fn tick(&mut self) {
        if self.mixer.is_busy() {
            let secs = self.mixer.position().as_secs();
            let duration = self.duration();
            self.position = if duration > 0 { secs.min(duration) } else { secs };
        } else if self.state == PlaybackState::Playing {
            debug!("playback finished");
            self.position = 0;
            self.state = PlaybackState::Stopped;
        }
    }
}
