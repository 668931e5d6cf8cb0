//! Test doubles shared by the unit tests of several modules.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use crate::audio::{ChannelLevels, MixerEngine, MixerError};
use crate::library::{TagError, TagReader};

/// Write a silent 8 kHz mono 8-bit PCM WAV file lasting `secs` seconds.
pub fn write_silent_wav(path: &Path, secs: u32) {
    const RATE: u32 = 8000;
    let data_len = RATE * secs;
    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&RATE.to_le_bytes());
    bytes.extend_from_slice(&RATE.to_le_bytes()); // byte rate
    bytes.extend_from_slice(&1u16.to_le_bytes()); // block align
    bytes.extend_from_slice(&8u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 0x80);
    fs::write(path, bytes).unwrap();
}

/// Create an empty file with the given name under `dir` and return its path.
pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"").unwrap();
    path
}

#[derive(Debug, Default)]
pub struct FakeMixerState {
    pub calls: Vec<String>,
    pub initialized: bool,
    pub loaded: Option<PathBuf>,
    pub busy: bool,
    pub paused: bool,
    pub position: Duration,
    pub volume: f32,
    pub levels: ChannelLevels,
    pub fail_init: bool,
    pub fail_load: bool,
}

/// Mixer that records calls and lets tests steer busy/position.
#[derive(Clone, Default)]
pub struct FakeMixer {
    pub state: Rc<RefCell<FakeMixerState>>,
}

impl FakeMixer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Pretend the playhead moved to `secs`.
    pub fn advance_to(&self, secs: u64) {
        self.state.borrow_mut().position = Duration::from_secs(secs);
    }

    /// Pretend the loaded file finished.
    pub fn finish(&self) {
        let mut s = self.state.borrow_mut();
        s.busy = false;
        s.paused = false;
    }

    fn record(&self, call: impl Into<String>) {
        self.state.borrow_mut().calls.push(call.into());
    }
}

impl MixerEngine for FakeMixer {
    fn init(&mut self) -> Result<(), MixerError> {
        self.record("init");
        let mut s = self.state.borrow_mut();
        if s.fail_init {
            return Err(MixerError::Output("no device".into()));
        }
        s.initialized = true;
        Ok(())
    }

    fn quit(&mut self) {
        self.record("quit");
        let mut s = self.state.borrow_mut();
        s.initialized = false;
        s.loaded = None;
        s.busy = false;
        s.paused = false;
    }

    fn is_initialized(&self) -> bool {
        self.state.borrow().initialized
    }

    fn load(&mut self, path: &Path) -> Result<(), MixerError> {
        self.record(format!("load {}", path.display()));
        let mut s = self.state.borrow_mut();
        if !s.initialized {
            return Err(MixerError::NotInitialized);
        }
        if s.fail_load {
            return Err(MixerError::Decode {
                path: path.to_path_buf(),
                reason: "broken".into(),
            });
        }
        s.loaded = Some(path.to_path_buf());
        Ok(())
    }

    fn unload(&mut self) {
        self.record("unload");
        let mut s = self.state.borrow_mut();
        s.loaded = None;
        s.busy = false;
    }

    fn play(&mut self, start: Duration) -> Result<(), MixerError> {
        self.record(format!("play {}", start.as_secs()));
        let mut s = self.state.borrow_mut();
        if s.loaded.is_none() {
            return Err(MixerError::NothingLoaded);
        }
        s.position = start;
        s.busy = true;
        s.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.record("pause");
        let mut s = self.state.borrow_mut();
        s.paused = true;
        s.busy = false;
    }

    fn unpause(&mut self) {
        self.record("unpause");
        let mut s = self.state.borrow_mut();
        if s.paused {
            s.paused = false;
            s.busy = true;
        }
    }

    fn stop(&mut self) {
        self.record("stop");
        let mut s = self.state.borrow_mut();
        s.busy = false;
        s.paused = false;
        s.position = Duration::ZERO;
    }

    fn set_volume(&mut self, volume: f32) {
        self.state.borrow_mut().volume = volume;
    }

    fn set_channel_levels(&mut self, levels: ChannelLevels) {
        self.state.borrow_mut().levels = levels;
    }

    fn channel_levels(&self) -> ChannelLevels {
        self.state.borrow().levels
    }

    fn position(&self) -> Duration {
        self.state.borrow().position
    }

    fn is_busy(&self) -> bool {
        self.state.borrow().busy
    }
}

/// Tag reader that answers every file with the same duration.
pub struct FixedTags(pub u64);

impl TagReader for FixedTags {
    fn duration_secs(&self, _path: &Path) -> Result<u64, TagError> {
        Ok(self.0)
    }
}

/// Tag reader that cannot read anything.
pub struct BrokenTags;

impl TagReader for BrokenTags {
    fn duration_secs(&self, path: &Path) -> Result<u64, TagError> {
        Err(TagError {
            path: path.to_path_buf(),
            reason: "unreadable".into(),
        })
    }
}
