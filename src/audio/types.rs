//! Mixer engine interface and the small types that cross it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MixerError {
    /// `init` was never called or the output was shut down.
    #[error("audio output is not initialized")]
    NotInitialized,
    #[error("no audio output device: {0}")]
    Output(String),
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("nothing is loaded")]
    NothingLoaded,
}

/// Coarse per-range levels in `0.0..=1.0` derived from the equalizer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ChannelLevels {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
}

impl Default for ChannelLevels {
    fn default() -> Self {
        Self {
            bass: 0.5,
            mid: 0.5,
            treble: 0.5,
        }
    }
}

/// The audio output session owned by the playback controller.
///
/// Mirrors a classic "music channel" mixer: one file is loaded at a time and
/// played from an offset. Implementations must tolerate calls in any order
/// (e.g. `pause` with nothing loaded is a no-op).
pub trait MixerEngine {
    /// Open the output device. Calling it while initialized is a no-op.
    fn init(&mut self) -> Result<(), MixerError>;
    /// Release the output device and anything loaded.
    fn quit(&mut self);
    fn is_initialized(&self) -> bool;

    fn load(&mut self, path: &Path) -> Result<(), MixerError>;
    fn unload(&mut self);

    /// Start the loaded file from `start`, replacing any running playback.
    fn play(&mut self, start: Duration) -> Result<(), MixerError>;
    fn pause(&mut self);
    fn unpause(&mut self);
    fn stop(&mut self);

    /// Output gain in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);
    fn set_channel_levels(&mut self, levels: ChannelLevels);
    fn channel_levels(&self) -> ChannelLevels;

    /// Position inside the loaded file.
    fn position(&self) -> Duration;
    /// True while audio is actually being produced (not paused, not drained).
    fn is_busy(&self) -> bool;
}
