use std::path::PathBuf;

use crate::equalizer::EqualizerSettings;

/// A discrete playback request, whatever surface it came from (keys,
/// pasted files, the media-control bus).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a file and select it if nothing is selected. Invalid files are errors.
    Load(PathBuf),
    /// Add files, silently skipping the ones that cannot be played.
    Add(Vec<PathBuf>),
    Play,
    Pause,
    /// Play when not playing, pause otherwise.
    TogglePlay,
    Stop,
    /// Jump to an absolute position in seconds.
    Seek(u64),
    /// Jump relative to the current position, in seconds.
    SeekBy(i64),
    PlayIndex(usize),
    Move { from: usize, to: usize },
    Remove(usize),
    Next,
    Previous,
    SetVolume(u8),
    ChangeVolume(i16),
    /// Mute, or go back to the last audible volume when muted.
    ToggleMute,
    ApplyEqualizer(EqualizerSettings),
    /// Periodic position sample.
    Tick,
}
