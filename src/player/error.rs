use std::path::PathBuf;

use thiserror::Error;

use crate::audio::MixerError;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("cannot open {}: {reason}", path.display())]
    InvalidFile {
        path: PathBuf,
        reason: InvalidFileReason,
    },
    #[error("index {index} is out of range for a playlist of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("seeking needs a track with a known duration")]
    SeekUnavailable,
    #[error("the playlist is empty")]
    NothingToPlay,
    #[error("playback failed: {0}")]
    Mixer(#[from] MixerError),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum InvalidFileReason {
    #[error("only .mp3 and .wav files are supported")]
    UnsupportedExtension,
    #[error("file does not exist")]
    Missing,
}
