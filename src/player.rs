//! Playlist and playback state machine.
//!
//! `PlaybackController` is the single owner of the playlist, the selected
//! track and the mixer session. Every user-facing surface feeds it
//! [`Command`]s and renders what it reports back.

mod command;
mod controller;
mod error;
mod playlist;
mod state;

pub use command::Command;
pub use controller::{PlaybackController, validate_audio_path};
pub use error::{InvalidFileReason, PlayerError};
pub use playlist::Playlist;
pub use state::{Controls, PlaybackState, Volume, VolumeLevel};

#[cfg(test)]
mod tests;
