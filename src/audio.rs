//! Audio output: the `MixerEngine` seam and its `rodio` implementation.
//!
//! The playback controller owns exactly one mixer and drives it from the UI
//! thread; nothing else touches audio output.

mod mixer;
mod sink;
mod types;

pub use mixer::RodioMixer;
pub use types::{ChannelLevels, MixerEngine, MixerError};
