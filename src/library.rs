//! Track model and the helpers that turn user input into playable files.
//!
//! Files reach the player as command-line arguments (files or directories),
//! through the open-file prompt, or pasted/dropped into the terminal. This
//! module validates them, expands directories and reads durations.

mod display;
mod model;
mod scan;
mod tags;

pub use display::display_name;
pub use model::Track;
pub use scan::{SUPPORTED_EXTENSIONS, expand_inputs, is_supported_audio, paths_from_drop, scan};
pub use tags::{LoftyTagReader, TagError, TagReader};
