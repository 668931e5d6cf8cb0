//! Application module: the app model driven by the runtime and drawn by
//! the UI.
//!
//! `App` owns the playback controller, the window layout and the user's
//! preferences, and turns [`Action`]s into changes of all three.

mod action;
mod model;
mod storage;

pub use action::{Action, ConfigTab, Dialog};
pub use model::{App, Flow};
pub use storage::Storage;
