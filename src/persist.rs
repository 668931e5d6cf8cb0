//! JSON documents kept under the state directory.
//!
//! `setting.json` holds the geometry of every named window and
//! `preferences.json` the user's choices from the configuration window.
//! Both are read leniently: a missing or corrupt file yields defaults and is
//! replaced on the next save.

mod json;
mod preferences;
mod windows;

pub use json::PersistError;
pub use preferences::{Preferences, PreferencesStore};
pub use windows::{WindowFlags, WindowName, WindowState, WindowStore};

#[cfg(test)]
mod tests;
