//! Desktop integration that is independent of playback: the floating
//! windows drawn inside the terminal, the tray view and session autostart.

mod autostart;
mod tray;
mod window;

pub use autostart::Autostart;
pub use tray::{ActivationReason, Tray, TrayMenuItem, Visibility};
pub use window::{Windows, placement};
