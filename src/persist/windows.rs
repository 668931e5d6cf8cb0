use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::json::{self, PersistError};

pub const SETTINGS_FILE: &str = "setting.json";

/// The windows whose geometry survives restarts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WindowName {
    MainPlayer,
    Playlist,
    Config,
}

impl WindowName {
    pub const ALL: [WindowName; 3] = [WindowName::MainPlayer, WindowName::Playlist, WindowName::Config];

    /// Key of the window inside `setting.json`.
    pub fn key(self) -> &'static str {
        match self {
            WindowName::MainPlayer => "main_player",
            WindowName::Playlist => "playlist",
            WindowName::Config => "config",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WindowName::MainPlayer => "Player",
            WindowName::Playlist => "Playlist",
            WindowName::Config => "Configuration",
        }
    }

    /// Geometry used until the user moves the window, in terminal cells.
    pub fn default_state(self) -> WindowState {
        let (x, y, width, height) = match self {
            WindowName::MainPlayer => (0, 0, 80, 12),
            WindowName::Playlist => (4, 3, 48, 16),
            WindowName::Config => (8, 2, 64, 20),
        };
        WindowState {
            x,
            y,
            width,
            height,
            state: WindowFlags::Normal,
        }
    }
}

/// Window state flags, stored as a bit set (1 minimized, 2 maximized).
/// Other bits are ignored when reading. Both bits set means a maximized
/// window that is currently minimized.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum WindowFlags {
    #[default]
    Normal,
    Minimized,
    Maximized,
    MinimizedMaximized,
}

impl WindowFlags {
    pub fn is_minimized(self) -> bool {
        matches!(self, WindowFlags::Minimized | WindowFlags::MinimizedMaximized)
    }

    /// The flags with the minimized bit set or cleared, keeping maximized.
    pub fn with_minimized(self, minimized: bool) -> WindowFlags {
        let maximized = matches!(self, WindowFlags::Maximized | WindowFlags::MinimizedMaximized);
        match (minimized, maximized) {
            (false, false) => WindowFlags::Normal,
            (true, false) => WindowFlags::Minimized,
            (false, true) => WindowFlags::Maximized,
            (true, true) => WindowFlags::MinimizedMaximized,
        }
    }
}

impl From<u32> for WindowFlags {
    fn from(bits: u32) -> Self {
        let base = if bits & 2 != 0 {
            WindowFlags::Maximized
        } else {
            WindowFlags::Normal
        };
        base.with_minimized(bits & 1 != 0)
    }
}

impl From<WindowFlags> for u32 {
    fn from(flags: WindowFlags) -> Self {
        match flags {
            WindowFlags::Normal => 0,
            WindowFlags::Minimized => 1,
            WindowFlags::Maximized => 2,
            WindowFlags::MinimizedMaximized => 3,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub state: WindowFlags,
}

/// `setting.json`: one object per window name. Entries this program does
/// not know about are carried through saves untouched.
#[derive(Debug, Clone)]
pub struct WindowStore {
    path: PathBuf,
}

impl WindowStore {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(SETTINGS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved geometry for `name`, or its default when absent or malformed.
    pub fn load(&self, name: WindowName) -> WindowState {
        let doc: Map<String, Value> = json::read_or_default(&self.path);
        let Some(entry) = doc.get(name.key()) else {
            debug!(window = name.key(), "no saved geometry, using default");
            return name.default_state();
        };

        match serde_json::from_value::<WindowState>(entry.clone()) {
            Ok(state) if state.width > 0 && state.height > 0 => state,
            Ok(_) => {
                warn!(window = name.key(), "saved geometry has no area, using default");
                name.default_state()
            }
            Err(e) => {
                warn!(window = name.key(), error = %e, "malformed window entry, using default");
                name.default_state()
            }
        }
    }

    /// Write several windows in one read-modify-write of the file.
    pub fn save_all(
        &self,
        windows: impl IntoIterator<Item = (WindowName, WindowState)>,
    ) -> Result<(), PersistError> {
        let mut doc: Map<String, Value> = json::read_or_default(&self.path);
        for (name, state) in windows {
            let value = serde_json::to_value(state).map_err(|source| PersistError::Encode {
                path: self.path.clone(),
                source,
            })?;
            doc.insert(name.key().to_string(), value);
        }
        json::write(&self.path, &doc)
    }
}
