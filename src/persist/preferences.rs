use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::json::{self, PersistError};
use crate::equalizer::EqualizerSettings;

pub const PREFERENCES_FILE: &str = "preferences.json";

/// Choices made in the configuration window, plus the last volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Start the player with the desktop session.
    pub startup: bool,
    /// Minimizing the player hides it to the tray view.
    pub minimize_to_tray: bool,
    /// Output volume in percent.
    pub volume: u8,
    pub equalizer: EqualizerSettings,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            startup: false,
            minimize_to_tray: false,
            volume: 100,
            equalizer: EqualizerSettings::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(PREFERENCES_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Preferences {
        json::read_or_default(&self.path)
    }

    pub fn save(&self, prefs: &Preferences) -> Result<(), PersistError> {
        json::write(&self.path, prefs)
    }
}
