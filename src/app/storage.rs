use std::path::{Path, PathBuf};

use tracing::warn;

use crate::desktop::{Autostart, Windows};
use crate::persist::{Preferences, PreferencesStore, WindowStore};

/// Where the app writes what it remembers between runs.
#[derive(Debug, Clone)]
pub struct Storage {
    pub windows: WindowStore,
    pub preferences: PreferencesStore,
    pub autostart: Option<Autostart>,
    /// Command written into the autostart entry.
    pub exec: PathBuf,
}

impl Storage {
    pub fn new(state_dir: &Path, autostart: Option<Autostart>, exec: PathBuf) -> Self {
        Self {
            windows: WindowStore::new(state_dir),
            preferences: PreferencesStore::new(state_dir),
            autostart,
            exec,
        }
    }

    /// Persist preferences and bring the autostart entry in line with them.
    /// Failures are logged; the player keeps running.
    pub fn save_preferences(&self, prefs: &Preferences) {
        if let Err(e) = self.preferences.save(prefs) {
            warn!(error = %e, path = %self.preferences.path().display(), "failed to save preferences");
        }
        if let Some(autostart) = &self.autostart {
            if autostart.is_enabled() != prefs.startup {
                if let Err(e) = autostart.apply(prefs.startup, &self.exec) {
                    warn!(error = %e, path = %autostart.entry_path().display(), "failed to update autostart entry");
                }
            }
        }
    }

    pub fn save_windows(&self, windows: &Windows) {
        if let Err(e) = windows.save(&self.windows) {
            warn!(error = %e, path = %self.windows.path().display(), "failed to save window state");
        }
    }
}
