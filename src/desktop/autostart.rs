use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::config_home;

const ENTRY_FILE: &str = "hero.desktop";

/// The session autostart entry (`<config home>/autostart/hero.desktop`).
#[derive(Debug, Clone)]
pub struct Autostart {
    dir: PathBuf,
}

impl Autostart {
    pub fn new(autostart_dir: PathBuf) -> Self {
        Self { dir: autostart_dir }
    }

    /// Entry under `$XDG_CONFIG_HOME/autostart`, when a config home exists.
    pub fn from_env() -> Option<Self> {
        config_home().map(|home| Self::new(home.join("autostart")))
    }

    pub fn entry_path(&self) -> PathBuf {
        self.dir.join(ENTRY_FILE)
    }

    pub fn is_enabled(&self) -> bool {
        self.entry_path().is_file()
    }

    /// Write or remove the entry to match `enabled`.
    pub fn apply(&self, enabled: bool, exec: &Path) -> io::Result<()> {
        let path = self.entry_path();
        if enabled {
            fs::create_dir_all(&self.dir)?;
            fs::write(&path, desktop_entry(exec))?;
            info!(path = %path.display(), "autostart enabled");
        } else {
            match fs::remove_file(&path) {
                Ok(()) => info!(path = %path.display(), "autostart disabled"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

fn desktop_entry(exec: &Path) -> String {
    format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name=hero\n\
         Comment=Terminal audio player\n\
         Exec={}\n\
         Terminal=true\n\
         Hidden=false\n\
         NoDisplay=false\n\
         X-GNOME-Autostart-enabled=true\n",
        exec.display()
    )
}
