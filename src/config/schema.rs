use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Optional user settings, read from `<config home>/hero/config.toml` and
/// `HERO__SECTION__KEY` environment variables (which win over the file).
/// Anything left out keeps its default.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub playlist: PlaylistSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// Title shown on the main player window.
    pub header_text: String,
    /// Display names longer than this are cut and end in `...`.
    pub display_name_max: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " hero ".to_string(),
            display_name_max: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Seconds jumped by `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change per `+` / `-` press, in percent.
    pub volume_step: u8,
    /// How often the seek bar samples the mixer position (milliseconds).
    pub poll_interval_ms: u64,
    /// Cells a window moves or grows per key press.
    pub window_step: u16,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 5,
            poll_interval_ms: 500,
            window_step: 2,
        }
    }
}

/// How directories given on the command line are expanded.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaylistSettings {
    pub follow_links: bool,
    /// Pick up dotfiles and descend into dot-directories.
    pub include_hidden: bool,
    /// Descend below the given directory at all.
    pub recursive: bool,
    /// Depth limit when `recursive` is on; the given directory is depth 0.
    pub max_depth: Option<usize>,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Where `setting.json`, `preferences.json` and logs live.
    /// Defaults to `$XDG_STATE_HOME/hero` or `~/.local/state/hero`.
    pub state_dir: Option<PathBuf>,
}
