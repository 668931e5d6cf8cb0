use std::env;
use std::path::{Path, PathBuf};

use super::schema::Settings;

const APP_DIR: &str = "hero";

impl Settings {
    /// Load settings from the resolved config file (if any) and `HERO__*`
    /// environment variables.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_from(resolve_config_path().as_deref())
    }

    /// Layer struct defaults, then `file` when given and present, then the
    /// environment. Nested keys use `__`: `HERO__CONTROLS__VOLUME_STEP=10`.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        builder
            .add_source(
                ::config::Environment::with_prefix("HERO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Check value ranges; every problem found is listed in the error.
    pub fn validate(&self) -> Result<(), String> {
        let checks = [
            (
                self.controls.poll_interval_ms == 0,
                "controls.poll_interval_ms must be >= 1",
            ),
            (
                !(1..=100).contains(&self.controls.volume_step),
                "controls.volume_step must be within 1..=100",
            ),
            (
                self.controls.window_step == 0,
                "controls.window_step must be >= 1",
            ),
            (
                self.ui.display_name_max < 4,
                "ui.display_name_max must be >= 4",
            ),
        ];

        let problems: Vec<&str> = checks
            .into_iter()
            .filter_map(|(failed, msg)| failed.then_some(msg))
            .collect();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("; "))
        }
    }

    /// Directory holding persisted window state, preferences and logs.
    pub fn state_dir(&self) -> PathBuf {
        match &self.storage.state_dir {
            Some(dir) => dir.clone(),
            None => default_state_dir().unwrap_or_else(|| PathBuf::from(".hero")),
        }
    }

    /// The defaults rendered as TOML, printed by `hero --print-config`.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&Settings::default())
    }
}

/// `$HERO_CONFIG_PATH` when set, otherwise `<config home>/hero/config.toml`.
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os("HERO_CONFIG_PATH")
        .map(PathBuf::from)
        .or_else(default_config_path)
}

pub fn default_config_path() -> Option<PathBuf> {
    config_home().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// `$XDG_CONFIG_HOME`, or `~/.config`.
pub fn config_home() -> Option<PathBuf> {
    xdg_home("XDG_CONFIG_HOME", &[".config"])
}

/// `$XDG_STATE_HOME/hero`, or `~/.local/state/hero`.
pub fn default_state_dir() -> Option<PathBuf> {
    xdg_home("XDG_STATE_HOME", &[".local", "state"]).map(|d| d.join(APP_DIR))
}

fn xdg_home(var: &str, under_home: &[&str]) -> Option<PathBuf> {
    if let Some(dir) = env::var_os(var).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    let mut home = PathBuf::from(env::var_os("HOME")?);
    home.extend(under_home);
    Some(home)
}
