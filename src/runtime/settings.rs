use tracing::warn;

use crate::config;

/// Load settings, falling back to defaults when the file is unreadable or
/// holds invalid values. Config is optional and never stops the player.
///
/// Runs before logging is set up, so problems are returned as messages and
/// logged once the subscriber exists.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (
                config::Settings::default(),
                Some(format!("invalid config, using defaults: {msg}")),
            ),
        },
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}

pub fn report(problem: Option<String>) {
    if let Some(msg) = problem {
        warn!("{msg}");
    }
}
