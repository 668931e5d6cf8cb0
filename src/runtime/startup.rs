use std::env;
use std::path::PathBuf;

use tracing::info;

use crate::app::{App, Storage};
use crate::audio::RodioMixer;
use crate::config;
use crate::desktop::{Autostart, Windows};
use crate::library::LoftyTagReader;
use crate::player::PlaybackController;

/// Build the app from persisted state and open the audio output. A missing
/// audio device is reported in a dialog; the player still starts.
pub fn build_app(settings: &config::Settings, inputs: &[PathBuf]) -> App {
    let state_dir = settings.state_dir();
    let exec = env::current_exe().unwrap_or_else(|_| PathBuf::from("hero"));
    let storage = Storage::new(&state_dir, Autostart::from_env(), exec);

    let windows = Windows::load(&storage.windows);
    let prefs = storage.preferences.load();
    info!(state_dir = %state_dir.display(), "loaded persisted state");

    let mut player = PlaybackController::new(
        Box::new(RodioMixer::new()),
        Box::new(LoftyTagReader),
        settings.ui.display_name_max,
    );
    let init = player.init_mixer();

    let mut app = App::new(player, windows, prefs, settings, storage);
    if let Err(e) = init {
        app.show_error("Audio output unavailable", e.to_string());
    }

    if !inputs.is_empty() {
        app.add_inputs(inputs);
    }
    app
}
