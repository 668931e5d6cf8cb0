//! Application model: the playback controller plus everything the windows
//! need to render and edit (selection, prompt, dialog, preferences).

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::{PlaylistSettings, Settings};
use crate::desktop::{Tray, Visibility, Windows};
use crate::equalizer::{Band, EqualizerSettings};
use crate::library::{expand_inputs, paths_from_drop};
use crate::persist::{Preferences, WindowName};
use crate::player::{Command, PlaybackController, PlayerError};

use super::action::{Action, ConfigTab, Dialog};
use super::storage::Storage;

/// Step of the equalizer sliders, in dB.
const EQ_STEP_DB: i8 = 1;

/// Whether the event loop should keep going after an action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub player: PlaybackController,
    pub windows: Windows,
    pub tray: Tray,
    pub prefs: Preferences,

    /// Cursor in the playlist window.
    pub selected: usize,
    pub config_tab: ConfigTab,
    pub eq_band: Band,
    /// Text typed into the open-file prompt, when it is shown.
    pub prompt: Option<String>,
    pub dialog: Option<Dialog>,
    /// One-line feedback shown under the player.
    pub status: Option<String>,

    pub header: String,
    scan: PlaylistSettings,
    storage: Storage,
}

impl App {
    pub fn new(
        player: PlaybackController,
        windows: Windows,
        prefs: Preferences,
        settings: &Settings,
        storage: Storage,
    ) -> Self {
        let saved = windows.state(WindowName::MainPlayer).state;
        let visibility = match saved.is_minimized() {
            true if prefs.minimize_to_tray => Visibility::InTray,
            true => Visibility::Minimized,
            false => Visibility::Visible,
        };

        let mut app = Self {
            player,
            windows,
            tray: Tray::new(visibility),
            prefs,
            selected: 0,
            config_tab: ConfigTab::default(),
            eq_band: Band::Hz60,
            prompt: None,
            dialog: None,
            status: None,
            header: settings.ui.header_text.clone(),
            scan: settings.playlist.clone(),
            storage,
        };
        app.player.set_volume(app.prefs.volume);
        app.player.apply_equalizer(&app.prefs.equalizer);
        app
    }

    /// Show a blocking error message.
    pub fn show_error(&mut self, title: &str, message: impl Into<String>) {
        let message = message.into();
        warn!(title, message = %message, "error dialog");
        self.dialog = Some(Dialog {
            title: title.to_string(),
            message,
        });
    }

    /// Add files and directories given on the command line.
    pub fn add_inputs(&mut self, inputs: &[PathBuf]) -> usize {
        let files = expand_inputs(inputs, &self.scan);
        let added = files.iter().filter(|p| self.player.add(p)).count();
        info!(requested = inputs.len(), added, "initial files");
        added
    }

    pub fn handle(&mut self, action: Action) -> Flow {
        if action != Action::Player(Command::Tick) {
            debug!(?action, "action");
        }
        match action {
            Action::Player(cmd) => {
                self.run_command(cmd);
            }
            Action::SeekFraction(tenths) => {
                let duration = self.player.duration();
                let target = duration * u64::from(tenths.min(10)) / 10;
                self.run_command(Command::Seek(target));
            }

            Action::OpenPrompt => self.prompt = Some(String::new()),
            Action::PromptInput(c) => {
                if let Some(p) = self.prompt.as_mut() {
                    p.push(c);
                }
            }
            Action::PromptBackspace => {
                if let Some(p) = self.prompt.as_mut() {
                    p.pop();
                }
            }
            Action::PromptCancel => self.prompt = None,
            Action::PromptSubmit => self.submit_prompt(),
            Action::Paste(text) => self.paste(&text),

            Action::ToggleWindow(name) => {
                if !self.windows.toggle(name) {
                    self.storage.save_windows(&self.windows);
                }
            }
            Action::CloseFocused => {
                let focused = self.windows.focused();
                if self.windows.close(focused) {
                    self.storage.save_windows(&self.windows);
                }
            }
            Action::FocusNext => {
                self.windows.focus_next();
            }
            Action::MoveWindow { dx, dy } => {
                self.windows.translate(dx, dy);
            }
            Action::ResizeWindow { dw, dh } => {
                self.windows.resize(dw, dh);
            }
            Action::ToggleMaximize => {
                self.windows.toggle_maximize();
            }

            Action::Minimize => {
                self.tray.minimize(self.prefs.minimize_to_tray);
                self.windows.set_main_minimized(true);
                self.storage.save_windows(&self.windows);
            }
            Action::TrayActivate(reason) => {
                if self.tray.activate(reason) {
                    self.restored();
                }
            }
            Action::TrayMenu(item) => {
                let was_visible = self.tray.is_visible();
                if self.tray.choose(item) {
                    return self.quit();
                }
                if !was_visible && self.tray.is_visible() {
                    self.restored();
                }
            }
            Action::Raise => {
                if self.tray.raise() {
                    self.restored();
                }
            }

            Action::SelectNext => {
                if self.selected + 1 < self.player.playlist().len() {
                    self.selected += 1;
                }
            }
            Action::SelectPrev => self.selected = self.selected.saturating_sub(1),
            Action::PlaySelected => {
                if !self.player.playlist().is_empty() {
                    self.run_command(Command::PlayIndex(self.selected));
                }
            }
            Action::MoveSelectedUp => {
                if self.selected > 0 && self.selected < self.player.playlist().len() {
                    let from = self.selected;
                    if self.run_command(Command::Move { from, to: from - 1 }) {
                        self.selected -= 1;
                    }
                }
            }
            Action::MoveSelectedDown => {
                if self.selected + 1 < self.player.playlist().len() {
                    let from = self.selected;
                    if self.run_command(Command::Move { from, to: from + 1 }) {
                        self.selected += 1;
                    }
                }
            }
            Action::RemoveSelected => {
                if !self.player.playlist().is_empty() {
                    self.run_command(Command::Remove(self.selected));
                    self.clamp_selection();
                }
            }

            Action::NextConfigTab => self.config_tab = self.config_tab.next(),
            Action::ToggleStartup => {
                self.prefs.startup = !self.prefs.startup;
                self.storage.save_preferences(&self.prefs);
            }
            Action::ToggleMinimizeToTray => {
                self.prefs.minimize_to_tray = !self.prefs.minimize_to_tray;
                self.storage.save_preferences(&self.prefs);
            }
            Action::NextBand => self.eq_band = self.eq_band.next(),
            Action::PrevBand => self.eq_band = self.eq_band.prev(),
            Action::AdjustBand(steps) => {
                let mut eq = self.prefs.equalizer.clone();
                eq.adjust(self.eq_band, steps.saturating_mul(EQ_STEP_DB));
                self.set_equalizer(eq);
            }
            Action::ApplyPreset(preset) => {
                self.set_equalizer(EqualizerSettings::from_preset(preset));
                self.status = Some(format!("Equalizer preset: {}", preset.name()));
            }

            Action::DismissDialog => self.dialog = None,
            Action::Quit => return self.quit(),
        }
        Flow::Continue
    }

    /// Run a player command; failures end up in the error dialog. Returns
    /// whether it succeeded.
    fn run_command(&mut self, cmd: Command) -> bool {
        let volume_change = matches!(
            cmd,
            Command::SetVolume(_) | Command::ChangeVolume(_) | Command::ToggleMute
        );
        let result = self.player.dispatch(cmd);
        if volume_change {
            self.prefs.volume = self.player.volume().percent();
            self.storage.save_preferences(&self.prefs);
        }
        match result {
            Ok(()) => true,
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    fn report(&mut self, err: PlayerError) {
        let title = match err {
            PlayerError::InvalidFile { .. } => "Cannot open file",
            PlayerError::Mixer(_) => "Playback error",
            PlayerError::IndexOutOfRange { .. }
            | PlayerError::SeekUnavailable
            | PlayerError::NothingToPlay => {
                // Not worth a dialog.
                self.status = Some(err.to_string());
                return;
            }
        };
        self.show_error(title, err.to_string());
    }

    fn submit_prompt(&mut self) {
        let Some(input) = self.prompt.take() else {
            return;
        };
        let input = input.trim();
        if input.is_empty() {
            return;
        }

        let path = PathBuf::from(input);
        if path.is_dir() {
            let added = self.add_inputs(&[path]);
            self.status = Some(format!("Added {added} file(s)"));
        } else {
            self.run_command(Command::Load(path));
        }
    }

    fn paste(&mut self, text: &str) {
        let files = paths_from_drop(text);
        let added = files.iter().filter(|p| self.player.add(p)).count();
        self.status = Some(if files.is_empty() {
            "Nothing playable was dropped".to_string()
        } else {
            format!("Added {added} of {} dropped file(s)", files.len())
        });
    }

    fn set_equalizer(&mut self, eq: EqualizerSettings) {
        self.player.apply_equalizer(&eq);
        self.prefs.equalizer = eq;
        self.storage.save_preferences(&self.prefs);
    }

    fn restored(&mut self) {
        self.windows.set_main_minimized(false);
        self.storage.save_windows(&self.windows);
    }

    fn clamp_selection(&mut self) {
        let len = self.player.playlist().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn quit(&mut self) -> Flow {
        self.player.shutdown();
        self.storage.save_windows(&self.windows);
        self.storage.save_preferences(&self.prefs);
        Flow::Quit
    }
}
