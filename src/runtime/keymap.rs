//! Translation of terminal keys and bus calls into app actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Action, App, ConfigTab};
use crate::config::ControlsSettings;
use crate::desktop::{ActivationReason, TrayMenuItem};
use crate::equalizer::Preset;
use crate::mpris::ControlCmd;
use crate::persist::WindowName;
use crate::player::Command;

pub fn action_for_control(cmd: ControlCmd) -> Action {
    match cmd {
        ControlCmd::Quit => Action::Quit,
        ControlCmd::Raise => Action::Raise,
        ControlCmd::Play => Action::Player(Command::Play),
        ControlCmd::Pause => Action::Player(Command::Pause),
        ControlCmd::PlayPause => Action::Player(Command::TogglePlay),
        ControlCmd::Stop => Action::Player(Command::Stop),
        ControlCmd::Next => Action::Player(Command::Next),
        ControlCmd::Prev => Action::Player(Command::Previous),
    }
}

/// Map a key press to an action given what is on screen. Modal surfaces
/// (dialog, prompt, tray view) take precedence over the windows.
pub fn action_for_key(key: KeyEvent, app: &App, controls: &ControlsSettings) -> Option<Action> {
    if app.dialog.is_some() {
        return matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' '))
            .then_some(Action::DismissDialog);
    }

    if app.prompt.is_some() {
        return match key.code {
            KeyCode::Esc => Some(Action::PromptCancel),
            KeyCode::Enter => Some(Action::PromptSubmit),
            KeyCode::Backspace => Some(Action::PromptBackspace),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PromptInput(c))
            }
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        let step = i32::from(controls.window_step);
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Left => Some(Action::MoveWindow { dx: -step, dy: 0 }),
            KeyCode::Right => Some(Action::MoveWindow { dx: step, dy: 0 }),
            KeyCode::Up => Some(Action::MoveWindow { dx: 0, dy: -1 }),
            KeyCode::Down => Some(Action::MoveWindow { dx: 0, dy: 1 }),
            _ => None,
        };
    }

    if !app.tray.is_visible() {
        return tray_key(key, app);
    }

    if key.modifiers.contains(KeyModifiers::ALT) {
        let step = i32::from(controls.window_step);
        return match key.code {
            KeyCode::Left => Some(Action::ResizeWindow { dw: -step, dh: 0 }),
            KeyCode::Right => Some(Action::ResizeWindow { dw: step, dh: 0 }),
            KeyCode::Up => Some(Action::ResizeWindow { dw: 0, dh: -1 }),
            KeyCode::Down => Some(Action::ResizeWindow { dw: 0, dh: 1 }),
            _ => None,
        };
    }

    let local = match app.windows.focused() {
        WindowName::MainPlayer => main_key(key),
        WindowName::Playlist => playlist_key(key),
        WindowName::Config => config_key(key, app.config_tab),
    };
    local.or_else(|| global_key(key, controls))
}

fn tray_key(key: KeyEvent, app: &App) -> Option<Action> {
    if app.tray.menu_open() {
        return match key.code {
            KeyCode::Char('s') | KeyCode::Enter => Some(Action::TrayMenu(TrayMenuItem::Show)),
            KeyCode::Char('q') => Some(Action::TrayMenu(TrayMenuItem::Quit)),
            KeyCode::Esc | KeyCode::Char('m') => {
                Some(Action::TrayActivate(ActivationReason::Context))
            }
            _ => None,
        };
    }
    match key.code {
        KeyCode::Enter => Some(Action::TrayActivate(ActivationReason::Trigger)),
        KeyCode::Char('m') => Some(Action::TrayActivate(ActivationReason::Context)),
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(Action::Player(Command::TogglePlay)),
        KeyCode::Char('s') => Some(Action::Player(Command::Stop)),
        KeyCode::Char('h') => Some(Action::Player(Command::Previous)),
        KeyCode::Char('l') => Some(Action::Player(Command::Next)),
        _ => None,
    }
}

fn main_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char(c @ '0'..='9') => c.to_digit(10).map(|d| Action::SeekFraction(d as u8)),
        _ => None,
    }
}

fn playlist_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNext),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPrev),
        KeyCode::Char('J') => Some(Action::MoveSelectedDown),
        KeyCode::Char('K') => Some(Action::MoveSelectedUp),
        KeyCode::Enter => Some(Action::PlaySelected),
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::RemoveSelected),
        KeyCode::Char('a') => Some(Action::OpenPrompt),
        _ => None,
    }
}

fn config_key(key: KeyEvent, tab: ConfigTab) -> Option<Action> {
    if key.code == KeyCode::Char('t') {
        return Some(Action::NextConfigTab);
    }
    match tab {
        ConfigTab::General => match key.code {
            KeyCode::Char('1') => Some(Action::ToggleStartup),
            KeyCode::Char('2') => Some(Action::ToggleMinimizeToTray),
            _ => None,
        },
        ConfigTab::Equalizer => match key.code {
            KeyCode::Left => Some(Action::PrevBand),
            KeyCode::Right => Some(Action::NextBand),
            KeyCode::Up => Some(Action::AdjustBand(1)),
            KeyCode::Down => Some(Action::AdjustBand(-1)),
            KeyCode::Char(c @ '1'..='5') => {
                let idx = c.to_digit(10)? as usize - 1;
                Preset::ALL.get(idx).map(|p| Action::ApplyPreset(*p))
            }
            _ => None,
        },
        ConfigTab::About => None,
    }
}

fn global_key(key: KeyEvent, controls: &ControlsSettings) -> Option<Action> {
    let scrub = i64::try_from(controls.scrub_seconds).unwrap_or(i64::MAX);
    let volume = i16::from(controls.volume_step);
    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('o') => Action::OpenPrompt,
        KeyCode::Char(' ') | KeyCode::Char('p') => Action::Player(Command::TogglePlay),
        KeyCode::Char('s') => Action::Player(Command::Stop),
        KeyCode::Char('h') => Action::Player(Command::Previous),
        KeyCode::Char('l') => Action::Player(Command::Next),
        KeyCode::Char('H') => Action::Player(Command::SeekBy(-scrub)),
        KeyCode::Char('L') => Action::Player(Command::SeekBy(scrub)),
        KeyCode::Char('+') | KeyCode::Char('=') => Action::Player(Command::ChangeVolume(volume)),
        KeyCode::Char('-') => Action::Player(Command::ChangeVolume(-volume)),
        KeyCode::Char('m') => Action::Player(Command::ToggleMute),
        KeyCode::Char('P') => Action::ToggleWindow(WindowName::Playlist),
        KeyCode::Char('c') => Action::ToggleWindow(WindowName::Config),
        KeyCode::Tab => Action::FocusNext,
        KeyCode::Char('z') => Action::Minimize,
        KeyCode::Char('M') => Action::ToggleMaximize,
        KeyCode::Esc => Action::CloseFocused,
        _ => return None,
    };
    Some(action)
}
