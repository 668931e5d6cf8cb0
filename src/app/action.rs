use crate::desktop::{ActivationReason, TrayMenuItem};
use crate::equalizer::Preset;
use crate::persist::WindowName;
use crate::player::Command;

/// Everything the user (or the media-control bus) can ask of the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Player(Command),
    /// Seek to a tenth of the current track (0 is the start).
    SeekFraction(u8),

    OpenPrompt,
    PromptInput(char),
    PromptBackspace,
    PromptSubmit,
    PromptCancel,
    /// Text pasted or dropped into the terminal.
    Paste(String),

    ToggleWindow(WindowName),
    CloseFocused,
    FocusNext,
    MoveWindow { dx: i32, dy: i32 },
    ResizeWindow { dw: i32, dh: i32 },
    ToggleMaximize,

    Minimize,
    TrayActivate(ActivationReason),
    TrayMenu(TrayMenuItem),
    Raise,

    SelectNext,
    SelectPrev,
    PlaySelected,
    MoveSelectedUp,
    MoveSelectedDown,
    RemoveSelected,

    NextConfigTab,
    ToggleStartup,
    ToggleMinimizeToTray,
    NextBand,
    PrevBand,
    AdjustBand(i8),
    ApplyPreset(Preset),

    DismissDialog,
    Quit,
}

/// Tabs of the configuration window.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ConfigTab {
    #[default]
    General,
    Equalizer,
    About,
}

impl ConfigTab {
    pub const ALL: [ConfigTab; 3] = [ConfigTab::General, ConfigTab::Equalizer, ConfigTab::About];

    pub fn title(self) -> &'static str {
        match self {
            ConfigTab::General => "General",
            ConfigTab::Equalizer => "Equalizer",
            ConfigTab::About => "About",
        }
    }

    pub fn next(self) -> ConfigTab {
        match self {
            ConfigTab::General => ConfigTab::Equalizer,
            ConfigTab::Equalizer => ConfigTab::About,
            ConfigTab::About => ConfigTab::General,
        }
    }
}

/// A blocking message box; input goes nowhere else until it is dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub message: String,
}
