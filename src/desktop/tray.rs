use tracing::debug;

/// How the main player is currently shown.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Visible,
    /// Collapsed to its title bar.
    Minimized,
    /// Hidden; only the one-line tray view remains.
    InTray,
}

/// What the user did to the tray view.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActivationReason {
    /// Plain activation (Enter on the tray view).
    Trigger,
    /// Ask for the tray menu.
    Context,
}

/// Entries of the tray menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrayMenuItem {
    Show,
    Quit,
}

impl TrayMenuItem {
    pub const ALL: [TrayMenuItem; 2] = [TrayMenuItem::Show, TrayMenuItem::Quit];

    pub fn label(self) -> &'static str {
        match self {
            TrayMenuItem::Show => "Show",
            TrayMenuItem::Quit => "Quit",
        }
    }
}

/// Visibility state machine of the main player. Playback is not affected by
/// any transition here.
#[derive(Debug, Default)]
pub struct Tray {
    visibility: Visibility,
    menu_open: bool,
}

impl Tray {
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            menu_open: false,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Minimize the player, into the tray when `to_tray` is set. Only a
    /// visible player can be minimized.
    pub fn minimize(&mut self, to_tray: bool) -> Visibility {
        if self.visibility == Visibility::Visible {
            self.visibility = if to_tray {
                Visibility::InTray
            } else {
                Visibility::Minimized
            };
            debug!(visibility = ?self.visibility, "player minimized");
        }
        self.visibility
    }

    /// React to the tray view. Returns whether the player became visible.
    pub fn activate(&mut self, reason: ActivationReason) -> bool {
        match reason {
            ActivationReason::Trigger => self.raise(),
            ActivationReason::Context => {
                self.menu_open = !self.menu_open;
                false
            }
        }
    }

    /// Pick an entry from the tray menu. Returns `true` when the player
    /// should quit.
    pub fn choose(&mut self, item: TrayMenuItem) -> bool {
        self.menu_open = false;
        match item {
            TrayMenuItem::Show => {
                self.raise();
                false
            }
            TrayMenuItem::Quit => true,
        }
    }

    /// Bring the player back. Returns whether anything changed.
    pub fn raise(&mut self) -> bool {
        self.menu_open = false;
        if self.visibility == Visibility::Visible {
            return false;
        }
        self.visibility = Visibility::Visible;
        debug!("player restored");
        true
    }
}
