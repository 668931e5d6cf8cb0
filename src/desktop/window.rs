use ratatui::layout::Rect;

use crate::persist::{PersistError, WindowFlags, WindowName, WindowState, WindowStore};

/// Smallest size a window can be resized to, in cells.
fn min_size(name: WindowName) -> (u32, u32) {
    match name {
        WindowName::MainPlayer => (40, 8),
        WindowName::Playlist | WindowName::Config => (20, 5),
    }
}

/// Geometry, open state and focus of the three windows.
///
/// The main player is always open; the playlist and configuration windows
/// float above it when opened. Move/resize operations act on the focused
/// window.
#[derive(Debug, Clone)]
pub struct Windows {
    main: WindowState,
    playlist: WindowState,
    config: WindowState,
    playlist_open: bool,
    config_open: bool,
    focus: WindowName,
}

impl Windows {
    pub fn new(main: WindowState, playlist: WindowState, config: WindowState) -> Self {
        Self {
            main,
            playlist,
            config,
            playlist_open: false,
            config_open: false,
            focus: WindowName::MainPlayer,
        }
    }

    pub fn load(store: &WindowStore) -> Self {
        Self::new(
            store.load(WindowName::MainPlayer),
            store.load(WindowName::Playlist),
            store.load(WindowName::Config),
        )
    }

    pub fn save(&self, store: &WindowStore) -> Result<(), PersistError> {
        store.save_all(WindowName::ALL.map(|n| (n, *self.state(n))))
    }

    pub fn state(&self, name: WindowName) -> &WindowState {
        match name {
            WindowName::MainPlayer => &self.main,
            WindowName::Playlist => &self.playlist,
            WindowName::Config => &self.config,
        }
    }

    fn state_mut(&mut self, name: WindowName) -> &mut WindowState {
        match name {
            WindowName::MainPlayer => &mut self.main,
            WindowName::Playlist => &mut self.playlist,
            WindowName::Config => &mut self.config,
        }
    }

    pub fn is_open(&self, name: WindowName) -> bool {
        match name {
            WindowName::MainPlayer => true,
            WindowName::Playlist => self.playlist_open,
            WindowName::Config => self.config_open,
        }
    }

    pub fn focused(&self) -> WindowName {
        self.focus
    }

    /// Open `name` and give it focus.
    pub fn open(&mut self, name: WindowName) {
        match name {
            WindowName::MainPlayer => {}
            WindowName::Playlist => self.playlist_open = true,
            WindowName::Config => self.config_open = true,
        }
        self.focus = name;
    }

    /// Close a floating window. Returns whether it was open. The main
    /// player cannot be closed this way.
    pub fn close(&mut self, name: WindowName) -> bool {
        let was_open = match name {
            WindowName::MainPlayer => return false,
            WindowName::Playlist => std::mem::replace(&mut self.playlist_open, false),
            WindowName::Config => std::mem::replace(&mut self.config_open, false),
        };
        if self.focus == name {
            self.focus = self.open_windows().last().copied().unwrap_or(WindowName::MainPlayer);
        }
        was_open
    }

    /// Open when closed, close when open. Returns whether it is now open.
    pub fn toggle(&mut self, name: WindowName) -> bool {
        if self.is_open(name) && name != WindowName::MainPlayer {
            self.close(name);
            false
        } else {
            self.open(name);
            true
        }
    }

    /// Open windows in drawing order, bottom first. The focused floating
    /// window is drawn last.
    pub fn open_windows(&self) -> Vec<WindowName> {
        let mut order: Vec<WindowName> = WindowName::ALL
            .into_iter()
            .filter(|n| self.is_open(*n))
            .collect();
        if self.focus != WindowName::MainPlayer {
            if let Some(pos) = order.iter().position(|n| *n == self.focus) {
                let focused = order.remove(pos);
                order.push(focused);
            }
        }
        order
    }

    /// Move focus to the next open window.
    pub fn focus_next(&mut self) -> WindowName {
        let open: Vec<WindowName> = WindowName::ALL
            .into_iter()
            .filter(|n| self.is_open(*n))
            .collect();
        let pos = open.iter().position(|n| *n == self.focus).unwrap_or(0);
        self.focus = open[(pos + 1) % open.len()];
        self.focus
    }

    /// Shift the focused window. Maximized windows stay put. Returns whether
    /// the geometry changed.
    pub fn translate(&mut self, dx: i32, dy: i32) -> bool {
        let win = self.state_mut(self.focus);
        if win.state == WindowFlags::Maximized {
            return false;
        }
        let before = (win.x, win.y);
        win.x = win.x.saturating_add(dx).max(0);
        win.y = win.y.saturating_add(dy).max(0);
        before != (win.x, win.y)
    }

    /// Grow or shrink the focused window, never below its minimum size.
    pub fn resize(&mut self, dw: i32, dh: i32) -> bool {
        let name = self.focus;
        let (min_w, min_h) = min_size(name);
        let win = self.state_mut(name);
        if win.state == WindowFlags::Maximized {
            return false;
        }
        let before = (win.width, win.height);
        win.width = win.width.saturating_add_signed(dw).max(min_w);
        win.height = win.height.saturating_add_signed(dh).max(min_h);
        before != (win.width, win.height)
    }

    pub fn toggle_maximize(&mut self) -> WindowFlags {
        let win = self.state_mut(self.focus);
        win.state = match win.state {
            WindowFlags::Maximized => WindowFlags::Normal,
            WindowFlags::Normal | WindowFlags::Minimized => WindowFlags::Maximized,
            WindowFlags::MinimizedMaximized => WindowFlags::Minimized,
        };
        win.state
    }

    /// Record the main player's minimized flag. A maximized player comes
    /// back maximized.
    pub fn set_main_minimized(&mut self, minimized: bool) {
        self.main.state = self.main.state.with_minimized(minimized);
    }
}

/// Where a window lands inside `frame`: maximized windows fill it, others
/// keep their size and position but are pulled back inside the frame.
pub fn placement(state: &WindowState, frame: Rect) -> Rect {
    if state.state == WindowFlags::Maximized {
        return frame;
    }
    let width = clamp_u16(state.width).min(frame.width);
    let height = clamp_u16(state.height).min(frame.height);
    let max_x = frame.width - width;
    let max_y = frame.height - height;
    let x = clamp_u16(state.x.max(0) as u32).min(max_x);
    let y = clamp_u16(state.y.max(0) as u32).min(max_y);
    Rect::new(frame.x + x, frame.y + y, width, height)
}

fn clamp_u16(v: u32) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}
