use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{Action, App, Flow};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::Command;
use crate::runtime::keymap::{action_for_control, action_for_key};
use crate::runtime::mpris_sync::{Published, sync_mpris};
use crate::ui;

/// How long to wait for terminal input before looking at the clock again.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Main terminal event loop: draws, samples the playhead on a timer,
/// handles keys, pastes and bus commands. Returns `Ok(())` on quit.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick_every = Duration::from_millis(settings.controls.poll_interval_ms);
    let mut last_tick = Instant::now();
    let mut published = Published::default();

    loop {
        if last_tick.elapsed() >= tick_every {
            app.handle(Action::Player(Command::Tick));
            last_tick = Instant::now();
        }

        sync_mpris(mpris, app, &mut published);
        terminal.draw(|f| ui::draw(f, app))?;

        while let Ok(cmd) = control_rx.try_recv() {
            debug!(?cmd, "bus command");
            if app.handle(action_for_control(cmd)) == Flow::Quit {
                return Ok(());
            }
        }

        if !event::poll(INPUT_POLL)? {
            continue;
        }
        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                action_for_key(key, app, &settings.controls)
            }
            Event::Paste(text) => Some(Action::Paste(text)),
            _ => None,
        };
        if let Some(action) = action {
            if app.handle(action) == Flow::Quit {
                return Ok(());
            }
        }
    }
}
