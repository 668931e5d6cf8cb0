use std::env;
use std::sync::mpsc;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::config;
use crate::mpris::ControlCmd;

mod cli;
mod event_loop;
mod keymap;
mod logging;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let inputs = match cli::parse(env::args().skip(1)) {
        cli::Invocation::Run(inputs) => inputs,
        cli::Invocation::PrintConfig => {
            print!("{}", config::Settings::default_toml()?);
            return Ok(());
        }
        cli::Invocation::Help => {
            println!("{}", cli::USAGE);
            return Ok(());
        }
    };

    let (settings, problem) = settings::load_settings();
    let _log_guard = logging::init_logging(&settings.state_dir())?;
    settings::report(problem);
    info!(version = env!("CARGO_PKG_VERSION"), "starting hero");

    let mut app = startup::build_app(&settings, &inputs);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mpris, &control_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("bye");
    run_result
}
