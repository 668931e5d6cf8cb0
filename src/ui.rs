//! UI rendering for the terminal user interface.
//!
//! Each window (player, playlist, configuration) is drawn as a floating
//! panel at its saved geometry, bottom to top, with the focused one last.
//! The prompt and the error dialog are drawn above everything.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Tabs, Wrap},
};

use crate::app::{App, ConfigTab};
use crate::desktop::{TrayMenuItem, Visibility, placement};
use crate::equalizer::{Band, MAX_GAIN_DB, MIN_GAIN_DB, Preset};
use crate::persist::WindowName;
use crate::player::{Controls, PlaybackState};

const NO_FILE: &str = "No file loaded";

/// Format whole seconds as `MM:SS`.
fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10).min(r.width);
    height = height.min(r.height.saturating_sub(2)).max(3).min(r.height);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn window_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {title} "))
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into `frame`.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    match app.tray.visibility() {
        Visibility::InTray => draw_tray_view(frame, app, area),
        Visibility::Minimized => draw_minimized(frame, app, area),
        Visibility::Visible => {
            let focused = app.windows.focused();
            for name in app.windows.open_windows() {
                let rect = placement(app.windows.state(name), area);
                frame.render_widget(Clear, rect);
                let is_focused = name == focused;
                match name {
                    WindowName::MainPlayer => draw_player(frame, app, rect, is_focused),
                    WindowName::Playlist => draw_playlist(frame, app, rect, is_focused),
                    WindowName::Config => draw_config(frame, app, rect, is_focused),
                }
            }
        }
    }

    if let Some(input) = &app.prompt {
        draw_prompt(frame, input, area);
    }
    if let Some(dialog) = &app.dialog {
        let popup = centered_rect_sized(60, 7, area);
        frame.render_widget(Clear, popup);
        let body = Paragraph::new(vec![
            Line::from(dialog.message.as_str()),
            Line::from(""),
            Line::from("[Enter] OK".dim()),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .border_style(Style::default().fg(Color::Red))
                .title(format!(" {} ", dialog.title)),
        );
        frame.render_widget(body, popup);
    }
}

fn now_playing(app: &App) -> String {
    app.player
        .current_track()
        .map(|t| t.display.clone())
        .unwrap_or_else(|| NO_FILE.to_string())
}

fn time_text(app: &App) -> String {
    let duration = app.player.duration();
    if duration == 0 {
        format!("{} / --:--", format_mmss(app.player.position()))
    } else {
        format!(
            "{} / {}",
            format_mmss(app.player.position()),
            format_mmss(duration)
        )
    }
}

/// The transport buttons, dimmed when they cannot be used.
fn buttons_line(app: &App, controls: Controls) -> Line<'static> {
    let button = |label: &str, enabled: bool| {
        let style = if enabled {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!("[{label}]"), style)
    };
    let volume = app.player.volume();
    Line::from(vec![
        button("o Open", true),
        Span::raw(" "),
        button("▶ Play", controls.play),
        Span::raw(" "),
        button("⏸ Pause", controls.pause),
        Span::raw(" "),
        button("■ Stop", controls.stop),
        Span::raw(" "),
        button("P Playlist", true),
        Span::raw(" "),
        button(
            &format!("{} {}%", volume.level().icon(), volume.percent()),
            true,
        ),
        Span::raw(" "),
        button("c Config", true),
    ])
}

fn draw_player(frame: &mut Frame, app: &App, rect: Rect, focused: bool) {
    let block = window_block(&app.header, focused).title_alignment(Alignment::Center);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let state = app.player.state();
    let title = Paragraph::new(Line::from(vec![
        Span::styled(now_playing(app), Style::default().add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(title, rows[0]);

    let controls = app.player.controls();
    let duration = app.player.duration();
    let ratio = if duration == 0 {
        0.0
    } else {
        (app.player.position() as f64 / duration as f64).clamp(0.0, 1.0)
    };
    let gauge_style = if controls.seek {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let label = if controls.none_enabled() {
        "Press o to open a file".to_string()
    } else {
        format!("{}  {}", state.label(), time_text(app))
    };
    let gauge = Gauge::default()
        .gauge_style(gauge_style)
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, rows[2]);

    frame.render_widget(
        Paragraph::new(buttons_line(app, controls)).alignment(Alignment::Center),
        rows[3],
    );

    if let Some(status) = &app.status {
        frame.render_widget(
            Paragraph::new(status.as_str().italic()).alignment(Alignment::Center),
            rows[4],
        );
    }

    let hints = "[space] play/pause  [s] stop  [h/l] prev/next  [H/L] scrub  [0-9] seek  \
                 [+/-] volume  [z] minimize  [Tab] focus  [q] quit";
    frame.render_widget(
        Paragraph::new(hints.dim()).wrap(Wrap { trim: true }),
        rows[5],
    );
}

fn draw_minimized(frame: &mut Frame, app: &App, area: Rect) {
    let rect = placement(app.windows.state(WindowName::MainPlayer), area);
    let bar = Rect {
        height: rect.height.min(3),
        ..rect
    };
    let text = format!(
        "{} - {}  [Enter] restore",
        app.player.state().label(),
        now_playing(app)
    );
    frame.render_widget(Clear, bar);
    frame.render_widget(
        Paragraph::new(text).block(window_block(&format!("{} (minimized)", app.header.trim()), true)),
        bar,
    );
}

/// One-line compact view shown while the player sits in the tray.
fn draw_tray_view(frame: &mut Frame, app: &App, area: Rect) {
    let icon = match app.player.state() {
        PlaybackState::Playing => "▶",
        PlaybackState::Paused => "⏸",
        PlaybackState::Stopped | PlaybackState::Ready => "■",
    };
    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(format!(" {}  {}  ", now_playing(app), time_text(app))),
        Span::styled("[Enter] show  [m] menu", Style::default().fg(Color::DarkGray)),
    ]);
    let row = Rect { height: 1, ..area };
    frame.render_widget(Paragraph::new(line), row);

    if app.tray.menu_open() {
        let items: Vec<ListItem> = TrayMenuItem::ALL
            .iter()
            .map(|item| {
                let key = match item {
                    TrayMenuItem::Show => "s",
                    TrayMenuItem::Quit => "q",
                };
                ListItem::new(format!("[{key}] {}", item.label()))
            })
            .collect();
        let menu = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: 14.min(area.width.saturating_sub(1)),
            height: 4.min(area.height.saturating_sub(1)),
        };
        frame.render_widget(Clear, menu);
        frame.render_widget(List::new(items).block(Block::bordered()), menu);
    }
}

fn draw_playlist(frame: &mut Frame, app: &App, rect: Rect, focused: bool) {
    let playlist = app.player.playlist();
    let block = window_block(&format!("{} ({})", WindowName::Playlist.title(), playlist.len()), focused);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let current = app.player.current_index();
    let items: Vec<ListItem> = playlist
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let marker = if Some(i) == current { "♪ " } else { "  " };
            let length = t.duration().map(|d| format_mmss(d.as_secs())).unwrap_or_default();
            ListItem::new(format!("{marker}{}  {}", t.display, length))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !playlist.is_empty() {
        state.select(Some(app.selected.min(playlist.len() - 1)));
    }
    frame.render_stateful_widget(list, chunks[0], &mut state);

    frame.render_widget(
        Paragraph::new("[a] add [K/J] up/down [d] remove [Enter] play [Esc] close".dim()),
        chunks[1],
    );
}

fn draw_config(frame: &mut Frame, app: &App, rect: Rect, focused: bool) {
    let block = window_block(WindowName::Config.title(), focused);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let selected = ConfigTab::ALL
        .iter()
        .position(|t| *t == app.config_tab)
        .unwrap_or(0);
    let tabs = Tabs::new(ConfigTab::ALL.iter().map(|t| t.title()))
        .select(selected)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(Block::default().borders(Borders::BOTTOM).title("[t] next tab".dim()));
    frame.render_widget(tabs, chunks[0]);

    let body = match app.config_tab {
        ConfigTab::General => general_tab(app),
        ConfigTab::Equalizer => equalizer_tab(app),
        ConfigTab::About => about_tab(),
    };
    frame.render_widget(Paragraph::new(body), chunks[1]);
}

fn checkbox(key: char, checked: bool, label: &str) -> Line<'static> {
    let mark = if checked { "x" } else { " " };
    Line::from(format!("[{key}] [{mark}] {label}"))
}

fn general_tab(app: &App) -> Vec<Line<'static>> {
    vec![
        checkbox('1', app.prefs.startup, "Start with the system"),
        checkbox('2', app.prefs.minimize_to_tray, "Minimize to tray"),
    ]
}

/// Horizontal slider for one band: filled up to the gain, centre is 0 dB.
fn gain_bar(db: i8, width: usize) -> String {
    let span = f32::from(MAX_GAIN_DB - MIN_GAIN_DB);
    let filled = ((f32::from(db - MIN_GAIN_DB) / span) * width as f32).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn equalizer_tab(app: &App) -> Vec<Line<'static>> {
    let eq = &app.prefs.equalizer;
    let mut lines: Vec<Line<'static>> = Band::ALL
        .iter()
        .map(|band| {
            let gain = eq.gain(*band);
            let text = format!("{:>6} {} {:+3} dB", band.label(), gain_bar(gain, 24), gain);
            if *band == app.eq_band {
                Line::from(Span::styled(text, Style::default().add_modifier(Modifier::REVERSED)))
            } else {
                Line::from(text)
            }
        })
        .collect();

    let active = eq.matching_preset();
    let mut presets = vec![Span::raw("Presets: ")];
    for (i, preset) in Preset::ALL.iter().enumerate() {
        let label = format!("[{}] {} ", i + 1, preset.name());
        if active == Some(*preset) {
            presets.push(Span::styled(label, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)));
        } else {
            presets.push(Span::raw(label));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(presets));

    let levels = app.player.mixer().channel_levels();
    lines.push(Line::from(
        format!(
            "bass {:.2}  mid {:.2}  treble {:.2}   [←/→] band [↑/↓] gain",
            levels.bass, levels.mid, levels.treble
        )
        .dim(),
    ));
    lines
}

fn about_tab() -> Vec<Line<'static>> {
    vec![
        Line::from(format!("hero {}", env!("CARGO_PKG_VERSION")).bold()),
        Line::from("A terminal audio player for .mp3 and .wav files."),
        Line::from(""),
        Line::from("Windows: [P] playlist [c] configuration [Tab] focus"),
        Line::from("Ctrl+arrows move, Alt+arrows resize, [M] maximize, [Esc] close"),
        Line::from("Drop or paste files into the terminal to add them."),
    ]
}

fn draw_prompt(frame: &mut Frame, input: &str, area: Rect) {
    let popup = centered_rect_sized(70, 3, area);
    frame.render_widget(Clear, popup);
    let text = Line::from(vec![Span::raw(input.to_string()), "▏".slow_blink()]);
    frame.render_widget(
        Paragraph::new(text).block(Block::bordered().title(" Open file or directory (Enter/Esc) ")),
        popup,
    );
}
