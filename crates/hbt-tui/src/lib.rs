// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod keymap;
pub mod render;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use hbt_app::{HabitService, HabitsEffect, HabitsMsg, HabitsTab, effect_failed, run_effect};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

pub use render::{format_frequency, has_modal, render_body, render_modal, render_view};
pub use theme::{StyleName, Theme, parse_hex_color};

const PANEL_TITLE: &str = " Habits ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    Habits(HabitsMsg),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyOutcome {
    Quit,
    Continue(Option<HabitsEffect>),
}

pub fn run_app(tab: &mut HabitsTab, service: Arc<dyn HabitService>, theme: &Theme) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let (internal_tx, internal_rx) = mpsc::channel();
    let size = terminal.size().context("read terminal size")?;
    tab.resize(size.width, size.height);
    spawn_effect(&service, &internal_tx, tab.init());

    let mut result = Ok(());
    loop {
        process_internal_events(tab, &service, &internal_tx, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, tab, theme)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)) {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error).context("poll event");
                break;
            }
        };
        if !has_event {
            continue;
        }

        match event::read() {
            Ok(Event::Key(key)) => match handle_key_event(tab, key) {
                KeyOutcome::Quit => break,
                KeyOutcome::Continue(Some(effect)) => {
                    spawn_effect(&service, &internal_tx, effect);
                }
                KeyOutcome::Continue(None) => {}
            },
            Ok(Event::Resize(width, height)) => tab.resize(width, height),
            Ok(_) => {}
            Err(error) => {
                result = Err(error).context("read event");
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

/// Runs the effect on a worker thread; the completion comes back on `tx`,
/// even when the service panics.
fn spawn_effect(
    service: &Arc<dyn HabitService>,
    tx: &Sender<InternalEvent>,
    effect: HabitsEffect,
) {
    tracing::debug!(?effect, "spawning effect");
    let service = Arc::clone(service);
    let tx = tx.clone();
    thread::spawn(move || {
        let fallback = effect_failed(&effect, "storage worker crashed; try again".to_owned());
        let msg = panic::catch_unwind(AssertUnwindSafe(|| run_effect(service.as_ref(), effect)))
            .unwrap_or_else(|_| {
                tracing::warn!("effect worker panicked");
                fallback
            });
        if tx.send(InternalEvent::Habits(msg)).is_err() {
            tracing::debug!("event loop gone before effect completed");
        }
    });
}

fn process_internal_events(
    tab: &mut HabitsTab,
    service: &Arc<dyn HabitService>,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::Habits(msg) => {
                if let Some(effect) = tab.apply(msg) {
                    spawn_effect(service, tx, effect);
                }
            }
        }
    }
}

fn handle_key_event(tab: &mut HabitsTab, key: KeyEvent) -> KeyOutcome {
    if key.kind != KeyEventKind::Press {
        return KeyOutcome::Continue(None);
    }
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyOutcome::Quit;
    }
    if tab.dismiss_error() {
        return KeyOutcome::Continue(None);
    }

    if tab.is_capturing_input() {
        let effect = keymap::form_input_for_key(key).and_then(|input| tab.handle_form_input(input));
        return KeyOutcome::Continue(effect);
    }

    if key.code == KeyCode::Char('q') && key.modifiers == KeyModifiers::NONE {
        return KeyOutcome::Quit;
    }
    let effect = keymap::habits_command_for_key(key).and_then(|command| tab.handle_command(command));
    KeyOutcome::Continue(effect)
}

fn render(frame: &mut ratatui::Frame<'_>, tab: &HabitsTab, theme: &Theme) {
    let panel = Block::default()
        .title(PANEL_TITLE)
        .title_style(theme.style(StyleName::Focused))
        .borders(Borders::ALL)
        .border_style(theme.style(StyleName::Border));
    let body = Paragraph::new(render_body(tab, theme)).block(panel);
    frame.render_widget(body, frame.area());

    if let Some(modal) = render_modal(tab, theme) {
        let area = centered_rect(60, 70, frame.area());
        frame.render_widget(Clear, area);
        let overlay = Paragraph::new(modal).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.style(StyleName::Focused)),
        );
        frame.render_widget(overlay, area);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
