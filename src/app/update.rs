use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use crate::app::tasks::{Dispatcher, Message, Request};
use crate::app::{AppState, InputMode, KeyAction, Screen};
use crate::ui;

const INPUT_POLL: Duration = Duration::from_millis(100);

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    dispatcher: &Dispatcher,
    inbox: &mut UnboundedReceiver<Message>,
) -> Result<()> {
    dispatcher.dispatch(start(app));

    while !app.should_quit {
        while let Ok(msg) = inbox.try_recv() {
            apply_message(app, msg);
        }

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(request) = handle_key(app, key) {
                        dispatcher.dispatch(request);
                    }
                }
            }
        }
    }

    info!(uptime = ?app.started_at.elapsed(), "leaving dashboard");
    Ok(())
}

/// Enter the directory screen for the first time.
pub fn start(app: &mut AppState) -> Request {
    app.screen = Screen::Directory;
    Request::Directory(app.directory.enter())
}

/// Fold a finished fetch into the state. Stale results are dropped.
pub fn apply_message(app: &mut AppState, msg: Message) {
    match msg {
        Message::Directory { generation, result } => {
            app.directory.commit(generation, result);
        }
        Message::Detail { generation, result } => {
            app.detail.commit(generation, result);
        }
    }
}

pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Option<Request> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return None;
    }
    match app.input_mode {
        InputMode::Search => {
            match key.code {
                KeyCode::Enter => app.input_mode = InputMode::Normal,
                KeyCode::Esc => {
                    app.directory.set_query("");
                    app.input_mode = InputMode::Normal;
                }
                KeyCode::Backspace => app.directory.pop_query(),
                KeyCode::Char(c) => app.directory.push_query(c),
                _ => {}
            }
            None
        }
        InputMode::Normal => {
            let action = app.keymap.resolve(&key)?;
            apply_action(app, action)
        }
    }
}

pub fn apply_action(app: &mut AppState, action: KeyAction) -> Option<Request> {
    debug!(?action, screen = ?app.screen, "action");
    if action == KeyAction::Quit {
        app.should_quit = true;
        return None;
    }
    if action == KeyAction::ToggleHelp {
        app.show_help = !app.show_help;
        return None;
    }
    if app.show_help {
        if action == KeyAction::Back {
            app.show_help = false;
        }
        return None;
    }

    match app.screen {
        Screen::Directory => directory_action(app, action),
        Screen::Detail => detail_action(app, action),
    }
}

fn directory_action(app: &mut AppState, action: KeyAction) -> Option<Request> {
    let view = &mut app.directory;
    match action {
        KeyAction::StartSearch => app.input_mode = InputMode::Search,
        KeyAction::OpenDetail => {
            let id = view.selected_user()?.id.to_string();
            return Some(open_detail(app, id));
        }
        KeyAction::Back => {
            if !view.query().is_empty() {
                view.set_query("");
            }
        }
        KeyAction::Reload => return Some(Request::Directory(view.activate())),
        KeyAction::MoveUp => view.select_up(),
        KeyAction::MoveDown => view.select_down(),
        KeyAction::PrevPage => {
            view.prev_page();
        }
        KeyAction::NextPage => {
            view.next_page();
        }
        KeyAction::FirstPage => {
            view.first_page();
        }
        KeyAction::LastPage => {
            view.last_page();
        }
        KeyAction::Quit | KeyAction::ToggleHelp | KeyAction::Ignore => {}
    }
    None
}

fn detail_action(app: &mut AppState, action: KeyAction) -> Option<Request> {
    match action {
        KeyAction::Back => Some(back_to_directory(app)),
        KeyAction::Reload => {
            let id = app.detail.target()?.to_string();
            Some(open_detail(app, id))
        }
        KeyAction::NextPage | KeyAction::MoveDown => {
            let id = app.detail.neighbour(1)?;
            Some(open_detail(app, id))
        }
        KeyAction::PrevPage | KeyAction::MoveUp => {
            let id = app.detail.neighbour(-1)?;
            Some(open_detail(app, id))
        }
        _ => None,
    }
}

/// Navigate to the detail screen for `id`.
pub fn open_detail(app: &mut AppState, id: String) -> Request {
    app.screen = Screen::Detail;
    app.input_mode = InputMode::Normal;
    let generation = app.detail.open(id.clone());
    Request::Detail { generation, id }
}

/// Leave the detail screen. The directory is rebuilt and fetched again.
pub fn back_to_directory(app: &mut AppState) -> Request {
    app.detail.close();
    start(app)
}
