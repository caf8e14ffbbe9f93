//! Shared UI components (status bar, overlays, placeholders).
//!
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{AppState, InputMode, KeyAction, Screen};
use crate::loader::LoadState;

/// Render the bottom status bar with mode, screen and load state.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
    };
    let (screen, status) = match app.screen {
        Screen::Directory => ("directory", load_label(app.directory.state())),
        Screen::Detail => ("detail", load_label(app.detail.state())),
    };
    let msg = format!(
        "mode: {mode}  screen: {screen}  {status}  page size: {}  source: {}  ?: help",
        app.settings.page_size, app.settings.base_url
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

fn load_label<T>(state: &LoadState<T>) -> &'static str {
    match state {
        LoadState::Idle => "idle",
        LoadState::Loading => "loading…",
        LoadState::Ready(_) => "ready",
        LoadState::Failed(_) => "failed",
    }
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Placeholder bar of `width` cells used while data is loading.
pub fn skeleton_bar(width: usize) -> String {
    "░".repeat(width)
}

/// "Esc, Backspace: back to users", from whatever keys `action` is bound to.
pub fn key_hint(app: &AppState, action: KeyAction, what: &str) -> String {
    let keys = app.keymap.keys_for(action);
    if keys.is_empty() {
        return what.to_string();
    }
    format!("{}: {what}", keys.join(", "))
}

/// Text of an empty-state or failure panel.
pub struct Notice<'a> {
    pub title: &'a str,
    pub headline: &'a str,
    pub detail: &'a str,
    pub hint: &'a str,
    pub headline_style: Style,
}

/// Centered message panel used for empty and failed states.
pub fn render_notice(f: &mut Frame, area: Rect, app: &AppState, notice: &Notice) {
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            notice.headline.to_string(),
            notice.headline_style.add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            notice.detail.to_string(),
            Style::default().fg(app.theme.text),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            notice.hint.to_string(),
            Style::default()
                .fg(app.theme.muted)
                .add_modifier(Modifier::ITALIC),
        )),
    ];
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(notice.title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(p, area);
}

const HELP_ORDER: [KeyAction; 12] = [
    KeyAction::StartSearch,
    KeyAction::OpenDetail,
    KeyAction::Back,
    KeyAction::MoveUp,
    KeyAction::MoveDown,
    KeyAction::PrevPage,
    KeyAction::NextPage,
    KeyAction::FirstPage,
    KeyAction::LastPage,
    KeyAction::Reload,
    KeyAction::ToggleHelp,
    KeyAction::Quit,
];

/// Render the keybindings overlay from the live keymap.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = (HELP_ORDER.len() as u16 + 8).min(area.height.saturating_sub(2));
    let rect = centered_rect(width, height, area);

    let label_w = HELP_ORDER
        .iter()
        .map(|a| a.label().len())
        .max()
        .unwrap_or(0);
    let mut lines: Vec<Line> = Vec::new();
    for action in HELP_ORDER {
        let keys = app.keymap.keys_for(action);
        if keys.is_empty() {
            continue;
        }
        lines.push(Line::from(vec![
            Span::raw(format!("  {:>label_w$} │ ", action.label())),
            Span::styled(
                keys.join(", "),
                Style::default().add_modifier(Modifier::ITALIC),
            ),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "While searching: type to filter, Enter to keep, Esc to clear",
        Style::default().fg(app.theme.muted),
    )));
    lines.push(Line::from(Span::styled(
        "On a user: Left/Right open the previous/next id",
        Style::default().fg(app.theme.muted),
    )));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Keybindings")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
