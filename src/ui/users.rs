use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::app::{AppState, InputMode, KeyAction};
use crate::loader::LoadState;
use crate::ui::components::{Notice, key_hint, render_notice, skeleton_bar};

const WIDTHS: [Constraint; 6] = [
    Constraint::Length(4),
    Constraint::Percentage(20),
    Constraint::Percentage(14),
    Constraint::Percentage(26),
    Constraint::Percentage(20),
    Constraint::Percentage(20),
];

pub fn render_search_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let view = &app.directory;
    let searching = app.input_mode == InputMode::Search;
    let cursor = if searching { "▏" } else { "" };
    let placeholder = view.query().is_empty() && !searching;
    let query = if placeholder {
        Span::styled(
            "Search by name, email, or username (/)",
            Style::default().fg(app.theme.muted),
        )
    } else {
        Span::styled(
            format!("{}{cursor}", view.query()),
            Style::default().fg(app.theme.text),
        )
    };
    let count = match view.state() {
        LoadState::Ready(_) => format!("  {} Users Found", view.filtered().len()),
        _ => String::new(),
    };
    let line = Line::from(vec![
        Span::styled(" ⌕ ", Style::default().fg(app.theme.accent)),
        query,
        Span::styled(count, Style::default().fg(app.theme.muted)),
    ]);
    let border = if searching { app.theme.accent } else { app.theme.border };
    let p = Paragraph::new(line).block(
        Block::default()
            .title("Users Directory")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(p, area);
}

pub fn render_users_table(f: &mut Frame, area: Rect, app: &AppState) {
    let view = &app.directory;
    match view.state() {
        LoadState::Idle | LoadState::Loading => render_skeleton(f, area, app),
        LoadState::Failed(err) => render_notice(
            f,
            area,
            app,
            &Notice {
                title: "Users",
                headline: "Could not load users",
                detail: &err.to_string(),
                hint: &key_hint(app, KeyAction::Reload, "try again"),
                headline_style: Style::default().fg(app.theme.error),
            },
        ),
        LoadState::Ready(_) if view.filtered().is_empty() => render_notice(
            f,
            area,
            app,
            &Notice {
                title: "Users",
                headline: "No users found",
                detail: "Try adjusting your search terms",
                hint: &key_hint(app, KeyAction::Back, "clear the search"),
                headline_style: Style::default().fg(app.theme.accent),
            },
        ),
        LoadState::Ready(_) => {
            let rows = view.page().iter().enumerate().map(|(i, u)| {
                let style = if i == view.selected() {
                    Style::default()
                        .fg(app.theme.selected_fg)
                        .bg(app.theme.selected_bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(app.theme.text)
                };
                Row::new(vec![
                    Cell::from(u.id.to_string()),
                    Cell::from(u.name.clone()),
                    Cell::from(format!("@{}", u.username)),
                    Cell::from(u.email.clone()),
                    Cell::from(u.phone.clone()),
                    Cell::from(u.company.name.clone()),
                ])
                .style(style)
            });
            let table = Table::new(rows, WIDTHS)
                .header(header(app))
                .block(table_block(app))
                .column_spacing(1);
            f.render_widget(table, area);
        }
    }
}

fn header(app: &AppState) -> Row<'static> {
    Row::new(vec!["ID", "NAME", "USERNAME", "EMAIL", "PHONE", "COMPANY"]).style(
        Style::default()
            .fg(app.theme.accent)
            .add_modifier(Modifier::BOLD),
    )
}

fn table_block(app: &AppState) -> Block<'static> {
    Block::default()
        .title("Users")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
}

/// Placeholder rows shaped like one full page.
fn render_skeleton(f: &mut Frame, area: Rect, app: &AppState) {
    let bar = Style::default().fg(app.theme.skeleton);
    let rows = (0..app.directory.pages().page_size()).map(|_| {
        Row::new(vec![
            Cell::from(skeleton_bar(2)),
            Cell::from(skeleton_bar(16)),
            Cell::from(skeleton_bar(10)),
            Cell::from(skeleton_bar(22)),
            Cell::from(skeleton_bar(14)),
            Cell::from(skeleton_bar(14)),
        ])
        .style(bar)
    });
    let table = Table::new(rows, WIDTHS)
        .header(header(app))
        .block(table_block(app).title_bottom("loading users…"))
        .column_spacing(1);
    f.render_widget(table, area);
}

/// `‹ Prev  1 [2] 3  Next ›`, hidden when everything fits on one page.
pub fn render_pagination(f: &mut Frame, area: Rect, app: &AppState) {
    let view = &app.directory;
    let pages = view.pages();
    if view.filtered().is_empty() || pages.total_pages() <= 1 {
        return;
    }
    let enabled = Style::default().fg(app.theme.text);
    let disabled = Style::default()
        .fg(app.theme.muted)
        .add_modifier(Modifier::DIM);
    let mut spans = vec![Span::styled(
        "‹ Prev ",
        if pages.has_prev() { enabled } else { disabled },
    )];
    for page in pages.window(app.settings.page_window) {
        if page == pages.current() {
            spans.push(Span::styled(
                format!("[{page}]"),
                Style::default()
                    .fg(app.theme.selected_fg)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(format!(" {page} "), enabled));
        }
    }
    spans.push(Span::styled(
        " Next ›",
        if pages.has_next() { enabled } else { disabled },
    ));
    let p = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(p, area);
}

/// "Showing 1 to 6 of 10 users".
pub fn render_results_info(f: &mut Frame, area: Rect, app: &AppState) {
    if !matches!(app.directory.state(), LoadState::Ready(_)) {
        return;
    }
    if let Some(summary) = app.directory.pages().summary() {
        let p = Paragraph::new(summary)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.theme.muted));
        f.render_widget(p, area);
    }
}
