//! User profile screen: header card, profile fields and recent posts.
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::api::{Post, User};
use crate::app::{AppState, KeyAction};
use crate::loader::{LoadState, Posts, UserDetail};
use crate::ui::components::{Notice, key_hint, render_notice, skeleton_bar};

pub fn render_detail(f: &mut Frame, area: Rect, app: &AppState) {
    match app.detail.state() {
        LoadState::Idle | LoadState::Loading => render_skeleton(f, area, app),
        LoadState::Failed(err) => render_notice(
            f,
            area,
            app,
            &Notice {
                title: "User",
                headline: "User not found",
                detail: &err.to_string(),
                hint: &key_hint(app, KeyAction::Back, "back to users"),
                headline_style: Style::default().fg(app.theme.error),
            },
        ),
        LoadState::Ready(detail) => render_ready(f, area, app, detail),
    }
}

fn render_skeleton(f: &mut Frame, area: Rect, app: &AppState) {
    let bar = Style::default().fg(app.theme.skeleton);
    let mut lines = vec![
        Line::from(Span::styled(
            "Loading user details...",
            Style::default().fg(app.theme.muted),
        )),
        Line::raw(""),
    ];
    for width in [24, 16, 30, 20, 28, 18] {
        lines.push(Line::from(Span::styled(skeleton_bar(width), bar)));
    }
    let title = match app.detail.target() {
        Some(id) => format!("User {id}"),
        None => "User".to_string(),
    };
    let p = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}

fn render_ready(f: &mut Frame, area: Rect, app: &AppState, detail: &UserDetail) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(4)].as_ref())
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(chunks[0]);

    render_profile(f, cols[0], app, &detail.user);
    render_company(f, cols[1], app, &detail.user);
    render_posts(f, chunks[1], app, &detail.posts);
}

fn field<'a>(app: &AppState, label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(app.theme.muted)),
        Span::styled(value, Style::default().fg(app.theme.text)),
    ])
}

fn render_profile(f: &mut Frame, area: Rect, app: &AppState, user: &User) {
    let lines = vec![
        Line::from(vec![
            Span::styled(
                user.name.clone(),
                Style::default()
                    .fg(app.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  @{}", user.username),
                Style::default().fg(app.theme.muted),
            ),
        ]),
        Line::raw(""),
        field(app, "ID", user.id.to_string()),
        field(app, "Email", user.email.clone()),
        field(app, "Phone", user.phone.clone()),
        field(app, "Website", user.website.clone()),
        field(app, "Address", user.address.one_line()),
        field(
            app,
            "Geo",
            format!("{}, {}", user.address.geo.lat, user.address.geo.lng),
        ),
    ];
    let p = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title("Profile")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}

fn render_company(f: &mut Frame, area: Rect, app: &AppState, user: &User) {
    let company = &user.company;
    let lines = vec![
        Line::from(Span::styled(
            company.name.clone(),
            Style::default()
                .fg(app.theme.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            format!("\"{}\"", company.catch_phrase),
            Style::default()
                .fg(app.theme.text)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            company.bs.clone(),
            Style::default().fg(app.theme.muted),
        )),
    ];
    let p = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title("Company")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}

fn render_posts(f: &mut Frame, area: Rect, app: &AppState, posts: &Posts) {
    let lines = match posts {
        Posts::Ready(list) if list.is_empty() => vec![Line::from(Span::styled(
            "No posts found",
            Style::default().fg(app.theme.muted),
        ))],
        Posts::Ready(list) => list.iter().flat_map(|p| post_lines(app, p)).collect(),
        Posts::Unavailable(err) => vec![Line::from(Span::styled(
            format!("Posts unavailable: {err}"),
            Style::default().fg(app.theme.error),
        ))],
    };
    let p = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title("Recent Posts")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}

fn post_lines(app: &AppState, post: &Post) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            post.title.clone(),
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            post.body.replace('\n', " "),
            Style::default().fg(app.theme.text),
        )),
        Line::raw(""),
    ]
}
