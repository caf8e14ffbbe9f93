pub mod components;
pub mod detail;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::{AppState, Screen};

pub fn render(f: &mut Frame, app: &AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());

    match app.screen {
        Screen::Directory => {
            let body = Layout::default()
                .direction(Direction::Vertical)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Min(5),
                        Constraint::Length(1),
                        Constraint::Length(1),
                    ]
                    .as_ref(),
                )
                .split(root[0]);
            users::render_search_bar(f, body[0], app);
            users::render_users_table(f, body[1], app);
            users::render_pagination(f, body[2], app);
            users::render_results_info(f, body[3], app);
        }
        Screen::Detail => detail::render_detail(f, root[0], app),
    }

    components::render_status_bar(f, root[1], app);

    if app.show_help {
        components::render_help_modal(f, f.area(), app);
    }
}
