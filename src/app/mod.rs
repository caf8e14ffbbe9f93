//! Application state types and entry glue.
//!
//! Each screen owns an explicit state container. The loaders inside them
//! live as long as the application so their generation counters keep
//! increasing across visits; everything else is rebuilt when a screen is
//! entered.
//!
pub mod config;
pub mod keymap;
pub mod tasks;
pub mod theme;
pub mod update;

use std::time::Instant;

use tracing::info;

use crate::api::User;
use crate::error::FetchError;
use crate::loader::{Generation, LoadState, Loader, UserDetail, parse_user_id};
use crate::pager::PageState;
use crate::search::filter_users;

pub use config::Settings;
pub use keymap::{KeyAction, Keymap};
pub use theme::Theme;

/// Which screen is showing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Directory,
    Detail,
}

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Keystrokes edit the directory query.
    Search,
}

/// State of the directory (list) screen.
#[derive(Clone, Debug)]
pub struct DirectoryView {
    loader: Loader<Vec<User>>,
    query: String,
    filtered: Vec<User>,
    pages: PageState,
    /// Row index within the current page.
    selected: usize,
}

impl DirectoryView {
    pub fn new(page_size: usize) -> Self {
        Self {
            loader: Loader::new(),
            query: String::new(),
            filtered: Vec::new(),
            pages: PageState::new(page_size),
            selected: 0,
        }
    }

    /// Enter the screen: fresh query and page, and a new collection fetch.
    pub fn enter(&mut self) -> Generation {
        self.query.clear();
        self.pages.reset();
        self.selected = 0;
        self.activate()
    }

    /// Re-fetch the collection, keeping the query.
    pub fn activate(&mut self) -> Generation {
        let generation = self.loader.activate();
        self.refilter();
        generation
    }

    pub fn commit(
        &mut self,
        generation: Generation,
        result: Result<Vec<User>, FetchError>,
    ) -> bool {
        let applied = self.loader.commit(generation, result);
        if applied {
            self.refilter();
        }
        applied
    }

    pub fn state(&self) -> &LoadState<Vec<User>> {
        self.loader.state()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query. Always returns to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
        self.pages.reset();
        self.selected = 0;
    }

    pub fn push_query(&mut self, c: char) {
        let mut q = std::mem::take(&mut self.query);
        q.push(c);
        self.set_query(q);
    }

    pub fn pop_query(&mut self) {
        let mut q = std::mem::take(&mut self.query);
        q.pop();
        self.set_query(q);
    }

    fn refilter(&mut self) {
        let all = self.loader.state().ready().map(Vec::as_slice).unwrap_or(&[]);
        self.filtered = filter_users(all, &self.query);
        self.pages.set_total_items(self.filtered.len());
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.page().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// All users matching the query.
    pub fn filtered(&self) -> &[User] {
        &self.filtered
    }

    pub fn pages(&self) -> &PageState {
        &self.pages
    }

    /// Users on the current page.
    pub fn page(&self) -> &[User] {
        self.pages.slice(&self.filtered)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.page().get(self.selected)
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        if self.selected + 1 < self.page().len() {
            self.selected += 1;
        }
    }

    /// Request a page. Out-of-range requests change nothing.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let moved = page != self.pages.current() && self.pages.go_to(page);
        if moved {
            self.selected = 0;
        }
        moved
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.pages.current() + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.pages.has_prev() && self.go_to_page(self.pages.current() - 1)
    }

    pub fn first_page(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn last_page(&mut self) -> bool {
        self.go_to_page(self.pages.total_pages())
    }
}

/// State of the detail screen.
#[derive(Clone, Debug, Default)]
pub struct DetailView {
    loader: Loader<UserDetail>,
    target: Option<String>,
}

impl DetailView {
    /// Show `id`. Any result still in flight for a previous id becomes stale.
    pub fn open(&mut self, id: impl Into<String>) -> Generation {
        let id = id.into();
        info!(%id, "opening user detail");
        self.target = Some(id);
        self.loader.activate()
    }

    pub fn close(&mut self) {
        self.target = None;
        self.loader.reset();
    }

    pub fn commit(
        &mut self,
        generation: Generation,
        result: Result<UserDetail, FetchError>,
    ) -> bool {
        self.loader.commit(generation, result)
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn state(&self) -> &LoadState<UserDetail> {
        self.loader.state()
    }

    /// Id `offset` away from the current target, if both are valid upstream ids.
    pub fn neighbour(&self, offset: i64) -> Option<String> {
        let current = parse_user_id(self.target.as_deref()?).ok()?;
        let next = current.checked_add_signed(offset)?;
        (next >= 1).then(|| next.to_string())
    }
}

pub struct AppState {
    pub started_at: Instant,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub directory: DirectoryView,
    pub detail: DetailView,
    pub settings: Settings,
    pub theme: Theme,
    pub keymap: Keymap,
    pub show_help: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(settings: Settings, theme: Theme, keymap: Keymap) -> Self {
        Self {
            started_at: Instant::now(),
            screen: Screen::Directory,
            input_mode: InputMode::Normal,
            directory: DirectoryView::new(settings.page_size),
            detail: DetailView::default(),
            settings,
            theme,
            keymap,
            show_help: false,
            should_quit: false,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default(), Theme::default(), Keymap::default())
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
