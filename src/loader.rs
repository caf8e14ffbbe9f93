//! Load state tracking and the two fetch flows.
//!
//! A `Loader` owns one `LoadState` and a generation counter. Each activation
//! hands out a new `Generation`; results are committed only when they carry
//! the current one, so a slow response for a previous activation can never
//! overwrite a newer one.

use tracing::{debug, info, instrument, warn};

use crate::api::{DirectorySource, Post, User, UserId};
use crate::error::FetchError;

pub const DEFAULT_POST_LIMIT: usize = 3;

/// Activation token. Strictly increasing per loader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(FetchError),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Loader<T> {
    state: LoadState<T>,
    generation: Generation,
}

impl<T> Loader<T> {
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            generation: Generation::default(),
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    /// Start a new activation: previous data and errors are dropped.
    pub fn activate(&mut self) -> Generation {
        self.generation = Generation(self.generation.0 + 1);
        self.state = LoadState::Loading;
        debug!(generation = self.generation.0, "loader activated");
        self.generation
    }

    /// Back to `Idle`. Anything still in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation = Generation(self.generation.0 + 1);
        self.state = LoadState::Idle;
    }

    /// Apply a result. Returns false when it was discarded as stale.
    pub fn commit(&mut self, generation: Generation, result: Result<T, FetchError>) -> bool {
        if generation != self.generation || !self.state.is_loading() {
            warn!(
                stale = generation.0,
                current = self.generation.0,
                "discarding stale response"
            );
            return false;
        }
        self.state = match result {
            Ok(value) => LoadState::Ready(value),
            Err(err) => LoadState::Failed(err),
        };
        true
    }
}

impl<T> Default for Loader<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Posts attached to a detail view.
#[derive(Clone, Debug, PartialEq)]
pub enum Posts {
    Ready(Vec<Post>),
    /// The user loaded but the posts request failed.
    Unavailable(FetchError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct UserDetail {
    pub user: User,
    pub posts: Posts,
}

/// Parse a detail-route parameter into an upstream id.
pub fn parse_user_id(raw: &str) -> Result<UserId, FetchError> {
    raw.trim()
        .parse::<UserId>()
        .map_err(|_| FetchError::InvalidId(raw.to_string()))
}

/// One request for the whole collection.
#[instrument(skip(source))]
pub async fn fetch_directory(source: &dyn DirectorySource) -> Result<Vec<User>, FetchError> {
    let users = source.list_users().await?;
    info!(count = users.len(), "directory loaded");
    Ok(users)
}

/// Fetch a user and their posts concurrently and merge the two.
///
/// A failed user request fails the whole detail whatever happened to the
/// posts. A failed posts request alone yields `Posts::Unavailable`. Posts are
/// cut to the first `post_limit` in upstream order.
#[instrument(skip(source))]
pub async fn fetch_detail(
    source: &dyn DirectorySource,
    raw_id: &str,
    post_limit: usize,
) -> Result<UserDetail, FetchError> {
    let id = parse_user_id(raw_id)?;
    let (user, posts) = tokio::join!(source.user(id), source.posts(id));
    let user = user?;
    let posts = match posts {
        Ok(mut posts) => {
            posts.truncate(post_limit);
            Posts::Ready(posts)
        }
        Err(err) => {
            warn!(%id, error = %err, "posts unavailable, showing user without them");
            Posts::Unavailable(err)
        }
    };
    Ok(UserDetail { user, posts })
}
