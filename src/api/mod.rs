//! Read-only access to the remote user directory.
//!
//! `DirectorySource` is the seam the loaders are written against;
//! `HttpDirectory` is the reqwest-backed implementation used at runtime.
//! The adapter owns transport details only: URL building, timeout, status
//! mapping and JSON decoding.

pub mod model;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::FetchError;
pub use model::{Address, Company, Geo, Post, User, UserId};

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
const USER_AGENT: &str = concat!("userdeck/", env!("CARGO_PKG_VERSION"));

/// Upstream endpoints consumed by the dashboard.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    /// `GET /users`: the whole collection, unpaginated.
    async fn list_users(&self) -> Result<Vec<User>, FetchError>;

    /// `GET /users/{id}`.
    async fn user(&self, id: UserId) -> Result<User, FetchError>;

    /// `GET /users/{id}/posts`.
    async fn posts(&self, id: UserId) -> Result<Vec<Post>, FetchError>;
}

/// Directory source that performs HTTP GET requests against one base URL.
#[derive(Clone, Debug)]
pub struct HttpDirectory {
    client: Client,
    base: String,
}

impl HttpDirectory {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when `base_url` is not an absolute URL, when it has a
    /// query or fragment, or when the reqwest client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let parsed = Url::parse(base_url)?;
        if parsed.cannot_be_a_base() {
            anyhow::bail!("base url '{base_url}' cannot carry a path");
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            anyhow::bail!("base url '{base_url}' must not have a query or fragment");
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.endpoint(path);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "upstream responded");
        if !status.is_success() {
            return Err(FetchError::from_status(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| FetchError::Decode(err.to_string()))
    }
}

#[async_trait]
impl DirectorySource for HttpDirectory {
    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, FetchError> {
        self.get_json("/users").await
    }

    #[instrument(skip(self))]
    async fn user(&self, id: UserId) -> Result<User, FetchError> {
        self.get_json(&format!("/users/{id}")).await
    }

    #[instrument(skip(self))]
    async fn posts(&self, id: UserId) -> Result<Vec<Post>, FetchError> {
        self.get_json(&format!("/users/{id}/posts")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalised() {
        let dir = HttpDirectory::new("http://127.0.0.1:9/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(dir.base_url(), "http://127.0.0.1:9/api");
        assert_eq!(dir.endpoint("/users/3/posts"), "http://127.0.0.1:9/api/users/3/posts");
    }

    #[test]
    fn rejects_relative_base() {
        assert!(HttpDirectory::new("users.example", Duration::from_secs(1)).is_err());
        assert!(HttpDirectory::new("mailto:someone@example.com", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn rejects_query_and_fragment() {
        let timeout = Duration::from_secs(1);
        let err = HttpDirectory::new("http://127.0.0.1:9/api?token=x", timeout).unwrap_err();
        assert!(err.to_string().contains("query or fragment"));
        assert!(HttpDirectory::new("http://127.0.0.1:9/api#top", timeout).is_err());
        assert!(HttpDirectory::new("http://127.0.0.1:9/api", timeout).is_ok());
    }
}
