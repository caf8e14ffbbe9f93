//! Error types.
//!
//! Fetch failures are typed (`FetchError`) because they are turned into view
//! state at the loader boundary. Everything above that boundary (terminal
//! setup, config files, CLI) uses `anyhow`.

use thiserror::Error;

pub use anyhow::{Context, Result};

/// Why a request against the user directory did not produce data.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Connection refused, DNS failure, reset, TLS error.
    #[error("request failed: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    /// Non-success HTTP status other than 404.
    #[error("upstream returned HTTP {0}")]
    Status(u16),
    #[error("user not found")]
    NotFound,
    /// The detail route was given an id that is not a number.
    #[error("invalid user id '{0}'")]
    InvalidId(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Map a non-success HTTP status code.
    pub fn from_status(code: u16) -> Self {
        if code == 404 {
            FetchError::NotFound
        } else {
            FetchError::Status(code)
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::from_status(status.as_u16())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_404_is_not_found() {
        assert_eq!(FetchError::from_status(404), FetchError::NotFound);
        assert_eq!(FetchError::from_status(500), FetchError::Status(500));
    }
}
