//! Library crate for userdeck.
//!
//! This crate exposes the building blocks of the dashboard:
//! - Upstream REST access and data model (`api`)
//! - Application state, settings and update loop (`app`)
//! - Command-line surface and headless commands (`cli`)
//! - Error and result types (`error`)
//! - Collection and detail loaders (`loader`)
//! - Pagination (`pager`) and in-memory search (`search`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `userdeck` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod app;
pub mod cli;
pub mod error;
pub mod loader;
pub mod pager;
pub mod search;
pub mod ui;

/// Convenient error and result types shared across the crate.
pub use error::{FetchError, Result};
