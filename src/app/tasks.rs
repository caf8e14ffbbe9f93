//! Background fetches.
//!
//! The UI thread owns all view state. Fetches run on the tokio runtime and
//! report back through a channel, tagged with the generation they were
//! started for; the UI loop decides whether the result is still wanted.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::debug;

use crate::api::{DirectorySource, User};
use crate::error::FetchError;
use crate::loader::{Generation, UserDetail, fetch_detail, fetch_directory};

/// Side effect requested by a state transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Directory(Generation),
    Detail { generation: Generation, id: String },
}

/// Completed fetch, delivered to the UI loop.
#[derive(Debug)]
pub enum Message {
    Directory {
        generation: Generation,
        result: Result<Vec<User>, FetchError>,
    },
    Detail {
        generation: Generation,
        result: Result<UserDetail, FetchError>,
    },
}

pub struct Dispatcher {
    runtime: Handle,
    source: Arc<dyn DirectorySource>,
    post_limit: usize,
    tx: UnboundedSender<Message>,
}

impl Dispatcher {
    pub fn new(
        runtime: Handle,
        source: Arc<dyn DirectorySource>,
        post_limit: usize,
    ) -> (Self, UnboundedReceiver<Message>) {
        let (tx, rx) = unbounded_channel();
        (
            Self {
                runtime,
                source,
                post_limit,
                tx,
            },
            rx,
        )
    }

    /// Spawn the fetch for `request`. Never blocks.
    pub fn dispatch(&self, request: Request) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        match request {
            Request::Directory(generation) => {
                self.runtime.spawn(async move {
                    let result = fetch_directory(source.as_ref()).await;
                    if tx.send(Message::Directory { generation, result }).is_err() {
                        debug!("ui loop gone, dropping directory result");
                    }
                });
            }
            Request::Detail { generation, id } => {
                let post_limit = self.post_limit;
                self.runtime.spawn(async move {
                    let result = fetch_detail(source.as_ref(), &id, post_limit).await;
                    if tx.send(Message::Detail { generation, result }).is_err() {
                        debug!("ui loop gone, dropping detail result");
                    }
                });
            }
        }
    }
}
