//! The gateway to the live event collection
//!
//! Two interchangeable sources implement the same [`EventStore`] contract:
//! a hosted remote collection ([`remote_store::RemoteStore`]) and an
//! in-process one ([`memory_store::MemoryStore`]) that doubles as a mocked
//! remote in tests. Subscribers always receive the entire current
//! collection, never a diff, so every consumer can rebuild its view from
//! scratch on each notification.

pub mod memory_store;
pub mod remote_store;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::event::{EventId, EventKind, EventMap, EventRecord, Title};

/// Errors surfaced by store operations.
///
/// None of these is fatal: every error is scoped to one operation and
/// leaves the rest of the system live.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The remote connection could not be established, or the feeding
    /// stream is gone. There is no automatic reconnect beyond what the
    /// transport itself provides.
    #[error("the event store cannot be reached: {0}")]
    Unavailable(String),
    /// The patch target vanished, e.g. it was deleted concurrently.
    /// Recoverable: the next snapshot reconciles the caller's view.
    #[error("no event exists for id {0}")]
    NotFound(EventId),
    /// A create/patch/delete was rejected. The operation is abandoned,
    /// not retried; the caller decides whether to resubmit.
    #[error("write to the event store failed: {0}")]
    WriteFailed(String),
}

/// A partial update to one event: only the `Some` fields are merged into
/// the stored record. An edit-submit sends the complete form state; the
/// publish toggle sends a single field.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moderator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speakers: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl EventPatch {
    /// The full patch an edit-submit sends: every field of the form state.
    pub fn from_record(record: &EventRecord) -> Self {
        Self {
            date: Some(record.date.clone()),
            start_time: Some(record.start_time.clone()),
            end_time: Some(record.end_time.clone()),
            title: Some(record.title.clone()),
            moderator: Some(record.moderator.clone()),
            speakers: Some(record.speakers.clone()),
            kind: Some(record.kind),
            published: Some(record.published),
        }
    }

    /// The single-field patch that toggles an event between published and
    /// draft.
    pub fn published(published: bool) -> Self {
        Self {
            published: Some(published),
            ..Self::default()
        }
    }

    /// Merge this patch into an existing record
    pub fn apply_to(&self, record: &mut EventRecord) {
        if let Some(date) = &self.date {
            record.date = date.clone();
        }
        if let Some(start_time) = &self.start_time {
            record.start_time = start_time.clone();
        }
        if let Some(end_time) = &self.end_time {
            record.end_time = end_time.clone();
        }
        if let Some(title) = &self.title {
            record.title = title.clone();
        }
        if let Some(moderator) = &self.moderator {
            record.moderator = moderator.clone();
        }
        if let Some(speakers) = &self.speakers {
            record.speakers = speakers.clone();
        }
        if let Some(kind) = self.kind {
            record.kind = kind;
        }
        if let Some(published) = self.published {
            record.published = published;
        }
    }
}

/// A live view on the collection.
///
/// The current snapshot is available immediately after subscribing;
/// [`changed`](Subscription::changed) resolves on every subsequent
/// mutation, in the order the store committed them (a slow consumer may
/// observe only the latest snapshot, which is fine since snapshots are
/// complete). Dropping the subscription releases the listener, including
/// the background streaming task a remote store runs on its behalf.
pub struct Subscription {
    receiver: watch::Receiver<EventMap>,
    stream_task: Option<JoinHandle<()>>,
}

impl Subscription {
    pub(crate) fn new(receiver: watch::Receiver<EventMap>) -> Self {
        Self {
            receiver,
            stream_task: None,
        }
    }

    pub(crate) fn with_stream_task(
        receiver: watch::Receiver<EventMap>,
        stream_task: JoinHandle<()>,
    ) -> Self {
        Self {
            receiver,
            stream_task: Some(stream_task),
        }
    }

    /// The latest snapshot of the full collection
    pub fn current(&self) -> EventMap {
        self.receiver.borrow().clone()
    }

    /// Wait for the next committed mutation and return the new snapshot.
    ///
    /// Returns [`StoreError::Unavailable`] once the feeding side is gone
    /// (store dropped, or the remote stream ended).
    pub async fn changed(&mut self) -> Result<EventMap, StoreError> {
        self.receiver.changed().await.map_err(|_| {
            StoreError::Unavailable("the event store stopped publishing snapshots".to_string())
        })?;
        let snapshot = self.receiver.borrow().clone();
        Ok(snapshot)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(task) = self.stream_task.take() {
            task.abort();
        }
    }
}

/// The operations every event source provides.
///
/// There are no transactions and no concurrency tokens: the last writer
/// wins, and distinct writes issued close together may commit in any
/// order.
#[async_trait]
pub trait EventStore {
    /// Open a live view on the collection.
    ///
    /// The returned subscription already holds the current full
    /// collection, and observes every subsequent mutation. A store must
    /// support any number of independent subscribers.
    async fn subscribe(&self) -> Result<Subscription, StoreError>;

    /// Add a new event. The store assigns and returns its id.
    async fn create(&self, record: EventRecord) -> Result<EventId, StoreError>;

    /// Merge the patch fields into an existing event.
    ///
    /// Fails with [`StoreError::NotFound`] if the id no longer exists;
    /// callers must treat that as recoverable, not fatal.
    async fn patch(&self, id: &EventId, patch: EventPatch) -> Result<(), StoreError>;

    /// Remove an event. Idempotent: deleting an id that does not exist is
    /// not an error.
    async fn delete(&self, id: &EventId) -> Result<(), StoreError>;
}
