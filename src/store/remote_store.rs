//! This module provides a client to connect to a hosted realtime JSON store
//!
//! The collection lives at the path `events` under the store's base URL,
//! in the REST dialect of Firebase-style realtime databases: reads and
//! writes go through `events.json` / `events/{id}.json`, and a streaming
//! `text/event-stream` request pushes a notification for every committed
//! mutation.

use futures::StreamExt;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tokio::sync::watch;
use url::Url;

use crate::event::{EventId, EventMap, EventRecord};
use crate::store::{EventPatch, EventStore, StoreError, Subscription};

static EVENTS_PATH: &str = "events";

/// An [`EventStore`] backed by a hosted realtime database
#[derive(Clone)]
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl RemoteStore {
    /// Create a client for the store at this base URL. This does not start
    /// a connection.
    pub fn new<S: AsRef<str>>(base_url: S) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url.as_ref())
            .map_err(|err| StoreError::Unavailable(format!("Invalid store URL: {}", err)))?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            auth_token: None,
        })
    }

    /// Use a database secret or auth token on every request
    pub fn with_auth_token<S: ToString>(mut self, token: S) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    fn collection_url(&self) -> Url {
        self.path_url(&format!("{}.json", EVENTS_PATH))
    }

    fn event_url(&self, id: &EventId) -> Url {
        self.path_url(&format!("{}/{}.json", EVENTS_PATH, id))
    }

    fn path_url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        if let Some(token) = &self.auth_token {
            url.query_pairs_mut().append_pair("auth", token);
        }
        url
    }

    /// Fetch the entire current collection. An empty collection is `null`
    /// on the wire.
    async fn fetch_collection(&self) -> Result<EventMap, StoreError> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;

        if response.status().is_success() == false {
            return Err(StoreError::Unavailable(format!(
                "Unexpected HTTP status code {:?}",
                response.status()
            )));
        }

        let collection: Option<EventMap> = response
            .json()
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        Ok(collection.unwrap_or_default())
    }

    /// Fetch one record, `None` if the id does not exist
    async fn fetch_event(&self, id: &EventId) -> Result<Option<EventRecord>, StoreError> {
        let response = self
            .client
            .get(self.event_url(id))
            .send()
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;

        if response.status().is_success() == false {
            return Err(StoreError::Unavailable(format!(
                "Unexpected HTTP status code {:?}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))
    }
}

/// The body the store answers to an append: the key it assigned
#[derive(Deserialize)]
struct PushResponse {
    name: String,
}

/// A write that never reached the store is a connectivity problem, not a
/// rejected write
fn write_error(err: reqwest::Error) -> StoreError {
    if err.is_connect() || err.is_timeout() {
        StoreError::Unavailable(err.to_string())
    } else {
        StoreError::WriteFailed(err.to_string())
    }
}

#[async_trait::async_trait]
impl EventStore for RemoteStore {
    async fn subscribe(&self) -> Result<Subscription, StoreError> {
        let initial = self.fetch_collection().await?;
        let (publisher, receiver) = watch::channel(initial);

        let stream_response = self
            .client
            .get(self.collection_url())
            .header(ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        if stream_response.status().is_success() == false {
            return Err(StoreError::Unavailable(format!(
                "Unexpected HTTP status code {:?}",
                stream_response.status()
            )));
        }

        let store = self.clone();
        let task = tokio::spawn(async move {
            store.pump_stream(stream_response, publisher).await;
        });
        Ok(Subscription::with_stream_task(receiver, task))
    }

    async fn create(&self, record: EventRecord) -> Result<EventId, StoreError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(&record)
            .send()
            .await
            .map_err(write_error)?;

        if response.status().is_success() == false {
            return Err(StoreError::WriteFailed(format!(
                "Unexpected HTTP status code {:?}",
                response.status()
            )));
        }

        let push: PushResponse = response
            .json()
            .await
            .map_err(|err| StoreError::WriteFailed(err.to_string()))?;
        log::debug!("The store assigned id {}", push.name);
        Ok(EventId::from(push.name))
    }

    async fn patch(&self, id: &EventId, patch: EventPatch) -> Result<(), StoreError> {
        // A merge-update on this kind of store happily creates the path it
        // patches. Probe first, so that patching an event somebody deleted
        // concurrently surfaces as NotFound instead of resurrecting it.
        if self.fetch_event(id).await?.is_none() {
            return Err(StoreError::NotFound(id.clone()));
        }

        let response = self
            .client
            .patch(self.event_url(id))
            .json(&patch)
            .send()
            .await
            .map_err(write_error)?;

        if response.status().is_success() == false {
            return Err(StoreError::WriteFailed(format!(
                "Unexpected HTTP status code {:?}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: &EventId) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.event_url(id))
            .send()
            .await
            .map_err(write_error)?;

        // Deleting an absent id answers success on this store, which
        // matches the idempotency contract
        if response.status().is_success() == false {
            return Err(StoreError::WriteFailed(format!(
                "Unexpected HTTP status code {:?}",
                response.status()
            )));
        }
        Ok(())
    }
}

impl RemoteStore {
    /// Read the notification stream and publish a fresh full snapshot for
    /// every mutation it reports. Returns when the stream ends; dropping
    /// the publisher then makes the paired subscription report
    /// `Unavailable`.
    async fn pump_stream(
        &self,
        response: reqwest::Response,
        publisher: watch::Sender<EventMap>,
    ) {
        let mut stream = response.bytes_stream();
        let mut buffer = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(err) => {
                    log::warn!("The event stream broke: {}", err);
                    return;
                }
            };
            buffer.push_str(&String::from_utf8_lossy(&chunk));

            // Stream frames are separated by a blank line
            while let Some(frame_end) = buffer.find("\n\n") {
                let frame: String = buffer.drain(..frame_end + 2).collect();
                match frame_event_name(&frame) {
                    None | Some("keep-alive") => continue,
                    Some("put") | Some("patch") => {
                        // The frame only describes what changed; consumers
                        // want the whole collection, so re-read it
                        match self.fetch_collection().await {
                            Ok(snapshot) => {
                                let _ = publisher.send(snapshot);
                            }
                            Err(err) => {
                                log::warn!("Unable to re-read the collection: {}. Skipping this notification.", err);
                            }
                        }
                    }
                    Some(other) => {
                        // "cancel" and "auth_revoked" both mean the stream
                        // is done for
                        log::warn!("The store ended the stream ({})", other);
                        return;
                    }
                }
            }
        }
        log::info!("The event stream closed");
    }
}

/// The `event:` field of one server-sent frame
fn frame_event_name(frame: &str) -> Option<&str> {
    frame
        .lines()
        .find_map(|line| line.strip_prefix("event:"))
        .map(|name| name.trim())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn frame_event_names_are_extracted() {
        assert_eq!(
            frame_event_name("event: put\ndata: {\"path\":\"/\",\"data\":null}"),
            Some("put")
        );
        assert_eq!(frame_event_name("event:keep-alive\ndata: null"), Some("keep-alive"));
        assert_eq!(frame_event_name("data: no event line"), None);
    }

    #[test]
    fn urls_are_path_addressed_and_carry_the_auth_token() {
        let store = RemoteStore::new("https://agenda.example.com").unwrap();
        assert_eq!(
            store.collection_url().as_str(),
            "https://agenda.example.com/events.json"
        );
        assert_eq!(
            store.event_url(&EventId::from("abc")).as_str(),
            "https://agenda.example.com/events/abc.json"
        );

        let authed = RemoteStore::new("https://agenda.example.com")
            .unwrap()
            .with_auth_token("s3cret");
        assert_eq!(
            authed.collection_url().as_str(),
            "https://agenda.example.com/events.json?auth=s3cret"
        );
    }
}
