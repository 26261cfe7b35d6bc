//! An in-process event store
//!
//! The collection lives in memory and every committed mutation is fanned
//! out to all subscribers as a full snapshot. This store backs the demos
//! and mocks the hosted remote collection in tests.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::watch;

#[cfg(feature = "memory_store_mocks_remote_store")]
use std::sync::Arc;

use crate::event::{EventId, EventMap, EventRecord};
#[cfg(feature = "memory_store_mocks_remote_store")]
use crate::mock_behaviour::MockBehaviour;
use crate::store::{EventPatch, EventStore, StoreError, Subscription};

/// An [`EventStore`] that keeps the whole collection in process memory
pub struct MemoryStore {
    /// The authoritative collection. Mutations are serialized here, then
    /// published in commit order.
    events: Mutex<EventMap>,
    publisher: watch::Sender<EventMap>,
    /// Held so the channel outlives phases where no subscriber is around
    _keep_alive: watch::Receiver<EventMap>,

    #[cfg(feature = "memory_store_mocks_remote_store")]
    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_initial(EventMap::new())
    }

    /// Create a store that already contains the given collection
    pub fn with_initial(events: EventMap) -> Self {
        let (publisher, keep_alive) = watch::channel(events.clone());
        Self {
            events: Mutex::new(events),
            publisher,
            _keep_alive: keep_alive,
            #[cfg(feature = "memory_store_mocks_remote_store")]
            mock_behaviour: None,
        }
    }

    #[cfg(feature = "memory_store_mocks_remote_store")]
    pub fn set_mock_behaviour(&mut self, behaviour: Option<Arc<Mutex<MockBehaviour>>>) {
        self.mock_behaviour = behaviour;
    }

    /// Publish the current collection to every subscriber.
    ///
    /// Subscribers only ever see full snapshots, in commit order.
    fn publish(&self, events: &EventMap) {
        let _ = self.publisher.send(events.clone());
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn subscribe(&self) -> Result<Subscription, StoreError> {
        #[cfg(feature = "memory_store_mocks_remote_store")]
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_subscribe()?;
        }

        Ok(Subscription::new(self.publisher.subscribe()))
    }

    async fn create(&self, record: EventRecord) -> Result<EventId, StoreError> {
        #[cfg(feature = "memory_store_mocks_remote_store")]
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_create()?;
        }

        let id = EventId::random();
        log::debug!("Creating event {}", id);
        let mut events = self.events.lock().unwrap();
        events.insert(id.clone(), record);
        self.publish(&events);
        Ok(id)
    }

    async fn patch(&self, id: &EventId, patch: EventPatch) -> Result<(), StoreError> {
        #[cfg(feature = "memory_store_mocks_remote_store")]
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_patch()?;
        }

        log::debug!("Patching event {}", id);
        let mut events = self.events.lock().unwrap();
        match events.get_mut(id) {
            None => Err(StoreError::NotFound(id.clone())),
            Some(record) => {
                patch.apply_to(record);
                self.publish(&events);
                Ok(())
            }
        }
    }

    async fn delete(&self, id: &EventId) -> Result<(), StoreError> {
        #[cfg(feature = "memory_store_mocks_remote_store")]
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_delete()?;
        }

        log::debug!("Deleting event {}", id);
        let mut events = self.events.lock().unwrap();
        // Idempotent: removing an id that is already gone is fine, and
        // subscribers are only notified when something actually changed
        if events.remove(id).is_some() {
            self.publish(&events);
        }
        Ok(())
    }
}
