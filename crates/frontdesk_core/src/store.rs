//! crates/frontdesk_core/src/store.rs
//!
//! The entity store: generic list/get/create/update/delete over a named
//! collection, persisted through the `KeyValueStore` port.
//!
//! Each collection is stored as a single JSON array under its key and is
//! rewritten in full on every mutation. When the backend cannot be reached or
//! holds something undecodable, reads return an empty collection and writes
//! are dropped. Both cases are logged and never returned to the caller.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::lock::{Mutex, MutexGuard};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::ports::{Clock, KeyValueStore};

/// A record type that lives in its own collection.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The backend key the collection is stored under.
    const COLLECTION: &'static str;

    /// Everything needed to create a record except its id and timestamps.
    type Draft: Send;

    fn id(&self) -> Uuid;

    fn from_draft(id: Uuid, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Stamps the update timestamp, if the entity has one.
    fn touch(&mut self, now: DateTime<Utc>);
}

/// Shared handle to the persisted collections. Cheap to clone.
#[derive(Clone)]
pub struct EntityStore {
    backend: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    // Serializes read-modify-write cycles within this process.
    write_lock: Arc<Mutex<()>>,
}

impl EntityStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// All records of a collection, in insertion order.
    pub async fn list<E: Entity>(&self) -> Vec<E> {
        self.load().await
    }

    pub async fn get<E: Entity>(&self, id: Uuid) -> Option<E> {
        self.load::<E>().await.into_iter().find(|record| record.id() == id)
    }

    /// Whether the collection has ever been written.
    pub async fn contains<E: Entity>(&self) -> bool {
        matches!(self.backend.get(E::COLLECTION).await, Ok(Some(_)))
    }

    /// Takes the write lock. Checks made through the returned writer stay valid
    /// for its writes until it is dropped.
    pub async fn writer(&self) -> StoreWriter<'_> {
        StoreWriter {
            _guard: self.write_lock.lock().await,
            store: self,
        }
    }

    /// Assigns an id and timestamps to `draft`, appends it and returns the record.
    pub async fn create<E: Entity>(&self, draft: E::Draft) -> E {
        self.writer().await.create(draft).await
    }

    /// Applies `change` to the record with `id` and stamps its update time.
    ///
    /// Returns `None` when no such record exists; nothing is written then.
    pub async fn update<E, F>(&self, id: Uuid, change: F) -> Option<E>
    where
        E: Entity,
        F: FnOnce(&mut E) + Send,
    {
        self.writer().await.update(id, change).await
    }

    /// Removes the record with `id`. Returns whether anything was removed.
    pub async fn delete<E: Entity>(&self, id: Uuid) -> bool {
        self.writer().await.delete::<E>(id).await
    }

    /// Overwrites a whole collection.
    pub async fn replace_all<E: Entity>(&self, records: &[E]) {
        self.writer().await.save(records).await;
    }

    async fn load<E: Entity>(&self) -> Vec<E> {
        match self.backend.get(E::COLLECTION).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(records) => records,
                Err(e) => {
                    warn!(collection = E::COLLECTION, error = %e, "Stored collection is unreadable, treating it as empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(collection = E::COLLECTION, error = %e, "Storage unavailable, reading an empty collection");
                Vec::new()
            }
        }
    }

    async fn save<E: Entity>(&self, records: &[E]) {
        let encoded = match serde_json::to_string(records) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(collection = E::COLLECTION, error = %e, "Failed to encode collection, write dropped");
                return;
            }
        };
        if let Err(e) = self.backend.set(E::COLLECTION, &encoded).await {
            warn!(collection = E::COLLECTION, error = %e, "Storage unavailable, write dropped");
        }
    }
}

/// Holds the store's write lock for one read-check-write cycle.
///
/// Every mutation goes through a writer, so a check made with [`StoreWriter::list`]
/// cannot be invalidated by another task before this writer's own writes land.
pub struct StoreWriter<'a> {
    store: &'a EntityStore,
    _guard: MutexGuard<'a, ()>,
}

impl StoreWriter<'_> {
    pub fn now(&self) -> DateTime<Utc> {
        self.store.now()
    }

    pub async fn list<E: Entity>(&self) -> Vec<E> {
        self.store.load().await
    }

    pub async fn get<E: Entity>(&self, id: Uuid) -> Option<E> {
        self.store.get(id).await
    }

    pub async fn create<E: Entity>(&self, draft: E::Draft) -> E {
        let mut records = self.list::<E>().await;
        let record = E::from_draft(Uuid::new_v4(), draft, self.now());
        records.push(record.clone());
        self.save(&records).await;
        debug!(collection = E::COLLECTION, id = %record.id(), "Created record");
        record
    }

    pub async fn update<E, F>(&self, id: Uuid, change: F) -> Option<E>
    where
        E: Entity,
        F: FnOnce(&mut E) + Send,
    {
        let mut records = self.list::<E>().await;
        let record = records.iter_mut().find(|record| record.id() == id)?;
        change(record);
        record.touch(self.now());
        let updated = record.clone();
        self.save(&records).await;
        debug!(collection = E::COLLECTION, %id, "Updated record");
        Some(updated)
    }

    pub async fn delete<E: Entity>(&self, id: Uuid) -> bool {
        let mut records = self.list::<E>().await;
        let before = records.len();
        records.retain(|record| record.id() != id);
        if records.len() == before {
            return false;
        }
        self.save(&records).await;
        debug!(collection = E::COLLECTION, %id, "Deleted record");
        true
    }

    async fn save<E: Entity>(&self, records: &[E]) {
        self.store.save(records).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::domain::{NewRoom, Room, RoomType};
    use crate::memory::{InMemoryStore, YieldingStore};
    use crate::ports::{PortError, PortResult};
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};

    struct OfflineStore;

    #[async_trait]
    impl KeyValueStore for OfflineStore {
        async fn get(&self, _key: &str) -> PortResult<Option<String>> {
            Err(PortError::Unavailable("no persistence context".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> PortResult<()> {
            Err(PortError::Unavailable("no persistence context".to_string()))
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    fn room(number: &str) -> NewRoom {
        NewRoom {
            room_number: number.to_string(),
            room_type: RoomType::Double,
            has_ac: true,
            beds: 2,
            price_per_day: 3500,
            is_available: true,
            amenities: vec!["WiFi".to_string()],
        }
    }

    #[tokio::test]
    async fn created_records_are_listed_in_insertion_order() {
        let backend = Arc::new(InMemoryStore::new());
        let store = EntityStore::new(backend.clone(), Arc::new(ManualClock::new(start())));

        let first: Room = store.create(room("101")).await;
        let second: Room = store.create(room("102")).await;

        let rooms: Vec<Room> = store.list().await;
        assert_eq!(rooms, vec![first.clone(), second]);
        assert_eq!(first.created_at, start());
        assert_eq!(store.get::<Room>(first.id).await, Some(first));

        let raw = backend.get("hotel_rooms").await.unwrap().unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains("\"roomNumber\":\"101\""));
    }

    #[tokio::test]
    async fn empty_update_only_moves_updated_at() {
        let clock = Arc::new(ManualClock::new(start()));
        let store = EntityStore::new(Arc::new(InMemoryStore::new()), clock.clone());
        let original: Room = store.create(room("101")).await;

        clock.advance(Duration::hours(3));
        let updated = store.update::<Room, _>(original.id, |_| {}).await.unwrap();

        assert_eq!(updated.updated_at, start() + Duration::hours(3));
        assert_eq!(
            Room {
                updated_at: original.updated_at,
                ..updated
            },
            original
        );
    }

    #[tokio::test]
    async fn update_of_unknown_id_returns_none() {
        let store = EntityStore::new(Arc::new(InMemoryStore::new()), Arc::new(ManualClock::new(start())));
        store.create::<Room>(room("101")).await;

        let result = store
            .update::<Room, _>(Uuid::new_v4(), |r| r.price_per_day = 1)
            .await;

        assert!(result.is_none());
        assert_eq!(store.list::<Room>().await[0].price_per_day, 3500);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_leaves_collection_untouched() {
        let store = EntityStore::new(Arc::new(InMemoryStore::new()), Arc::new(ManualClock::new(start())));
        let kept: Room = store.create(room("101")).await;

        assert!(!store.delete::<Room>(Uuid::new_v4()).await);
        assert_eq!(store.list::<Room>().await, vec![kept.clone()]);

        assert!(store.delete::<Room>(kept.id).await);
        assert!(store.list::<Room>().await.is_empty());
    }

    #[tokio::test]
    async fn unavailable_backend_degrades_silently() {
        let store = EntityStore::new(Arc::new(OfflineStore), Arc::new(ManualClock::new(start())));

        let created: Room = store.create(room("101")).await;
        assert_eq!(created.room_number, "101");
        assert!(store.list::<Room>().await.is_empty());
        assert!(!store.delete::<Room>(created.id).await);
        assert!(!store.contains::<Room>().await);
    }

    #[tokio::test]
    async fn unreadable_collection_reads_as_empty() {
        let backend = Arc::new(InMemoryStore::new());
        backend.set("hotel_rooms", "{not json").await.unwrap();
        let store = EntityStore::new(backend, Arc::new(ManualClock::new(start())));

        assert!(store.list::<Room>().await.is_empty());
        assert!(store.contains::<Room>().await);
    }

    #[tokio::test]
    async fn concurrent_writes_do_not_lose_records() {
        let store = EntityStore::new(Arc::new(YieldingStore::default()), Arc::new(ManualClock::new(start())));

        let (a, b, c) = tokio::join!(
            store.create::<Room>(room("101")),
            store.create::<Room>(room("102")),
            store.create::<Room>(room("103")),
        );

        let ids: Vec<Uuid> = store.list::<Room>().await.iter().map(|room| room.id).collect();
        assert_eq!(ids.len(), 3);
        for created in [a, b, c] {
            assert!(ids.contains(&created.id));
        }
    }
}
