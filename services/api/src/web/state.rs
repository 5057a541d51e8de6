//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use frontdesk_core::ports::{Clock, KeyValueStore};
use frontdesk_core::{Analytics, BookingEngine, EntityStore, RoomDirectory, StaffRoster};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// Every service shares the same `EntityStore`, so they all see one set of collections.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: EntityStore,
    pub rooms: RoomDirectory,
    pub staff: StaffRoster,
    pub bookings: BookingEngine,
    pub analytics: Analytics,
}

impl AppState {
    pub fn new(config: Arc<Config>, backend: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let store = EntityStore::new(backend, clock);
        Self {
            config,
            rooms: RoomDirectory::new(store.clone()),
            staff: StaffRoster::new(store.clone()),
            bookings: BookingEngine::new(store.clone()),
            analytics: Analytics::new(store.clone()),
            store,
        }
    }
}
