//! crates/frontdesk_core/src/guests.rs
//!
//! Finds or creates guests by mobile number.

use tracing::info;

use crate::domain::{Guest, NewGuest};
use crate::store::{EntityStore, StoreWriter};

#[derive(Clone)]
pub struct GuestResolver {
    store: EntityStore,
}

impl GuestResolver {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    /// Returns the guest registered under `mobile_number`, creating one if needed.
    ///
    /// An existing guest keeps the name it was first registered with, even if
    /// `full_name` differs.
    pub async fn resolve_guest(&self, full_name: &str, mobile_number: &str) -> Guest {
        let writer = self.store.writer().await;
        resolve_with(&writer, full_name, mobile_number).await
    }

    pub async fn list_guests(&self) -> Vec<Guest> {
        self.store.list().await
    }
}

/// Lookup-or-create under a writer the caller already holds.
pub(crate) async fn resolve_with(writer: &StoreWriter<'_>, full_name: &str, mobile_number: &str) -> Guest {
    let existing = writer
        .list::<Guest>()
        .await
        .into_iter()
        .find(|guest| guest.mobile_number == mobile_number);
    if let Some(guest) = existing {
        return guest;
    }

    let guest: Guest = writer
        .create(NewGuest {
            full_name: full_name.to_string(),
            mobile_number: mobile_number.to_string(),
            identity_document_url: None,
        })
        .await;
    info!(guest_id = %guest.id, "Registered new guest");
    guest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::memory::{InMemoryStore, YieldingStore};
    use std::sync::Arc;

    fn resolver() -> GuestResolver {
        GuestResolver::new(EntityStore::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(SystemClock),
        ))
    }

    #[tokio::test]
    async fn same_mobile_number_resolves_to_the_first_guest() {
        let guests = resolver();

        let first = guests.resolve_guest("Anita Rao", "9876543210").await;
        let second = guests.resolve_guest("A. Rao", "9876543210").await;

        assert_eq!(first.id, second.id);
        assert_eq!(second.full_name, "Anita Rao");
        assert_eq!(guests.list_guests().await.len(), 1);
    }

    #[tokio::test]
    async fn different_numbers_create_separate_guests() {
        let guests = resolver();

        let a = guests.resolve_guest("Anita Rao", "9876543210").await;
        let b = guests.resolve_guest("Anita Rao", "9876543211").await;

        assert_ne!(a.id, b.id);
        let listed: Vec<_> = guests.list_guests().await.into_iter().map(|g| g.id).collect();
        assert_eq!(listed, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn simultaneous_lookups_register_one_guest() {
        let guests = GuestResolver::new(EntityStore::new(
            Arc::new(YieldingStore::default()),
            Arc::new(SystemClock),
        ));

        let (a, b) = tokio::join!(
            guests.resolve_guest("Anita Rao", "9876543210"),
            guests.resolve_guest("Anita R.", "9876543210"),
        );

        assert_eq!(a.id, b.id);
        assert_eq!(guests.list_guests().await.len(), 1);
    }
}
