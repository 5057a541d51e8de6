//! crates/frontdesk_core/src/rooms.rs
//!
//! Room inventory management.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::domain::{Booking, NewRoom, Room, RoomType};
use crate::error::{require_text, ServiceError, ServiceResult, ValidationError};
use crate::store::{EntityStore, StoreWriter};

/// A partial edit of a room. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPatch {
    pub room_number: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,
    #[serde(rename = "hasAC")]
    pub has_ac: Option<bool>,
    pub beds: Option<u32>,
    pub price_per_day: Option<u64>,
    pub is_available: Option<bool>,
    pub amenities: Option<Vec<String>>,
}

fn validate(room: NewRoom) -> Result<NewRoom, ValidationError> {
    let room_number = require_text("roomNumber", &room.room_number, "Room number is required")?;
    if room.beds < 1 {
        return Err(ValidationError::new("beds", "At least 1 bed required"));
    }
    if room.price_per_day == 0 {
        return Err(ValidationError::new("pricePerDay", "Price must be greater than 0"));
    }
    let amenities = room
        .amenities
        .iter()
        .map(|label| label.trim())
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect();
    Ok(NewRoom {
        room_number,
        amenities,
        ..room
    })
}

#[derive(Clone)]
pub struct RoomDirectory {
    store: EntityStore,
}

impl RoomDirectory {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    pub async fn list_rooms(&self) -> Vec<Room> {
        self.store.list().await
    }

    pub async fn get_room(&self, id: Uuid) -> Option<Room> {
        self.store.get(id).await
    }

    pub async fn create_room(&self, room: NewRoom) -> ServiceResult<Room> {
        let room = validate(room)?;
        let writer = self.store.writer().await;
        ensure_number_free(&writer, &room.room_number, None).await?;
        let room: Room = writer.create(room).await;
        info!(room_id = %room.id, room_number = %room.room_number, "Created room");
        Ok(room)
    }

    pub async fn update_room(&self, id: Uuid, patch: RoomPatch) -> ServiceResult<Option<Room>> {
        let writer = self.store.writer().await;
        let Some(current) = writer.get::<Room>(id).await else {
            return Ok(None);
        };

        let merged = validate(NewRoom {
            room_number: patch.room_number.unwrap_or(current.room_number),
            room_type: patch.room_type.unwrap_or(current.room_type),
            has_ac: patch.has_ac.unwrap_or(current.has_ac),
            beds: patch.beds.unwrap_or(current.beds),
            price_per_day: patch.price_per_day.unwrap_or(current.price_per_day),
            is_available: patch.is_available.unwrap_or(current.is_available),
            amenities: patch.amenities.unwrap_or(current.amenities),
        })?;
        ensure_number_free(&writer, &merged.room_number, Some(id)).await?;

        let updated = writer
            .update::<Room, _>(id, move |room| {
                room.room_number = merged.room_number;
                room.room_type = merged.room_type;
                room.has_ac = merged.has_ac;
                room.beds = merged.beds;
                room.price_per_day = merged.price_per_day;
                room.is_available = merged.is_available;
                room.amenities = merged.amenities;
            })
            .await;
        if updated.is_some() {
            info!(room_id = %id, "Updated room");
        }
        Ok(updated)
    }

    pub async fn set_availability(&self, id: Uuid, is_available: bool) -> Option<Room> {
        self.store
            .update::<Room, _>(id, |room| room.is_available = is_available)
            .await
    }

    /// Deletes a room unless a booking that has not checked out yet holds it.
    ///
    /// Past bookings keep showing the room through their stored snapshot.
    pub async fn delete_room(&self, id: Uuid) -> ServiceResult<bool> {
        let writer = self.store.writer().await;
        let today = writer.now().date_naive();
        let holder = writer
            .list::<Booking>()
            .await
            .into_iter()
            .find(|booking| booking.room_ids.contains(&id) && booking.check_out_date >= today);
        if let Some(booking) = holder {
            return Err(ServiceError::Conflict(format!(
                "Room is held by a booking from {} to {}",
                booking.check_in_date, booking.check_out_date
            )));
        }

        let deleted = writer.delete::<Room>(id).await;
        if deleted {
            info!(room_id = %id, "Deleted room");
        }
        Ok(deleted)
    }
}

async fn ensure_number_free(writer: &StoreWriter<'_>, room_number: &str, ignore: Option<Uuid>) -> ServiceResult<()> {
    let taken = writer
        .list::<Room>()
        .await
        .iter()
        .any(|room| room.room_number == room_number && Some(room.id) != ignore);
    if taken {
        return Err(ServiceError::Conflict(format!("Room {room_number} already exists")));
    }
    Ok(())
}
