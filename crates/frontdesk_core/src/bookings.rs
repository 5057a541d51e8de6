//! crates/frontdesk_core/src/bookings.rs
//!
//! The booking engine: validates stays, prices them, keeps guest and room
//! snapshots current, and answers which bookings are active at an instant.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::domain::{locked_rates, Booking, BookingDraft, Guest, PaymentStatus, Room};
use crate::error::{require_phone_number, require_text, ServiceError, ServiceResult, ValidationError};
use crate::guests::{resolve_with, GuestResolver};
use crate::store::{EntityStore, StoreWriter};

//=========================================================================================
// Stay arithmetic
//=========================================================================================

/// Whole calendar days between check-in and check-out.
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Sum of every room's nightly rate times the number of nights, or `None`
/// when the amount does not fit in a `u64`.
pub fn stay_total(rooms: &[Room], nights: i64) -> Option<u64> {
    let nights = u64::try_from(nights).ok()?;
    rooms
        .iter()
        .try_fold(0u64, |sum, room| sum.checked_add(room.price_per_day))?
        .checked_mul(nights)
}

fn price_stay(rooms: &[Room], check_in: NaiveDate, check_out: NaiveDate) -> Result<u64, ValidationError> {
    stay_total(rooms, nights(check_in, check_out)).ok_or_else(|| {
        ValidationError::new("roomIds", "Total for the selected rooms and dates is too large")
    })
}

/// A booking is active from midnight of check-in through midnight of
/// check-out, both instants included.
pub fn is_active(booking: &Booking, as_of: DateTime<Utc>) -> bool {
    let starts = booking.check_in_date.and_time(NaiveTime::MIN).and_utc();
    let ends = booking.check_out_date.and_time(NaiveTime::MIN).and_utc();
    starts <= as_of && as_of <= ends
}

// Check-out day is free for the next arrival.
fn stays_overlap(a: (NaiveDate, NaiveDate), b: (NaiveDate, NaiveDate)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

fn validate_stay(check_in: NaiveDate, check_out: NaiveDate) -> Result<(), ValidationError> {
    if check_out <= check_in {
        return Err(ValidationError::new(
            "checkOutDate",
            "Check-out date must be after check-in date",
        ));
    }
    Ok(())
}

fn clean_notes(notes: Option<&str>) -> Option<String> {
    notes
        .map(str::trim)
        .filter(|notes| !notes.is_empty())
        .map(str::to_string)
}

//=========================================================================================
// Requests
//=========================================================================================

/// Everything the front desk enters to book a stay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub guest_name: String,
    pub mobile_number: String,
    pub room_ids: Vec<Uuid>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A partial edit of a booking. Absent fields keep their current value.
/// An empty `notes` string clears the notes.
///
/// Guests are identified by mobile number, so the guest fields move the
/// booking to the guest registered under the resulting number. A new name
/// with the booking's current number is rejected rather than renaming the
/// guest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    pub guest_name: Option<String>,
    pub mobile_number: Option<String>,
    pub room_ids: Option<Vec<Uuid>>,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub is_paid: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFilter {
    #[default]
    All,
    Paid,
    Unpaid,
}

/// Criteria for the booking history view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
    /// Matched against guest name (case-insensitive), mobile number and room numbers.
    pub search: Option<String>,
    #[serde(default)]
    pub payment: PaymentFilter,
    /// Inclusive bounds on the day the booking was created.
    pub created_from: Option<NaiveDate>,
    pub created_to: Option<NaiveDate>,
}

impl BookingFilter {
    pub fn matches(&self, booking: &Booking) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let lowered = term.to_lowercase();
                booking.guest.full_name.to_lowercase().contains(&lowered)
                    || booking.guest.mobile_number.contains(term)
                    || booking.rooms.iter().any(|room| room.room_number.contains(term))
            }
        };

        let matches_payment = match self.payment {
            PaymentFilter::All => true,
            PaymentFilter::Paid => booking.is_paid,
            PaymentFilter::Unpaid => !booking.is_paid,
        };

        let created_on = booking.created_at.date_naive();
        let matches_dates = self.created_from.map_or(true, |from| created_on >= from)
            && self.created_to.map_or(true, |to| created_on <= to);

        matches_search && matches_payment && matches_dates
    }
}

/// Filtered bookings, newest first, with totals over the filtered set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingHistory {
    pub bookings: Vec<Booking>,
    pub total_bookings: usize,
    pub paid_bookings: usize,
    pub total_revenue: u64,
}

//=========================================================================================
// Engine
//=========================================================================================

#[derive(Clone)]
pub struct BookingEngine {
    store: EntityStore,
    guests: GuestResolver,
}

impl BookingEngine {
    pub fn new(store: EntityStore) -> Self {
        Self {
            guests: GuestResolver::new(store.clone()),
            store,
        }
    }

    pub fn guests(&self) -> &GuestResolver {
        &self.guests
    }

    pub fn is_active(&self, booking: &Booking, as_of: DateTime<Utc>) -> bool {
        is_active(booking, as_of)
    }

    /// Validates and stores a new, unpaid booking.
    ///
    /// Nothing is written, not even the guest, unless every check passes. The
    /// checks and the write happen under one writer, so two requests for the
    /// same room and dates cannot both succeed.
    pub async fn create_booking(&self, request: BookingRequest) -> ServiceResult<Booking> {
        let guest_name = require_text("guestName", &request.guest_name, "Guest name is required")?;
        let mobile_number = require_phone_number("mobileNumber", &request.mobile_number)?;
        validate_stay(request.check_in_date, request.check_out_date)?;

        let writer = self.store.writer().await;
        let rooms = select_rooms(&writer, &request.room_ids, &[]).await?;
        let total_amount = price_stay(&rooms, request.check_in_date, request.check_out_date)?;
        ensure_rooms_free(&writer, &rooms, request.check_in_date, request.check_out_date, None).await?;

        let guest = resolve_with(&writer, &guest_name, &mobile_number).await;
        let booking: Booking = writer
            .create(BookingDraft {
                guest,
                rooms,
                check_in_date: request.check_in_date,
                check_out_date: request.check_out_date,
                total_amount,
                notes: clean_notes(request.notes.as_deref()),
            })
            .await;

        info!(
            booking_id = %booking.id,
            rooms = booking.room_ids.len(),
            total = booking.total_amount,
            "Created booking"
        );
        Ok(booking)
    }

    /// Applies an edit. The total is recomputed whenever rooms or dates change.
    ///
    /// Returns `Ok(None)` when the booking does not exist.
    pub async fn update_booking(&self, id: Uuid, update: BookingUpdate) -> ServiceResult<Option<Booking>> {
        let writer = self.store.writer().await;
        let Some(stored) = writer.get::<Booking>(id).await else {
            return Ok(None);
        };
        let current = self.resolve(stored).await;

        let check_in = update.check_in_date.unwrap_or(current.check_in_date);
        let check_out = update.check_out_date.unwrap_or(current.check_out_date);
        validate_stay(check_in, check_out)?;

        let guest_change = match (&update.guest_name, &update.mobile_number) {
            (None, None) => None,
            (name, mobile) => {
                let name = require_text(
                    "guestName",
                    name.as_deref().unwrap_or(&current.guest.full_name),
                    "Guest name is required",
                )?;
                let mobile = require_phone_number(
                    "mobileNumber",
                    mobile.as_deref().unwrap_or(&current.guest.mobile_number),
                )?;
                if mobile == current.guest.mobile_number && name != current.guest.full_name {
                    return Err(ValidationError::new(
                        "guestName",
                        "A guest is identified by mobile number; change the number to book for someone else",
                    )
                    .into());
                }
                Some((name, mobile))
            }
        };

        let rooms = match &update.room_ids {
            Some(room_ids) => select_rooms(&writer, room_ids, &current.room_ids).await?,
            None => current.rooms.clone(),
        };
        let dates_changed = check_in != current.check_in_date || check_out != current.check_out_date;
        let reprice = update.room_ids.is_some() || dates_changed;
        let total_amount = if reprice {
            let total = price_stay(&rooms, check_in, check_out)?;
            ensure_rooms_free(&writer, &rooms, check_in, check_out, Some(id)).await?;
            total
        } else {
            current.total_amount
        };

        let guest = match guest_change {
            Some((name, mobile)) => Some(resolve_with(&writer, &name, &mobile).await),
            None => None,
        };

        let updated = writer
            .update::<Booking, _>(id, move |booking| {
                if let Some(guest) = guest {
                    booking.guest_id = guest.id;
                    booking.guest = guest;
                }
                if reprice {
                    booking.room_ids = rooms.iter().map(|room| room.id).collect();
                    booking.room_rates = locked_rates(&rooms);
                    booking.rooms = rooms;
                    booking.check_in_date = check_in;
                    booking.check_out_date = check_out;
                    booking.total_amount = total_amount;
                }
                if let Some(notes) = update.notes {
                    booking.notes = clean_notes(Some(&notes));
                }
                if let Some(is_paid) = update.is_paid {
                    booking.is_paid = is_paid;
                    booking.payment_status = PaymentStatus::from_paid(is_paid);
                }
            })
            .await;
        drop(writer);

        match updated {
            Some(booking) => {
                info!(booking_id = %id, repriced = reprice, "Updated booking");
                Ok(Some(self.resolve(booking).await))
            }
            None => Ok(None),
        }
    }

    /// Sets the paid flag and the matching payment status.
    pub async fn set_payment(&self, id: Uuid, is_paid: bool) -> Option<Booking> {
        let booking = self
            .store
            .update::<Booking, _>(id, |booking| {
                booking.is_paid = is_paid;
                booking.payment_status = PaymentStatus::from_paid(is_paid);
            })
            .await?;
        info!(booking_id = %id, is_paid, "Recorded payment status");
        Some(self.resolve(booking).await)
    }

    pub async fn toggle_payment(&self, id: Uuid) -> Option<Booking> {
        let booking = self
            .store
            .update::<Booking, _>(id, |booking| {
                booking.is_paid = !booking.is_paid;
                booking.payment_status = PaymentStatus::from_paid(booking.is_paid);
            })
            .await?;
        info!(booking_id = %id, is_paid = booking.is_paid, "Recorded payment status");
        Some(self.resolve(booking).await)
    }

    pub async fn delete_booking(&self, id: Uuid) -> bool {
        let deleted = self.store.delete::<Booking>(id).await;
        if deleted {
            info!(booking_id = %id, "Deleted booking");
        }
        deleted
    }

    pub async fn get_booking(&self, id: Uuid) -> Option<Booking> {
        let booking = self.store.get::<Booking>(id).await?;
        Some(self.resolve(booking).await)
    }

    /// Every booking in creation order, with current guest and room records.
    pub async fn list_bookings(&self) -> Vec<Booking> {
        let guests = self.store.list::<Guest>().await;
        let rooms = self.store.list::<Room>().await;
        self.store
            .list::<Booking>()
            .await
            .into_iter()
            .map(|booking| join(booking, &guests, &rooms))
            .collect()
    }

    pub async fn history(&self, filter: &BookingFilter) -> BookingHistory {
        let mut bookings: Vec<Booking> = self
            .list_bookings()
            .await
            .into_iter()
            .filter(|booking| filter.matches(booking))
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let paid = bookings.iter().filter(|booking| booking.is_paid);
        BookingHistory {
            total_bookings: bookings.len(),
            paid_bookings: paid.clone().count(),
            total_revenue: paid.fold(0, |sum, booking| sum.saturating_add(booking.total_amount)),
            bookings,
        }
    }

    async fn resolve(&self, booking: Booking) -> Booking {
        let guests = self.store.list::<Guest>().await;
        let rooms = self.store.list::<Room>().await;
        join(booking, &guests, &rooms)
    }
}

/// Looks up the selected rooms in order, ignoring repeated ids.
///
/// Rooms marked unavailable are refused unless listed in `already_held`.
async fn select_rooms(
    writer: &StoreWriter<'_>,
    room_ids: &[Uuid],
    already_held: &[Uuid],
) -> Result<Vec<Room>, ValidationError> {
    if room_ids.is_empty() {
        return Err(ValidationError::new("roomIds", "At least one room must be selected"));
    }

    let inventory = writer.list::<Room>().await;
    let mut selected: Vec<Room> = Vec::with_capacity(room_ids.len());
    for id in room_ids {
        if selected.iter().any(|room| room.id == *id) {
            continue;
        }
        let room = inventory
            .iter()
            .find(|room| room.id == *id)
            .ok_or_else(|| ValidationError::new("roomIds", format!("Room {id} does not exist")))?;
        if !room.is_available && !already_held.contains(id) {
            return Err(ValidationError::new(
                "roomIds",
                format!("Room {} is not available for booking", room.room_number),
            ));
        }
        selected.push(room.clone());
    }
    Ok(selected)
}

async fn ensure_rooms_free(
    writer: &StoreWriter<'_>,
    rooms: &[Room],
    check_in: NaiveDate,
    check_out: NaiveDate,
    ignore: Option<Uuid>,
) -> ServiceResult<()> {
    let bookings = writer.list::<Booking>().await;
    for other in bookings.iter().filter(|other| Some(other.id) != ignore) {
        if !stays_overlap((check_in, check_out), (other.check_in_date, other.check_out_date)) {
            continue;
        }
        if let Some(room) = rooms.iter().find(|room| other.room_ids.contains(&room.id)) {
            return Err(ServiceError::Conflict(format!(
                "Room {} is already booked from {} to {}",
                room.room_number, other.check_in_date, other.check_out_date
            )));
        }
    }
    Ok(())
}

/// Replaces the stored snapshots with the current guest and room records.
/// A snapshot is kept only when its record has been deleted.
fn join(mut booking: Booking, guests: &[Guest], rooms: &[Room]) -> Booking {
    if let Some(guest) = guests.iter().find(|guest| guest.id == booking.guest_id) {
        booking.guest = guest.clone();
    }
    let snapshots = std::mem::take(&mut booking.rooms);
    booking.rooms = booking
        .room_ids
        .iter()
        .filter_map(|id| {
            rooms
                .iter()
                .find(|room| room.id == *id)
                .or_else(|| snapshots.iter().find(|room| room.id == *id))
                .cloned()
        })
        .collect();
    booking
}
