//! crates/frontdesk_core/src/domain.rs
//!
//! Defines the core data structures for the front desk.
//! Field names serialize in camelCase so stored collections stay readable by
//! the browser dashboard that shares the same records.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Entity;

//=========================================================================================
// Rooms
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Single,
    Double,
    Suite,
    Deluxe,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "single",
            RoomType::Double => "double",
            RoomType::Suite => "suite",
            RoomType::Deluxe => "deluxe",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable room. `room_number` is the display key shown to staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(rename = "hasAC")]
    pub has_ac: bool,
    pub beds: u32,
    /// Price per night in whole currency units.
    pub price_per_day: u64,
    pub is_available: bool,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The fields supplied when a room is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(rename = "hasAC")]
    pub has_ac: bool,
    pub beds: u32,
    pub price_per_day: u64,
    pub is_available: bool,
    #[serde(default)]
    pub amenities: Vec<String>,
}

//=========================================================================================
// Employees
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub designation: String,
    pub monthly_salary: u64,
    pub joining_date: NaiveDate,
    pub contact_number: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub designation: String,
    pub monthly_salary: u64,
    pub joining_date: NaiveDate,
    pub contact_number: String,
    pub is_active: bool,
}

//=========================================================================================
// Guests
//=========================================================================================

/// A guest, deduplicated by mobile number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: Uuid,
    pub full_name: String,
    pub mobile_number: String,
    /// Link to a scanned identity document, if one was collected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_document_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewGuest {
    pub full_name: String,
    pub mobile_number: String,
    pub identity_document_url: Option<String>,
}

//=========================================================================================
// Bookings
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    /// Defined for compatibility with stored records; no operation produces it.
    Partial,
}

impl PaymentStatus {
    pub fn from_paid(is_paid: bool) -> Self {
        if is_paid {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Unpaid
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::Partial => "Partially paid",
        }
    }
}

/// A stay for one guest across one or more rooms.
///
/// `guest` and `rooms` are snapshots. The booking engine replaces them with
/// the current records on every read; the persisted copies only matter when
/// the referenced guest or room has since been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub guest_id: Uuid,
    pub guest: Guest,
    pub room_ids: Vec<Uuid>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    pub check_in_date: NaiveDate,
    /// Exclusive: the guest leaves on this date.
    pub check_out_date: NaiveDate,
    pub total_amount: u64,
    /// Nightly rate of each room at the time the booking was last priced.
    /// `total_amount` is derived from these, not from the rooms' current rates.
    #[serde(default)]
    pub room_rates: BTreeMap<Uuid, u64>,
    pub is_paid: bool,
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Number of nights between check-in and check-out.
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }

    /// The rate this booking was priced at for `room`, or the room's current
    /// rate for records stored before rates were kept.
    pub fn rate_for(&self, room: &Room) -> u64 {
        self.room_rates.get(&room.id).copied().unwrap_or(room.price_per_day)
    }
}

pub(crate) fn locked_rates(rooms: &[Room]) -> BTreeMap<Uuid, u64> {
    rooms.iter().map(|room| (room.id, room.price_per_day)).collect()
}

/// A fully computed booking that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub guest: Guest,
    pub rooms: Vec<Room>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_amount: u64,
    pub notes: Option<String>,
}

//=========================================================================================
// Analytics
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_revenue: u64,
    pub monthly_revenue: u64,
    pub total_bookings: usize,
    pub active_bookings: usize,
    pub occupancy_rate: f64,
    pub total_rooms: usize,
    pub available_rooms: usize,
    pub total_employees: usize,
    pub monthly_expenses: u64,
}

/// Revenue and booking count for one calendar month, e.g. `"Jan 2024"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub month: String,
    pub revenue: u64,
    pub bookings: usize,
}

//=========================================================================================
// Entity Store bindings
//=========================================================================================

impl Entity for Room {
    const COLLECTION: &'static str = "hotel_rooms";
    type Draft = NewRoom;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, draft: NewRoom, now: DateTime<Utc>) -> Self {
        Room {
            id,
            room_number: draft.room_number,
            room_type: draft.room_type,
            has_ac: draft.has_ac,
            beds: draft.beds,
            price_per_day: draft.price_per_day,
            is_available: draft.is_available,
            amenities: draft.amenities,
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

impl Entity for Employee {
    const COLLECTION: &'static str = "hotel_employees";
    type Draft = NewEmployee;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, draft: NewEmployee, now: DateTime<Utc>) -> Self {
        Employee {
            id,
            name: draft.name,
            designation: draft.designation,
            monthly_salary: draft.monthly_salary,
            joining_date: draft.joining_date,
            contact_number: draft.contact_number,
            is_active: draft.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

impl Entity for Guest {
    const COLLECTION: &'static str = "hotel_guests";
    type Draft = NewGuest;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, draft: NewGuest, now: DateTime<Utc>) -> Self {
        Guest {
            id,
            full_name: draft.full_name,
            mobile_number: draft.mobile_number,
            identity_document_url: draft.identity_document_url,
            created_at: now,
        }
    }

    // Guests carry no update timestamp.
    fn touch(&mut self, _now: DateTime<Utc>) {}
}

impl Entity for Booking {
    const COLLECTION: &'static str = "hotel_bookings";
    type Draft = BookingDraft;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(id: Uuid, draft: BookingDraft, now: DateTime<Utc>) -> Self {
        let room_rates = locked_rates(&draft.rooms);
        Booking {
            id,
            guest_id: draft.guest.id,
            guest: draft.guest,
            room_ids: draft.rooms.iter().map(|room| room.id).collect(),
            rooms: draft.rooms,
            check_in_date: draft.check_in_date,
            check_out_date: draft.check_out_date,
            total_amount: draft.total_amount,
            room_rates,
            is_paid: false,
            payment_status: PaymentStatus::Unpaid,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
