//! services/api/src/web/protocol.rs
//!
//! Request and response payloads exchanged with the dashboard, and their
//! conversions to and from the core types. All payloads use camelCase keys.

use chrono::{DateTime, NaiveDate, Utc};
use frontdesk_core::bookings::{BookingFilter, BookingHistory, BookingRequest, BookingUpdate, PaymentFilter};
use frontdesk_core::domain::{
    Booking, DashboardStats, Employee, Guest, NewEmployee, NewRoom, PaymentStatus, RevenuePoint, Room, RoomType,
};
use frontdesk_core::employees::{EmployeePatch, Payroll};
use frontdesk_core::rooms::RoomPatch;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

//=========================================================================================
// Rooms
//=========================================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: Uuid,
    pub room_number: String,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "double")]
    pub room_type: RoomType,
    #[serde(rename = "hasAC")]
    pub has_ac: bool,
    pub beds: u32,
    pub price_per_day: u64,
    pub is_available: bool,
    pub amenities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            room_number: room.room_number,
            room_type: room.room_type,
            has_ac: room.has_ac,
            beds: room.beds,
            price_per_day: room.price_per_day,
            is_available: room.is_available,
            amenities: room.amenities,
            created_at: room.created_at,
            updated_at: room.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub room_number: String,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "suite")]
    pub room_type: RoomType,
    #[serde(rename = "hasAC", default)]
    pub has_ac: bool,
    pub beds: u32,
    pub price_per_day: u64,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub amenities: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl From<CreateRoomRequest> for NewRoom {
    fn from(request: CreateRoomRequest) -> Self {
        NewRoom {
            room_number: request.room_number,
            room_type: request.room_type,
            has_ac: request.has_ac,
            beds: request.beds,
            price_per_day: request.price_per_day,
            is_available: request.is_available,
            amenities: request.amenities,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    pub room_number: Option<String>,
    #[serde(rename = "type")]
    #[schema(value_type = Option<String>)]
    pub room_type: Option<RoomType>,
    #[serde(rename = "hasAC")]
    pub has_ac: Option<bool>,
    pub beds: Option<u32>,
    pub price_per_day: Option<u64>,
    pub is_available: Option<bool>,
    pub amenities: Option<Vec<String>>,
}

impl From<UpdateRoomRequest> for RoomPatch {
    fn from(request: UpdateRoomRequest) -> Self {
        RoomPatch {
            room_number: request.room_number,
            room_type: request.room_type,
            has_ac: request.has_ac,
            beds: request.beds,
            price_per_day: request.price_per_day,
            is_available: request.is_available,
            amenities: request.amenities,
        }
    }
}

//=========================================================================================
// Employees
//=========================================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
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

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            designation: employee.designation,
            monthly_salary: employee.monthly_salary,
            joining_date: employee.joining_date,
            contact_number: employee.contact_number,
            is_active: employee.is_active,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub designation: String,
    pub monthly_salary: u64,
    pub joining_date: NaiveDate,
    pub contact_number: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<CreateEmployeeRequest> for NewEmployee {
    fn from(request: CreateEmployeeRequest) -> Self {
        NewEmployee {
            name: request.name,
            designation: request.designation,
            monthly_salary: request.monthly_salary,
            joining_date: request.joining_date,
            contact_number: request.contact_number,
            is_active: request.is_active,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub designation: Option<String>,
    pub monthly_salary: Option<u64>,
    pub joining_date: Option<NaiveDate>,
    pub contact_number: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateEmployeeRequest> for EmployeePatch {
    fn from(request: UpdateEmployeeRequest) -> Self {
        EmployeePatch {
            name: request.name,
            designation: request.designation,
            monthly_salary: request.monthly_salary,
            joining_date: request.joining_date,
            contact_number: request.contact_number,
            is_active: request.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayrollResponse {
    pub active_staff: usize,
    pub monthly_total: u64,
    pub average_salary: u64,
}

impl From<Payroll> for PayrollResponse {
    fn from(payroll: Payroll) -> Self {
        Self {
            active_staff: payroll.active_staff,
            monthly_total: payroll.monthly_total,
            average_salary: payroll.average_salary,
        }
    }
}

//=========================================================================================
// Guests and Bookings
//=========================================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestResponse {
    pub id: Uuid,
    pub full_name: String,
    pub mobile_number: String,
    pub identity_document_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Guest> for GuestResponse {
    fn from(guest: Guest) -> Self {
        Self {
            id: guest.id,
            full_name: guest.full_name,
            mobile_number: guest.mobile_number,
            identity_document_url: guest.identity_document_url,
            created_at: guest.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub guest_id: Uuid,
    pub guest: GuestResponse,
    pub room_ids: Vec<Uuid>,
    pub rooms: Vec<RoomResponse>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub nights: i64,
    pub total_amount: u64,
    pub is_paid: bool,
    #[schema(value_type = String, example = "unpaid")]
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    /// Whether the stay covers the moment the response was produced.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingResponse {
    pub fn new(booking: Booking, is_active: bool) -> Self {
        Self {
            nights: booking.nights(),
            id: booking.id,
            guest_id: booking.guest_id,
            guest: booking.guest.into(),
            room_ids: booking.room_ids,
            rooms: booking.rooms.into_iter().map(RoomResponse::from).collect(),
            check_in_date: booking.check_in_date,
            check_out_date: booking.check_out_date,
            total_amount: booking.total_amount,
            is_paid: booking.is_paid,
            payment_status: booking.payment_status,
            notes: booking.notes,
            is_active,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub guest_name: String,
    pub mobile_number: String,
    pub room_ids: Vec<Uuid>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub notes: Option<String>,
}

impl From<CreateBookingRequest> for BookingRequest {
    fn from(request: CreateBookingRequest) -> Self {
        BookingRequest {
            guest_name: request.guest_name,
            mobile_number: request.mobile_number,
            room_ids: request.room_ids,
            check_in_date: request.check_in_date,
            check_out_date: request.check_out_date,
            notes: request.notes,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub guest_name: Option<String>,
    pub mobile_number: Option<String>,
    pub room_ids: Option<Vec<Uuid>>,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    /// An empty string clears the notes.
    pub notes: Option<String>,
    pub is_paid: Option<bool>,
}

impl From<UpdateBookingRequest> for BookingUpdate {
    fn from(request: UpdateBookingRequest) -> Self {
        BookingUpdate {
            guest_name: request.guest_name,
            mobile_number: request.mobile_number,
            room_ids: request.room_ids,
            check_in_date: request.check_in_date,
            check_out_date: request.check_out_date,
            notes: request.notes,
            is_paid: request.is_paid,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub is_paid: bool,
}

/// Query string accepted by the booking history listing.
#[derive(Debug, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Guest name, mobile number or room number fragment.
    pub search: Option<String>,
    /// `all`, `paid` or `unpaid`.
    #[param(value_type = Option<String>)]
    pub payment: Option<PaymentFilter>,
    pub created_from: Option<NaiveDate>,
    pub created_to: Option<NaiveDate>,
}

impl From<HistoryQuery> for BookingFilter {
    fn from(query: HistoryQuery) -> Self {
        BookingFilter {
            search: query.search,
            payment: query.payment.unwrap_or_default(),
            created_from: query.created_from,
            created_to: query.created_to,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingHistoryResponse {
    pub bookings: Vec<BookingResponse>,
    pub total_bookings: usize,
    pub paid_bookings: usize,
    pub total_revenue: u64,
}

impl BookingHistoryResponse {
    pub fn new(history: BookingHistory, is_active: impl Fn(&Booking) -> bool) -> Self {
        Self {
            total_bookings: history.total_bookings,
            paid_bookings: history.paid_bookings,
            total_revenue: history.total_revenue,
            bookings: history
                .bookings
                .into_iter()
                .map(|booking| {
                    let active = is_active(&booking);
                    BookingResponse::new(booking, active)
                })
                .collect(),
        }
    }
}

//=========================================================================================
// Dashboard
//=========================================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
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

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_revenue: stats.total_revenue,
            monthly_revenue: stats.monthly_revenue,
            total_bookings: stats.total_bookings,
            active_bookings: stats.active_bookings,
            occupancy_rate: stats.occupancy_rate,
            total_rooms: stats.total_rooms,
            available_rooms: stats.available_rooms,
            total_employees: stats.total_employees,
            monthly_expenses: stats.monthly_expenses,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RevenuePointResponse {
    /// Month label such as `Jan 2024`.
    pub month: String,
    pub revenue: u64,
    pub bookings: usize,
}

impl From<RevenuePoint> for RevenuePointResponse {
    fn from(point: RevenuePoint) -> Self {
        Self {
            month: point.month,
            revenue: point.revenue,
            bookings: point.bookings,
        }
    }
}
