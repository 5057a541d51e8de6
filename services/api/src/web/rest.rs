//! services/api/src/web/rest.rs
//!
//! The master definition for the OpenAPI specification and the shared
//! mapping from service errors to HTTP responses.

use crate::web::{bookings, dashboard, employees, protocol::*, rooms};
use axum::http::StatusCode;
use frontdesk_core::ServiceError;
use tracing::warn;
use utoipa::OpenApi;
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        rooms::list_rooms_handler,
        rooms::create_room_handler,
        rooms::get_room_handler,
        rooms::update_room_handler,
        rooms::delete_room_handler,
        employees::list_employees_handler,
        employees::create_employee_handler,
        employees::get_employee_handler,
        employees::update_employee_handler,
        employees::delete_employee_handler,
        employees::toggle_employee_handler,
        employees::payroll_handler,
        bookings::list_guests_handler,
        bookings::list_bookings_handler,
        bookings::create_booking_handler,
        bookings::get_booking_handler,
        bookings::update_booking_handler,
        bookings::delete_booking_handler,
        bookings::set_payment_handler,
        bookings::bill_handler,
        dashboard::stats_handler,
        dashboard::revenue_handler,
    ),
    components(
        schemas(
            RoomResponse,
            CreateRoomRequest,
            UpdateRoomRequest,
            EmployeeResponse,
            CreateEmployeeRequest,
            UpdateEmployeeRequest,
            PayrollResponse,
            GuestResponse,
            BookingResponse,
            CreateBookingRequest,
            UpdateBookingRequest,
            PaymentRequest,
            BookingHistoryResponse,
            DashboardStatsResponse,
            RevenuePointResponse,
        )
    ),
    tags(
        (name = "Hotel Front Desk API", description = "Rooms, staff, bookings and dashboard figures for the front desk.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Error Mapping
//=========================================================================================

/// The error half of every handler's result: a status and a plain-text message.
pub type HandlerError = (StatusCode, String);

/// Maps a rejected service call to its HTTP status.
pub fn reject(err: ServiceError) -> HandlerError {
    warn!("Request rejected: {}", err);
    match err {
        ServiceError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        ServiceError::Conflict(message) => (StatusCode::CONFLICT, message),
    }
}

pub fn not_found(what: &str, id: Uuid) -> HandlerError {
    (StatusCode::NOT_FOUND, format!("{} {} not found", what, id))
}
