pub mod bookings;
pub mod dashboard;
pub mod employees;
pub mod protocol;
pub mod rest;
pub mod rooms;
pub mod state;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::web::state::AppState;

/// Builds the API routes. CORS and the Swagger UI are layered on by the binary.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/rooms",
            get(rooms::list_rooms_handler).post(rooms::create_room_handler),
        )
        .route(
            "/rooms/{id}",
            get(rooms::get_room_handler)
                .patch(rooms::update_room_handler)
                .delete(rooms::delete_room_handler),
        )
        .route(
            "/employees",
            get(employees::list_employees_handler).post(employees::create_employee_handler),
        )
        .route("/employees/payroll", get(employees::payroll_handler))
        .route(
            "/employees/{id}",
            get(employees::get_employee_handler)
                .patch(employees::update_employee_handler)
                .delete(employees::delete_employee_handler),
        )
        .route(
            "/employees/{id}/toggle-active",
            post(employees::toggle_employee_handler),
        )
        .route("/guests", get(bookings::list_guests_handler))
        .route(
            "/bookings",
            get(bookings::list_bookings_handler).post(bookings::create_booking_handler),
        )
        .route(
            "/bookings/{id}",
            get(bookings::get_booking_handler)
                .patch(bookings::update_booking_handler)
                .delete(bookings::delete_booking_handler),
        )
        .route("/bookings/{id}/payment", put(bookings::set_payment_handler))
        .route("/bookings/{id}/bill", get(bookings::bill_handler))
        .route("/dashboard/stats", get(dashboard::stats_handler))
        .route("/dashboard/revenue", get(dashboard::revenue_handler))
        .with_state(app_state)
}
