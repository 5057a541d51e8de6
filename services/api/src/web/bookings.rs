//! services/api/src/web/bookings.rs
//!
//! Handlers for guests, bookings and bills.

use crate::web::protocol::{
    BookingHistoryResponse, BookingResponse, CreateBookingRequest, GuestResponse, HistoryQuery, PaymentRequest,
    UpdateBookingRequest,
};
use crate::web::rest::{not_found, reject, HandlerError};
use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use frontdesk_core::{Bill, Booking};
use std::sync::Arc;
use uuid::Uuid;

fn respond(app_state: &AppState, booking: Booking) -> BookingResponse {
    let active = app_state.bookings.is_active(&booking, app_state.store.now());
    BookingResponse::new(booking, active)
}

#[utoipa::path(
    get,
    path = "/guests",
    responses((status = 200, description = "All guests", body = [GuestResponse]))
)]
pub async fn list_guests_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<GuestResponse>> {
    let guests = app_state.bookings.guests().list_guests().await;
    Json(guests.into_iter().map(GuestResponse::from).collect())
}

/// Booking history, newest first, with optional filters.
#[utoipa::path(
    get,
    path = "/bookings",
    params(HistoryQuery),
    responses((status = 200, description = "Matching bookings and their totals", body = BookingHistoryResponse))
)]
pub async fn list_bookings_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Json<BookingHistoryResponse> {
    let history = app_state.bookings.history(&query.into()).await;
    let now = app_state.store.now();
    Json(BookingHistoryResponse::new(history, |booking| {
        app_state.bookings.is_active(booking, now)
    }))
}

/// Book one or more rooms for a guest.
///
/// The guest is looked up by mobile number and created on first use. The total
/// is computed from the rooms' nightly rates.
#[utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 409, description = "A selected room is already booked for those dates"),
        (status = 422, description = "Invalid booking details")
    )
)]
pub async fn create_booking_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), HandlerError> {
    let booking = app_state
        .bookings
        .create_booking(payload.into())
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(respond(&app_state, booking))))
}

#[utoipa::path(
    get,
    path = "/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "The booking", body = BookingResponse),
        (status = 404, description = "No such booking")
    )
)]
pub async fn get_booking_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, HandlerError> {
    let booking = app_state
        .bookings
        .get_booking(id)
        .await
        .ok_or_else(|| not_found("Booking", id))?;
    Ok(Json(respond(&app_state, booking)))
}

/// Edit a booking. Changing rooms or dates recomputes the total.
///
/// Guests are identified by mobile number: a new number moves the booking to
/// that guest, and a new name without a new number is rejected.
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking id")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Updated booking", body = BookingResponse),
        (status = 404, description = "No such booking"),
        (status = 409, description = "A selected room is already booked for those dates"),
        (status = 422, description = "Invalid booking details")
    )
)]
pub async fn update_booking_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingRequest>,
) -> Result<Json<BookingResponse>, HandlerError> {
    let booking = app_state
        .bookings
        .update_booking(id, payload.into())
        .await
        .map_err(reject)?
        .ok_or_else(|| not_found("Booking", id))?;
    Ok(Json(respond(&app_state, booking)))
}

#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 404, description = "No such booking")
    )
)]
pub async fn delete_booking_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HandlerError> {
    if app_state.bookings.delete_booking(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Booking", id))
    }
}

/// Mark a booking paid or unpaid.
#[utoipa::path(
    put,
    path = "/bookings/{id}/payment",
    params(("id" = Uuid, Path, description = "Booking id")),
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Booking with the new payment status", body = BookingResponse),
        (status = 404, description = "No such booking")
    )
)]
pub async fn set_payment_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentRequest>,
) -> Result<Json<BookingResponse>, HandlerError> {
    let booking = app_state
        .bookings
        .set_payment(id, payload.is_paid)
        .await
        .ok_or_else(|| not_found("Booking", id))?;
    Ok(Json(respond(&app_state, booking)))
}

/// Printable bill for a booking, as plain text.
#[utoipa::path(
    get,
    path = "/bookings/{id}/bill",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "The bill", body = String, content_type = "text/plain"),
        (status = 404, description = "No such booking")
    )
)]
pub async fn bill_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HandlerError> {
    let booking = app_state
        .bookings
        .get_booking(id)
        .await
        .ok_or_else(|| not_found("Booking", id))?;
    let bill = Bill::for_booking(&booking, app_state.store.now().date_naive());
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        bill.to_string(),
    ))
}
