//! End-to-end checks of the REST handlers against an in-memory store.

use api_lib::config::Config;
use api_lib::web::bookings::{
    bill_handler, create_booking_handler, delete_booking_handler, get_booking_handler, list_bookings_handler,
    set_payment_handler, update_booking_handler,
};
use api_lib::web::dashboard::{revenue_handler, stats_handler};
use api_lib::web::employees::{create_employee_handler, payroll_handler, toggle_employee_handler};
use api_lib::web::protocol::{
    CreateBookingRequest, CreateEmployeeRequest, CreateRoomRequest, HistoryQuery, PaymentRequest, RoomResponse,
    UpdateBookingRequest,
};
use api_lib::web::rooms::{create_room_handler, delete_room_handler};
use api_lib::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, TimeZone, Utc};
use frontdesk_core::{InMemoryStore, ManualClock, RoomType};
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

fn app() -> Arc<AppState> {
    let config = Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        database_url: None,
        log_level: Level::INFO,
        cors_origin: "http://localhost:3000".to_string(),
        seed_sample_data: false,
    };
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap());
    Arc::new(AppState::new(
        Arc::new(config),
        Arc::new(InMemoryStore::new()),
        Arc::new(clock),
    ))
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

async fn add_room(state: &Arc<AppState>, number: &str, price: u64) -> RoomResponse {
    let (status, Json(room)) = create_room_handler(
        State(state.clone()),
        Json(CreateRoomRequest {
            room_number: number.to_string(),
            room_type: RoomType::Double,
            has_ac: true,
            beds: 2,
            price_per_day: price,
            is_available: true,
            amenities: vec!["WiFi".to_string()],
        }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    room
}

fn booking_for(rooms: &[&RoomResponse], check_in: u32, check_out: u32) -> CreateBookingRequest {
    CreateBookingRequest {
        guest_name: "Anita Rao".to_string(),
        mobile_number: "9876543210".to_string(),
        room_ids: rooms.iter().map(|room| room.id).collect(),
        check_in_date: date(check_in),
        check_out_date: date(check_out),
        notes: Some("Airport pickup".to_string()),
    }
}

#[tokio::test]
async fn booking_lifecycle_over_http_handlers() {
    let state = app();
    let single = add_room(&state, "101", 2000).await;
    let double = add_room(&state, "102", 3500).await;

    let (status, Json(created)) = create_booking_handler(
        State(state.clone()),
        Json(booking_for(&[&single, &double], 1, 3)),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.total_amount, 11_000);
    assert_eq!(created.nights, 2);
    assert!(created.is_active);
    assert_eq!(created.guest.full_name, "Anita Rao");

    let Json(paid) = set_payment_handler(
        State(state.clone()),
        Path(created.id),
        Json(PaymentRequest { is_paid: true }),
    )
    .await
    .unwrap();
    assert!(paid.is_paid);

    let Json(extended) = update_booking_handler(
        State(state.clone()),
        Path(created.id),
        Json(UpdateBookingRequest {
            check_out_date: Some(date(4)),
            ..UpdateBookingRequest::default()
        }),
    )
    .await
    .unwrap();
    assert_eq!(extended.total_amount, 16_500);
    assert!(extended.is_paid);

    let Json(stats) = stats_handler(State(state.clone())).await;
    assert_eq!(stats.active_bookings, 1);
    assert_eq!(stats.occupancy_rate, 100.0);
    assert_eq!(stats.total_revenue, 16_500);

    let Json(series) = revenue_handler(State(state.clone())).await;
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].month, "Jan 2024");

    let Json(history) = list_bookings_handler(
        State(state.clone()),
        Query(HistoryQuery {
            search: Some("102".to_string()),
            ..HistoryQuery::default()
        }),
    )
    .await;
    assert_eq!(history.total_bookings, 1);
    assert_eq!(history.paid_bookings, 1);

    let status = delete_booking_handler(State(state.clone()), Path(created.id))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = get_booking_handler(State(state.clone()), Path(created.id))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rejected_requests_map_to_client_errors() {
    let state = app();
    let room = add_room(&state, "101", 2000).await;

    let (status, message) = create_booking_handler(State(state.clone()), Json(booking_for(&[&room], 3, 3)))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(message.contains("checkOutDate"));

    let (status, _) = create_booking_handler(State(state.clone()), Json(booking_for(&[], 1, 3)))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, Json(booked)) = create_booking_handler(State(state.clone()), Json(booking_for(&[&room], 1, 3)))
        .await
        .unwrap();
    let (status, message) = update_booking_handler(
        State(state.clone()),
        Path(booked.id),
        Json(UpdateBookingRequest {
            guest_name: Some("Anita Menon".to_string()),
            ..UpdateBookingRequest::default()
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(message.contains("guestName"));

    let (status, _) = create_booking_handler(State(state.clone()), Json(booking_for(&[&room], 2, 5)))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = delete_room_handler(State(state.clone()), Path(room.id))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = delete_booking_handler(State(state.clone()), Path(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bill_is_served_as_plain_text() {
    let state = app();
    let room = add_room(&state, "201", 6000).await;
    let (_, Json(booking)) = create_booking_handler(State(state.clone()), Json(booking_for(&[&room], 1, 3)))
        .await
        .unwrap();

    let response = bill_handler(State(state.clone()), Path(booking.id))
        .await
        .unwrap()
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/plain; charset=utf-8"
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("Room 201 (double)"));
    assert!(text.contains("Total Amount: ₹12,000"));
    assert!(text.contains("Payment Status: Unpaid"));
}

#[tokio::test]
async fn payroll_follows_employee_status() {
    let state = app();
    let (_, Json(employee)) = create_employee_handler(
        State(state.clone()),
        Json(CreateEmployeeRequest {
            name: "Rajesh Kumar".to_string(),
            designation: "Front Desk Manager".to_string(),
            monthly_salary: 35_000,
            joining_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            contact_number: "9876543210".to_string(),
            is_active: true,
        }),
    )
    .await
    .unwrap();

    let Json(payroll) = payroll_handler(State(state.clone())).await;
    assert_eq!(payroll.monthly_total, 35_000);

    let Json(toggled) = toggle_employee_handler(State(state.clone()), Path(employee.id))
        .await
        .unwrap();
    assert!(!toggled.is_active);

    let Json(payroll) = payroll_handler(State(state.clone())).await;
    assert_eq!(payroll.active_staff, 0);
    assert_eq!(payroll.average_salary, 0);
}

#[test]
fn omitted_status_flags_default_to_true() {
    let employee: CreateEmployeeRequest = serde_json::from_str(
        r#"{"name":"Priya Sharma","designation":"Housekeeping","monthlySalary":18000,"joiningDate":"2023-06-01","contactNumber":"9876501234"}"#,
    )
    .unwrap();
    assert!(employee.is_active);

    let room: CreateRoomRequest =
        serde_json::from_str(r#"{"roomNumber":"301","type":"suite","beds":2,"pricePerDay":8000}"#).unwrap();
    assert!(room.is_available);
    assert!(!room.has_ac);
}
