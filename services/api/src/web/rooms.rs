//! services/api/src/web/rooms.rs
//!
//! Handlers for the room inventory.

use crate::web::protocol::{CreateRoomRequest, RoomResponse, UpdateRoomRequest};
use crate::web::rest::{not_found, reject, HandlerError};
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use uuid::Uuid;

/// List every room.
#[utoipa::path(
    get,
    path = "/rooms",
    responses((status = 200, description = "All rooms", body = [RoomResponse]))
)]
pub async fn list_rooms_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<RoomResponse>> {
    let rooms = app_state.rooms.list_rooms().await;
    Json(rooms.into_iter().map(RoomResponse::from).collect())
}

/// Add a room to the inventory.
#[utoipa::path(
    post,
    path = "/rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = RoomResponse),
        (status = 409, description = "Room number already in use"),
        (status = 422, description = "Invalid room details")
    )
)]
pub async fn create_room_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomResponse>), HandlerError> {
    let room = app_state
        .rooms
        .create_room(payload.into())
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(room.into())))
}

#[utoipa::path(
    get,
    path = "/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room id")),
    responses(
        (status = 200, description = "The room", body = RoomResponse),
        (status = 404, description = "No such room")
    )
)]
pub async fn get_room_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoomResponse>, HandlerError> {
    let room = app_state
        .rooms
        .get_room(id)
        .await
        .ok_or_else(|| not_found("Room", id))?;
    Ok(Json(room.into()))
}

/// Change some of a room's details.
#[utoipa::path(
    patch,
    path = "/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room id")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Updated room", body = RoomResponse),
        (status = 404, description = "No such room"),
        (status = 409, description = "Room number already in use"),
        (status = 422, description = "Invalid room details")
    )
)]
pub async fn update_room_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoomRequest>,
) -> Result<Json<RoomResponse>, HandlerError> {
    let room = app_state
        .rooms
        .update_room(id, payload.into())
        .await
        .map_err(reject)?
        .ok_or_else(|| not_found("Room", id))?;
    Ok(Json(room.into()))
}

/// Remove a room. Refused while a booking that has not checked out holds it.
#[utoipa::path(
    delete,
    path = "/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room id")),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 404, description = "No such room"),
        (status = 409, description = "Room is held by a current or upcoming booking")
    )
)]
pub async fn delete_room_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HandlerError> {
    if app_state.rooms.delete_room(id).await.map_err(reject)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Room", id))
    }
}
