//! services/api/src/web/employees.rs
//!
//! Handlers for staff records and payroll.

use crate::web::protocol::{CreateEmployeeRequest, EmployeeResponse, PayrollResponse, UpdateEmployeeRequest};
use crate::web::rest::{not_found, reject, HandlerError};
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/employees",
    responses((status = 200, description = "All employees", body = [EmployeeResponse]))
)]
pub async fn list_employees_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<EmployeeResponse>> {
    let employees = app_state.staff.list_employees().await;
    Json(employees.into_iter().map(EmployeeResponse::from).collect())
}

#[utoipa::path(
    post,
    path = "/employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee added", body = EmployeeResponse),
        (status = 422, description = "Invalid employee details")
    )
)]
pub async fn create_employee_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), HandlerError> {
    let employee = app_state
        .staff
        .create_employee(payload.into())
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(employee.into())))
}

#[utoipa::path(
    get,
    path = "/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee id")),
    responses(
        (status = 200, description = "The employee", body = EmployeeResponse),
        (status = 404, description = "No such employee")
    )
)]
pub async fn get_employee_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeResponse>, HandlerError> {
    let employee = app_state
        .staff
        .get_employee(id)
        .await
        .ok_or_else(|| not_found("Employee", id))?;
    Ok(Json(employee.into()))
}

#[utoipa::path(
    patch,
    path = "/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee id")),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Updated employee", body = EmployeeResponse),
        (status = 404, description = "No such employee"),
        (status = 422, description = "Invalid employee details")
    )
)]
pub async fn update_employee_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, HandlerError> {
    let employee = app_state
        .staff
        .update_employee(id, payload.into())
        .await
        .map_err(reject)?
        .ok_or_else(|| not_found("Employee", id))?;
    Ok(Json(employee.into()))
}

#[utoipa::path(
    delete,
    path = "/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee id")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "No such employee")
    )
)]
pub async fn delete_employee_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HandlerError> {
    if app_state.staff.delete_employee(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Employee", id))
    }
}

/// Flip an employee between active and inactive.
#[utoipa::path(
    post,
    path = "/employees/{id}/toggle-active",
    params(("id" = Uuid, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee with the new status", body = EmployeeResponse),
        (status = 404, description = "No such employee")
    )
)]
pub async fn toggle_employee_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeResponse>, HandlerError> {
    let employee = app_state
        .staff
        .toggle_active(id)
        .await
        .ok_or_else(|| not_found("Employee", id))?;
    Ok(Json(employee.into()))
}

/// Monthly salary totals for active staff.
#[utoipa::path(
    get,
    path = "/employees/payroll",
    responses((status = 200, description = "Payroll summary", body = PayrollResponse))
)]
pub async fn payroll_handler(State(app_state): State<Arc<AppState>>) -> Json<PayrollResponse> {
    Json(app_state.staff.payroll().await.into())
}
