//! services/api/src/web/dashboard.rs
//!
//! Handlers for the dashboard figures. Both are computed as of the moment of
//! the request.

use crate::web::protocol::{DashboardStatsResponse, RevenuePointResponse};
use crate::web::state::AppState;
use axum::{extract::State, response::Json};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/dashboard/stats",
    responses((status = 200, description = "Revenue, occupancy and staffing figures", body = DashboardStatsResponse))
)]
pub async fn stats_handler(State(app_state): State<Arc<AppState>>) -> Json<DashboardStatsResponse> {
    let stats = app_state.analytics.compute_stats(app_state.store.now()).await;
    Json(stats.into())
}

/// Revenue and booking counts for the last six months with bookings.
#[utoipa::path(
    get,
    path = "/dashboard/revenue",
    responses((status = 200, description = "Monthly revenue, oldest first", body = [RevenuePointResponse]))
)]
pub async fn revenue_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<RevenuePointResponse>> {
    let series = app_state.analytics.revenue_series(app_state.store.now()).await;
    Json(series.into_iter().map(RevenuePointResponse::from).collect())
}
