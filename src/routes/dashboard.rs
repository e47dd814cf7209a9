//! Admin dashboard route: aggregated booking, revenue, and occupancy statistics.

use axum::{extract::State, Json};
use chrono::Utc;

use crate::errors::AppError;
use crate::middleware::rbac::RequireStaff;
use crate::services::dashboard::{self, DashboardStats, DASHBOARD_FAILURE};
use crate::AppState;

/// GET /api/admin/dashboard — statistics as of the current instant (staff only).
pub async fn stats(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> Result<Json<DashboardStats>, AppError> {
    let fetch = dashboard::get_stats(
        state.stats.as_ref(),
        Utc::now(),
        state.config.reporting_timezone,
    );

    let stats = tokio::time::timeout(state.config.dashboard_timeout, fetch)
        .await
        .map_err(|_| AppError::failed(DASHBOARD_FAILURE, "dashboard queries timed out"))?
        .map_err(|e| AppError::failed(DASHBOARD_FAILURE, e))?;

    Ok(Json(stats))
}
