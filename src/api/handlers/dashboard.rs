//! GET /api/dashboard: task, project, company and network metrics for today.

use axum::{extract::State, Json};
use chrono::Local;

use crate::api::AppState;
use crate::dashboard::DashboardMetrics;
use crate::error::ApiError;

pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardMetrics>, ApiError> {
    let today = Local::now().date_naive();
    Ok(Json(state.service.dashboard(today).await?))
}
