//! GET /api/all: every table in one payload for dashboards and forms.

use axum::{extract::State, Json};

use crate::api::AppState;
use crate::error::ApiError;
use crate::service::AllData;

pub async fn get_all(State(state): State<AppState>) -> Result<Json<AllData>, ApiError> {
    Ok(Json(state.service.get_all().await?))
}
