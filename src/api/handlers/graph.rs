//! GET /api/graph?project=NAME: stakeholder network for one project.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::AppState;
use crate::error::ApiError;
use crate::graph::NetworkGraph;

#[derive(Debug, Deserialize)]
pub struct GraphQuery {
    pub project: String,
}

pub async fn project_graph(
    State(state): State<AppState>,
    query: Result<Query<GraphQuery>, QueryRejection>,
) -> Result<Json<NetworkGraph>, ApiError> {
    let Query(query) = query?;
    state
        .service
        .project_graph(&query.project)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("project '{}'", query.project)))
}
