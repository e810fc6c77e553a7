//! Router construction for the Social Chess API.

use std::collections::HashMap;
use std::path::Path;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, Uri},
    routing::{get, MethodRouter},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::{handlers, AppState};
use crate::entity::EntityKind;
use crate::error::ApiError;
use crate::service::CrmService;

/// Build the full axum router. Front-end assets are served from
/// `static_dir` for any path no API route claims.
pub fn build_router(service: CrmService, static_dir: Option<&Path>) -> Router {
    let mut api = Router::new()
        .route("/api/health", get(handlers::health::health))
        .route("/api/all", get(handlers::aggregate::get_all))
        .route("/api/graph", get(handlers::graph::project_graph))
        .route("/api/dashboard", get(handlers::dashboard::dashboard));

    // GET + POST /api/{tasks,projects,contacts,companies}
    for kind in EntityKind::CRUD {
        api = api.route(&format!("/api/{}", kind.spec().table), entity_routes(kind));
    }

    api = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api.fallback(|uri: Uri| async move { ApiError::NotFound(format!("route {uri}")) }),
    };

    api.layer(
        ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        ),
    )
    .with_state(AppState { service })
}

fn entity_routes(kind: EntityKind) -> MethodRouter<AppState> {
    get(
        move |state: State<AppState>,
              query: Result<Query<HashMap<String, String>>, QueryRejection>| {
            handlers::entities::list(state, kind, query)
        },
    )
    .post(
        move |state: State<AppState>, headers: HeaderMap, body: Bytes| {
            handlers::entities::create(state, kind, headers, body)
        },
    )
}
