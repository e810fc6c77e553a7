//! HTTP surface: axum router, handlers and error mapping.

pub mod error;
pub mod handlers;
pub mod router;

use crate::service::CrmService;

pub use router::build_router;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: CrmService,
}
