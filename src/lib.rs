//! Social Chess: relationship tracking over a hosted table store.
//!
//! The crate is layered leaves-first:
//!
//! - [`store`]: the `RecordStore` gateway (REST, in-memory, unconfigured)
//! - [`resolve`]: best-effort name → id lookups for reference columns
//! - [`entity`]: field-mapping tables and the generic row mapper
//! - [`service`]: list/create per entity plus the concurrent aggregate
//! - [`graph`]: stakeholder-scoped relationship graph assembly
//! - [`dashboard`]: metrics derived from the aggregate payload
//! - [`api`]: axum router and handlers

pub mod api;
pub mod config;
pub mod dashboard;
pub mod entity;
pub mod error;
pub mod graph;
pub mod resolve;
pub mod service;
pub mod store;

pub use config::Config;
pub use error::{ApiError, ConfigError, StoreError};
pub use service::CrmService;
pub use store::RecordStore;
