//! RecordStore trait: the sole boundary between Social Chess and the hosted
//! table store. Services hold an `Arc<dyn RecordStore>`, never a concrete client.

pub mod memory;
pub mod rest;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::warn;

use crate::config::{Config, StoreBackend};
use crate::error::StoreError;

pub use memory::MemoryStore;
pub use rest::RestStore;

pub type Result<T> = std::result::Result<T, StoreError>;

/// One table row keyed by internal column name.
pub type Row = Map<String, Value>;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All rows of `table`, in whatever order the store returns them.
    async fn select(&self, table: &str) -> Result<Vec<Row>>;

    /// Insert one row and return it as re-read from the store.
    async fn insert(&self, table: &str, row: Row) -> Result<Row>;

    /// Rows of `table` whose `column` equals `value`, at most `limit` of them.
    async fn select_eq(&self, table: &str, column: &str, value: &str, limit: usize)
        -> Result<Vec<Row>>;
}

/// Stand-in used when the store URL or credential is missing.
/// Every call fails, so requests surface the configuration problem.
#[derive(Debug, Clone)]
pub struct UnconfiguredStore {
    reason: String,
}

impl UnconfiguredStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> StoreError {
        StoreError::NotConfigured(self.reason.clone())
    }
}

#[async_trait]
impl RecordStore for UnconfiguredStore {
    async fn select(&self, _table: &str) -> Result<Vec<Row>> {
        Err(self.error())
    }

    async fn insert(&self, _table: &str, _row: Row) -> Result<Row> {
        Err(self.error())
    }

    async fn select_eq(
        &self,
        _table: &str,
        _column: &str,
        _value: &str,
        _limit: usize,
    ) -> Result<Vec<Row>> {
        Err(self.error())
    }
}

/// Build the store selected by `config`.
pub fn from_config(config: &Config) -> Result<Arc<dyn RecordStore>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::Rest => match &config.credentials {
            Ok(creds) => Ok(Arc::new(RestStore::new(creds.clone(), config.http_timeout)?)),
            Err(e) => {
                warn!("Record store URL or key missing ({e}). API endpoints will fail.");
                Ok(Arc::new(UnconfiguredStore::new(e.to_string())))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_store_fails_every_call() {
        let store = UnconfiguredStore::new("SUPABASE_URL must be set");
        assert!(matches!(
            store.select("tasks").await,
            Err(StoreError::NotConfigured(_))
        ));
        assert!(matches!(
            store.insert("tasks", Row::new()).await,
            Err(StoreError::NotConfigured(_))
        ));
        assert!(matches!(
            store.select_eq("tasks", "name", "x", 1).await,
            Err(StoreError::NotConfigured(_))
        ));
    }

    #[tokio::test]
    async fn from_config_without_credentials_is_unconfigured() {
        let config = Config::from_lookup(|_| None).unwrap();
        let store = from_config(&config).unwrap();
        let err = store.select("contacts").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "record store not configured: SUPABASE_URL must be set"
        );
    }
}
