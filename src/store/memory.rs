//! In-process record store for tests and local demo runs.
//!
//! Inserted rows get an `id` (UUID v4) and `created_at` when the caller did
//! not supply them, as the hosted store's column defaults would.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::{RecordStore, Result, Row};
use crate::error::StoreError;

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Row>>>,
    failing: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `table` with rows, replacing anything already there.
    pub fn with_table(self, table: &str, rows: Vec<Row>) -> Self {
        lock(&self.tables).insert(table.to_string(), rows);
        self
    }

    /// Make every subsequent call touching `table` fail.
    pub fn fail_table(&self, table: &str) {
        lock(&self.failing).insert(table.to_string());
    }

    /// Snapshot of the rows currently stored in `table`.
    pub fn rows(&self, table: &str) -> Vec<Row> {
        lock(&self.tables).get(table).cloned().unwrap_or_default()
    }

    fn check(&self, table: &str) -> Result<()> {
        if lock(&self.failing).contains(table) {
            return Err(StoreError::Rejected {
                table: table.to_string(),
                status: 503,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn select(&self, table: &str) -> Result<Vec<Row>> {
        self.check(table)?;
        Ok(self.rows(table))
    }

    async fn insert(&self, table: &str, mut row: Row) -> Result<Row> {
        self.check(table)?;
        row.entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        row.entry("created_at")
            .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));
        lock(&self.tables)
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn select_eq(
        &self,
        table: &str,
        column: &str,
        value: &str,
        limit: usize,
    ) -> Result<Vec<Row>> {
        self.check(table)?;
        Ok(lock(&self.tables)
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| row.get(column).and_then(Value::as_str) == Some(value))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
