//! Best-effort name → id resolution for reference columns.
//!
//! A lookup never fails the surrounding create: no match, more than one
//! match, or a store error all resolve to `None`.

use serde_json::Value;
use tracing::debug;

use crate::entity::EntitySpec;
use crate::store::{RecordStore, Row};

/// Id of the single row in `table` whose `name` is exactly `name`.
pub async fn resolve_id(store: &dyn RecordStore, table: &str, name: &str) -> Option<Value> {
    if name.is_empty() {
        return None;
    }
    match store.select_eq(table, "name", name, 2).await {
        Ok(rows) if rows.len() == 1 => rows[0].get("id").filter(|id| !id.is_null()).cloned(),
        Ok(rows) => {
            if rows.len() > 1 {
                debug!(table, name, matches = rows.len(), "ambiguous name lookup");
            }
            None
        }
        Err(e) => {
            debug!(table, name, error = %e, "name lookup failed");
            None
        }
    }
}

/// Fill every reference id column of `row` that resolves from `payload`.
pub async fn populate_references(
    store: &dyn RecordStore,
    spec: &EntitySpec,
    payload: &Value,
    row: &mut Row,
) {
    for reference in spec.references {
        let name = payload
            .get(reference.field)
            .and_then(Value::as_str)
            .unwrap_or("");
        if let Some(id) = resolve_id(store, reference.table, name).await {
            row.insert(reference.id_column.to_string(), id);
        }
    }
}
