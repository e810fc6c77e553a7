//! CrmService: list/create for every entity over an injected `RecordStore`.
//!
//! Each call is one or two store round trips: no retries, no caching, no
//! state kept between requests.

mod aggregate;

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use crate::dashboard::DashboardMetrics;
use crate::entity::{map_row, to_row, EntityKind, ListFilter, MappedRecord};
use crate::error::StoreError;
use crate::graph::{assemble, NetworkGraph};
use crate::resolve::populate_references;
use crate::store::RecordStore;

pub use aggregate::AllData;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Clone)]
pub struct CrmService {
    store: Arc<dyn RecordStore>,
}

impl CrmService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Every row of the entity's table, mapped to external field names.
    pub async fn list(&self, kind: EntityKind) -> Result<Vec<MappedRecord>> {
        let spec = kind.spec();
        let rows = self.store.select(spec.table).await?;
        Ok(rows.iter().map(|row| map_row(spec, row)).collect())
    }

    pub async fn list_filtered(
        &self,
        kind: EntityKind,
        filter: &ListFilter,
    ) -> Result<Vec<MappedRecord>> {
        let records = self.list(kind).await?;
        Ok(filter.apply(kind.spec(), records))
    }

    /// Map the payload, resolve reference ids best-effort, insert, and return
    /// the stored row re-mapped.
    pub async fn create(&self, kind: EntityKind, payload: Value) -> Result<MappedRecord> {
        let spec = kind.spec();
        let mut row = to_row(spec, &payload);
        populate_references(self.store.as_ref(), spec, &payload, &mut row).await;

        let inserted = self.store.insert(spec.table, row).await?;
        let id = inserted.get("id").cloned().unwrap_or_default();
        info!(table = spec.table, id = %id, "record created");
        Ok(map_row(spec, &inserted))
    }

    /// Relationship graph for the first project named `project`, or `None`
    /// when no such project exists.
    pub async fn project_graph(&self, project: &str) -> Result<Option<NetworkGraph>> {
        let all = self.get_all().await?;
        Ok(all
            .projects
            .iter()
            .find(|p| p.text("name") == project)
            .map(|p| assemble(p, &all.contacts, &all.relationships, &all.capital_scores)))
    }

    pub async fn dashboard(&self, today: NaiveDate) -> Result<DashboardMetrics> {
        let all = self.get_all().await?;
        Ok(DashboardMetrics::compute(&all, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, Row};
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    fn service_with(store: MemoryStore) -> (CrmService, Arc<MemoryStore>) {
        let store = Arc::new(store);
        (CrmService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn create_then_list_round_trips_fields() {
        let (svc, _) = service_with(MemoryStore::new());
        let payload = json!({
            "name": "Jane Roe",
            "organization": "Acme",
            "role": "CTO",
            "email": "jane@acme.io",
            "relationshipStrength": "Strong",
            "tags": "vip"
        });
        let created = svc.create(EntityKind::Contact, payload.clone()).await.unwrap();
        let listed = svc.list(EntityKind::Contact).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], created);
        for (field, value) in payload.as_object().unwrap() {
            assert_eq!(listed[0].get(field), Some(value), "field {field}");
        }
        assert_eq!(listed[0].text("phone"), "");
    }

    #[tokio::test]
    async fn numeric_strings_are_stored_as_numbers() {
        let (svc, store) = service_with(MemoryStore::new());
        svc.create(
            EntityKind::Project,
            json!({"name": "Pilot", "pipelineValue": "25000"}),
        )
        .await
        .unwrap();
        assert_eq!(store.rows("projects")[0]["pipeline_value"], json!(25000));
        let listed = svc.list(EntityKind::Project).await.unwrap();
        assert_eq!(listed[0].get("pipelineValue"), Some(&json!(25000)));
        assert_eq!(listed[0].get("actualRevenue"), Some(&json!(0)));
    }

    #[tokio::test]
    async fn unresolved_reference_does_not_fail_create() {
        let (svc, store) = service_with(MemoryStore::new());
        let created = svc
            .create(EntityKind::Project, json!({"name": "Solo", "company": "Ghost Inc"}))
            .await
            .unwrap();
        assert_eq!(created.text("company"), "Ghost Inc");
        assert!(store.rows("projects")[0].get("company_id").is_none());
    }

    #[tokio::test]
    async fn resolved_references_are_stored() {
        let (svc, store) = service_with(
            MemoryStore::new()
                .with_table("companies", vec![row(json!({"id": "co-1", "name": "Acme"}))])
                .with_table("projects", vec![row(json!({"id": "pr-1", "name": "Pilot"}))])
                .with_table("contacts", vec![row(json!({"id": "ct-1", "name": "Jane"}))]),
        );
        svc.create(
            EntityKind::Task,
            json!({"taskName": "Kickoff", "company": "Acme", "project": "Pilot", "stakeholder": "Jane"}),
        )
        .await
        .unwrap();
        let rows = store.rows("tasks");
        let stored = &rows[0];
        assert_eq!(stored["company_id"], json!("co-1"));
        assert_eq!(stored["project_id"], json!("pr-1"));
        assert_eq!(stored["stakeholder_id"], json!("ct-1"));
        assert_eq!(stored["status"], json!("Not Started"));
        assert_eq!(stored["type"], json!("Task"));
    }

    #[tokio::test]
    async fn store_error_fails_create() {
        let store = MemoryStore::new();
        store.fail_table("companies");
        let (svc, _) = service_with(store);
        let err = svc
            .create(EntityKind::Company, json!({"name": "Acme"}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected { .. }));
    }

    #[tokio::test]
    async fn project_graph_unknown_project_is_none() {
        let (svc, _) = service_with(MemoryStore::new());
        assert!(svc.project_graph("Nope").await.unwrap().is_none());
    }
}
