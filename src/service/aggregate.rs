//! GET /api/all: every table in one payload.
//!
//! The seven fetches run concurrently. Relationships, capital scores and
//! investments fall back to an empty list when their fetch fails; any
//! failure of the four core tables fails the whole aggregate.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{CrmService, Result};
use crate::entity::{EntityKind, MappedRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllData {
    pub projects: Vec<MappedRecord>,
    pub contacts: Vec<MappedRecord>,
    pub tasks: Vec<MappedRecord>,
    pub companies: Vec<MappedRecord>,
    pub relationships: Vec<MappedRecord>,
    pub capital_scores: Vec<MappedRecord>,
    pub investments: Vec<MappedRecord>,
}

impl CrmService {
    pub async fn get_all(&self) -> Result<AllData> {
        let (projects, contacts, tasks, companies, relationships, capital_scores, investments) = futures::join!(
            self.list(EntityKind::Project),
            self.list(EntityKind::Contact),
            self.list(EntityKind::Task),
            self.list(EntityKind::Company),
            self.list_or_empty(EntityKind::Relationship),
            self.list_or_empty(EntityKind::CapitalScore),
            self.list_or_empty(EntityKind::Investment),
        );

        Ok(AllData {
            projects: projects?,
            contacts: contacts?,
            tasks: tasks?,
            companies: companies?,
            relationships,
            capital_scores,
            investments,
        })
    }

    async fn list_or_empty(&self, kind: EntityKind) -> Vec<MappedRecord> {
        match self.list(kind).await {
            Ok(records) => records,
            Err(e) => {
                warn!(table = kind.spec().table, error = %e, "optional table unavailable, using empty list");
                Vec::new()
            }
        }
    }
}
