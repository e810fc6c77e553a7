//! List filtering over mapped records.
//!
//! `q` is a case-insensitive substring match over the entity's search
//! fields. Any other non-empty parameter naming a declared field must match
//! that field exactly. Parameters naming no field are ignored.

use std::collections::HashMap;

use super::{EntitySpec, MappedRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    search: Option<String>,
    equals: Vec<(String, String)>,
}

impl ListFilter {
    pub fn from_query(params: HashMap<String, String>) -> Self {
        let mut filter = Self::default();
        for (key, value) in params {
            if value.is_empty() {
                continue;
            }
            if key == "q" {
                filter.search = Some(value.to_lowercase());
            } else {
                filter.equals.push((key, value));
            }
        }
        filter
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.equals.is_empty()
    }

    pub fn matches(&self, spec: &EntitySpec, record: &MappedRecord) -> bool {
        let search_ok = self.search.as_deref().map_or(true, |needle| {
            spec.search_fields
                .iter()
                .any(|field| record.text(field).to_lowercase().contains(needle))
        });

        search_ok
            && self
                .equals
                .iter()
                .filter(|(field, _)| spec.field(field).is_some())
                .all(|(field, expected)| field_equals(record, field, expected))
    }

    pub fn apply(&self, spec: &EntitySpec, records: Vec<MappedRecord>) -> Vec<MappedRecord> {
        if self.is_empty() {
            return records;
        }
        records
            .into_iter()
            .filter(|record| self.matches(spec, record))
            .collect()
    }
}

fn field_equals(record: &MappedRecord, field: &str, expected: &str) -> bool {
    match record.get(field) {
        Some(serde_json::Value::String(s)) => s == expected,
        Some(serde_json::Value::Number(n)) => expected
            .trim()
            .parse::<f64>()
            .ok()
            .zip(n.as_f64())
            .map_or(false, |(want, have)| want == have),
        _ => false,
    }
}
