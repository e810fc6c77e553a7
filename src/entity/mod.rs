//! Entity field-mapping tables.
//!
//! Every entity is described by one [`EntitySpec`]: the table it lives in,
//! the external ↔ internal name of each field, the reference fields resolved
//! on create, and the fields searched by the `q` list filter. The generic
//! mapper in [`mapping`] does the rest, so there is no per-entity code.

pub mod filter;
pub mod mapping;
mod specs;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use filter::ListFilter;
pub use mapping::{coerce_number, map_row, to_row};
pub use specs::{
    CAPITAL_SCORE, COMPANY, CONTACT, INVESTMENT, PROJECT, RELATIONSHIP, TASK,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
}

/// One field of an entity: external API name ↔ internal column name.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub external: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
    /// Alternative payload names accepted on create, tried before `external`.
    pub aliases: &'static [&'static str],
    /// Substituted on create when the payload value is falsy.
    pub default: Option<&'static str>,
    /// Store-populated; never taken from a create payload.
    pub read_only: bool,
}

impl Field {
    pub const fn text(external: &'static str, column: &'static str) -> Self {
        Self {
            external,
            column,
            kind: FieldKind::Text,
            aliases: &[],
            default: None,
            read_only: false,
        }
    }

    pub const fn number(external: &'static str, column: &'static str) -> Self {
        Self {
            kind: FieldKind::Number,
            ..Self::text(external, column)
        }
    }

    pub const fn with_default(self, default: &'static str) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    pub const fn with_aliases(self, aliases: &'static [&'static str]) -> Self {
        Self { aliases, ..self }
    }

    pub const fn read_only(self) -> Self {
        Self {
            read_only: true,
            ..self
        }
    }
}

/// Best-effort foreign key populated on create from a name field.
#[derive(Debug, Clone, Copy)]
pub struct Reference {
    /// External payload field holding the referenced name.
    pub field: &'static str,
    /// Table searched by exact `name` match.
    pub table: &'static str,
    /// Column receiving the resolved id.
    pub id_column: &'static str,
}

#[derive(Debug)]
pub struct EntitySpec {
    pub table: &'static str,
    pub fields: &'static [Field],
    pub references: &'static [Reference],
    /// Fields `q` searches; empty for tables without list endpoints.
    pub search_fields: &'static [&'static str],
}

impl EntitySpec {
    pub fn field(&self, external: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.external == external)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Task,
    Project,
    Contact,
    Company,
    Relationship,
    CapitalScore,
    Investment,
}

impl EntityKind {
    /// Entities exposed through `/api/{path}` list/create endpoints.
    pub const CRUD: [EntityKind; 4] = [Self::Task, Self::Project, Self::Contact, Self::Company];

    pub fn spec(self) -> &'static EntitySpec {
        match self {
            Self::Task => &TASK,
            Self::Project => &PROJECT,
            Self::Contact => &CONTACT,
            Self::Company => &COMPANY,
            Self::Relationship => &RELATIONSHIP,
            Self::CapitalScore => &CAPITAL_SCORE,
            Self::Investment => &INVESTMENT,
        }
    }

    /// Resolve a `/api/{path}` segment to a list/create entity.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::CRUD.into_iter().find(|k| k.spec().table == path)
    }
}

/// A row translated to external field names with defaults substituted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappedRecord(pub Map<String, Value>);

impl MappedRecord {
    /// Text field, `""` when absent or not a string.
    pub fn text(&self, field: &str) -> &str {
        self.0.get(field).and_then(Value::as_str).unwrap_or("")
    }

    /// Numeric field, `0.0` when absent or not a number.
    pub fn number(&self, field: &str) -> f64 {
        self.0.get(field).and_then(Value::as_f64).unwrap_or(0.0)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}
