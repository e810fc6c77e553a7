//! Graph types for the stakeholder network view
//!
//! Serialized to JSON and consumed by the front-end's force simulation,
//! which owns layout.

use serde::{Deserialize, Serialize};

use crate::entity::MappedRecord;

/// Graph projection of one project's stakeholders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkGraph {
    pub project: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// Placeholder text shown instead of an empty canvas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NetworkGraph {
    pub fn empty(project: String, message: &str) -> Self {
        Self {
            project,
            nodes: Vec::new(),
            edges: Vec::new(),
            message: Some(message.to_string()),
        }
    }
}

/// A contact taking part in the project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Contact name; edges refer to nodes by this id
    pub id: String,
    pub role: String,
    /// Organization, used to colour clusters
    pub group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital: Option<CapitalProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub strength: f64,
    /// Rendered stroke width
    pub width: f64,
}

/// Capital scores (0–100) shown in the player detail panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalProfile {
    pub economic: f64,
    pub social: f64,
    pub political: f64,
    pub career: f64,
}

impl CapitalProfile {
    pub fn from_record(record: &MappedRecord) -> Self {
        Self {
            economic: record.number("economic"),
            social: record.number("social"),
            political: record.number("political"),
            career: record.number("career"),
        }
    }
}
