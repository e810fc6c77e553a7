//! Stakeholder-scoped relationship graph for the force-directed view.
//!
//! A straight filter-and-project over already-fetched rows: nodes are the
//! project's stakeholders that exist as contacts, edges are relationships
//! with both endpoints among those nodes.

mod types;

use std::collections::{HashMap, HashSet};

use crate::entity::MappedRecord;

pub use types::{CapitalProfile, GraphEdge, GraphNode, NetworkGraph};

pub const NO_PLAYERS_MESSAGE: &str = "No players (stakeholders) defined for this game.";
pub const DEFAULT_STRENGTH: f64 = 0.5;
const WIDTH_SCALE: f64 = 4.0;

/// Stakeholder names from a `;`-delimited field, trimmed, empties dropped.
pub fn parse_stakeholders(raw: &str) -> Vec<&str> {
    raw.split(';')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Edge strength from free text, falling back to 0.5 when absent,
/// non-numeric, zero or non-finite.
pub fn parse_strength(raw: &str) -> f64 {
    let raw = raw.trim();
    match raw[..numeric_prefix_len(raw)].parse::<f64>() {
        Ok(value) if value.is_finite() && value != 0.0 => value,
        _ => DEFAULT_STRENGTH,
    }
}

/// Length of the leading decimal literal: sign, digits, one `.`, and an
/// exponent only when at least one digit follows the `e`.
fn numeric_prefix_len(raw: &str) -> usize {
    let bytes = raw.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    end += digits_from(end);
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        end += digits_from(end);
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    end
}

pub fn assemble(
    project: &MappedRecord,
    contacts: &[MappedRecord],
    relationships: &[MappedRecord],
    capital_scores: &[MappedRecord],
) -> NetworkGraph {
    let candidates: HashSet<&str> = parse_stakeholders(project.text("stakeholders"))
        .into_iter()
        .collect();

    let mut capital: HashMap<&str, CapitalProfile> = HashMap::new();
    for score in capital_scores {
        capital
            .entry(score.text("contactName"))
            .or_insert_with(|| CapitalProfile::from_record(score));
    }

    let mut seen = HashSet::new();
    let nodes: Vec<GraphNode> = contacts
        .iter()
        .filter(|c| candidates.contains(c.text("name")))
        .filter(|c| seen.insert(c.text("name")))
        .map(|c| GraphNode {
            id: c.text("name").to_string(),
            role: c.text("role").to_string(),
            group: c.text("organization").to_string(),
            capital: capital.get(c.text("name")).cloned(),
        })
        .collect();

    let project_name = project.text("name").to_string();
    if nodes.is_empty() {
        return NetworkGraph::empty(project_name, NO_PLAYERS_MESSAGE);
    }

    let edges = relationships
        .iter()
        .filter(|r| seen.contains(r.text("source")) && seen.contains(r.text("target")))
        .map(|r| {
            let strength = parse_strength(r.text("strength"));
            GraphEdge {
                source: r.text("source").to_string(),
                target: r.text("target").to_string(),
                strength,
                width: strength * WIDTH_SCALE,
            }
        })
        .collect();

    NetworkGraph {
        project: project_name,
        nodes,
        edges,
        message: None,
    }
}
