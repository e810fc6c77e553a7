//! Dashboard metrics derived from the aggregate payload.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::MappedRecord;
use crate::service::AllData;

const COMPLETED: &str = "Completed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    /// Tasks not started or in progress
    pub open_tasks: usize,
    pub high_priority_tasks: usize,
    pub tasks_due_today: Vec<MappedRecord>,
    pub active_projects: usize,
    /// Projects whose status reads active in either locale
    pub active_games: usize,
    /// Distinct people across contacts and both ends of every relationship
    pub network_reach: usize,
    pub total_companies: usize,
    pub active_companies: usize,
    pub total_pipeline: f64,
    pub total_revenue: f64,
    pub project_health: Vec<ProjectHealth>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHealth {
    pub name: String,
    pub company: String,
    pub status: String,
    pub open_tasks: usize,
    pub total_tasks: usize,
}

impl DashboardMetrics {
    pub fn compute(all: &AllData, today: NaiveDate) -> Self {
        let today = today.format("%Y-%m-%d").to_string();

        let open_tasks = all
            .tasks
            .iter()
            .filter(|t| matches!(t.text("status"), "Not Started" | "In Progress"))
            .count();
        let high_priority_tasks = all
            .tasks
            .iter()
            .filter(|t| t.text("priority") == "High" && t.text("status") != COMPLETED)
            .count();
        let tasks_due_today = all
            .tasks
            .iter()
            .filter(|t| t.text("dueDate") == today)
            .cloned()
            .collect();

        let active_projects = all
            .projects
            .iter()
            .filter(|p| p.text("status") == "Active")
            .count();
        let active_games = all.projects.iter().filter(|p| is_active(p)).count();

        let project_health = all
            .projects
            .iter()
            .map(|p| {
                let name = p.text("name");
                let tasks: Vec<_> = all
                    .tasks
                    .iter()
                    .filter(|t| t.text("project") == name)
                    .collect();
                ProjectHealth {
                    name: name.to_string(),
                    company: p.text("company").to_string(),
                    status: p.text("status").to_string(),
                    open_tasks: tasks
                        .iter()
                        .filter(|t| t.text("status") != COMPLETED)
                        .count(),
                    total_tasks: tasks.len(),
                }
            })
            .collect();

        Self {
            open_tasks,
            high_priority_tasks,
            tasks_due_today,
            active_projects,
            active_games,
            network_reach: network_reach(all),
            total_companies: all.companies.len(),
            active_companies: all.companies.iter().filter(|c| is_active(c)).count(),
            total_pipeline: all.companies.iter().map(|c| c.number("totalPipeline")).sum(),
            total_revenue: all.companies.iter().map(|c| c.number("totalRevenue")).sum(),
            project_health,
        }
    }
}

fn is_active(record: &MappedRecord) -> bool {
    let status = record.text("status").to_lowercase();
    status == "active" || status == "ativo"
}

fn network_reach(all: &AllData) -> usize {
    let mut names: HashSet<&str> = all.contacts.iter().map(|c| c.text("name")).collect();
    for r in &all.relationships {
        names.insert(r.text("source"));
        names.insert(r.text("target"));
    }
    names.remove("");
    names.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{map_row, EntitySpec, COMPANY, CONTACT, PROJECT, RELATIONSHIP, TASK};
    use serde_json::{json, Value};

    fn recs(spec: &EntitySpec, rows: Vec<Value>) -> Vec<MappedRecord> {
        rows.iter()
            .map(|r| map_row(spec, r.as_object().unwrap()))
            .collect()
    }

    fn sample() -> AllData {
        AllData {
            projects: recs(
                &PROJECT,
                vec![
                    json!({"name": "Pilot", "company": "Acme", "status": "Active"}),
                    json!({"name": "Rollout", "company": "Globex", "status": "ativo"}),
                    json!({"name": "Archive", "status": "Completed"}),
                ],
            ),
            tasks: recs(
                &TASK,
                vec![
                    json!({"task_name": "a", "project": "Pilot", "status": "Not Started", "priority": "High", "due_date": "2024-06-01"}),
                    json!({"task_name": "b", "project": "Pilot", "status": "In Progress", "priority": "Low"}),
                    json!({"task_name": "c", "project": "Pilot", "status": "Completed", "priority": "High", "due_date": "2024-06-01"}),
                    json!({"task_name": "d", "project": "Rollout", "status": "Blocked"}),
                ],
            ),
            contacts: recs(
                &CONTACT,
                vec![json!({"name": "Alice"}), json!({"name": "Bob"}), json!({"name": ""})],
            ),
            relationships: recs(
                &RELATIONSHIP,
                vec![json!({"source": "Alice", "target": "Carol"}), json!({"source": "Dan", "target": "Bob"})],
            ),
            companies: recs(
                &COMPANY,
                vec![
                    json!({"name": "Acme", "status": "Active", "total_pipeline": 10000, "total_revenue": 5000}),
                    json!({"name": "Globex", "status": "Prospect", "total_pipeline": 2500.5}),
                ],
            ),
            ..AllData::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn task_counts() {
        let m = DashboardMetrics::compute(&sample(), today());
        assert_eq!(m.open_tasks, 2);
        assert_eq!(m.high_priority_tasks, 1);
        let due: Vec<_> = m.tasks_due_today.iter().map(|t| t.text("name")).collect();
        assert_eq!(due, vec!["a", "c"]);
    }

    #[test]
    fn project_counts() {
        let m = DashboardMetrics::compute(&sample(), today());
        assert_eq!(m.active_projects, 1);
        assert_eq!(m.active_games, 2);
    }

    #[test]
    fn project_health_counts_open_and_total() {
        let m = DashboardMetrics::compute(&sample(), today());
        let pilot = &m.project_health[0];
        assert_eq!(pilot.name, "Pilot");
        assert_eq!(pilot.company, "Acme");
        assert_eq!((pilot.open_tasks, pilot.total_tasks), (2, 3));
        let rollout = &m.project_health[1];
        assert_eq!((rollout.open_tasks, rollout.total_tasks), (1, 1));
        assert_eq!(m.project_health[2].total_tasks, 0);
    }

    #[test]
    fn network_reach_counts_distinct_named_people() {
        let m = DashboardMetrics::compute(&sample(), today());
        // Alice, Bob, Carol, Dan
        assert_eq!(m.network_reach, 4);
    }

    #[test]
    fn company_totals() {
        let m = DashboardMetrics::compute(&sample(), today());
        assert_eq!(m.total_companies, 2);
        assert_eq!(m.active_companies, 1);
        assert_eq!(m.total_pipeline, 12500.5);
        assert_eq!(m.total_revenue, 5000.0);
    }

    #[test]
    fn empty_data_is_all_zero() {
        let m = DashboardMetrics::compute(&AllData::default(), today());
        assert_eq!(m.open_tasks, 0);
        assert_eq!(m.network_reach, 0);
        assert!(m.project_health.is_empty());
        assert_eq!(m.total_pipeline, 0.0);
    }
}
