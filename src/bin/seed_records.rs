//! seed_records: post one linked company, contact, project and task to a
//! running server.
//!
//!   BACKEND_API_URL: API base (default: http://localhost:3001/api)

use anyhow::{anyhow, Context, Result};
use chrono::{Local, Utc};
use reqwest::Client;
use serde_json::{json, Value};

const DEFAULT_API_BASE: &str = "http://localhost:3001/api";

struct Seeder {
    http: Client,
    base: String,
}

impl Seeder {
    async fn post(&self, path: &str, payload: &Value) -> Result<Value> {
        let url = format!("{}/{}", self.base, path.trim_start_matches('/'));
        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("Failed to POST {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("{status} for {url}: {body}"));
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {url}"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let base = std::env::var("BACKEND_API_URL")
        .unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string();
    let seeder = Seeder {
        http: Client::new(),
        base,
    };
    tracing::info!("Using API base: {}", seeder.base);

    let ts = Utc::now().format("%Y%m%d%H%M%S").to_string();
    let today = Local::now().format("%Y-%m-%d").to_string();
    let company_name = format!("TestCo {ts}");
    let contact_name = format!("Test Contact {ts}");
    let project_name = format!("Test Project {ts}");

    // Company first: its primary contact does not exist yet, so that
    // reference stays unresolved.
    let company = seeder
        .post(
            "companies",
            &json!({
                "name": company_name,
                "type": "Company",
                "primaryContact": contact_name,
                "status": "Active",
                "projects": project_name,
                "totalPipeline": 10000,
                "totalRevenue": 5000,
                "notes": "Created by seed_records",
            }),
        )
        .await?;
    println!("Created company: {company}");

    let contact = seeder
        .post(
            "contacts",
            &json!({
                "name": contact_name,
                "organization": company_name,
                "role": "CTO",
                "email": format!("test+{ts}@example.com"),
                "phone": "+1-555-0000",
                "type": "Decision Maker",
                "projects": project_name,
                "lastContact": today,
                "nextAction": "Schedule demo",
                "relationshipStrength": "Strong",
                "notes": "Seed contact",
                "tags": "test,seed",
            }),
        )
        .await?;
    println!("Created contact: {contact}");

    let project = seeder
        .post(
            "projects",
            &json!({
                "name": project_name,
                "company": company_name,
                "status": "Active",
                "startDate": today,
                "revenueModel": "Monthly Retainer",
                "feeStructure": "Fixed + Success",
                "pipelineValue": 25000,
                "actualRevenue": 0,
                "stakeholders": contact_name,
                "nextMilestone": "Kickoff",
                "notes": "Seed project",
            }),
        )
        .await?;
    println!("Created project: {project}");

    let task = seeder
        .post(
            "tasks",
            &json!({
                "taskName": format!("Intro Call {ts}"),
                "company": company_name,
                "project": project_name,
                "stakeholder": contact_name,
                "dueDate": today,
                "priority": "High",
                "status": "Not Started",
                "type": "Task",
                "notes": "Seed task",
            }),
        )
        .await?;
    println!("Created task: {task}");

    println!("\nAll seed records created successfully.");
    Ok(())
}
