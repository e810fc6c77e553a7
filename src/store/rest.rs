//! PostgREST client for the hosted record store.
//!
//! Tables live under `{base}/rest/v1/{table}`. Every request carries the
//! service credential as both `apikey` and bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use url::Url;

use super::{RecordStore, Result, Row};
use crate::config::StoreCredentials;
use crate::error::StoreError;

const ERROR_BODY_LIMIT: usize = 200;

pub struct RestStore {
    http: Client,
    base: Url,
    key: String,
}

impl RestStore {
    pub fn new(credentials: StoreCredentials, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base: credentials.url,
            key: credentials.key,
        })
    }

    fn table_url(&self, table: &str) -> Result<Url> {
        table_url(&self.base, table)
    }

    async fn send(&self, table: &str, request: RequestBuilder) -> Result<Vec<Row>> {
        let response = request
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                table: table.to_string(),
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        response
            .json::<Vec<Row>>()
            .await
            .map_err(|e| StoreError::Malformed(format!("{table}: {e}")))
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn select(&self, table: &str) -> Result<Vec<Row>> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("select", "*");
        self.send(table, self.http.get(url)).await
    }

    async fn insert(&self, table: &str, row: Row) -> Result<Row> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("select", "*");
        let request = self
            .http
            .post(url)
            .header("Prefer", "return=representation")
            .json(&row);
        self.send(table, request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::EmptyInsert(table.to_string()))
    }

    async fn select_eq(
        &self,
        table: &str,
        column: &str,
        value: &str,
        limit: usize,
    ) -> Result<Vec<Row>> {
        let url = eq_url(&self.base, table, column, value, limit)?;
        self.send(table, self.http.get(url)).await
    }
}

fn table_url(base: &Url, table: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| StoreError::Malformed(format!("cannot extend base URL {base}")))?
        .pop_if_empty()
        .extend(["rest", "v1", table]);
    Ok(url)
}

fn eq_url(base: &Url, table: &str, column: &str, value: &str, limit: usize) -> Result<Url> {
    let mut url = table_url(base, table)?;
    url.query_pairs_mut()
        .append_pair("select", "id")
        .append_pair(column, &format!("eq.{value}"))
        .append_pair("limit", &limit.to_string());
    Ok(url)
}

/// PostgREST errors carry a JSON `message`; anything else is truncated raw text.
fn error_message(body: &str) -> String {
    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(body) {
        if let Some(Value::String(message)) = obj.get("message") {
            return message.clone();
        }
    }
    body.chars().take(ERROR_BODY_LIMIT).collect()
}
