//! List/create handlers shared by every entity.
//!
//! GET  /api/{entity}: all records, optionally filtered (`q`, field=value)
//! POST /api/{entity}: create from external field names, returns the stored record
//!
//! Create payloads are not validated. A body without a JSON content type, or
//! an empty one, creates a record from defaults; only a JSON body that fails
//! to parse is rejected.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde_json::{Map, Value};

use crate::api::AppState;
use crate::entity::{EntityKind, ListFilter, MappedRecord};
use crate::error::ApiError;

pub async fn list(
    State(state): State<AppState>,
    kind: EntityKind,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<Vec<MappedRecord>>, ApiError> {
    let Query(params) = query?;
    let filter = ListFilter::from_query(params);
    Ok(Json(state.service.list_filtered(kind, &filter).await?))
}

pub async fn create(
    State(state): State<AppState>,
    kind: EntityKind,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<MappedRecord>, ApiError> {
    let payload = read_payload(&headers, &body)?;
    Ok(Json(state.service.create(kind, payload).await?))
}

fn read_payload(headers: &HeaderMap, body: &[u8]) -> Result<Value, ApiError> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("malformed JSON body: {e}")))
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn headers(content_type: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(ct));
        }
        headers
    }

    #[test]
    fn json_body_is_parsed() {
        let payload = read_payload(
            &headers(Some("application/json; charset=utf-8")),
            br#"{"name": "Acme"}"#,
        )
        .unwrap();
        assert_eq!(payload, json!({"name": "Acme"}));
    }

    #[test]
    fn non_json_or_empty_body_is_empty_object() {
        assert_eq!(read_payload(&headers(None), b"name=Acme").unwrap(), json!({}));
        assert_eq!(
            read_payload(&headers(Some("text/plain")), br#"{"name": "Acme"}"#).unwrap(),
            json!({})
        );
        assert_eq!(read_payload(&headers(Some("application/json")), b"  ").unwrap(), json!({}));
    }

    #[test]
    fn malformed_json_is_bad_request() {
        let err = read_payload(&headers(Some("application/json")), b"{\"name\":").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
