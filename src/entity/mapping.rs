//! Generic row mapping driven by an [`EntitySpec`].
//!
//! Reading never yields null: absent text is `""`, absent numbers are `0`.
//! Writing drops absent values, applies create defaults, and coerces numeric
//! fields, so a falsy number is omitted rather than stored as zero.

use serde_json::{Number, Value};

use super::{EntitySpec, FieldKind, MappedRecord};
use crate::store::Row;

/// Largest integer an f64 holds exactly.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Internal row → external record.
pub fn map_row(spec: &EntitySpec, row: &Row) -> MappedRecord {
    let mut out = serde_json::Map::with_capacity(spec.fields.len());
    for field in spec.fields {
        let raw = row.get(field.column);
        let value = match field.kind {
            FieldKind::Text => Value::String(read_text(raw)),
            FieldKind::Number => Value::Number(read_number(raw)),
        };
        out.insert(field.external.to_string(), value);
    }
    MappedRecord(out)
}

/// External payload → internal row, without reference ids.
pub fn to_row(spec: &EntitySpec, payload: &Value) -> Row {
    let mut row = Row::new();
    let Some(payload) = payload.as_object() else {
        return row;
    };

    for field in spec.fields.iter().filter(|f| !f.read_only) {
        let raw = field
            .aliases
            .iter()
            .chain(std::iter::once(&field.external))
            .filter_map(|name| payload.get(*name))
            .find(|v| is_truthy(v))
            .or_else(|| payload.get(field.external));

        let value = match field.kind {
            FieldKind::Number => raw.and_then(coerce_number).map(Value::Number),
            FieldKind::Text => match (raw, field.default) {
                (Some(v), _) if is_truthy(v) => Some(v.clone()),
                (_, Some(default)) => Some(Value::String(default.to_string())),
                (Some(Value::Null), None) | (None, None) => None,
                (Some(v), None) => Some(v.clone()),
            },
        };

        if let Some(value) = value {
            row.insert(field.column.to_string(), value);
        }
    }
    row
}

/// Numeric coercion for create payloads. Falsy or unparseable input is absent.
pub fn coerce_number(value: &Value) -> Option<Number> {
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::Number(n) => n.as_f64().and_then(to_json_number),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(to_json_number),
        Value::Bool(true) => Some(Number::from(1)),
        _ => None,
    }
}

/// Falsy values (`null`, `false`, `0`, `""`) read as `""`; other scalars are
/// stringified.
fn read_text(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(s)) => s.clone(),
        Some(v) if is_truthy(v) => v.to_string(),
        _ => String::new(),
    }
}

fn read_number(raw: Option<&Value>) -> Number {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.and_then(to_json_number).unwrap_or_else(|| Number::from(0))
}

/// Integral values become JSON integers so `25000` never reads back as `25000.0`.
fn to_json_number(f: f64) -> Option<Number> {
    if !f.is_finite() {
        return None;
    }
    if f.fract() == 0.0 && f.abs() < MAX_EXACT_INT {
        Some(Number::from(f as i64))
    } else {
        Number::from_f64(f)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{COMPANY, CONTACT, PROJECT, TASK};
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn map_row_defaults_every_field() {
        let mapped = map_row(&PROJECT, &Row::new());
        assert_eq!(mapped.0.len(), PROJECT.fields.len());
        assert_eq!(mapped.get("name"), Some(&json!("")));
        assert_eq!(mapped.get("pipelineValue"), Some(&json!(0)));
        assert!(mapped.0.values().all(|v| !v.is_null()));
    }

    #[test]
    fn map_row_renames_columns() {
        let mapped = map_row(
            &TASK,
            &row(json!({
                "task_name": "Intro call",
                "due_date": "2024-05-01",
                "created_at": "2024-04-01T10:00:00Z",
                "company_id": "abc"
            })),
        );
        assert_eq!(mapped.text("name"), "Intro call");
        assert_eq!(mapped.text("dueDate"), "2024-05-01");
        assert_eq!(mapped.text("createdAt"), "2024-04-01T10:00:00Z");
        assert!(mapped.get("company_id").is_none());
    }

    #[test]
    fn map_row_nulls_become_defaults() {
        let mapped = map_row(
            &COMPANY,
            &row(json!({"name": null, "total_pipeline": null, "total_revenue": 1200.5})),
        );
        assert_eq!(mapped.get("name"), Some(&json!("")));
        assert_eq!(mapped.get("totalPipeline"), Some(&json!(0)));
        assert_eq!(mapped.get("totalRevenue"), Some(&json!(1200.5)));
    }

    #[test]
    fn map_row_falsy_text_reads_empty() {
        let mapped = map_row(
            &CONTACT,
            &row(json!({"name": 0, "role": false, "email": "", "phone": 5551234, "tags": true})),
        );
        assert_eq!(mapped.text("name"), "");
        assert_eq!(mapped.text("role"), "");
        assert_eq!(mapped.text("email"), "");
        assert_eq!(mapped.text("phone"), "5551234");
        assert_eq!(mapped.text("tags"), "true");
    }

    #[test]
    fn map_row_normalizes_integral_floats() {
        let mapped = map_row(&PROJECT, &row(json!({"pipeline_value": 25000.0})));
        assert_eq!(mapped.get("pipelineValue"), Some(&json!(25000)));
    }

    #[test]
    fn to_row_coerces_numeric_strings() {
        let out = to_row(&PROJECT, &json!({"name": "P", "pipelineValue": "25000"}));
        assert_eq!(out.get("pipeline_value"), Some(&json!(25000)));
        assert_eq!(out.get("name"), Some(&json!("P")));
    }

    #[test]
    fn to_row_drops_falsy_numbers() {
        let out = to_row(
            &PROJECT,
            &json!({"pipelineValue": 0, "actualRevenue": ""}),
        );
        assert!(out.get("pipeline_value").is_none());
        assert!(out.get("actual_revenue").is_none());
    }

    #[test]
    fn to_row_drops_unparseable_numbers() {
        let out = to_row(&COMPANY, &json!({"totalPipeline": "lots"}));
        assert!(out.get("total_pipeline").is_none());
    }

    #[test]
    fn to_row_applies_task_defaults() {
        let out = to_row(&TASK, &json!({"name": "Follow up", "status": ""}));
        assert_eq!(out.get("status"), Some(&json!("Not Started")));
        assert_eq!(out.get("type"), Some(&json!("Task")));
    }

    #[test]
    fn to_row_task_name_alias_wins() {
        let out = to_row(&TASK, &json!({"taskName": "From alias", "name": "From name"}));
        assert_eq!(out.get("task_name"), Some(&json!("From alias")));

        let out = to_row(&TASK, &json!({"taskName": "", "name": "From name"}));
        assert_eq!(out.get("task_name"), Some(&json!("From name")));
    }

    #[test]
    fn to_row_ignores_read_only_and_unknown_fields() {
        let out = to_row(
            &TASK,
            &json!({"name": "T", "createdAt": "yesterday", "bogus": 1}),
        );
        assert!(out.get("created_at").is_none());
        assert!(out.get("bogus").is_none());
    }

    #[test]
    fn to_row_keeps_empty_text_but_drops_missing() {
        let out = to_row(&COMPANY, &json!({"name": "", "notes": null}));
        assert_eq!(out.get("name"), Some(&json!("")));
        assert!(out.get("notes").is_none());
        assert!(out.get("type").is_none());
    }

    #[test]
    fn to_row_non_object_payload_is_empty() {
        assert!(to_row(&COMPANY, &json!("nope")).is_empty());
    }

    #[test]
    fn coerce_number_cases() {
        assert_eq!(coerce_number(&json!("  42 ")), Some(Number::from(42)));
        assert_eq!(coerce_number(&json!(1.5)), Number::from_f64(1.5));
        assert_eq!(coerce_number(&json!("0")), Some(Number::from(0)));
        assert_eq!(coerce_number(&json!(0)), None);
        assert_eq!(coerce_number(&json!(null)), None);
        assert_eq!(coerce_number(&json!(false)), None);
        assert_eq!(coerce_number(&json!("abc")), None);
    }
}
