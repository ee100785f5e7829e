// src/shared/api/listing.rs
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::shared::error::ApiError;

/// Query-string parameters accepted by every list endpoint. `spec` is a JSON
/// document filtering the collection; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub spec: Option<String>,
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

/// Parameters accepted by every count endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CountQuery {
    pub spec: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Store-level find parameters: filter document, pagination and sort.
/// `skip`/`limit` of 0 mean "no skip"/"no limit".
#[derive(Debug, Default, Clone)]
pub struct ListParams {
    pub filter: Option<Value>,
    pub skip: u64,
    pub limit: i64,
    pub sort: Vec<(String, SortOrder)>,
}

impl ListQuery {
    pub fn into_params(self, default_sort: &[(&str, SortOrder)]) -> Result<ListParams, ApiError> {
        Ok(ListParams {
            filter: parse_spec(self.spec.as_deref())?,
            skip: self.skip.unwrap_or(0),
            limit: self.limit.unwrap_or(0),
            sort: default_sort
                .iter()
                .map(|(field, order)| (field.to_string(), *order))
                .collect(),
        })
    }
}

impl CountQuery {
    pub fn into_filter(self) -> Result<Option<Value>, ApiError> {
        parse_spec(self.spec.as_deref())
    }
}

fn parse_spec(spec: Option<&str>) -> Result<Option<Value>, ApiError> {
    match spec {
        None | Some("") => Ok(None),
        Some(raw) => serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| ApiError::invalid(format!("Invalid spec document: {e}."))),
    }
}

/// Validate a path identifier, rejecting malformed UUIDs with 415 as the API
/// contract requires.
pub fn check_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::unsupported(format!("Wrong id format {id}.")))
}

/// Resolve a dotted path (e.g. `metadata.title`) inside a serialized entity.
pub fn value_at_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Minimal filter matcher used by the in-memory store adapters: top-level
/// keys are dotted paths compared for equality; `$ne` and `$in` are the only
/// supported operators.
pub fn matches_filter(entity: &Value, filter: &Value) -> bool {
    let Some(conditions) = filter.as_object() else {
        return true;
    };
    conditions.iter().all(|(path, expected)| {
        let actual = value_at_path(entity, path);
        match expected.as_object() {
            Some(operator) if operator.contains_key("$ne") => {
                actual != operator.get("$ne")
            }
            Some(operator) if operator.contains_key("$in") => operator["$in"]
                .as_array()
                .map(|choices| actual.map(|a| choices.contains(a)).unwrap_or(false))
                .unwrap_or(false),
            _ => actual == Some(expected),
        }
    })
}

/// Ordering used by the in-memory adapters when sorting serialized entities.
pub fn compare_values(left: Option<&Value>, right: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a
                .as_f64()
                .partial_cmp(&b.as_f64())
                .unwrap_or(Ordering::Equal),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            _ => Ordering::Equal,
        },
    }
}

/// Apply sort, skip and limit to serialized entities (in-memory adapters).
pub fn apply_listing(mut entities: Vec<Value>, params: &ListParams) -> Vec<Value> {
    if let Some(filter) = &params.filter {
        entities.retain(|entity| matches_filter(entity, filter));
    }
    for (field, order) in params.sort.iter().rev() {
        entities.sort_by(|a, b| {
            let ordering = compare_values(value_at_path(a, field), value_at_path(b, field));
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }
    let skipped = entities.into_iter().skip(params.skip as usize);
    if params.limit > 0 {
        skipped.take(params.limit as usize).collect()
    } else {
        skipped.collect()
    }
}
