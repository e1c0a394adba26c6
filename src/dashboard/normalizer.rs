//! Response shape normalization.
//!
//! List endpoints answer either with an envelope such as
//! `{"total_count": 12, "curriculums": [...]}` or with a bare array.
//! Everything past this module sees only [`Page`].

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Canonical `(total_count, items)` pair for a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub total_count: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            total_count: 0,
            items: Vec::new(),
        }
    }

    /// Keep only the first `n` items. The total count is unchanged.
    pub fn truncated(mut self, n: usize) -> Self {
        self.items.truncate(n);
        self
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Extract a [`Page`] from a raw list response. Never fails.
///
/// Unrecognized shapes degrade to an empty page and are logged as a
/// schema anomaly. Elements that do not decode into `T` are dropped.
pub fn normalize<T: DeserializeOwned>(raw: Option<&Value>, items_key: &str) -> Page<T> {
    let raw = match raw {
        None | Some(Value::Null) => return Page::empty(),
        Some(raw) => raw,
    };

    if let Some(Value::Array(items)) = raw.get(items_key) {
        let total_count = raw
            .get("total_count")
            .and_then(Value::as_u64)
            .unwrap_or(items.len() as u64);
        return Page {
            total_count,
            items: decode_items(items, items_key),
        };
    }

    if let Value::Array(items) = raw {
        return Page {
            total_count: items.len() as u64,
            items: decode_items(items, items_key),
        };
    }

    warn!(
        items_key,
        shape = shape_name(raw),
        "unrecognized list response shape, treating as empty"
    );
    Page::empty()
}

fn decode_items<T: DeserializeOwned>(items: &[Value], items_key: &str) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(items_key, index, "dropping malformed list item: {}", e);
                None
            }
        })
        .collect()
}

fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
