//! Display-ready rows consumed by the table renderer.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Flat output of a mapper: one entry per declared target key.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MappedRecord(BTreeMap<&'static str, Value>);

impl MappedRecord {
    pub fn insert(&mut self, target: &'static str, value: Value) {
        self.0.insert(target, value);
    }

    pub fn get(&self, target: &str) -> Option<&Value> {
        self.0.get(target)
    }

    /// Removes a value, leaving `Null` for keys that were never mapped.
    pub fn take(&mut self, target: &str) -> Value {
        self.0.remove(target).unwrap_or(Value::Null)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (&'static str, Value)> {
        self.0.into_iter()
    }
}

/// Row shown in a listing table. Built fresh per fetch and never mutated.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RowViewModel {
    /// `#<record id>`, or `None` when the backend id is missing.
    pub id: Option<String>,
    /// First and last name joined by a single space.
    pub client: Option<String>,
    pub status: Option<String>,
    /// Domain-specific scalar columns keyed by target name.
    #[serde(flatten)]
    pub fields: BTreeMap<&'static str, Value>,
    /// Contact details and other secondary values.
    pub meta: BTreeMap<&'static str, Value>,
}

impl RowViewModel {
    /// Resolves a column key: `id`, `client`, `status`, a field target or
    /// `meta.<target>`.
    pub fn value(&self, key: &str) -> Option<Value> {
        match key {
            "id" => self.id.clone().map(Value::String),
            "client" => self.client.clone().map(Value::String),
            "status" => self.status.clone().map(Value::String),
            _ => match key.strip_prefix("meta.") {
                Some(meta_key) => self.meta.get(meta_key).cloned(),
                None => self
                    .fields
                    .get(key)
                    .or_else(|| self.meta.get(key))
                    .cloned(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn value_resolves_top_level_fields_and_meta() {
        let mut row = RowViewModel {
            id: Some("#7".into()),
            client: Some("Ada Lovelace".into()),
            ..RowViewModel::default()
        };
        row.fields.insert("quoteTotal", json!(10.5));
        row.meta.insert("email", json!("ada@example.com"));

        assert_eq!(row.value("id"), Some(json!("#7")));
        assert_eq!(row.value("quoteTotal"), Some(json!(10.5)));
        assert_eq!(row.value("meta.email"), Some(json!("ada@example.com")));
        assert_eq!(row.value("email"), Some(json!("ada@example.com")));
        assert_eq!(row.value("status"), None);
    }
}
