//! Backend records before and after key normalization.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::normalizer::normalize_key;

/// Record exactly as the backend returned it.
pub type RawRecord = Map<String, Value>;

/// Record whose top-level keys are in canonical snake_case.
///
/// Only [`crate::normalizer`] constructs these, so mappers can rely on the
/// key shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedRecord(Map<String, Value>);

impl NormalizedRecord {
    pub(crate) fn from_normalized(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Resolves a dotted path into nested relations.
    ///
    /// Nested keys are not normalized in storage, so each segment below the
    /// top level is matched by its normalized form. Any missing hop yields
    /// `None`.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.0.get(segments.next()?)?;
        for segment in segments {
            let object = current.as_object()?;
            current = match object.get(segment) {
                Some(value) => value,
                None => object
                    .iter()
                    .find(|(key, _)| normalize_key(key) == segment)
                    .map(|(_, value)| value)?,
            };
        }
        Some(current)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::normalizer::normalize_record;

    fn record(value: Value) -> NormalizedRecord {
        match value {
            Value::Object(map) => normalize_record(&map),
            _ => unreachable!("test fixtures are objects"),
        }
    }

    #[test]
    fn lookup_walks_nested_relations() {
        let r = record(json!({
            "Service_Provider": {"Contact Info": {"First_Name": "Dana"}}
        }));
        assert_eq!(
            r.lookup("service_provider.contact_info.first_name"),
            Some(&json!("Dana"))
        );
    }

    #[test]
    fn lookup_degrades_on_missing_relation() {
        let r = record(json!({"service_provider": null, "id": 3}));
        assert_eq!(r.lookup("service_provider.first_name"), None);
        assert_eq!(r.lookup("company.name"), None);
        assert_eq!(r.lookup("id"), Some(&json!(3)));
    }
}
