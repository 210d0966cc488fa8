//! Query port over records held in memory.
//!
//! Used for fixtures and demos. Field names are resolved case-insensitively
//! through the normalizer, the way the hosted backend resolves them.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::domain::Domain;
use crate::domain::format::parse_amount;
use crate::domain::record::RawRecord;
use crate::normalizer::{fold_case, normalize_key};
use crate::repository::QueryPort;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::query::{
    PageWindow, Predicate, QuerySpec, Scalar, SortDirection, project_record,
};

#[derive(Debug, Default)]
pub struct InMemoryQueryPort {
    records: RwLock<HashMap<Domain, Vec<RawRecord>>>,
}

impl InMemoryQueryPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends records to a domain, returning how many were stored.
    pub fn insert_records(&self, domain: Domain, records: Vec<RawRecord>) -> RepositoryResult<usize> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| RepositoryError::Unexpected("record store lock poisoned".to_string()))?;
        let inserted = records.len();
        guard.entry(domain).or_default().extend(records);
        Ok(inserted)
    }

    fn matching(&self, spec: &QuerySpec) -> RepositoryResult<Vec<RawRecord>> {
        let guard = self
            .records
            .read()
            .map_err(|_| RepositoryError::Unexpected("record store lock poisoned".to_string()))?;
        Ok(guard
            .get(&spec.domain())
            .map(|records| {
                records
                    .iter()
                    .filter(|record| matches(spec.predicate(), record))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

impl QueryPort for InMemoryQueryPort {
    fn execute(
        &self,
        spec: &QuerySpec,
        window: Option<PageWindow>,
    ) -> RepositoryResult<Vec<RawRecord>> {
        let mut records = self.matching(spec)?;

        for order in spec.order().iter().rev() {
            records.sort_by(|a, b| {
                let ordering = compare_values(resolve(a, &order.field), resolve(b, &order.field));
                match order.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let records = match window {
            Some(PageWindow { limit, offset }) => {
                records.into_iter().skip(offset).take(limit).collect()
            }
            None => records,
        };

        Ok(records
            .into_iter()
            .map(|record| project_record(record, spec.projection()))
            .collect())
    }

    fn count(&self, spec: &QuerySpec) -> RepositoryResult<usize> {
        Ok(self.matching(spec)?.len())
    }
}

/// Follows a dotted field path, matching each key by its normalized form.
fn resolve<'a>(record: &'a RawRecord, path: &str) -> Option<&'a Value> {
    let mut object = record;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        let value = object
            .get(segment)
            .or_else(|| {
                object
                    .iter()
                    .find(|(key, _)| normalize_key(key) == segment)
                    .map(|(_, value)| value)
            })?;
        if segments.peek().is_none() {
            return Some(value);
        }
        object = value.as_object()?;
    }
    None
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}


fn compare_scalar(value: &Value, scalar: &Scalar) -> Option<Ordering> {
    match scalar {
        Scalar::Int(i) => parse_amount(value)?.partial_cmp(&(*i as f64)),
        Scalar::Float(f) => parse_amount(value)?.partial_cmp(f),
        Scalar::Text(t) => Some(as_text(value)?.as_str().cmp(t.as_str())),
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a.filter(|v| !v.is_null()), b.filter(|v| !v.is_null())) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match (parse_amount(a), parse_amount(b)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => as_text(a).cmp(&as_text(b)),
        },
    }
}

fn matches(predicate: &Predicate, record: &RawRecord) -> bool {
    match predicate {
        Predicate::All(clauses) => clauses.iter().all(|c| matches(c, record)),
        Predicate::Any(clauses) => clauses.is_empty() || clauses.iter().any(|c| matches(c, record)),
        Predicate::In { field, values } => resolve(record, field)
            .and_then(as_text)
            .is_some_and(|text| values.iter().any(|v| *v == text)),
        Predicate::Like { field, needle } => resolve(record, field)
            .and_then(as_text)
            .is_some_and(|text| fold_case(&text).contains(&fold_case(needle))),
        Predicate::Gte { field, value } => resolve(record, field)
            .and_then(|v| compare_scalar(v, value))
            .is_some_and(Ordering::is_ge),
        Predicate::Lte { field, value } => resolve(record, field)
            .and_then(|v| compare_scalar(v, value))
            .is_some_and(Ordering::is_le),
        Predicate::IsNull { field } => is_blank(resolve(record, field)),
        Predicate::NotNull { field } => !is_blank(resolve(record, field)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test fixtures are objects"),
        }
    }

    fn port() -> InMemoryQueryPort {
        let port = InMemoryQueryPort::new();
        port.insert_records(
            Domain::Job,
            vec![
                raw(json!({"ID": 1, "First_Name": "Ann", "job_total": "120", "date_booked": 30})),
                raw(json!({"id": 2, "first_name": "Bob", "job_total": 80, "date_booked": 10})),
                raw(json!({"id": 3, "first_name": "Cara", "job_total": null, "date_booked": 20})),
            ],
        )
        .unwrap();
        port
    }

    #[test]
    fn filters_sorts_and_windows() {
        let spec = QuerySpec::new(Domain::Job)
            .and_where(Predicate::gte("job_total", Scalar::Float(50.0)))
            .order_by("date_booked", SortDirection::Desc);
        let port = port();

        let page = port
            .execute(&spec, Some(PageWindow { limit: 1, offset: 1 }))
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].get("id"), Some(&json!(2)));
        assert_eq!(port.count(&spec).unwrap(), 2);
    }

    #[test]
    fn field_names_match_case_insensitively() {
        let spec = QuerySpec::new(Domain::Job)
            .and_where(Predicate::like("first_name", "ANN"))
            .select(["id"]);
        let rows = port().execute(&spec, None).unwrap();
        assert_eq!(rows, vec![raw(json!({"ID": 1}))]);
    }

    #[test]
    fn null_checks_treat_blank_as_null() {
        let spec = QuerySpec::new(Domain::Job).and_where(Predicate::is_null("job_total"));
        assert_eq!(port().count(&spec).unwrap(), 1);
        let spec = QuerySpec::new(Domain::Quote).and_where(Predicate::is_null("job_total"));
        assert_eq!(port().count(&spec).unwrap(), 0);
    }
}
