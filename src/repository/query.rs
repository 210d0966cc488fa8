//! Immutable query specifications handed to a [`super::QueryPort`].
//!
//! Every builder method consumes the spec and returns a new one, so a spec
//! built for one filter set can never leak clauses into another request.

use serde::Serialize;

use crate::domain::Domain;
use crate::domain::record::RawRecord;
use crate::normalizer::normalize_key;

/// Literal compared against a backend field.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Predicate tree. Empty groups are dropped when composed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Predicate {
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
    /// Field equals one of the values.
    In { field: String, values: Vec<String> },
    /// Case-insensitive substring match.
    Like { field: String, needle: String },
    Gte { field: String, value: Scalar },
    Lte { field: String, value: Scalar },
    IsNull { field: String },
    NotNull { field: String },
}

impl Predicate {
    /// Conjunction of the given clauses, flattened and with empty groups removed.
    pub fn all(clauses: Vec<Predicate>) -> Predicate {
        Self::group(clauses, true)
    }

    /// Disjunction of the given clauses, flattened and with empty groups removed.
    pub fn any(clauses: Vec<Predicate>) -> Predicate {
        Self::group(clauses, false)
    }

    fn group(clauses: Vec<Predicate>, conjunction: bool) -> Predicate {
        let mut flat = Vec::with_capacity(clauses.len());
        for clause in clauses {
            match clause {
                Predicate::All(inner) if conjunction => flat.extend(inner),
                Predicate::Any(inner) if !conjunction => flat.extend(inner),
                other if other.is_vacuous() => {}
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            return flat.remove(0);
        }
        if conjunction {
            Predicate::All(flat)
        } else {
            Predicate::Any(flat)
        }
    }

    pub fn is_in(field: impl Into<String>, values: Vec<String>) -> Predicate {
        Predicate::In {
            field: field.into(),
            values,
        }
    }

    pub fn like(field: impl Into<String>, needle: impl Into<String>) -> Predicate {
        Predicate::Like {
            field: field.into(),
            needle: needle.into(),
        }
    }

    pub fn gte(field: impl Into<String>, value: Scalar) -> Predicate {
        Predicate::Gte {
            field: field.into(),
            value,
        }
    }

    pub fn lte(field: impl Into<String>, value: Scalar) -> Predicate {
        Predicate::Lte {
            field: field.into(),
            value,
        }
    }

    pub fn is_null(field: impl Into<String>) -> Predicate {
        Predicate::IsNull {
            field: field.into(),
        }
    }

    pub fn not_null(field: impl Into<String>) -> Predicate {
        Predicate::NotNull {
            field: field.into(),
        }
    }

    /// True for groups that carry no clause at all.
    pub fn is_vacuous(&self) -> bool {
        match self {
            Predicate::All(clauses) | Predicate::Any(clauses) => {
                clauses.iter().all(Predicate::is_vacuous)
            }
            _ => false,
        }
    }

    /// Every field referenced anywhere in the tree.
    pub fn fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Predicate::All(clauses) | Predicate::Any(clauses) => {
                for clause in clauses {
                    clause.collect_fields(out);
                }
            }
            Predicate::In { field, .. }
            | Predicate::Like { field, .. }
            | Predicate::Gte { field, .. }
            | Predicate::Lte { field, .. }
            | Predicate::IsNull { field }
            | Predicate::NotNull { field } => out.push(field),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

/// Limit and offset of a page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: usize,
    pub offset: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuerySpec {
    domain: Domain,
    predicate: Predicate,
    projection: Vec<String>,
    order: Vec<OrderBy>,
}

impl QuerySpec {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            predicate: Predicate::All(Vec::new()),
            projection: Vec::new(),
            order: Vec::new(),
        }
    }

    /// ANDs a clause onto the predicate tree. Vacuous clauses are skipped.
    pub fn and_where(self, clause: Predicate) -> Self {
        if clause.is_vacuous() {
            return self;
        }
        let predicate = Predicate::all(vec![self.predicate, clause]);
        Self { predicate, ..self }
    }

    /// Restricts the returned fields to the given top-level keys.
    pub fn select<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut projection = self.projection;
        projection.extend(fields.into_iter().map(Into::into));
        Self { projection, ..self }
    }

    pub fn order_by(self, field: impl Into<String>, direction: SortDirection) -> Self {
        let mut order = self.order;
        order.push(OrderBy {
            field: field.into(),
            direction,
        });
        Self { order, ..self }
    }

    /// Same predicate tree, without projection or ordering.
    pub fn for_count(&self) -> Self {
        Self {
            domain: self.domain,
            predicate: self.predicate.clone(),
            projection: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn projection(&self) -> &[String] {
        &self.projection
    }

    pub fn order(&self) -> &[OrderBy] {
        &self.order
    }
}

/// Keeps only the projected top-level keys, compared in normalized form.
/// An empty projection keeps everything.
pub fn project_record(record: RawRecord, projection: &[String]) -> RawRecord {
    if projection.is_empty() {
        return record;
    }
    record
        .into_iter()
        .filter(|(key, _)| {
            let key = normalize_key(key);
            projection.iter().any(|field| *field == key)
        })
        .collect()
}
