//! Compilation of [`FilterCriteria`] into predicate clauses.
//!
//! Each domain declares which backend field every filter targets. A filter
//! the domain does not declare, or a filter the user left empty, contributes
//! nothing.

use chrono::FixedOffset;

use crate::domain::filter::{FilterCriteria, list_values, number_value, text_value};
use crate::domain::format::{DayBound, day_bound};
use crate::repository::query::{Predicate, Scalar};

/// Backend fields targeted by each filter for one domain.
#[derive(Clone, Copy, Debug, Default)]
pub struct FilterFields {
    /// Fields ORed together by the global search box.
    pub global: &'static [&'static str],
    pub status: Option<&'static str>,
    pub service_provider: Option<&'static str>,
    pub account_type: Option<&'static str>,
    pub source: Option<&'static str>,
    pub resident: &'static [&'static str],
    pub address: &'static [&'static str],
    pub account_name: &'static [&'static str],
    pub quote_number: Option<&'static str>,
    pub invoice_number: Option<&'static str>,
    pub recommendation: &'static [&'static str],
    pub price: Option<&'static str>,
    /// Epoch-seconds field the date range applies to.
    pub date: Option<&'static str>,
}

/// Substring match against any of the candidate fields.
fn text_clause(candidates: &[&str], value: &Option<String>) -> Option<Predicate> {
    let needle = text_value(value)?;
    if candidates.is_empty() {
        return None;
    }
    Some(Predicate::any(
        candidates
            .iter()
            .map(|field| Predicate::like(*field, needle))
            .collect(),
    ))
}

fn single_text_clause(field: Option<&str>, value: &Option<String>) -> Option<Predicate> {
    let field = field?;
    text_clause(&[field], value)
}

fn in_clause(field: Option<&str>, values: &[String]) -> Option<Predicate> {
    let field = field?;
    let values = list_values(values)?;
    Some(Predicate::is_in(field, values))
}

fn price_clauses(field: Option<&str>, filters: &FilterCriteria) -> Vec<Predicate> {
    let Some(field) = field else {
        return Vec::new();
    };
    let mut clauses = Vec::new();
    if let Some(min) = number_value(filters.price_min) {
        clauses.push(Predicate::gte(field, Scalar::Float(min)));
    }
    if let Some(max) = number_value(filters.price_max) {
        clauses.push(Predicate::lte(field, Scalar::Float(max)));
    }
    clauses
}

fn date_clauses(field: Option<&str>, filters: &FilterCriteria, offset: FixedOffset) -> Vec<Predicate> {
    let Some(field) = field else {
        return Vec::new();
    };
    let from = text_value(&filters.date_from).and_then(|s| day_bound(s, DayBound::Start, offset));
    let to = text_value(&filters.date_to).and_then(|s| day_bound(s, DayBound::End, offset));
    let mut clauses = Vec::new();
    if let Some(from) = from {
        clauses.push(Predicate::gte(field, Scalar::Int(from)));
    }
    if let Some(to) = to {
        clauses.push(Predicate::lte(field, Scalar::Int(to)));
    }
    clauses
}

/// Compiles the filter set into a single conjunction for the given fields.
pub fn compile_filters(
    fields: &FilterFields,
    filters: &FilterCriteria,
    offset: FixedOffset,
) -> Predicate {
    let mut clauses: Vec<Predicate> = [
        text_clause(fields.global, &filters.global),
        in_clause(fields.status, &filters.statuses),
        in_clause(fields.service_provider, &filters.service_providers),
        in_clause(fields.account_type, &filters.account_types),
        in_clause(fields.source, &filters.source),
        text_clause(fields.resident, &filters.resident),
        text_clause(fields.address, &filters.address),
        text_clause(fields.account_name, &filters.account_name),
        single_text_clause(fields.quote_number, &filters.quote_number),
        single_text_clause(fields.invoice_number, &filters.invoice_number),
        text_clause(fields.recommendation, &filters.recommendation),
    ]
    .into_iter()
    .flatten()
    .collect();

    clauses.extend(price_clauses(fields.price, filters));
    clauses.extend(date_clauses(fields.date, filters, offset));

    Predicate::all(clauses)
}
