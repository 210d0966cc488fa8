//! Declarative mapping from normalized records to display rows.
//!
//! Every domain declares a [`MappingTable`]. A source key listed in
//! `timestamp_fields` is rendered as a display date, one listed in
//! `currency_fields` is coerced to a number, and anything else is copied
//! as is. Each declared target is always present in the output.

use chrono::FixedOffset;
use serde_json::{Number, Value};

use crate::domain::format::{currency_value, timestamp_display};
use crate::domain::record::NormalizedRecord;
use crate::domain::row::{MappedRecord, RowViewModel};

pub mod active_job;
pub mod inquiry;
pub mod job;
pub mod payment;
pub mod quote;

pub use active_job::ActiveJobMapper;
pub use inquiry::InquiryMapper;
pub use job::JobMapper;
pub use payment::PaymentMapper;
pub use quote::QuoteMapper;

#[derive(Debug)]
pub struct MappingTable {
    /// `(source, target)` pairs. Sources may dot into nested relations.
    pub fields: &'static [(&'static str, &'static str)],
    /// Sources holding epoch seconds.
    pub timestamp_fields: &'static [&'static str],
    /// Sources holding money amounts.
    pub currency_fields: &'static [&'static str],
    pub id_target: &'static str,
    pub first_name_target: &'static str,
    pub last_name_target: &'static str,
    pub status_target: &'static str,
    /// Targets nested under `meta` in the row.
    pub meta_targets: &'static [&'static str],
}

impl MappingTable {
    /// Every target key a mapped record carries.
    pub fn targets(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|(_, target)| *target)
    }
}

fn number(value: f64) -> Value {
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or_else(|| Value::from(0))
}

/// Converts one source value according to its declared category.
fn convert(table: &MappingTable, source: &str, value: Option<&Value>, offset: FixedOffset) -> Value {
    if table.timestamp_fields.iter().any(|f| *f == source) {
        return value
            .and_then(|v| timestamp_display(v, offset))
            .map(Value::String)
            .unwrap_or(Value::Null);
    }
    if table.currency_fields.iter().any(|f| *f == source) {
        return number(value.map(currency_value).unwrap_or(0.0));
    }
    value.cloned().unwrap_or(Value::Null)
}

/// Applies the table to a record.
pub fn map_with(table: &MappingTable, record: &NormalizedRecord, offset: FixedOffset) -> MappedRecord {
    let mut mapped = MappedRecord::default();
    for (source, target) in table.fields {
        let value = convert(table, source, record.lookup(source), offset);
        mapped.insert(*target, value);
    }
    mapped
}

fn display_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Composes the final row from a mapped record.
pub fn shape_with(table: &MappingTable, mut mapped: MappedRecord) -> RowViewModel {
    let raw_id = mapped.take(table.id_target);
    let id = if is_falsy(&raw_id) {
        None
    } else {
        display_text(raw_id).map(|id| format!("#{id}"))
    };

    let first = display_text(mapped.take(table.first_name_target)).unwrap_or_default();
    let last = display_text(mapped.take(table.last_name_target)).unwrap_or_default();
    let client = format!("{} {}", first.trim(), last.trim()).trim().to_string();
    let client = (!client.is_empty()).then_some(client);

    let status = display_text(mapped.take(table.status_target));

    let mut row = RowViewModel {
        id,
        client,
        status,
        ..RowViewModel::default()
    };
    for target in table.meta_targets {
        row.meta.insert(*target, mapped.take(target));
    }
    row.fields.extend(mapped.into_entries());
    row
}

/// Mapper for one listing domain.
pub trait RowMapper {
    fn table(&self) -> &'static MappingTable;

    /// Offset timestamps are displayed in.
    fn offset(&self) -> FixedOffset;

    fn map_row(&self, record: &NormalizedRecord) -> MappedRecord {
        map_with(self.table(), record, self.offset())
    }

    fn shape_row(&self, mapped: MappedRecord) -> RowViewModel {
        shape_with(self.table(), mapped)
    }

    fn map_rows(&self, records: &[NormalizedRecord]) -> Vec<RowViewModel> {
        records
            .iter()
            .map(|record| self.shape_row(self.map_row(record)))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::Value;

    use crate::domain::record::NormalizedRecord;
    use crate::normalizer::normalize_record;

    pub fn record(value: Value) -> NormalizedRecord {
        match value {
            Value::Object(map) => normalize_record(&map),
            _ => unreachable!("test fixtures are objects"),
        }
    }
}
