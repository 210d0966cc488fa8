//! Canonical snake_case keys for backend records.
//!
//! The hosted backend is inconsistent about key casing and spacing between
//! objects and between API versions (`Date_Quoted_Accepted`,
//! `date quoted accepted`, `DATE__QUOTED_ACCEPTED`). Mappers only ever see the
//! canonical form produced here.

use serde_json::Map;

use crate::domain::record::{NormalizedRecord, RawRecord};

/// Unicode lower-casing used for case-insensitive text matching.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Trims, lower-cases, turns whitespace runs into `_` and collapses repeated
/// underscores.
pub fn normalize_key(key: &str) -> String {
    let lowered = key.trim().to_lowercase();
    let mut normalized = String::with_capacity(lowered.len());
    let mut previous_underscore = false;
    for ch in lowered.chars() {
        let ch = if ch.is_whitespace() { '_' } else { ch };
        if ch == '_' {
            if previous_underscore {
                continue;
            }
            previous_underscore = true;
        } else {
            previous_underscore = false;
        }
        normalized.push(ch);
    }
    normalized
}

/// Normalizes the top-level keys of one record. Values are left untouched.
pub fn normalize_record(record: &RawRecord) -> NormalizedRecord {
    let mut normalized = Map::with_capacity(record.len());
    for (key, value) in record {
        normalized.insert(normalize_key(key), value.clone());
    }
    NormalizedRecord::from_normalized(normalized)
}

/// Normalizes a batch, preserving order and length.
pub fn normalize_keys(records: &[RawRecord]) -> Vec<NormalizedRecord> {
    records.iter().map(normalize_record).collect()
}
