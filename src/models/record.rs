//! Diesel models for backend records stored as JSON text.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};

use crate::domain::Domain;
use crate::domain::record::RawRecord;
use crate::repository::errors::RepositoryError;

#[derive(Insertable)]
#[diesel(table_name = crate::schema::records)]
pub struct NewRecord {
    pub domain: String,
    pub data: String, // JSON object text
}

impl NewRecord {
    pub fn new(domain: Domain, record: &RawRecord) -> Result<Self, RepositoryError> {
        Ok(Self {
            domain: domain.slug().to_string(),
            data: serde_json::to_string(record)?,
        })
    }
}

/// Row shape returned by dynamic page queries.
#[derive(QueryableByName)]
pub struct RecordData {
    #[diesel(sql_type = Text)]
    pub data: String,
}

impl RecordData {
    /// Decodes the stored JSON text into a record.
    pub fn into_record(self) -> Result<RawRecord, RepositoryError> {
        match serde_json::from_str(&self.data)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(RepositoryError::Decode(format!(
                "stored record is not an object: {other}"
            ))),
        }
    }
}

#[derive(QueryableByName)]
pub struct RecordCount {
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}
