use chrono::FixedOffset;

use crate::mapper::{MappingTable, RowMapper};

pub static ACTIVE_JOB_MAPPING: MappingTable = MappingTable {
    fields: &[
        ("id", "id"),
        ("first_name", "firstName"),
        ("last_name", "lastName"),
        ("email", "email"),
        ("sms_number", "sms"),
        ("property_address", "address"),
        ("job_status", "status"),
        ("service_type", "service"),
        ("date_started", "dateStarted"),
        ("date_booked", "dateBooked"),
        ("job_total", "jobTotal"),
        ("recommendation", "recommendation"),
        ("service_provider.name", "serviceman"),
    ],
    timestamp_fields: &["date_started", "date_booked"],
    currency_fields: &["job_total"],
    id_target: "id",
    first_name_target: "firstName",
    last_name_target: "lastName",
    status_target: "status",
    meta_targets: &["email", "sms", "address"],
};

pub struct ActiveJobMapper {
    offset: FixedOffset,
}

impl ActiveJobMapper {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl RowMapper for ActiveJobMapper {
    fn table(&self) -> &'static MappingTable {
        &ACTIVE_JOB_MAPPING
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}
