use chrono::FixedOffset;

use crate::mapper::{MappingTable, RowMapper};

pub static JOB_MAPPING: MappingTable = MappingTable {
    fields: &[
        ("id", "id"),
        ("first_name", "firstName"),
        ("last_name", "lastName"),
        ("email", "email"),
        ("sms_number", "sms"),
        ("property_address", "address"),
        ("job_status", "status"),
        ("service_type", "service"),
        ("date_booked", "dateBooked"),
        ("date_job_required_by", "requiredBy"),
        ("job_total", "jobTotal"),
        ("invoice_number", "invoiceNumber"),
        ("service_provider.name", "serviceman"),
    ],
    timestamp_fields: &["date_booked", "date_job_required_by"],
    currency_fields: &["job_total"],
    id_target: "id",
    first_name_target: "firstName",
    last_name_target: "lastName",
    status_target: "status",
    meta_targets: &["email", "sms", "address"],
};

pub struct JobMapper {
    offset: FixedOffset,
}

impl JobMapper {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl RowMapper for JobMapper {
    fn table(&self) -> &'static MappingTable {
        &JOB_MAPPING
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}
