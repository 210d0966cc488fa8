use chrono::FixedOffset;

use crate::mapper::{MappingTable, RowMapper};

pub static INQUIRY_MAPPING: MappingTable = MappingTable {
    fields: &[
        ("id", "id"),
        ("first_name", "firstName"),
        ("last_name", "lastName"),
        ("email", "email"),
        ("sms_number", "sms"),
        ("address", "address"),
        ("suburb", "suburb"),
        ("inquiry_status", "status"),
        ("created_at", "created"),
        ("service_type", "service"),
        ("how_did_you_hear", "source"),
        ("account_type", "accountType"),
        ("company_name", "accountName"),
        ("service_provider.name", "serviceman"),
    ],
    timestamp_fields: &["created_at"],
    currency_fields: &[],
    id_target: "id",
    first_name_target: "firstName",
    last_name_target: "lastName",
    status_target: "status",
    meta_targets: &["email", "sms", "address", "suburb"],
};

pub struct InquiryMapper {
    offset: FixedOffset,
}

impl InquiryMapper {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl RowMapper for InquiryMapper {
    fn table(&self) -> &'static MappingTable {
        &INQUIRY_MAPPING
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}
