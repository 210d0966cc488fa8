use chrono::FixedOffset;

use crate::mapper::{MappingTable, RowMapper};

pub static QUOTE_MAPPING: MappingTable = MappingTable {
    fields: &[
        ("id", "id"),
        ("first_name", "firstName"),
        ("last_name", "lastName"),
        ("email", "email"),
        ("sms_number", "sms"),
        ("property_address", "address"),
        ("quote_status", "status"),
        ("quote_number", "quoteNumber"),
        ("quote_date", "quoteDate"),
        ("date_quoted_accepted", "dateQuotedAccepted"),
        ("quote_total", "quoteTotal"),
        ("account_type", "accountType"),
        ("company_name", "accountName"),
        ("service_provider.name", "serviceman"),
    ],
    timestamp_fields: &["quote_date", "date_quoted_accepted"],
    currency_fields: &["quote_total"],
    id_target: "id",
    first_name_target: "firstName",
    last_name_target: "lastName",
    status_target: "status",
    meta_targets: &["email", "sms", "address", "accountName"],
};

pub struct QuoteMapper {
    offset: FixedOffset,
}

impl QuoteMapper {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl RowMapper for QuoteMapper {
    fn table(&self) -> &'static MappingTable {
        &QUOTE_MAPPING
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}
