use chrono::FixedOffset;
use serde_json::Value;

use crate::domain::row::{MappedRecord, RowViewModel};
use crate::mapper::{MappingTable, RowMapper, shape_with};

pub static PAYMENT_MAPPING: MappingTable = MappingTable {
    fields: &[
        ("id", "id"),
        ("first_name", "firstName"),
        ("last_name", "lastName"),
        ("email", "email"),
        ("sms_number", "sms"),
        ("property_address", "address"),
        ("payment_status", "status"),
        ("invoice_number", "invoiceNumber"),
        ("invoice_date", "invoiceDate"),
        ("due_date", "dueDate"),
        ("invoice_total", "invoiceTotal"),
        ("amount_paid", "amountPaid"),
        ("company_name", "accountName"),
        ("xero_invoice_id", "xeroInvoiceId"),
    ],
    timestamp_fields: &["invoice_date", "due_date"],
    currency_fields: &["invoice_total", "amount_paid"],
    id_target: "id",
    first_name_target: "firstName",
    last_name_target: "lastName",
    status_target: "status",
    meta_targets: &["email", "sms", "address", "xeroInvoiceId"],
};

pub struct PaymentMapper {
    offset: FixedOffset,
}

impl PaymentMapper {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl RowMapper for PaymentMapper {
    fn table(&self) -> &'static MappingTable {
        &PAYMENT_MAPPING
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Adds the outstanding `balanceDue` next to the invoice amounts.
    fn shape_row(&self, mapped: MappedRecord) -> RowViewModel {
        let total = mapped.get("invoiceTotal").and_then(Value::as_f64).unwrap_or(0.0);
        let paid = mapped.get("amountPaid").and_then(Value::as_f64).unwrap_or(0.0);
        let mut row = shape_with(self.table(), mapped);
        let balance = ((total - paid) * 100.0).round() / 100.0;
        row.fields.insert("balanceDue", Value::from(balance));
        row
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::format::reference_offset;
    use crate::mapper::test_support::record;

    #[test]
    fn balance_due_is_derived_from_totals() {
        let mapper = PaymentMapper::new(reference_offset(600));
        let rows = mapper.map_rows(&[record(json!({
            "id": 5,
            "Invoice_Total": "$1,200.50",
            "amount_paid": 200.25,
            "payment_status": "Partially Paid"
        }))]);
        assert_eq!(rows[0].fields.get("balanceDue"), Some(&json!(1000.25)));
        assert_eq!(rows[0].fields.get("invoiceTotal"), Some(&json!(1200.5)));
        assert_eq!(rows[0].meta.get("xeroInvoiceId"), Some(&Value::Null));
    }
}
