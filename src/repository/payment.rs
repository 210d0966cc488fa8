//! Invoiced jobs and their payment state.

use crate::domain::Domain;
use crate::repository::filters::FilterFields;
use crate::repository::query::{Predicate, SortDirection};
use crate::repository::{ListingQuery, ListingRepository};

pub struct PaymentQuery;

pub type PaymentRepository<'a, P> = ListingRepository<'a, P, PaymentQuery>;

impl ListingQuery for PaymentQuery {
    const DOMAIN: Domain = Domain::Payment;
    const FIELDS: FilterFields = FilterFields {
        global: &["first_name", "last_name", "email", "sms_number"],
        status: Some("payment_status"),
        service_provider: Some("service_provider_id"),
        account_type: Some("account_type"),
        source: None,
        resident: &["first_name", "last_name"],
        address: &["property_address"],
        account_name: &["company_name"],
        quote_number: None,
        invoice_number: Some("invoice_number"),
        recommendation: &[],
        price: Some("invoice_total"),
        date: Some("invoice_date"),
    };
    const PROJECTION: &'static [&'static str] = &[
        "id",
        "first_name",
        "last_name",
        "email",
        "sms_number",
        "property_address",
        "payment_status",
        "invoice_number",
        "invoice_date",
        "due_date",
        "invoice_total",
        "amount_paid",
        "company_name",
        "xero_invoice_id",
    ];
    const ORDER_BY: (&'static str, SortDirection) = ("invoice_date", SortDirection::Desc);

    /// Only jobs that have been invoiced show up under payments.
    fn base_predicate() -> Predicate {
        Predicate::not_null("invoice_number")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::FilterCriteria;
    use crate::domain::format::reference_offset;

    #[test]
    fn base_constraint_is_always_present() {
        let empty = PaymentQuery::build_query(&FilterCriteria::default(), reference_offset(0))
            .unwrap();
        assert_eq!(empty.predicate(), &Predicate::not_null("invoice_number"));

        let filters = FilterCriteria {
            invoice_number: Some("INV-77".into()),
            ..FilterCriteria::default()
        };
        let spec = PaymentQuery::build_query(&filters, reference_offset(0)).unwrap();
        assert_eq!(
            spec.predicate(),
            &Predicate::All(vec![
                Predicate::not_null("invoice_number"),
                Predicate::like("invoice_number", "INV-77"),
            ])
        );
    }
}
