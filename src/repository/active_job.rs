//! Jobs that have started on site and are not completed yet.

use crate::domain::Domain;
use crate::repository::filters::FilterFields;
use crate::repository::query::{Predicate, SortDirection};
use crate::repository::{ListingQuery, ListingRepository};

pub struct ActiveJobQuery;

pub type ActiveJobRepository<'a, P> = ListingRepository<'a, P, ActiveJobQuery>;

impl ListingQuery for ActiveJobQuery {
    const DOMAIN: Domain = Domain::ActiveJob;
    const FIELDS: FilterFields = FilterFields {
        global: &["first_name", "last_name", "email", "sms_number"],
        status: Some("job_status"),
        service_provider: Some("service_provider_id"),
        account_type: Some("account_type"),
        source: None,
        resident: &["first_name", "last_name"],
        address: &["property_address"],
        account_name: &["company_name"],
        quote_number: None,
        invoice_number: None,
        recommendation: &["recommendation"],
        price: Some("job_total"),
        date: Some("date_started"),
    };
    const PROJECTION: &'static [&'static str] = &[
        "id",
        "first_name",
        "last_name",
        "email",
        "sms_number",
        "property_address",
        "job_status",
        "service_type",
        "date_started",
        "date_booked",
        "job_total",
        "recommendation",
        "service_provider",
    ];
    const ORDER_BY: (&'static str, SortDirection) = ("date_started", SortDirection::Asc);

    fn base_predicate() -> Predicate {
        Predicate::all(vec![
            Predicate::not_null("date_started"),
            Predicate::is_null("date_completed"),
        ])
    }
}
