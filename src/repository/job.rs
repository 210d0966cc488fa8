//! Booked jobs, from scheduling through invoicing.

use crate::domain::Domain;
use crate::repository::filters::FilterFields;
use crate::repository::query::SortDirection;
use crate::repository::{ListingQuery, ListingRepository};

pub struct JobQuery;

pub type JobRepository<'a, P> = ListingRepository<'a, P, JobQuery>;

impl ListingQuery for JobQuery {
    const DOMAIN: Domain = Domain::Job;
    const FIELDS: FilterFields = FilterFields {
        global: &["first_name", "last_name", "email", "sms_number"],
        status: Some("job_status"),
        service_provider: Some("service_provider_id"),
        account_type: Some("account_type"),
        source: Some("how_did_you_hear"),
        resident: &["first_name", "last_name"],
        address: &["property_address"],
        account_name: &["company_name"],
        quote_number: Some("quote_number"),
        invoice_number: Some("invoice_number"),
        recommendation: &["recommendation"],
        price: Some("job_total"),
        date: Some("date_booked"),
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
        "date_booked",
        "date_job_required_by",
        "job_total",
        "invoice_number",
        "service_provider",
    ];
    const ORDER_BY: (&'static str, SortDirection) = ("date_booked", SortDirection::Desc);
}
