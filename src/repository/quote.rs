//! Quotes sent to residents and property managers.

use crate::domain::Domain;
use crate::repository::filters::FilterFields;
use crate::repository::query::SortDirection;
use crate::repository::{ListingQuery, ListingRepository};

pub struct QuoteQuery;

pub type QuoteRepository<'a, P> = ListingRepository<'a, P, QuoteQuery>;

impl ListingQuery for QuoteQuery {
    const DOMAIN: Domain = Domain::Quote;
    const FIELDS: FilterFields = FilterFields {
        global: &["first_name", "last_name", "email", "sms_number"],
        status: Some("quote_status"),
        service_provider: Some("service_provider_id"),
        account_type: Some("account_type"),
        source: Some("how_did_you_hear"),
        resident: &["first_name", "last_name"],
        address: &["property_address"],
        account_name: &["company_name"],
        quote_number: Some("quote_number"),
        invoice_number: None,
        recommendation: &[],
        price: Some("quote_total"),
        date: Some("quote_date"),
    };
    const PROJECTION: &'static [&'static str] = &[
        "id",
        "first_name",
        "last_name",
        "email",
        "sms_number",
        "property_address",
        "quote_status",
        "quote_number",
        "quote_date",
        "date_quoted_accepted",
        "quote_total",
        "account_type",
        "company_name",
        "service_provider",
    ];
    const ORDER_BY: (&'static str, SortDirection) = ("quote_date", SortDirection::Desc);
}
