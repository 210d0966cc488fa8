//! Inquiries submitted through the website and phone intake.

use crate::domain::Domain;
use crate::repository::filters::FilterFields;
use crate::repository::query::SortDirection;
use crate::repository::{ListingQuery, ListingRepository};

pub struct InquiryQuery;

pub type InquiryRepository<'a, P> = ListingRepository<'a, P, InquiryQuery>;

impl ListingQuery for InquiryQuery {
    const DOMAIN: Domain = Domain::Inquiry;
    const FIELDS: FilterFields = FilterFields {
        global: &["first_name", "last_name", "email", "sms_number"],
        status: Some("inquiry_status"),
        service_provider: Some("service_provider_id"),
        account_type: Some("account_type"),
        source: Some("how_did_you_hear"),
        resident: &["first_name", "last_name"],
        address: &["address", "suburb"],
        account_name: &["company_name"],
        quote_number: None,
        invoice_number: None,
        recommendation: &[],
        price: None,
        date: Some("created_at"),
    };
    const PROJECTION: &'static [&'static str] = &[
        "id",
        "first_name",
        "last_name",
        "email",
        "sms_number",
        "address",
        "suburb",
        "inquiry_status",
        "service_type",
        "how_did_you_hear",
        "account_type",
        "company_name",
        "created_at",
        "service_provider",
    ];
    const ORDER_BY: (&'static str, SortDirection) = ("created_at", SortDirection::Desc);
}
