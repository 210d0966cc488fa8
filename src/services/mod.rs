//! Listing services consumed by the dashboard controllers.

use chrono::FixedOffset;

use crate::domain::Domain;
use crate::dto::listing::{ListingPage, ListingRequest};
use crate::repository::QueryPort;

pub mod active_jobs;
pub mod errors;
pub mod inquiries;
pub mod jobs;
pub mod listing;
pub mod payments;
pub mod quotes;

pub use errors::{ServiceError, ServiceResult};

/// Fetches one page of the given domain's listing.
pub fn fetch_listing<P>(
    domain: Domain,
    port: &P,
    reference_offset: FixedOffset,
    request: &ListingRequest,
) -> ServiceResult<ListingPage>
where
    P: QueryPort + Sync + ?Sized,
{
    match domain {
        Domain::Inquiry => inquiries::fetch_inquiries(port, reference_offset, request),
        Domain::Quote => quotes::fetch_quotes(port, reference_offset, request),
        Domain::Job => jobs::fetch_jobs(port, reference_offset, request),
        Domain::Payment => payments::fetch_payments(port, reference_offset, request),
        Domain::ActiveJob => active_jobs::fetch_active_jobs(port, reference_offset, request),
    }
}
