use chrono::FixedOffset;

use crate::dto::listing::{ListingPage, ListingRequest};
use crate::mapper::PaymentMapper;
use crate::repository::{PaymentRepository, QueryPort};
use crate::services::ServiceResult;
use crate::services::listing::load_listing;

/// Lists invoiced jobs and their payment state.
pub fn fetch_payments<P>(
    port: &P,
    reference_offset: FixedOffset,
    request: &ListingRequest,
) -> ServiceResult<ListingPage>
where
    P: QueryPort + Sync + ?Sized,
{
    let repo = PaymentRepository::new(port, reference_offset);
    load_listing(&repo, &PaymentMapper::new(reference_offset), request)
}
