use chrono::FixedOffset;

use crate::dto::listing::{ListingPage, ListingRequest};
use crate::mapper::InquiryMapper;
use crate::repository::{InquiryRepository, QueryPort};
use crate::services::ServiceResult;
use crate::services::listing::load_listing;

/// Lists inquiries matching the filters.
pub fn fetch_inquiries<P>(
    port: &P,
    reference_offset: FixedOffset,
    request: &ListingRequest,
) -> ServiceResult<ListingPage>
where
    P: QueryPort + Sync + ?Sized,
{
    let repo = InquiryRepository::new(port, reference_offset);
    load_listing(&repo, &InquiryMapper::new(reference_offset), request)
}
