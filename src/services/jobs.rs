use chrono::FixedOffset;

use crate::dto::listing::{ListingPage, ListingRequest};
use crate::mapper::JobMapper;
use crate::repository::{JobRepository, QueryPort};
use crate::services::ServiceResult;
use crate::services::listing::load_listing;

/// Lists booked jobs matching the filters.
pub fn fetch_jobs<P>(
    port: &P,
    reference_offset: FixedOffset,
    request: &ListingRequest,
) -> ServiceResult<ListingPage>
where
    P: QueryPort + Sync + ?Sized,
{
    let repo = JobRepository::new(port, reference_offset);
    load_listing(&repo, &JobMapper::new(reference_offset), request)
}
