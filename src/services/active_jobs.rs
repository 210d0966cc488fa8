use chrono::FixedOffset;

use crate::dto::listing::{ListingPage, ListingRequest};
use crate::mapper::ActiveJobMapper;
use crate::repository::{ActiveJobRepository, QueryPort};
use crate::services::ServiceResult;
use crate::services::listing::load_listing;

/// Lists jobs currently in progress.
pub fn fetch_active_jobs<P>(
    port: &P,
    reference_offset: FixedOffset,
    request: &ListingRequest,
) -> ServiceResult<ListingPage>
where
    P: QueryPort + Sync + ?Sized,
{
    let repo = ActiveJobRepository::new(port, reference_offset);
    load_listing(&repo, &ActiveJobMapper::new(reference_offset), request)
}
