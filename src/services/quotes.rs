use chrono::FixedOffset;

use crate::dto::listing::{ListingPage, ListingRequest};
use crate::mapper::QuoteMapper;
use crate::repository::{QuoteRepository, QueryPort};
use crate::services::ServiceResult;
use crate::services::listing::load_listing;

/// Lists quotes matching the filters.
pub fn fetch_quotes<P>(
    port: &P,
    reference_offset: FixedOffset,
    request: &ListingRequest,
) -> ServiceResult<ListingPage>
where
    P: QueryPort + Sync + ?Sized,
{
    let repo = QuoteRepository::new(port, reference_offset);
    load_listing(&repo, &QuoteMapper::new(reference_offset), request)
}
