//! Fetch pipeline shared by every listing tab.

use std::thread;

use validator::Validate;

use crate::dto::listing::{ListingPage, ListingRequest};
use crate::mapper::RowMapper;
use crate::normalizer::normalize_keys;
use crate::repository::ListingReader;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceResult;

/// Number of pages for `total_count` rows, never less than one.
pub fn total_pages(total_count: usize, limit: usize) -> usize {
    total_count.div_ceil(limit.max(1)).max(1)
}

/// Runs the page and count queries concurrently, then normalizes and maps
/// the page.
pub fn load_listing<R, M>(repo: &R, mapper: &M, request: &ListingRequest) -> ServiceResult<ListingPage>
where
    R: ListingReader + Sync + ?Sized,
    M: RowMapper + ?Sized,
{
    request.validate()?;
    let filters = &request.filters;

    let (records, total) = thread::scope(|scope| {
        let count = scope.spawn(|| repo.count(filters));
        let records = repo.fetch_page(filters, request.limit, request.offset);
        let total = count.join().unwrap_or_else(|_| {
            Err(RepositoryError::Unexpected(
                "count query panicked".to_string(),
            ))
        });
        (records, total)
    });

    let records = records.map_err(|err| {
        log::error!("Failed to fetch listing page: {err}");
        err
    })?;
    let total_count = total.map_err(|err| {
        log::error!("Failed to count listing rows: {err}");
        err
    })?;

    let rows = mapper.map_rows(&normalize_keys(&records));

    Ok(ListingPage {
        rows,
        total_count,
        total_pages: total_pages(total_count, request.limit),
    })
}
