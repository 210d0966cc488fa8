use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::filter::FilterCriteria;
use crate::domain::row::RowViewModel;

/// Parameters of one listing fetch.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct ListingRequest {
    #[serde(default)]
    pub filters: FilterCriteria,
    #[validate(range(min = 1))]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

impl ListingRequest {
    pub fn new(filters: FilterCriteria, limit: usize, offset: usize) -> Self {
        Self {
            filters,
            limit,
            offset,
        }
    }

    /// Request for the 1-based `page`, or `None` when its offset does not fit
    /// in `usize`.
    pub fn page(filters: FilterCriteria, limit: usize, page: usize) -> Option<Self> {
        let offset = (page.max(1) - 1).checked_mul(limit)?;
        Some(Self::new(filters, limit, offset))
    }
}

/// One page of display rows plus the totals the paginator needs.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct ListingPage {
    pub rows: Vec<RowViewModel>,
    pub total_count: usize,
    /// Never below 1, even for an empty result.
    pub total_pages: usize,
}
