//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::filter::FilterCriteria;
use crate::domain::record::RawRecord;
use crate::repository::errors::RepositoryResult;
use crate::repository::query::{PageWindow, QuerySpec};
use crate::repository::{ListingReader, QueryPort};

mock! {
    pub Repository {}

    impl ListingReader for Repository {
        fn fetch_page(
            &self,
            filters: &FilterCriteria,
            limit: usize,
            offset: usize,
        ) -> RepositoryResult<Vec<RawRecord>>;
        fn count(&self, filters: &FilterCriteria) -> RepositoryResult<usize>;
    }
}

mock! {
    pub Port {}

    impl QueryPort for Port {
        fn execute(
            &self,
            spec: &QuerySpec,
            window: Option<PageWindow>,
        ) -> RepositoryResult<Vec<RawRecord>>;
        fn count(&self, spec: &QuerySpec) -> RepositoryResult<usize>;
    }
}
