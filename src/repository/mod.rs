//! Per-domain listing repositories and the query port they run against.

use std::marker::PhantomData;

use chrono::FixedOffset;

use crate::domain::Domain;
use crate::domain::filter::{FilterCriteria, number_value, text_value};
use crate::domain::format::{DayBound, day_bound};
use crate::domain::record::RawRecord;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::filters::{FilterFields, compile_filters};
use crate::repository::query::{PageWindow, Predicate, QuerySpec, SortDirection};

pub mod active_job;
pub mod errors;
pub mod filters;
pub mod inquiry;
pub mod job;
pub mod memory;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod payment;
pub mod query;
pub mod quote;
pub mod sqlite;

pub use active_job::{ActiveJobQuery, ActiveJobRepository};
pub use inquiry::{InquiryQuery, InquiryRepository};
pub use job::{JobQuery, JobRepository};
pub use memory::InMemoryQueryPort;
pub use payment::{PaymentQuery, PaymentRepository};
pub use quote::{QuoteQuery, QuoteRepository};
pub use sqlite::DieselQueryPort;

/// Backend capable of executing query specs.
pub trait QueryPort {
    /// Returns the matching records, limited to `window` when given.
    fn execute(&self, spec: &QuerySpec, window: Option<PageWindow>)
    -> RepositoryResult<Vec<RawRecord>>;
    /// Counts every record matching the spec's predicate.
    fn count(&self, spec: &QuerySpec) -> RepositoryResult<usize>;
}

/// Read side of a listing tab.
pub trait ListingReader {
    fn fetch_page(
        &self,
        filters: &FilterCriteria,
        limit: usize,
        offset: usize,
    ) -> RepositoryResult<Vec<RawRecord>>;
    fn count(&self, filters: &FilterCriteria) -> RepositoryResult<usize>;
}

/// Domain-specific part of a repository: which fields the filters hit, what
/// gets fetched and in which order.
pub trait ListingQuery {
    const DOMAIN: Domain;
    const FIELDS: FilterFields;
    const PROJECTION: &'static [&'static str];
    const ORDER_BY: (&'static str, SortDirection);

    /// Constraint every record of the tab satisfies regardless of filters.
    fn base_predicate() -> Predicate {
        Predicate::All(Vec::new())
    }

    /// Builds the page spec for the given filters from scratch.
    fn build_query(filters: &FilterCriteria, offset: FixedOffset) -> RepositoryResult<QuerySpec> {
        check_ranges(filters, offset)?;
        let (order_field, direction) = Self::ORDER_BY;
        let spec = QuerySpec::new(Self::DOMAIN)
            .and_where(Self::base_predicate())
            .and_where(compile_filters(&Self::FIELDS, filters, offset))
            .select(Self::PROJECTION.iter().copied())
            .order_by(order_field, direction);
        log::debug!("Built {} query: {:?}", Self::DOMAIN, spec.predicate());
        Ok(spec)
    }
}

/// Rejects ranges whose lower bound lies past the upper bound.
fn check_ranges(filters: &FilterCriteria, offset: FixedOffset) -> RepositoryResult<()> {
    let min = number_value(filters.price_min);
    let max = number_value(filters.price_max);
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(RepositoryError::QueryBuild(format!(
                "price range is inverted: {min} > {max}"
            )));
        }
    }
    let from = text_value(&filters.date_from).and_then(|s| day_bound(s, DayBound::Start, offset));
    let to = text_value(&filters.date_to).and_then(|s| day_bound(s, DayBound::End, offset));
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(RepositoryError::QueryBuild(
                "date range is inverted".to_string(),
            ));
        }
    }
    Ok(())
}

/// Repository for one domain over any [`QueryPort`].
pub struct ListingRepository<'a, P: ?Sized, Q> {
    port: &'a P,
    offset: FixedOffset,
    _query: PhantomData<fn() -> Q>,
}

impl<'a, P, Q> ListingRepository<'a, P, Q>
where
    P: QueryPort + ?Sized,
    Q: ListingQuery,
{
    pub fn new(port: &'a P, offset: FixedOffset) -> Self {
        Self {
            port,
            offset,
            _query: PhantomData,
        }
    }

    pub fn build_query(&self, filters: &FilterCriteria) -> RepositoryResult<QuerySpec> {
        Q::build_query(filters, self.offset)
    }
}

impl<P, Q> ListingReader for ListingRepository<'_, P, Q>
where
    P: QueryPort + ?Sized,
    Q: ListingQuery,
{
    fn fetch_page(
        &self,
        filters: &FilterCriteria,
        limit: usize,
        offset: usize,
    ) -> RepositoryResult<Vec<RawRecord>> {
        let spec = self.build_query(filters)?;
        self.port.execute(&spec, Some(PageWindow { limit, offset }))
    }

    fn count(&self, filters: &FilterCriteria) -> RepositoryResult<usize> {
        let spec = self.build_query(filters)?.for_count();
        self.port.count(&spec)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::format::reference_offset;

    /// Port that records every spec it receives.
    #[derive(Default)]
    struct RecordingPort {
        seen: Mutex<Vec<(QuerySpec, Option<PageWindow>)>>,
    }

    impl QueryPort for RecordingPort {
        fn execute(
            &self,
            spec: &QuerySpec,
            window: Option<PageWindow>,
        ) -> RepositoryResult<Vec<RawRecord>> {
            self.seen.lock().unwrap().push((spec.clone(), window));
            Ok(Vec::new())
        }

        fn count(&self, spec: &QuerySpec) -> RepositoryResult<usize> {
            self.seen.lock().unwrap().push((spec.clone(), None));
            Ok(0)
        }
    }

    struct FailingPort;

    impl QueryPort for FailingPort {
        fn execute(&self, _: &QuerySpec, _: Option<PageWindow>) -> RepositoryResult<Vec<RawRecord>> {
            Err(RepositoryError::Transport("backend unavailable".into()))
        }

        fn count(&self, _: &QuerySpec) -> RepositoryResult<usize> {
            Err(RepositoryError::Transport("backend unavailable".into()))
        }
    }

    fn sample_filters() -> FilterCriteria {
        FilterCriteria {
            global: Some("smith".into()),
            statuses: vec!["Scheduled".into()],
            price_min: Some(100.0),
            date_from: Some("2024-02-01".into()),
            ..FilterCriteria::default()
        }
    }

    #[test]
    fn count_uses_the_page_predicate() {
        let port = RecordingPort::default();
        let repo = JobRepository::new(&port, reference_offset(600));
        let filters = sample_filters();

        repo.fetch_page(&filters, 10, 20).unwrap();
        repo.count(&filters).unwrap();

        let seen = port.seen.lock().unwrap();
        let (page, window) = &seen[0];
        let (count, count_window) = &seen[1];
        assert_eq!(page.predicate(), count.predicate());
        assert_eq!(*window, Some(PageWindow { limit: 10, offset: 20 }));
        assert_eq!(*count_window, None);
        assert!(count.projection().is_empty());
        assert!(!page.projection().is_empty());
    }

    #[test]
    fn count_rebuilds_from_its_own_filters() {
        let port = RecordingPort::default();
        let repo = QuoteRepository::new(&port, reference_offset(600));

        repo.fetch_page(&sample_filters(), 10, 0).unwrap();
        repo.count(&FilterCriteria::default()).unwrap();

        let seen = port.seen.lock().unwrap();
        assert!(!seen[0].0.predicate().is_vacuous());
        assert!(seen[1].0.predicate().is_vacuous());
    }

    #[test]
    fn transport_errors_propagate() {
        let repo = InquiryRepository::new(&FailingPort, reference_offset(600));
        assert!(matches!(
            repo.fetch_page(&FilterCriteria::default(), 10, 0),
            Err(RepositoryError::Transport(_))
        ));
        assert!(matches!(
            repo.count(&FilterCriteria::default()),
            Err(RepositoryError::Transport(_))
        ));
    }

    #[test]
    fn inverted_ranges_are_query_build_errors() {
        let filters = FilterCriteria::new().price_range(Some(500.0), Some(100.0));
        assert!(matches!(
            QuoteQuery::build_query(&filters, reference_offset(0)),
            Err(RepositoryError::QueryBuild(_))
        ));
        let filters = FilterCriteria::new().date_range(Some("2024-03-02"), Some("2024-03-01"));
        assert!(matches!(
            JobQuery::build_query(&filters, reference_offset(0)),
            Err(RepositoryError::QueryBuild(_))
        ));
    }
}
