//! Dashboard-side coordination of listing fetches.
//!
//! Responses can resolve out of order, so every fetch is tagged with a
//! [`RequestToken`] and only the most recently issued token may reach the
//! table. Filter edits are coalesced by a [`Debouncer`] before a fetch is
//! issued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::columns::{Header, empty_message, error_message};
use crate::domain::Domain;
use crate::domain::filter::FilterCriteria;
use crate::dto::listing::ListingPage;
use crate::services::ServiceResult;
use crate::table::{RenderedTable, TableConfig, render};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a token newer than every token issued before it.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}

/// Holds the latest value until `delay` has passed without a newer one.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending value and restarts the delay.
    pub fn push(&mut self, now: Instant, value: T) {
        self.pending = Some((now + self.delay, value));
    }

    /// Returns the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= now => self.pending.take().map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Releases the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[derive(Debug, PartialEq)]
pub enum ListingOutcome {
    Rendered(ListingPage),
    /// The fetch failed; `message` is safe to show.
    Failed { message: String },
    /// A newer fetch was issued; leave the current table alone.
    Discarded,
}

/// Tracks filter edits and in-flight fetches for one domain's listing view.
#[derive(Debug)]
pub struct ListingController {
    domain: Domain,
    tracker: RequestTracker,
    filter_edits: Debouncer<FilterCriteria>,
}

impl ListingController {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            tracker: RequestTracker::new(),
            filter_edits: Debouncer::default(),
        }
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.filter_edits = Debouncer::new(delay);
        self
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn debounce(&self) -> Duration {
        self.filter_edits.delay()
    }

    /// Records a filter edit; it becomes due once the debounce delay passes
    /// without another edit.
    pub fn edit_filters(&mut self, now: Instant, filters: FilterCriteria) {
        self.filter_edits.push(now, filters);
    }

    /// Filters that are due for a fetch, if any.
    pub fn poll_filters(&mut self, now: Instant) -> Option<FilterCriteria> {
        self.filter_edits.poll(now)
    }

    /// Applies the pending edit without waiting, as on submit.
    pub fn submit_filters(&mut self) -> Option<FilterCriteria> {
        self.filter_edits.flush()
    }

    /// Registers a new fetch, superseding every fetch issued before it.
    pub fn begin(&self) -> RequestToken {
        self.tracker.issue()
    }

    pub fn complete(&self, token: RequestToken, result: ServiceResult<ListingPage>) -> ListingOutcome {
        if !self.tracker.is_current(token) {
            log::debug!(
                "Discarding stale {} response for request {}",
                self.domain,
                token.value()
            );
            return ListingOutcome::Discarded;
        }
        match result {
            Ok(page) => ListingOutcome::Rendered(page),
            Err(e) => {
                log::error!("Failed to load {}: {e}", self.domain);
                ListingOutcome::Failed {
                    message: error_message(self.domain),
                }
            }
        }
    }

    /// Table to draw for an outcome, or `None` when nothing should change.
    pub fn table(&self, headers: &[Header], outcome: &ListingOutcome) -> Option<RenderedTable> {
        match outcome {
            ListingOutcome::Rendered(page) => Some(render(
                &TableConfig::new(headers, &page.rows, empty_message(self.domain).as_str())
                    .striped(true),
            )),
            ListingOutcome::Failed { message } => {
                Some(render(&TableConfig::new(headers, &[], message.as_str())))
            }
            ListingOutcome::Discarded => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::default_headers;
    use crate::domain::row::RowViewModel;
    use crate::services::ServiceError;
    use crate::table::CellContent;

    fn page(rows: usize) -> ListingPage {
        ListingPage {
            rows: vec![RowViewModel::default(); rows],
            total_count: rows,
            total_pages: 1,
        }
    }

    #[test]
    fn tokens_increase_monotonically() {
        let tracker = RequestTracker::new();
        let first = tracker.issue();
        let second = tracker.issue();
        assert!(second > first);
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn stale_response_is_discarded() {
        let controller = ListingController::new(Domain::Quote);
        let slow = controller.begin();
        let fast = controller.begin();

        assert_eq!(controller.complete(fast, Ok(page(2))), ListingOutcome::Rendered(page(2)));
        assert_eq!(controller.complete(slow, Ok(page(5))), ListingOutcome::Discarded);
        assert_eq!(
            controller.complete(slow, Err(ServiceError::Transport("timeout".into()))),
            ListingOutcome::Discarded
        );
    }

    #[test]
    fn failure_shows_domain_message() {
        let controller = ListingController::new(Domain::Job);
        let token = controller.begin();
        let outcome = controller.complete(token, Err(ServiceError::Transport("connection reset".into())));
        assert_eq!(
            outcome,
            ListingOutcome::Failed {
                message: "Unable to load jobs.".into()
            }
        );

        let headers = default_headers(Domain::Job);
        let table = controller.table(&headers, &outcome).unwrap();
        assert_eq!(table.tbody.len(), 1);
        assert_eq!(table.tbody[0].cells[0].colspan, Some(headers.len()));
        assert_eq!(
            table.tbody[0].cells[0].content,
            CellContent::Text("Unable to load jobs.".into())
        );
        assert!(controller.table(&headers, &ListingOutcome::Discarded).is_none());
    }

    #[test]
    fn empty_page_shows_empty_message() {
        let controller = ListingController::new(Domain::Quote);
        let headers = default_headers(Domain::Quote);
        let table = controller
            .table(&headers, &ListingOutcome::Rendered(page(0)))
            .unwrap();
        assert_eq!(
            table.tbody[0].cells[0].content,
            CellContent::Text("No quotes found.".into())
        );
    }

    #[test]
    fn controller_debounces_filter_edits() {
        let start = Instant::now();
        let mut controller =
            ListingController::new(Domain::Inquiry).with_debounce(Duration::from_millis(50));
        assert_eq!(controller.debounce(), Duration::from_millis(50));

        controller.edit_filters(start, FilterCriteria::new().global("sm"));
        controller.edit_filters(start + Duration::from_millis(30), FilterCriteria::new().global("smi"));
        assert_eq!(controller.poll_filters(start + Duration::from_millis(60)), None);
        assert_eq!(
            controller.poll_filters(start + Duration::from_millis(80)),
            Some(FilterCriteria::new().global("smi"))
        );

        controller.edit_filters(start, FilterCriteria::new().resident("Smith"));
        assert_eq!(
            controller.submit_filters(),
            Some(FilterCriteria::new().resident("Smith"))
        );
        assert_eq!(controller.poll_filters(start + Duration::from_secs(1)), None);
    }

    #[test]
    fn debouncer_releases_only_the_last_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.push(start, "s");
        debouncer.push(start + Duration::from_millis(100), "sm");
        debouncer.push(start + Duration::from_millis(200), "smi");

        assert_eq!(debouncer.poll(start + Duration::from_millis(400)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(500)), Some("smi"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }
}
