//! Search session state and row-aligned flushing.

use serde::{Deserialize, Serialize};

use super::entities::{ImageRecord, PageResult, SearchQuery};

/// Number of cards per gallery row. Flushed batches are multiples of this.
pub const ROW_WIDTH: usize = 3;

/// Page size requested from the remote API.
pub const DEFAULT_PAGE_SIZE: u32 = 40;

/// What happens to a sub-row remainder once the remote side has nothing left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlushPolicy {
    /// Only complete rows are ever flushed; a trailing remainder stays buffered.
    #[default]
    CompleteRows,
    /// Flush the remainder as a short final row when the remote side is exhausted.
    DrainOnEnd,
}

/// Paginator lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No search has been started.
    Idle,
    /// More pages may be requested.
    Active,
    /// Nothing more can be fetched for the current query.
    Exhausted,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Active => write!(f, "active"),
            Self::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// Paging state for one query.
///
/// Records enter through [`SearchSession::absorb`] and leave through
/// [`SearchSession::flush`]; `flushed_count + buffered().len() == fetched_count`
/// holds after every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    query: SearchQuery,
    page_number: u32,
    buffer: Vec<ImageRecord>,
    total_count: u64,
    fetched_count: u64,
    flushed_count: u64,
    exhausted: bool,
}

impl SearchSession {
    /// Creates a fresh session positioned on page 1.
    #[must_use]
    pub const fn new(query: SearchQuery) -> Self {
        Self {
            query,
            page_number: 1,
            buffer: Vec::new(),
            total_count: 0,
            fetched_count: 0,
            flushed_count: 0,
            exhausted: false,
        }
    }

    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Returns the last page that was fetched successfully.
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Returns the page a "load more" would request.
    #[must_use]
    pub const fn next_page(&self) -> u32 {
        self.page_number.saturating_add(1)
    }

    /// Returns records fetched but not yet flushed.
    #[must_use]
    pub fn buffered(&self) -> &[ImageRecord] {
        &self.buffer
    }

    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    #[must_use]
    pub const fn fetched_count(&self) -> u64 {
        self.fetched_count
    }

    #[must_use]
    pub const fn flushed_count(&self) -> u64 {
        self.flushed_count
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        if self.exhausted {
            SessionState::Exhausted
        } else {
            SessionState::Active
        }
    }

    /// Whether every page the remote side reported has been requested.
    #[must_use]
    pub fn remote_exhausted(&self, page_size: u32) -> bool {
        u64::from(self.page_number) * u64::from(page_size) >= self.total_count
    }

    /// Moves the cursor forward after a successful follow-up fetch.
    pub fn advance_page(&mut self) {
        self.page_number = self.next_page();
    }

    /// Appends a page to the buffer and records its total count.
    pub fn absorb(&mut self, page: PageResult) {
        self.total_count = page.total_count;
        self.fetched_count += page.records.len() as u64;
        self.buffer.extend(page.records);
    }

    /// Releases the row-aligned prefix of the buffer, keeping the remainder.
    pub fn flush(&mut self, policy: FlushPolicy, page_size: u32) -> Vec<ImageRecord> {
        let drain_all = policy == FlushPolicy::DrainOnEnd && self.remote_exhausted(page_size);

        let flushable = if drain_all {
            self.buffer.len()
        } else {
            self.buffer.len() / ROW_WIDTH * ROW_WIDTH
        };

        let remainder = self.buffer.split_off(flushable);
        let batch = std::mem::replace(&mut self.buffer, remainder);
        self.flushed_count += batch.len() as u64;
        batch
    }

    /// Releases every buffered record, short final row included.
    pub fn drain(&mut self) -> Vec<ImageRecord> {
        let batch = std::mem::take(&mut self.buffer);
        self.flushed_count += batch.len() as u64;
        batch
    }

    /// Re-evaluates the end-of-results condition after a flush.
    pub fn update_exhaustion(&mut self, page_size: u32) -> bool {
        self.exhausted = self.buffer.is_empty() && self.remote_exhausted(page_size);
        self.exhausted
    }

    /// Ends the session regardless of buffered records.
    pub fn mark_exhausted(&mut self) {
        self.exhausted = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn records(range: std::ops::Range<u64>) -> Vec<ImageRecord> {
        range
            .map(|i| ImageRecord::new(i, format!("{i}.jpg"), format!("{i}_large.jpg"), "tag"))
            .collect()
    }

    fn session() -> SearchSession {
        SearchSession::new(SearchQuery::new("cats").unwrap())
    }

    #[test]
    fn test_new_session_starts_on_first_page() {
        let s = session();
        assert_eq!(s.page_number(), 1);
        assert_eq!(s.next_page(), 2);
        assert!(s.buffered().is_empty());
        assert_eq!(s.state(), SessionState::Active);
    }

    #[test_case(0, 0, 0 ; "empty")]
    #[test_case(2, 0, 2 ; "below_row")]
    #[test_case(3, 3, 0 ; "one_row")]
    #[test_case(7, 6, 1 ; "two_rows_and_one")]
    #[test_case(40, 39, 1 ; "full_page")]
    #[test_case(41, 39, 2 ; "full_page_plus_one")]
    fn test_flush_emits_complete_rows(fetched: u64, flushed: usize, kept: usize) {
        let mut s = session();
        s.absorb(PageResult::new(records(0..fetched), 1000));

        let batch = s.flush(FlushPolicy::CompleteRows, DEFAULT_PAGE_SIZE);

        assert_eq!(batch.len(), flushed);
        assert_eq!(s.buffered().len(), kept);
        assert_eq!(s.flushed_count() + s.buffered().len() as u64, s.fetched_count());
    }

    #[test]
    fn test_flush_preserves_fetch_order_across_pages() {
        let mut s = session();
        s.absorb(PageResult::new(records(0..4), 8));
        let first = s.flush(FlushPolicy::CompleteRows, 4);

        s.advance_page();
        s.absorb(PageResult::new(records(4..8), 8));
        let second = s.flush(FlushPolicy::CompleteRows, 4);

        let ids: Vec<u64> = first.iter().chain(&second).map(|r| r.id().0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(s.buffered()[0].id().0, 6);
    }

    #[test]
    fn test_drain_on_end_releases_remainder_only_when_remote_done() {
        let mut s = session();
        s.absorb(PageResult::new(records(0..7), 47));
        let batch = s.flush(FlushPolicy::DrainOnEnd, DEFAULT_PAGE_SIZE);
        assert_eq!(batch.len(), 6);
        assert_eq!(s.buffered().len(), 1);

        s.advance_page();
        s.absorb(PageResult::new(records(7..14), 47));
        let batch = s.flush(FlushPolicy::DrainOnEnd, DEFAULT_PAGE_SIZE);
        assert_eq!(batch.len(), 8);
        assert!(s.buffered().is_empty());
        assert!(s.update_exhaustion(DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn test_exhaustion_requires_empty_buffer() {
        let mut s = session();
        s.absorb(PageResult::new(records(0..7), 7));
        s.flush(FlushPolicy::CompleteRows, DEFAULT_PAGE_SIZE);

        assert!(s.remote_exhausted(DEFAULT_PAGE_SIZE));
        assert!(!s.update_exhaustion(DEFAULT_PAGE_SIZE));
        assert_eq!(s.state(), SessionState::Active);
    }

    #[test]
    fn test_exhaustion_requires_remote_done() {
        let mut s = session();
        s.absorb(PageResult::new(records(0..39), 500));
        s.flush(FlushPolicy::CompleteRows, DEFAULT_PAGE_SIZE);

        assert!(s.buffered().is_empty());
        assert!(!s.update_exhaustion(DEFAULT_PAGE_SIZE));
    }
}
