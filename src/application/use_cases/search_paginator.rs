//! Search pagination use case.
//!
//! Reconciles the remote page size with gallery rows: every fetched page is
//! appended to the session buffer and only complete rows are released.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{BatchOutcome, PageStatus};
use crate::domain::entities::SearchQuery;
use crate::domain::errors::GalleryError;
use crate::domain::ports::ImageSearchPort;
use crate::domain::session::{FlushPolicy, SearchSession, SessionState};

/// Owns the single live search session and advances it page by page.
///
/// Operations take `&mut self`, so at most one fetch is in flight per session.
pub struct SearchPaginator {
    search_port: Arc<dyn ImageSearchPort>,
    session: Option<SearchSession>,
    flush_policy: FlushPolicy,
}

impl SearchPaginator {
    /// Creates idle paginator.
    #[must_use]
    pub fn new(search_port: Arc<dyn ImageSearchPort>) -> Self {
        Self {
            search_port,
            session: None,
            flush_policy: FlushPolicy::default(),
        }
    }

    /// Sets how a trailing sub-row remainder is handled.
    #[must_use]
    pub const fn with_flush_policy(mut self, policy: FlushPolicy) -> Self {
        self.flush_policy = policy;
        self
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session
            .as_ref()
            .map_or(SessionState::Idle, SearchSession::state)
    }

    /// Returns the live session, if a search has completed.
    #[must_use]
    pub const fn session(&self) -> Option<&SearchSession> {
        self.session.as_ref()
    }

    /// Starts a new search and flushes the complete rows of its first page.
    ///
    /// The new session replaces the previous one only once page 1 arrives.
    ///
    /// # Errors
    /// Returns `GalleryError::Fetch` if the remote call fails; the previous
    /// session is kept as it was.
    pub async fn start_search(&mut self, query: SearchQuery) -> Result<BatchOutcome, GalleryError> {
        let page_size = self.search_port.page_size();

        info!(query = %query, "Starting search");

        let page = self.search_port.fetch_page(&query, 1).await.map_err(|e| {
            warn!(query = %query, error = %e, "First page fetch failed");
            e
        })?;

        let mut session = SearchSession::new(query);

        if page.is_empty() {
            info!(query = %session.query(), "Search matched nothing");
            session.mark_exhausted();
            self.session = Some(session);
            return Ok(BatchOutcome::no_results());
        }

        session.absorb(page);
        let outcome = self.settle(&mut session, page_size);
        self.session = Some(session);

        Ok(outcome)
    }

    /// Fetches the next page of the live session and flushes complete rows.
    ///
    /// # Errors
    /// Returns `NoActiveSession` before any search and `SessionExhausted` after
    /// the end of results; neither issues a fetch. Returns `Fetch` when the
    /// remote call fails, leaving the page cursor and buffer untouched.
    pub async fn load_next_page(&mut self) -> Result<BatchOutcome, GalleryError> {
        let page_size = self.search_port.page_size();
        let flush_policy = self.flush_policy;

        let session = match self.session.as_mut() {
            None => return Err(GalleryError::NoActiveSession),
            Some(session) if session.is_exhausted() => return Err(GalleryError::SessionExhausted),
            Some(session) => session,
        };

        let next_page = session.next_page();
        debug!(query = %session.query(), page = next_page, "Loading next page");

        let page = self
            .search_port
            .fetch_page(session.query(), next_page)
            .await
            .map_err(|e| {
                warn!(page = next_page, error = %e, "Page fetch failed, cursor not advanced");
                e
            })?;

        session.advance_page();

        if page.is_empty() {
            info!(page = next_page, "Remote returned an empty follow-up page");
            let batch = match flush_policy {
                FlushPolicy::DrainOnEnd => session.drain(),
                FlushPolicy::CompleteRows => Vec::new(),
            };
            session.mark_exhausted();
            return Ok(BatchOutcome {
                batch,
                status: PageStatus::EndOfResults,
                page: session.page_number(),
                shown: session.flushed_count(),
                total: session.total_count(),
            });
        }

        session.absorb(page);
        Ok(Self::settle_with(session, flush_policy, page_size))
    }

    fn settle(&self, session: &mut SearchSession, page_size: u32) -> BatchOutcome {
        Self::settle_with(session, self.flush_policy, page_size)
    }

    fn settle_with(
        session: &mut SearchSession,
        flush_policy: FlushPolicy,
        page_size: u32,
    ) -> BatchOutcome {
        let batch = session.flush(flush_policy, page_size);

        let status = if session.update_exhaustion(page_size) {
            info!(
                query = %session.query(),
                shown = session.flushed_count(),
                "Reached end of results"
            );
            PageStatus::EndOfResults
        } else {
            PageStatus::MoreAvailable
        };

        debug!(
            page = session.page_number(),
            flushed = batch.len(),
            buffered = session.buffered().len(),
            total = session.total_count(),
            status = %status,
            "Page settled"
        );

        BatchOutcome {
            batch,
            status,
            page: session.page_number(),
            shown: session.flushed_count(),
            total: session.total_count(),
        }
    }
}
