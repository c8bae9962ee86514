//! Gallery command loop.
//!
//! Runs the paginator behind a channel so commands are processed strictly one
//! at a time, and translates every outcome into [`GalleryEvent`]s.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use crate::application::dto::{BatchOutcome, PageStatus};
use crate::application::use_cases::SearchPaginator;
use crate::domain::entities::SearchQuery;
use crate::domain::errors::GalleryError;
use crate::domain::ports::GallerySinkPort;
use crate::domain::session::SessionState;
use crate::domain::GalleryEvent;

/// Commands accepted by the gallery service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryCommand {
    /// Start a new search, replacing the current one.
    Search(SearchQuery),
    /// Request the next page of the current search.
    LoadMore,
}

/// Sender half used by the UI to drive a spawned [`GalleryService`].
#[derive(Debug, Clone)]
pub struct GalleryHandle {
    tx: mpsc::UnboundedSender<GalleryCommand>,
}

impl GalleryHandle {
    /// Queues a new search. Returns `false` if the service has stopped.
    pub fn search(&self, query: SearchQuery) -> bool {
        self.tx.send(GalleryCommand::Search(query)).is_ok()
    }

    /// Queues a "load more" request. Returns `false` if the service has stopped.
    pub fn load_more(&self) -> bool {
        self.tx.send(GalleryCommand::LoadMore).is_ok()
    }
}

impl GallerySinkPort for mpsc::UnboundedSender<GalleryEvent> {
    fn emit(&self, event: GalleryEvent) {
        if self.send(event).is_err() {
            trace!("Gallery event receiver dropped");
        }
    }
}

pub struct GalleryService {
    paginator: SearchPaginator,
    sink: Arc<dyn GallerySinkPort>,
    load_more_delay: Duration,
}

impl GalleryService {
    #[must_use]
    pub fn new(paginator: SearchPaginator, sink: Arc<dyn GallerySinkPort>) -> Self {
        Self {
            paginator,
            sink,
            load_more_delay: Duration::ZERO,
        }
    }

    /// Sets a pause inserted before every "load more" fetch.
    #[must_use]
    pub const fn with_load_more_delay(mut self, delay: Duration) -> Self {
        self.load_more_delay = delay;
        self
    }

    #[must_use]
    pub const fn paginator(&self) -> &SearchPaginator {
        &self.paginator
    }

    /// Moves the service onto a task and returns its command handle.
    #[must_use]
    pub fn spawn(mut self) -> (GalleryHandle, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                self.handle(command).await;
            }
            debug!("Gallery command channel closed");
        });

        (GalleryHandle { tx }, task)
    }

    /// Processes one command to completion.
    pub async fn handle(&mut self, command: GalleryCommand) {
        match command {
            GalleryCommand::Search(query) => self.search(query).await,
            GalleryCommand::LoadMore => self.load_more().await,
        }
    }

    async fn search(&mut self, query: SearchQuery) {
        self.sink.emit(GalleryEvent::Loading { page: 1 });

        let result = self.paginator.start_search(query.clone()).await;
        self.sink.emit(GalleryEvent::LoadingDone);

        match result {
            Ok(outcome) => {
                self.sink.emit(GalleryEvent::ClearGallery { query });
                self.publish(outcome);
            }
            Err(e) => self.fail(&e),
        }
    }

    async fn load_more(&mut self) {
        match self.paginator.state() {
            SessionState::Idle => {
                debug!("Ignoring load more without a search");
                return;
            }
            SessionState::Exhausted => {
                self.sink.emit(GalleryEvent::EndOfResults);
                return;
            }
            SessionState::Active => {}
        }

        let page = self
            .paginator
            .session()
            .map_or(1, crate::domain::SearchSession::next_page);
        self.sink.emit(GalleryEvent::Loading { page });

        if !self.load_more_delay.is_zero() {
            tokio::time::sleep(self.load_more_delay).await;
        }

        let result = self.paginator.load_next_page().await;
        self.sink.emit(GalleryEvent::LoadingDone);

        match result {
            Ok(outcome) => self.publish(outcome),
            Err(e) => self.fail(&e),
        }
    }

    fn publish(&self, outcome: BatchOutcome) {
        let BatchOutcome {
            batch,
            status,
            page,
            shown,
            total,
        } = outcome;

        if !batch.is_empty() {
            debug!(page, count = batch.len(), "Appending batch");
            self.sink.emit(GalleryEvent::AppendBatch(batch));
        }

        let event = match status {
            PageStatus::NoResults => GalleryEvent::NoResults,
            PageStatus::EndOfResults => GalleryEvent::EndOfResults,
            PageStatus::MoreAvailable => GalleryEvent::MoreAvailable { shown, total },
        };
        self.sink.emit(event);
    }

    fn fail(&self, error: &GalleryError) {
        let transient = match error {
            GalleryError::Fetch(e) => e.is_transient(),
            GalleryError::NoActiveSession | GalleryError::SessionExhausted => false,
        };

        info!(error = %error, transient, "Gallery request failed");

        self.sink.emit(GalleryEvent::Failed {
            reason: error.to_string(),
            transient,
        });
    }
}
