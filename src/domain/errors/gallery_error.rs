//! Paginator error types.

use thiserror::Error;

use super::FetchError;

/// Errors returned by paginator operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    /// The remote fetch failed; session state is unchanged.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// "Load more" was requested before any search.
    #[error("no search in progress")]
    NoActiveSession,

    /// "Load more" was requested after the end of results.
    #[error("no more results for this search")]
    SessionExhausted,
}
