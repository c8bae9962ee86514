//! Signals emitted to gallery renderers and notification surfaces.

use super::entities::{ImageRecord, SearchQuery};

/// One gallery signal. Renderers apply them in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    /// Prior gallery content must be dropped; a new search begins.
    ClearGallery {
        /// Query of the new search.
        query: SearchQuery,
    },
    /// A fetch was issued.
    Loading {
        /// Page being requested.
        page: u32,
    },
    /// The outstanding fetch finished, successfully or not.
    LoadingDone,
    /// Records to append after existing content, in order.
    AppendBatch(Vec<ImageRecord>),
    /// The search matched nothing.
    NoResults,
    /// More pages can be requested.
    MoreAvailable {
        /// Records shown so far.
        shown: u64,
        /// Remote total for the query.
        total: u64,
    },
    /// Nothing more can be fetched.
    EndOfResults,
    /// The fetch failed; the same page may be retried.
    Failed {
        /// Human readable cause.
        reason: String,
        /// Whether a retry is likely to help.
        transient: bool,
    },
}
