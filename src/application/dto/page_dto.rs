//! Paginator result DTOs.

use crate::domain::entities::ImageRecord;

/// How a paginator call left the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// The first page was empty.
    NoResults,
    /// Another page may be requested.
    MoreAvailable,
    /// Nothing more can be fetched.
    EndOfResults,
}

impl std::fmt::Display for PageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoResults => write!(f, "no results"),
            Self::MoreAvailable => write!(f, "more available"),
            Self::EndOfResults => write!(f, "end of results"),
        }
    }
}

/// Result of one successful paginator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Records to render, in fetch order.
    pub batch: Vec<ImageRecord>,
    /// Session status after the flush.
    pub status: PageStatus,
    /// Page that produced this outcome.
    pub page: u32,
    /// Records flushed so far in this session, `batch` included.
    pub shown: u64,
    /// Remote total for the query.
    pub total: u64,
}

impl BatchOutcome {
    /// Creates outcome for a search that matched nothing.
    #[must_use]
    pub const fn no_results() -> Self {
        Self {
            batch: Vec::new(),
            status: PageStatus::NoResults,
            page: 1,
            shown: 0,
            total: 0,
        }
    }
}
