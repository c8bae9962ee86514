//! Image search result entities.

use serde::{Deserialize, Serialize};

/// Remote image identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(pub u64);

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ImageId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Engagement counters reported by the remote API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageStats {
    /// Number of likes.
    pub likes: u64,
    /// Number of views.
    pub views: u64,
    /// Number of comments.
    pub comments: u64,
    /// Number of downloads.
    pub downloads: u64,
}

/// A single image hit, immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    id: ImageId,
    display_url: String,
    full_url: String,
    tags: String,
    stats: ImageStats,
    page_url: Option<String>,
    author: Option<String>,
}

impl ImageRecord {
    /// Creates record with the fields every hit carries.
    #[must_use]
    pub fn new(
        id: impl Into<ImageId>,
        display_url: impl Into<String>,
        full_url: impl Into<String>,
        tags: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_url: display_url.into(),
            full_url: full_url.into(),
            tags: tags.into(),
            stats: ImageStats::default(),
            page_url: None,
            author: None,
        }
    }

    #[must_use]
    pub const fn with_stats(mut self, stats: ImageStats) -> Self {
        self.stats = stats;
        self
    }

    #[must_use]
    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    #[must_use]
    pub const fn id(&self) -> ImageId {
        self.id
    }

    /// Returns the medium-size URL used in the gallery.
    #[must_use]
    pub fn display_url(&self) -> &str {
        &self.display_url
    }

    /// Returns the full-resolution URL opened by the viewer.
    #[must_use]
    pub fn full_url(&self) -> &str {
        &self.full_url
    }

    /// Returns the comma separated tag list.
    #[must_use]
    pub fn tags(&self) -> &str {
        &self.tags
    }

    /// Returns individual tags.
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags.split(',').map(str::trim).filter(|t| !t.is_empty())
    }

    #[must_use]
    pub const fn stats(&self) -> ImageStats {
        self.stats
    }

    #[must_use]
    pub fn page_url(&self) -> Option<&str> {
        self.page_url.as_deref()
    }

    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
}

/// One response from the remote search API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
    /// Records in remote order.
    pub records: Vec<ImageRecord>,
    /// Number of results the remote side is willing to serve for the query.
    pub total_count: u64,
}

impl PageResult {
    #[must_use]
    pub const fn new(records: Vec<ImageRecord>, total_count: u64) -> Self {
        Self {
            records,
            total_count,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
