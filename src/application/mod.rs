//! Application layer with the paginator use case and gallery services.

/// Data transfer objects.
pub mod dto;
/// Gallery command service.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{BatchOutcome, PageStatus};
pub use services::{GalleryCommand, GalleryHandle, GalleryService};
pub use use_cases::SearchPaginator;
