//! Domain entity definitions.

mod image_record;
mod search_query;

pub use image_record::{ImageId, ImageRecord, ImageStats, PageResult};
pub use search_query::SearchQuery;
