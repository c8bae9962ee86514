//! Domain error types.

mod fetch_error;
mod gallery_error;

pub use fetch_error::FetchError;
pub use gallery_error::GalleryError;
