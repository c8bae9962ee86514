//! Domain layer with core entities, session state and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Gallery signal definitions.
pub mod gallery_event;
/// Port definitions.
pub mod ports;
/// Search session state.
pub mod session;

pub use entities::{ImageRecord, PageResult, SearchQuery};
pub use errors::{FetchError, GalleryError};
pub use gallery_event::GalleryEvent;
pub use ports::{GallerySinkPort, ImageSearchPort};
pub use session::{DEFAULT_PAGE_SIZE, FlushPolicy, ROW_WIDTH, SearchSession, SessionState};
