use crate::domain::GalleryEvent;

/// Port receiving gallery signals from the paginator service.
pub trait GallerySinkPort: Send + Sync {
    /// Delivers one signal. Delivery must not block.
    fn emit(&self, event: GalleryEvent);
}
