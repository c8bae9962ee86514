//! UI screens.

mod app;
mod gallery_screen;
mod notification_popup;
mod toasts;

pub use app::App;
pub use gallery_screen::{GalleryFocus, GalleryKeyResult, GalleryScreen, GalleryScreenState, LoadPhase};
pub use notification_popup::NotificationPopup;
pub use toasts::{Toast, ToastKind, ToastQueue};
