mod gallery_service;

pub use gallery_service::{GalleryCommand, GalleryHandle, GalleryService};
