mod gallery_sink_port;
mod image_search_port;

pub use gallery_sink_port::GallerySinkPort;
pub use image_search_port::ImageSearchPort;

#[cfg(test)]
pub use image_search_port::MockImageSearchPort;
