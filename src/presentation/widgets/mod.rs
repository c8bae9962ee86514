mod gallery_grid;
mod input;
mod status_bar;

pub use gallery_grid::{CARD_HEIGHT, GalleryGrid, GalleryGridState};
pub use input::TextInput;
pub use status_bar::{StatusBar, StatusLevel};
