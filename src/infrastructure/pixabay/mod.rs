//! Pixabay image search adapter.

mod client;
mod dto;

pub use client::{PIXABAY_API_BASE, PixabayClient, PixabayConfig};
