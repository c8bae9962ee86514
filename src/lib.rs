//! Pixgrid - a terminal image search gallery.
//!
//! Queries a remote image search API page by page and shows the results as a
//! grid of cards, flushing them in complete rows as pages accumulate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the paginator, gallery service and DTOs.
pub mod application;
/// Domain layer containing entities, session state, errors, and ports.
pub mod domain;
/// Infrastructure layer containing configuration and the search adapter.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "pixgrid";
