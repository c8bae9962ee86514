//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Pixabay image search adapter.
pub mod pixabay;

pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager};
pub use pixabay::{PixabayClient, PixabayConfig};
