//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use super::args::CliArgs;
use crate::domain::session::{DEFAULT_PAGE_SIZE, FlushPolicy};
use crate::infrastructure::pixabay::{PIXABAY_API_BASE, PixabayConfig};

pub(crate) const APP_NAME: &str = "pixgrid";
pub(crate) const APP_QUALIFIER: &str = "io";
pub(crate) const APP_ORGANIZATION: &str = "pixgrid";

/// Page sizes the remote API accepts.
pub const PAGE_SIZE_RANGE: std::ops::RangeInclusive<u32> = 3..=200;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, loaded from TOML and overridden by CLI flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Query to run on startup.
    #[serde(skip)]
    pub initial_query: Option<String>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Remote API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Pagination behavior.
    #[serde(default)]
    pub gallery: GalleryConfig,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Remote API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Search endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key. Usually supplied through `PIXABAY_API_KEY` instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Results requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Pagination behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Pause before each "load more" fetch, in milliseconds.
    #[serde(default)]
    pub load_more_delay_ms: u64,

    /// Show the last one or two results as a short row at the end.
    #[serde(default)]
    pub flush_remainder_on_end: bool,
}

impl GalleryConfig {
    #[must_use]
    pub const fn load_more_delay(&self) -> Duration {
        Duration::from_millis(self.load_more_delay_ms)
    }

    #[must_use]
    pub const fn flush_policy(&self) -> FlushPolicy {
        if self.flush_remainder_on_end {
            FlushPolicy::DrainOnEnd
        } else {
            FlushPolicy::CompleteRows
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long each toast stays on screen, in seconds.
    #[serde(default = "default_notification_duration")]
    pub notification_duration: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_duration: default_notification_duration(),
        }
    }
}

fn default_base_url() -> String {
    PIXABAY_API_BASE.to_string()
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_notification_duration() -> u64 {
    4
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_key) = args.api_key {
            self.api.api_key = Some(api_key);
        }
        if let Some(base_url) = args.base_url {
            self.api.base_url = base_url;
        }
        if let Some(page_size) = args.page_size {
            self.api.page_size = page_size;
        }
        if let Some(delay) = args.load_more_delay_ms {
            self.gallery.load_more_delay_ms = delay;
        }
        if let Some(flush) = args.flush_remainder_on_end {
            self.gallery.flush_remainder_on_end = flush;
        }
        if let Some(query) = args.query {
            self.initial_query = Some(query);
        }
    }

    /// Returns the page size, falling back to the default when out of range.
    #[must_use]
    pub fn effective_page_size(&self) -> u32 {
        if PAGE_SIZE_RANGE.contains(&self.api.page_size) {
            self.api.page_size
        } else {
            warn!(
                page_size = self.api.page_size,
                fallback = DEFAULT_PAGE_SIZE,
                "Configured page size out of range"
            );
            DEFAULT_PAGE_SIZE
        }
    }

    /// Builds adapter settings. Returns `None` when no API key is configured.
    #[must_use]
    pub fn pixabay_config(&self) -> Option<PixabayConfig> {
        let api_key = self
            .api
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())?;

        Some(
            PixabayConfig::new(api_key)
                .with_base_url(self.api.base_url.clone())
                .with_page_size(self.effective_page_size())
                .with_timeout_secs(self.api.timeout_secs),
        )
    }

    #[must_use]
    pub const fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.ui.notification_duration)
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("pixgrid.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use test_case::test_case;

    #[test]
    fn test_parse_config_file() {
        let toml_content = r#"
            log_level = "debug"

            [api]
            page_size = 60
            timeout_secs = 10

            [gallery]
            load_more_delay_ms = 2000
            flush_remainder_on_end = true
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.api.page_size, 60);
        assert_eq!(config.api.base_url, PIXABAY_API_BASE);
        assert_eq!(config.gallery.load_more_delay(), Duration::from_secs(2));
        assert_eq!(config.gallery.flush_policy(), FlushPolicy::DrainOnEnd);
        assert_eq!(config.ui.notification_duration, 4);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.api.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.api.api_key.is_none());
        assert!(config.gallery.load_more_delay().is_zero());
        assert_eq!(config.gallery.flush_policy(), FlushPolicy::CompleteRows);
        assert!(config.pixabay_config().is_none());
    }

    #[test_case(40, 40 ; "default")]
    #[test_case(3, 3 ; "minimum")]
    #[test_case(200, 200 ; "maximum")]
    #[test_case(2, DEFAULT_PAGE_SIZE ; "too_small")]
    #[test_case(500, DEFAULT_PAGE_SIZE ; "too_large")]
    fn test_effective_page_size(configured: u32, expected: u32) {
        let mut config = AppConfig::default();
        config.api.page_size = configured;
        assert_eq!(config.effective_page_size(), expected);
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut config: AppConfig = toml::from_str(
            r#"
            [api]
            api_key = "from-file"
            page_size = 60
            "#,
        )
        .unwrap();

        let args = CliArgs::parse_from([
            "pixgrid",
            "--api-key",
            "from-cli",
            "--load-more-delay-ms",
            "250",
            "--query",
            "mountains",
        ]);
        config.merge_with_args(args);

        let pixabay = config.pixabay_config().unwrap();
        assert_eq!(pixabay.api_key, "from-cli");
        assert_eq!(pixabay.page_size, 60);
        assert_eq!(config.gallery.load_more_delay_ms, 250);
        assert_eq!(config.initial_query.as_deref(), Some("mountains"));
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let mut config = AppConfig::default();
        config.api.api_key = Some("   ".to_string());
        assert!(config.pixabay_config().is_none());
    }
}
