use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "pixgrid",
    version,
    about = "A terminal image search gallery",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Image search API key.
    #[arg(long, env = "PIXABAY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Image search endpoint.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Results requested per page.
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Pause before each "load more" fetch, in milliseconds.
    #[arg(long)]
    pub load_more_delay_ms: Option<u64>,

    /// Show the final partial row once all results are loaded.
    #[arg(long)]
    pub flush_remainder_on_end: Option<bool>,

    /// Search to run on startup.
    #[arg(short, long)]
    pub query: Option<String>,
}
