use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use pixgrid::application::{GalleryService, SearchPaginator};
use pixgrid::domain::SearchQuery;
use pixgrid::infrastructure::{AppConfig, CliArgs, PixabayClient, StorageManager};
use pixgrid::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<AppConfig> {
    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn create_app(config: &AppConfig) -> Result<App> {
    let pixabay_config = config.pixabay_config().ok_or_else(|| {
        eyre!("No Pixabay API key configured. Set PIXABAY_API_KEY or pass --api-key")
    })?;
    let client = Arc::new(PixabayClient::new(pixabay_config)?);

    let paginator = SearchPaginator::new(client).with_flush_policy(config.gallery.flush_policy());
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let service = GalleryService::new(paginator, Arc::new(events_tx))
        .with_load_more_delay(config.gallery.load_more_delay());
    let (handle, _task) = service.spawn();

    Ok(App::new(handle, events_rx, config.notification_duration()))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let config = load_config()?;
    init_logging(&config)?;

    info!(version = pixgrid::VERSION, "Starting Pixgrid");

    let app = create_app(&config)?;

    let initial_query = config.initial_query.as_deref().and_then(|q| {
        let query = SearchQuery::new(q);
        if query.is_none() {
            warn!("Ignoring blank initial query");
        }
        query
    });

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal, initial_query).await;

    ratatui::restore();

    result
}
