use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use photofeed::application::{LoadFeedUseCase, LocalFeedLoader, ValidateCacheUseCase};
use photofeed::domain::entities::FeedImage;
use photofeed::domain::ports::{Clock, FeedStorePort, HttpClientPort, ResourceLoader};
use photofeed::infrastructure::{
    AppConfig, CliArgs, Command, DiskFeedStore, DiskImageStore, FeedApi, ImageDataLoader,
    ImageLoaderConfig, ReqwestHttpClient, SystemClock,
};

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

fn print_feed(images: &[FeedImage]) {
    if images.is_empty() {
        println!("(no photos)");
        return;
    }

    for image in images {
        println!("{}", image.id);
        if let Some(location) = &image.location {
            println!("  location: {location}");
        }
        if let Some(description) = &image.description {
            println!("  {description}");
        }
        println!("  {}", image.url);
    }
}

async fn prefetch_images(
    config: &AppConfig,
    http: Arc<dyn HttpClientPort>,
    clock: Arc<dyn Clock>,
    images: &[FeedImage],
) -> Result<()> {
    let disk = Arc::new(
        DiskImageStore::new(config.image_cache_dir(), config.image.disk_cache_size).await?,
    );
    let (event_tx, mut events) = mpsc::unbounded_channel();
    let loader = ImageDataLoader::new(
        &ImageLoaderConfig {
            memory_cache_size: config.image.memory_cache_size,
            max_concurrent_downloads: config.image.max_concurrent_downloads,
        },
        event_tx,
        http,
        disk,
        clock,
    );

    loader.prefetch_batch(images.iter().map(|image| image.url.clone()));

    let mut remaining = images.len();
    while remaining > 0 {
        match tokio::time::timeout(Duration::from_secs(60), events.recv()).await {
            Ok(Some(event)) => {
                remaining -= 1;
                match event.result {
                    Ok(loaded) => println!(
                        "fetched {} ({} bytes, {})",
                        loaded.url,
                        loaded.data.len(),
                        loaded.source
                    ),
                    Err(error) => eprintln!("failed to fetch {}: {error}", event.url),
                }
            }
            Ok(None) => break,
            Err(_) => {
                eprintln!("timed out waiting for image downloads");
                break;
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let mut config = AppConfig::load(args.config.clone())?;
    config.merge_with_args(&args);

    init_logging(&config)?;

    info!(version = photofeed::VERSION, "Starting photofeed");

    // The loader graph is built once here and handed down; collaborators are
    // injected explicitly, never reached through globals.
    let http: Arc<dyn HttpClientPort> =
        Arc::new(ReqwestHttpClient::with_timeout(config.http.timeout_secs)?);
    let store: Arc<dyn FeedStorePort> =
        Arc::new(DiskFeedStore::new(config.effective_cache_dir()).await?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let local = Arc::new(LocalFeedLoader::new(store, Arc::clone(&clock)));
    let api = FeedApi::new(Arc::clone(&http), config.base_url.clone());

    match args.command.unwrap_or(Command::Feed { prefetch: false }) {
        Command::Feed { prefetch } => {
            let use_case = LoadFeedUseCase::new(Arc::new(api.feed_loader()), Arc::clone(&local));

            let images = match use_case.execute().await {
                Ok(images) => images,
                Err(error) => {
                    eprintln!("could not load feed: {error}");
                    Vec::new()
                }
            };

            print_feed(&images);

            if prefetch && !images.is_empty() {
                prefetch_images(&config, http, clock, &images).await?;
            }

            // The CLI analogue of entering background: sweep before exit.
            ValidateCacheUseCase::new(local).execute().await;
        }
        Command::Comments { image_id } => {
            let comments = api.comments_loader(image_id).load().await?;

            if comments.is_empty() {
                println!("(no comments)");
            }
            for comment in &comments {
                println!(
                    "{}  {}: {}",
                    comment.created_at.format("%Y-%m-%d %H:%M"),
                    comment.username,
                    comment.message
                );
            }
        }
        Command::Validate => {
            ValidateCacheUseCase::new(local).execute().await;
        }
    }

    Ok(())
}
