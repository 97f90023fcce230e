use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use super::app_config::LogLevel;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "photofeed",
    version,
    about = "A resilient photo-feed client with local cache fallback",
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

    /// Base URL of the feed service.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Cache directory.
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Operation to run; defaults to loading the feed.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level operations.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Loads and prints the photo feed.
    Feed {
        /// Also prefetch the image data for the listed photos.
        #[arg(long)]
        prefetch: bool,
    },
    /// Loads the comment thread of one photo.
    Comments {
        /// Id of the photo.
        image_id: Uuid,
    },
    /// Deletes the cached feed snapshot if it has expired.
    Validate,
}
