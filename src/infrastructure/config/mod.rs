mod app_config;
mod args;

pub use app_config::{AppConfig, ConfigError, HttpConfig, ImageConfig, LogLevel};
pub use args::{CliArgs, Command};
