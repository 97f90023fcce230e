//! Photofeed - a resilient photo-feed client.
//!
//! This crate loads a remote photo feed and per-photo comment threads,
//! persists successful results to a local cache as a best-effort side effect,
//! and falls back to the freshest cached snapshot when the network fails.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing loader combinators, services, and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for network, disk, and config.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "photofeed";
