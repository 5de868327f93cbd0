//! tg-media-export - incremental media export for Telegram channels.
//!
//! This library walks a channel's history oldest-first and saves every media
//! attachment under `{channel}_{prefix}/{category}/`.
//!
//! # Features
//!
//! - Page-by-page history walk with an in-memory cursor
//! - Server-side media filters (photos, video, voice, ...)
//! - Skip items already exported under any extension
//! - Per-item failure tolerance, expired file references included
//! - Clean cancellation at every wait point
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use tg_media_export::{Config, ConsoleProgress, ExportEngine, ExportSettings, GatewayClient};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let client = GatewayClient::from_config(&config)?;
//!
//!     let mut engine = ExportEngine::new(
//!         client,
//!         ExportSettings::from_config(&config),
//!         Arc::new(ConsoleProgress::new()),
//!     );
//!     let report = engine
//!         .export("rustlang", Path::new("rustlang_export"), &CancellationToken::new())
//!         .await;
//!     println!("{} new files", report.counters.new_downloads);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{GatewayClient, Message, PlatformClient};
pub use config::{Config, MediaFilter};
pub use download::{ExportCounters, ExportEngine, ExportOutcome, ExportReport, ExportSettings};
pub use error::{Error, Result};
pub use media::{classify, MediaItem};
pub use output::{ConsoleProgress, ProgressSink};
