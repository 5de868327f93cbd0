//! Download module for channel export.
//!
//! This module provides:
//! - Export counters and run reports
//! - Per-message media export
//! - History pagination with cursor, delay and cancellation

pub mod history;
pub mod media;
pub mod state;

pub use history::{ExportEngine, ExportSettings};
pub use media::{download_message_media, ItemOutcome};
pub use state::{ExportCounters, ExportOutcome, ExportReport};
