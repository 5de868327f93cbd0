//! Configuration module for tg-media-export.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - The media filter selection
//! - Configuration validation

pub mod filter;
pub mod loader;
pub mod validation;

pub use filter::MediaFilter;
pub use loader::{AccountConfig, Config, OptionsConfig, TargetConfig};
pub use validation::{parse_channel, validate_config};
