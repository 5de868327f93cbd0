//! Messaging platform access.
//!
//! This module provides:
//! - The `PlatformClient` capability the export engine depends on
//! - An HTTP client for a messaging gateway that owns the Telegram session
//! - Gateway request and response types

pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;

pub use client::GatewayClient;
pub use types::*;

/// Byte progress callback: `(bytes_done, bytes_total)`.
pub type ProgressFn<'a> = dyn Fn(u64, Option<u64>) + Send + Sync + 'a;

/// Operations the export engine needs from a messaging platform.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Open (or resume) the authenticated session.
    async fn connect(&self) -> Result<SessionInfo>;

    /// Fetch one page of channel history.
    async fn fetch_page(&self, request: &PageRequest<'_>) -> Result<Vec<Message>>;

    /// Download a message's media next to `target_base`, choosing the extension.
    ///
    /// Returns the written path. An expired media reference fails with
    /// [`Error::StaleReference`](crate::error::Error::StaleReference).
    async fn download(
        &self,
        channel: &str,
        message: &Message,
        target_base: &Path,
        progress: &ProgressFn<'_>,
    ) -> Result<PathBuf>;
}
