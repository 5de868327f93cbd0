//! Channel history pagination.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::api::{Message, PageRequest, PlatformClient};
use crate::config::{Config, MediaFilter};
use crate::download::media::download_message_media;
use crate::download::state::{ExportCounters, ExportOutcome, ExportReport};
use crate::error::Error;
use crate::media::select_eligible;
use crate::output::{print_export_complete, print_page_error, ProgressSink};

/// Immutable settings of an export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSettings {
    /// Messages requested per page.
    pub limit: u32,
    /// Pause between page requests.
    pub delay: Duration,
    pub filter: MediaFilter,
}

impl ExportSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            limit: config.options.limit,
            delay: config.page_delay(),
            filter: config.options.media_type,
        }
    }
}

/// Walks a channel's history oldest-first and exports each page's media.
pub struct ExportEngine<C: PlatformClient> {
    client: C,
    settings: ExportSettings,
    progress: Arc<dyn ProgressSink>,
    counters: ExportCounters,
    last_offset: i64,
}

impl<C: PlatformClient> ExportEngine<C> {
    pub fn new(client: C, settings: ExportSettings, progress: Arc<dyn ProgressSink>) -> Self {
        Self {
            client,
            settings,
            progress,
            counters: ExportCounters::default(),
            last_offset: 0,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn counters(&self) -> ExportCounters {
        self.counters
    }

    /// Id of the last message of the most recent non-empty page.
    pub fn last_offset(&self) -> i64 {
        self.last_offset
    }

    /// Export `channel` into `root` until history is exhausted or `cancel` fires.
    ///
    /// Page and item failures are logged and survived; only an empty page or
    /// cancellation ends the run.
    pub async fn export(
        &mut self,
        channel: &str,
        root: &Path,
        cancel: &CancellationToken,
    ) -> ExportReport {
        tracing::info!("Exporting channel \"{}\" start", channel);

        let started_at = Utc::now();
        let mut pages_fetched = 0u64;
        let mut page_errors = 0u64;

        let outcome = loop {
            let request = PageRequest {
                channel,
                filter: self.settings.filter,
                offset_id: self.last_offset,
                limit: self.settings.limit,
                ascending: true,
            };

            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => break ExportOutcome::Interrupted,
                result = self.client.fetch_page(&request) => result,
            };

            let mut pause = self.settings.delay;

            match fetched {
                Ok(page) if page.is_empty() => {
                    self.progress.finish();
                    tracing::info!(
                        "Export of \"{}\" complete: {} new, {} existing",
                        channel,
                        self.counters.new_downloads,
                        self.counters.existing_skips
                    );
                    print_export_complete();
                    break ExportOutcome::Completed;
                }
                Ok(page) => {
                    pages_fetched += 1;
                    tracing::debug!(
                        "Page {} after offset {}: {} messages",
                        pages_fetched,
                        self.last_offset,
                        page.len()
                    );

                    if !self.export_page(channel, &page, root, cancel).await {
                        break ExportOutcome::Interrupted;
                    }
                    self.advance_cursor(&page);
                }
                Err(e) => {
                    page_errors += 1;
                    if let Error::RateLimited(seconds) = &e {
                        pause = pause.max(Duration::from_secs(*seconds));
                    }
                    print_page_error(&e);
                    tracing::warn!("Page fetch after offset {} failed: {}", self.last_offset, e);
                }
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break ExportOutcome::Interrupted,
                _ = sleep(pause) => {}
            }
        };

        if outcome == ExportOutcome::Interrupted {
            self.progress.finish();
            tracing::info!(
                "Export of \"{}\" stopped at offset {}",
                channel,
                self.last_offset
            );
        }

        ExportReport {
            channel: channel.to_string(),
            outcome,
            counters: self.counters,
            last_offset: self.last_offset,
            pages_fetched,
            page_errors,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Export the eligible messages of one page in order.
    ///
    /// Returns `false` when cancelled part-way through.
    async fn export_page(
        &mut self,
        channel: &str,
        page: &[Message],
        root: &Path,
        cancel: &CancellationToken,
    ) -> bool {
        tracing::info!("Exporting media messages");

        for message in select_eligible(page, self.settings.filter) {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return false,
                _ = download_message_media(
                    &self.client,
                    channel,
                    message,
                    root,
                    &mut self.counters,
                    self.progress.as_ref(),
                ) => {}
            }
        }

        true
    }

    /// Move the cursor to the last message of a page.
    fn advance_cursor(&mut self, page: &[Message]) {
        let Some(last) = page.last() else {
            return;
        };

        if last.id < self.last_offset {
            tracing::warn!(
                "Page ended at message {} below cursor {}; keeping cursor",
                last.id,
                self.last_offset
            );
            return;
        }

        self.last_offset = last.id;
    }
}
