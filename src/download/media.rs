//! Per-message media export.

use std::path::{Path, PathBuf};

use crate::api::{Message, PlatformClient};
use crate::dedup;
use crate::download::state::ExportCounters;
use crate::fs::paths::{ensure_dir, get_category_dir, get_target_base, remove_stale_partials};
use crate::media::MediaItem;
use crate::output::ProgressSink;

/// What happened to one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Newly written to the given path.
    Downloaded(PathBuf),
    /// A file with the same base name was already present.
    Existing,
    /// The media reference expired before it could be fetched.
    Stale,
    /// The download failed for another reason.
    Failed,
}

/// Export the media of one eligible message under `root`.
///
/// Never fails: every error is logged and reflected in the returned outcome, so the
/// caller can move on to the next message.
pub async fn download_message_media<C>(
    client: &C,
    channel: &str,
    message: &Message,
    root: &Path,
    counters: &mut ExportCounters,
    progress: &dyn ProgressSink,
) -> ItemOutcome
where
    C: PlatformClient + ?Sized,
{
    let item = MediaItem::from_message(message);

    // The category directory must exist before the duplicate check inspects it
    let category_dir = get_category_dir(root, &item);
    if let Err(e) = ensure_dir(&category_dir).await {
        tracing::error!(
            "Failed to create {} for message {}: {}",
            category_dir.display(),
            message.id,
            e
        );
        counters.increment_failed();
        return ItemOutcome::Failed;
    }

    let target = get_target_base(root, &item);

    // An interrupted run may have left a half-written copy of this item
    remove_stale_partials(&target);

    if dedup::exists(&target) {
        counters.increment_existing();
        tracing::debug!("Skipping existing file: {}.*", target.display());
        return ItemOutcome::Existing;
    }

    // Counters cannot change while this item downloads
    let (new_count, existing_count) = (counters.new_downloads, counters.existing_skips);
    let report = move |done: u64, total: Option<u64>| {
        progress.report(new_count, existing_count, done, total);
    };

    match client.download(channel, message, &target, &report).await {
        Ok(path) => {
            counters.increment_new();
            tracing::info!("Export complete: {}", path.display());
            ItemOutcome::Downloaded(path)
        }
        Err(e) if e.is_stale_reference() => {
            counters.increment_stale();
            tracing::warn!("File reference expired for message id {}", message.id);
            ItemOutcome::Stale
        }
        Err(e) => {
            counters.increment_failed();
            tracing::error!(
                "Failed to download media for message {}: {:?}",
                message.id,
                e
            );
            ItemOutcome::Failed
        }
    }
}
