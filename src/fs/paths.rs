//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;
use crate::fs::naming::{sanitize_file_stem, sanitize_path_component, PARTIAL_SUFFIX};
use crate::media::MediaItem;

/// Get the export root for a channel: `{download_dir}/{channel}_{prefix}`.
pub fn get_export_root(config: &Config, channel_name: &str) -> Result<PathBuf> {
    let folder = sanitize_path_component(&format!(
        "{}_{}",
        channel_name, config.options.export_prefix
    ))?;

    Ok(config.download_directory().join(folder))
}

/// Category directory for a media item: `{root}/{category}`.
pub fn get_category_dir(root: &Path, item: &MediaItem) -> PathBuf {
    root.join(sanitize_file_stem(&item.category))
}

/// Extension-less target path for a media item: `{root}/{category}/{base_filename}`.
pub fn get_target_base(root: &Path, item: &MediaItem) -> PathBuf {
    get_category_dir(root, item).join(sanitize_file_stem(&item.base_filename))
}

/// Ensure a directory exists, creating it if necessary.
///
/// Safe to call repeatedly; an existing directory is not an error.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}

/// Move a finished partial download into place.
///
/// The partial file is removed when the rename fails.
pub async fn commit_partial(partial: &Path, final_path: &Path) -> Result<()> {
    if let Err(e) = tokio::fs::rename(partial, final_path).await {
        discard_partial(partial).await;
        return Err(e.into());
    }
    Ok(())
}

/// Remove a partial download, ignoring one that is already gone.
pub async fn discard_partial(partial: &Path) {
    if let Err(e) = tokio::fs::remove_file(partial).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::debug!("Could not remove {}: {}", partial.display(), e);
        }
    }
}

/// Remove partial downloads of `base` left behind by an interrupted run.
///
/// Returns how many were removed.
pub fn remove_stale_partials(base: &Path) -> usize {
    let (Some(dir), Some(stem)) = (base.parent(), base.file_name()) else {
        return 0;
    };
    let prefix = format!(".{}.", stem.to_string_lossy());
    let suffix = format!(".{}", PARTIAL_SUFFIX);

    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };

    let mut removed = 0;
    for entry in entries.filter_map(|entry| entry.ok()) {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !name.starts_with(&prefix) || !name.ends_with(&suffix) {
            continue;
        }
        match std::fs::remove_file(entry.path()) {
            Ok(()) => {
                tracing::debug!("Removed stale partial download {}", name);
                removed += 1;
            }
            Err(e) => tracing::warn!("Could not remove stale partial {}: {}", name, e),
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: &str, base: &str) -> MediaItem {
        MediaItem {
            message_id: 1,
            category: category.to_string(),
            base_filename: base.to_string(),
            mime_type: None,
        }
    }

    #[test]
    fn test_get_export_root() {
        let mut config = Config::default();
        config.options.download_directory = Some(PathBuf::from("/downloads"));
        config.options.export_prefix = "export".to_string();

        let path = get_export_root(&config, "rustlang").unwrap();
        assert_eq!(path, PathBuf::from("/downloads/rustlang_export"));
    }

    #[test]
    fn test_get_target_base() {
        let root = PathBuf::from("/downloads/rustlang_export");
        let target = get_target_base(&root, &item("video", "clip_12"));
        assert_eq!(
            target,
            PathBuf::from("/downloads/rustlang_export/video/clip_12")
        );
    }

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a").join("image");

        ensure_dir(&target).await.unwrap();
        ensure_dir(&target).await.unwrap();
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn test_commit_partial_moves_file() {
        let dir = tempfile::tempdir().unwrap();
        let partial = dir.path().join(".clip_3.mp4.x.part");
        let target = dir.path().join("clip_3.mp4");
        std::fs::write(&partial, b"data").unwrap();

        commit_partial(&partial, &target).await.unwrap();

        assert!(target.is_file());
        assert!(!partial.exists());
    }

    #[tokio::test]
    async fn test_failed_commit_removes_partial() {
        let dir = tempfile::tempdir().unwrap();
        let partial = dir.path().join(".clip_3.mp4.x.part");
        std::fs::write(&partial, b"data").unwrap();

        // The target's directory does not exist, so the rename fails
        let target = dir.path().join("missing").join("clip_3.mp4");
        assert!(commit_partial(&partial, &target).await.is_err());
        assert!(!partial.exists());
    }

    #[test]
    fn test_remove_stale_partials_only_touches_that_item() {
        let dir = tempfile::tempdir().unwrap();
        let keep = [
            "photo_10.jpg",
            ".photo_100.jpg.abc.part",
            ".photo_10.jpg.notes",
        ];
        for name in keep {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::write(dir.path().join(".photo_10.jpg.abc.part"), b"x").unwrap();
        std::fs::write(dir.path().join(".photo_10.png.def.part"), b"x").unwrap();

        assert_eq!(remove_stale_partials(&dir.path().join("photo_10")), 2);
        for name in keep {
            assert!(dir.path().join(name).exists(), "{} was removed", name);
        }
    }

    #[test]
    fn test_remove_stale_partials_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(remove_stale_partials(&dir.path().join("nope").join("a_1")), 0);
    }
}
