//! Existing-export detection.

use std::path::Path;

/// Check whether a file named `{base}.*` already exists next to `base`.
///
/// The extension is ignored: whatever the download assigned earlier counts as exported.
/// A missing or unreadable directory means nothing was exported there yet.
pub fn exists(base: &Path) -> bool {
    let Some(stem) = base.file_name() else {
        return false;
    };
    let dir = match base.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let prefix = format!("{}.", stem.to_string_lossy());

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::trace!("Cannot scan {}: {}", dir.display(), e);
            return false;
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_name().to_string_lossy().starts_with(&prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_is_no_match() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!exists(&dir.path().join("nope").join("photo_10")));
    }

    #[test]
    fn test_any_extension_matches() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("photo_10.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("clip_11.mp4"), b"x").unwrap();

        assert!(exists(&dir.path().join("photo_10")));
        assert!(exists(&dir.path().join("clip_11")));
        assert!(!exists(&dir.path().join("photo_12")));
    }

    #[test]
    fn test_prefix_without_dot_does_not_match() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("photo_100.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("photo_10"), b"x").unwrap();

        // photo_100.jpg shares the prefix but not the `{base}.` form
        assert!(!exists(&dir.path().join("photo_10")));
    }

    #[test]
    fn test_dotted_base_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("archive.tar_7.gz"), b"x").unwrap();

        assert!(exists(&dir.path().join("archive.tar_7")));
        assert!(!exists(&dir.path().join("archive_7")));
    }

    #[test]
    fn test_partial_downloads_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".photo_10.jpg.abc.part"), b"x").unwrap();

        assert!(!exists(&dir.path().join("photo_10")));
    }
}
