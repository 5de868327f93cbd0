//! Names of exported files and folders.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Suffix of in-flight download files.
pub const PARTIAL_SUFFIX: &str = "part";

/// Validate a configured folder name that becomes part of the export root.
///
/// Reserved characters are replaced; parent references, null bytes and blank
/// names are refused.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    let refuse = |reason: &str| Err(Error::InvalidFilename(format!("{} in '{}'", reason, name)));

    if name.contains("..") {
        return refuse("parent directory reference");
    }
    if name.contains('\0') {
        return refuse("null byte");
    }

    let sanitized = replace_reserved(name);
    if sanitized.trim().is_empty() {
        return refuse("blank name");
    }

    Ok(sanitized)
}

/// Make a remote-provided file stem safe to use as a single path component.
///
/// Never fails: separators, reserved and control characters become `_`, and a stem made
/// only of dots is replaced as a whole.
pub fn sanitize_file_stem(stem: &str) -> String {
    let sanitized = replace_reserved(stem);
    if sanitized.chars().all(|c| c == '.') {
        return "_".repeat(sanitized.len().max(1));
    }
    sanitized
}

fn replace_reserved(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Append an extension to a base path without touching dots already in the file name.
///
/// `Path::with_extension` would treat `"a.b_12"` as stem `a` plus extension `b_12`.
pub fn with_appended_extension(base: &Path, extension: &str) -> PathBuf {
    let mut name: OsString = base.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Hidden sibling path used while a download is in flight.
///
/// Starts with a dot so it never matches `{base}.*` during duplicate detection.
pub fn partial_path(final_path: &Path) -> PathBuf {
    let file_name = final_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let partial = format!(".{}.{}.{}", file_name, uuid::Uuid::new_v4(), PARTIAL_SUFFIX);

    match final_path.parent() {
        Some(parent) => parent.join(partial),
        None => PathBuf::from(partial),
    }
}
