//! File extension resolution for downloaded media.

use std::path::Path;

use crate::api::types::FileInfo;

/// Extension used when nothing better is known.
pub const DEFAULT_EXTENSION: &str = "bin";

/// Pick the extension for a downloaded attachment.
///
/// Prefers the original filename, then the declared content type, then the content
/// type the transport reported.
pub fn resolve_extension(file: Option<&FileInfo>, content_type: Option<&str>) -> String {
    if let Some(ext) = file
        .and_then(|f| f.name.as_deref())
        .and_then(extract_extension_from_name)
    {
        return ext;
    }

    file.and_then(|f| f.mime_type.as_deref())
        .or(content_type)
        .map(mime_to_extension)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// Extract an extension from a filename.
fn extract_extension_from_name(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;

    // Validate it looks like an extension (1-10 chars, alphanumeric)
    if !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext.to_lowercase())
    } else {
        None
    }
}

/// Convert MIME type to file extension.
fn mime_to_extension(mimetype: &str) -> String {
    // Parameters such as "; codecs=opus" do not change the extension.
    let essence = mimetype
        .split(';')
        .next()
        .unwrap_or(mimetype)
        .trim()
        .to_lowercase();

    let ext = match essence.as_str() {
        // Images
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",

        // Videos
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        "video/quicktime" => "mov",

        // Audio
        "audio/mpeg" => "mp3",
        "audio/mp4" => "m4a",
        "audio/ogg" => "ogg",
        "audio/wav" => "wav",

        // Telegram animated stickers
        "application/x-tgsticker" => "tgs",

        other => {
            return mime_guess::get_mime_extensions_str(other)
                .and_then(|exts| exts.first())
                .map(|ext| ext.to_string())
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        }
    };

    ext.to_string()
}
