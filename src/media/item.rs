//! Media item representation and classification.

use crate::api::types::{FileInfo, Message};
use crate::config::MediaFilter;

/// Stem used when the attachment carries no filename.
pub const FALLBACK_STEM: &str = "mte";

/// Category used when no content type is declared.
pub const FALLBACK_CATEGORY: &str = "other";

/// An exportable attachment of a single message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    /// ID of the message carrying the media.
    pub message_id: i64,

    /// Coarse content category (`image`, `video`, `audio`, `other`, ...).
    pub category: String,

    /// Extension-less stem, unique per message.
    pub base_filename: String,

    /// Declared content type, if any.
    pub mime_type: Option<String>,
}

impl MediaItem {
    /// Build the item for a message regardless of whether it carries media.
    pub fn from_message(message: &Message) -> Self {
        let file = message.file.as_ref();
        let mime_type = file.and_then(|f| f.mime_type.clone());

        Self {
            message_id: message.id,
            category: derive_category(mime_type.as_deref()),
            base_filename: derive_base_filename(file, message.id),
            mime_type,
        }
    }
}

/// Classify a message, returning `None` when it carries no media.
pub fn classify(message: &Message) -> Option<MediaItem> {
    message.media.as_ref()?;
    Some(MediaItem::from_message(message))
}

/// Select the messages of a page that should be exported, in page order.
///
/// The media-presence check only runs for the unfiltered listing; a specific filter
/// has already been applied by the server, so every listed message is kept.
pub fn select_eligible(messages: &[Message], filter: MediaFilter) -> Vec<&Message> {
    if filter.requires_media_check() {
        messages
            .iter()
            .filter(|m| classify(m).is_some())
            .collect()
    } else {
        messages.iter().collect()
    }
}

/// Category from the first segment of a content type, `other` when none is declared.
pub fn derive_category(mime_type: Option<&str>) -> String {
    match mime_type {
        Some(mime) if !mime.is_empty() => mime
            .split('/')
            .next()
            .unwrap_or(FALLBACK_CATEGORY)
            .to_string(),
        _ => FALLBACK_CATEGORY.to_string(),
    }
}

/// Strip the last dot segment of a filename; keep undotted names as they are.
pub fn strip_extension(file_name: Option<&str>) -> String {
    match file_name {
        Some(name) => match name.rsplit_once('.') {
            Some((stem, _extension)) => stem.to_string(),
            None if !name.is_empty() => name.to_string(),
            None => FALLBACK_STEM.to_string(),
        },
        None => FALLBACK_STEM.to_string(),
    }
}

/// Base filename of a message's media: `{stem}_{message_id}`.
pub fn derive_base_filename(file: Option<&FileInfo>, message_id: i64) -> String {
    let stem = match file {
        Some(file) => strip_extension(file.name.as_deref()),
        None => FALLBACK_STEM.to_string(),
    };
    format!("{}_{}", stem, message_id)
}
