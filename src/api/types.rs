//! Gateway request and response type definitions.

use serde::{Deserialize, Serialize};

use crate::config::MediaFilter;

/// Generic gateway response wrapper.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub response: Option<T>,
    pub error: Option<ApiErrorBody>,
}

/// Error payload returned alongside `success: false`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// RPC-style error code, e.g. `FILE_REFERENCE_EXPIRED`.
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error code reported when a media reference must be refreshed by re-listing.
pub const FILE_REFERENCE_EXPIRED: &str = "FILE_REFERENCE_EXPIRED";

/// Body of the session connect call.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectRequest<'a> {
    pub session_name: &'a str,
    pub api_id: i32,
    pub api_hash: &'a str,
}

/// Session state reported by the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionInfo {
    pub authorized: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A channel message as listed by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message ID, increasing within the channel.
    pub id: i64,

    /// Attached media; presence means the message has something to export.
    #[serde(default)]
    pub media: Option<MessageMedia>,

    /// File descriptor of the attached media, when the platform exposes one.
    #[serde(default)]
    pub file: Option<FileInfo>,
}

/// Kind of media attached to a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageMedia {
    /// Platform media kind (`photo`, `document`, `webpage`, ...), when reported.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// File descriptor of an attachment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Original filename, if the sender supplied one.
    #[serde(default)]
    pub name: Option<String>,

    /// Declared content type.
    #[serde(default)]
    pub mime_type: Option<String>,

    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
}

/// Parameters of one page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<'a> {
    pub channel: &'a str,
    pub filter: MediaFilter,
    /// Exclusive lower bound on message id.
    pub offset_id: i64,
    pub limit: u32,
    /// Oldest first when true.
    pub ascending: bool,
}
