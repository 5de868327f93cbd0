//! In-memory platform client for engine tests.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::types::{FileInfo, Message, MessageMedia, PageRequest, SessionInfo};
use crate::api::{PlatformClient, ProgressFn};
use crate::config::MediaFilter;
use crate::error::{Error, Result};
use crate::fs::naming::with_appended_extension;
use crate::media::resolve_extension;

/// Bytes written for every fake download.
const PAYLOAD: &[u8] = b"fake media payload";

/// A recorded page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub offset_id: i64,
    pub limit: u32,
    pub filter: MediaFilter,
    pub ascending: bool,
}

#[derive(Default)]
pub struct FakeClient {
    history: Vec<Message>,
    stale: HashSet<i64>,
    failing: HashSet<i64>,
    hanging: HashSet<i64>,
    failing_fetches: Mutex<u32>,
    requests: Mutex<Vec<RecordedRequest>>,
    downloads: Mutex<Vec<i64>>,
}

impl FakeClient {
    pub fn new(history: Vec<Message>) -> Self {
        Self {
            history,
            ..Default::default()
        }
    }

    /// Downloads of these messages fail with an expired file reference.
    pub fn with_stale(mut self, ids: &[i64]) -> Self {
        self.stale.extend(ids);
        self
    }

    /// Downloads of these messages fail with a generic error.
    pub fn with_failing(mut self, ids: &[i64]) -> Self {
        self.failing.extend(ids);
        self
    }

    /// Downloads of these messages never complete.
    pub fn with_hanging(mut self, ids: &[i64]) -> Self {
        self.hanging.extend(ids);
        self
    }

    /// The first `count` page fetches fail.
    pub fn with_failing_fetches(self, count: u32) -> Self {
        if let Ok(mut remaining) = self.failing_fetches.lock() {
            *remaining = count;
        }
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> Vec<i64> {
        self.downloads.lock().unwrap().clone()
    }
}

/// A message with an attached file.
pub fn media_message(id: i64, name: &str, mime: &str) -> Message {
    Message {
        id,
        media: Some(MessageMedia {
            kind: Some("document".to_string()),
        }),
        file: Some(FileInfo {
            name: Some(name.to_string()),
            mime_type: Some(mime.to_string()),
            size: Some(PAYLOAD.len() as u64),
        }),
    }
}

/// A message without media.
pub fn text_message(id: i64) -> Message {
    Message {
        id,
        media: None,
        file: None,
    }
}

#[async_trait]
impl PlatformClient for FakeClient {
    async fn connect(&self) -> Result<SessionInfo> {
        Ok(SessionInfo {
            authorized: true,
            username: Some("tester".to_string()),
            display_name: None,
        })
    }

    async fn fetch_page(&self, request: &PageRequest<'_>) -> Result<Vec<Message>> {
        self.requests.lock().unwrap().push(RecordedRequest {
            offset_id: request.offset_id,
            limit: request.limit,
            filter: request.filter,
            ascending: request.ascending,
        });

        {
            let mut remaining = self.failing_fetches.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(Error::Api("gateway unavailable".to_string()));
            }
        }

        Ok(self
            .history
            .iter()
            .filter(|m| m.id > request.offset_id)
            .filter(|m| request.filter.requires_media_check() || m.media.is_some())
            .take(request.limit as usize)
            .cloned()
            .collect())
    }

    async fn download(
        &self,
        _channel: &str,
        message: &Message,
        target_base: &Path,
        progress: &ProgressFn<'_>,
    ) -> Result<PathBuf> {
        self.downloads.lock().unwrap().push(message.id);

        if self.hanging.contains(&message.id) {
            std::future::pending::<()>().await;
        }
        if self.stale.contains(&message.id) {
            return Err(Error::StaleReference(message.id));
        }
        if self.failing.contains(&message.id) {
            return Err(Error::Download(format!("boom on {}", message.id)));
        }

        let total = Some(PAYLOAD.len() as u64);
        progress(0, total);

        let extension = resolve_extension(message.file.as_ref(), None);
        let path = with_appended_extension(target_base, &extension);
        tokio::fs::write(&path, PAYLOAD).await?;

        progress(PAYLOAD.len() as u64, total);
        Ok(path)
    }
}
