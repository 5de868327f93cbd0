//! Messaging gateway HTTP client.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::api::types::*;
use crate::api::{PlatformClient, ProgressFn};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fs::naming::{partial_path, with_appended_extension};
use crate::fs::paths::{commit_partial, discard_partial};
use crate::media::resolve_extension;

/// Seconds to back off when the gateway rate limits without saying how long.
const DEFAULT_RETRY_AFTER: u64 = 60;

/// Longest response body quoted in parse errors.
const MAX_QUOTED_BODY: usize = 500;

/// Client for a gateway exposing channel history and media over JSON/HTTP.
pub struct GatewayClient {
    client: Client,
    base_url: Url,
    session_name: String,
    api_id: i32,
    api_hash: String,
}

impl GatewayClient {
    /// Create a client for the gateway at `base_url`.
    pub fn new(base_url: &str, session_name: String, api_id: i32, api_hash: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::ConfigValidation {
                field: "gateway_url".to_string(),
                message: format!("'{}' cannot be used as a base URL", base_url),
            });
        }

        Ok(Self {
            client,
            base_url,
            session_name,
            api_id,
            api_hash,
        })
    }

    /// Create a client from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.options.gateway_url,
            config.account.session_name.clone(),
            config.account.api_id,
            config.account.api_hash.clone(),
        )
    }

    /// Build a URL below the gateway base from path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Invalid gateway URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build the session headers sent with every request.
    fn build_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();

        let value = |v: &str| {
            header::HeaderValue::from_str(v)
                .map_err(|e| Error::Config(format!("Invalid header value: {}", e)))
        };

        headers.insert("x-session-name", value(&self.session_name)?);
        headers.insert("x-api-id", value(&self.api_id.to_string())?);
        headers.insert("x-api-hash", value(&self.api_hash)?);

        Ok(headers)
    }

    /// Send a request with session headers and map transport-level failures.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.headers(self.build_headers()?).send().await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        // Check for rate limiting
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER);
            return Err(Error::RateLimited(retry_after));
        }

        // Check for auth errors
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Auth error response: {}", body);
            return Err(Error::Authentication(format!(
                "HTTP {}: {}",
                status,
                if body.is_empty() {
                    "Authentication failed"
                } else {
                    body.as_str()
                }
            )));
        }

        Ok(response)
    }

    /// Read a JSON envelope, turning `success: false` into an error.
    async fn parse_envelope<T: serde::de::DeserializeOwned>(
        response: Response,
        what: &str,
    ) -> Result<T> {
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!("{} response length: {} bytes", what, text.len());

        let api_response: ApiResponse<T> = serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse {}: {} (HTTP {}) - Response: {}",
                what,
                e,
                status,
                quote_body(&text)
            ))
        })?;

        if !api_response.success {
            return Err(envelope_error(api_response.error, what, None));
        }

        api_response
            .response
            .ok_or_else(|| Error::Api(format!("Empty {} response", what)))
    }
}

/// Map an error envelope to an error, recognizing expired file references.
fn envelope_error(error: Option<ApiErrorBody>, what: &str, message_id: Option<i64>) -> Error {
    match (error, message_id) {
        (Some(body), Some(id)) if body.code == FILE_REFERENCE_EXPIRED => Error::StaleReference(id),
        (Some(body), _) => Error::Api(format!(
            "Failed to get {}: {}{}",
            what,
            body.code,
            body.message.map(|m| format!(" ({})", m)).unwrap_or_default()
        )),
        (None, _) => Error::Api(format!("Failed to get {}", what)),
    }
}

fn quote_body(text: &str) -> &str {
    match text.char_indices().nth(MAX_QUOTED_BODY) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Stream a download response into `path`, reporting byte progress.
async fn write_stream(
    response: Response,
    path: &Path,
    total: Option<u64>,
    progress: &ProgressFn<'_>,
) -> Result<u64> {
    let mut file = File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    progress(downloaded, total);

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        progress(downloaded, total);
    }

    file.flush().await?;
    Ok(downloaded)
}

#[async_trait]
impl PlatformClient for GatewayClient {
    async fn connect(&self) -> Result<SessionInfo> {
        let url = self.endpoint(&["v1", "session", "connect"])?;
        let body = ConnectRequest {
            session_name: &self.session_name,
            api_id: self.api_id,
            api_hash: &self.api_hash,
        };

        tracing::debug!("POST {}", url);
        let response = self.send(self.client.post(url).json(&body)).await?;
        let session: SessionInfo = Self::parse_envelope(response, "session").await?;

        if !session.authorized {
            return Err(Error::Authentication(format!(
                "Session '{}' is not authorized on the gateway; sign in there first",
                self.session_name
            )));
        }

        Ok(session)
    }

    async fn fetch_page(&self, request: &PageRequest<'_>) -> Result<Vec<Message>> {
        let mut url = self.endpoint(&["v1", "channels", request.channel, "messages"])?;
        {
            // With reverse=true, offset_id is an exclusive lower bound
            let mut query = url.query_pairs_mut();
            query.append_pair("offset_id", &request.offset_id.to_string());
            query.append_pair("limit", &request.limit.to_string());
            query.append_pair("reverse", if request.ascending { "true" } else { "false" });
            if let Some(filter) = request.filter.as_query() {
                query.append_pair("filter", filter);
            }
        }

        tracing::debug!("GET {}", url);
        let response = self.send(self.client.get(url)).await?;
        let messages: Vec<Message> = Self::parse_envelope(response, "messages").await?;

        tracing::debug!(
            "Fetched {} messages after offset {}",
            messages.len(),
            request.offset_id
        );
        Ok(messages)
    }

    async fn download(
        &self,
        channel: &str,
        message: &Message,
        target_base: &Path,
        progress: &ProgressFn<'_>,
    ) -> Result<PathBuf> {
        let id = message.id.to_string();
        let url = self.endpoint(&["v1", "channels", channel, "messages", &id, "media"])?;

        tracing::debug!("GET {}", url);
        let response = self.send(self.client.get(url)).await?;
        let status = response.status();

        if status == StatusCode::GONE {
            return Err(Error::StaleReference(message.id));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let error = serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
                .ok()
                .and_then(|r| r.error);
            return Err(match error {
                Some(body) => envelope_error(Some(body), "media", Some(message.id)),
                None => Error::Download(format!(
                    "Failed to download message {}: HTTP {}",
                    message.id, status
                )),
            });
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let total = response
            .content_length()
            .or_else(|| message.file.as_ref().and_then(|f| f.size));

        let extension = resolve_extension(message.file.as_ref(), content_type.as_deref());
        let output_path = with_appended_extension(target_base, &extension);
        let partial = partial_path(&output_path);

        let bytes = match write_stream(response, &partial, total, progress).await {
            Ok(bytes) => bytes,
            Err(e) => {
                discard_partial(&partial).await;
                return Err(e);
            }
        };

        commit_partial(&partial, &output_path).await?;
        tracing::debug!("Wrote {} bytes to {}", bytes, output_path.display());
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> GatewayClient {
        GatewayClient::new(
            base,
            "session".to_string(),
            123456,
            "0123456789abcdef0123456789abcdef".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let c = client("http://127.0.0.1:8081");
        let url = c.endpoint(&["v1", "channels", "rustlang", "messages"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8081/v1/channels/rustlang/messages");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let c = client("http://gateway.local/tg/");
        let url = c.endpoint(&["v1", "session", "connect"]).unwrap();
        assert_eq!(url.as_str(), "http://gateway.local/tg/v1/session/connect");

        let c = client("http://gateway.local/tg");
        let url = c.endpoint(&["v1", "session", "connect"]).unwrap();
        assert_eq!(url.as_str(), "http://gateway.local/tg/v1/session/connect");
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(GatewayClient::new("mailto:me@example.com", String::new(), 1, String::new()).is_err());
    }

    #[test]
    fn test_headers() {
        let headers = client("http://localhost").build_headers().unwrap();
        assert_eq!(headers.get("x-session-name").unwrap(), "session");
        assert_eq!(headers.get("x-api-id").unwrap(), "123456");
    }

    #[test]
    fn test_envelope_error_mapping() {
        let expired = ApiErrorBody {
            code: FILE_REFERENCE_EXPIRED.to_string(),
            message: None,
        };
        assert!(matches!(
            envelope_error(Some(expired.clone()), "media", Some(11)),
            Error::StaleReference(11)
        ));

        // Outside a download there is no message to refresh
        assert!(matches!(
            envelope_error(Some(expired), "messages", None),
            Error::Api(_)
        ));

        let other = ApiErrorBody {
            code: "CHANNEL_PRIVATE".to_string(),
            message: Some("no access".to_string()),
        };
        let err = envelope_error(Some(other), "messages", None);
        assert_eq!(
            err.to_string(),
            "Gateway error: Failed to get messages: CHANNEL_PRIVATE (no access)"
        );
    }

    #[test]
    fn test_quote_body_truncates() {
        let long = "x".repeat(2000);
        assert_eq!(quote_body(&long).len(), MAX_QUOTED_BODY);
        assert_eq!(quote_body("short"), "short");
    }
}
