//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use crate::fs::naming::sanitize_path_component;
use regex::Regex;
use url::Url;

/// Length of a Telegram API hash (hex characters).
const API_HASH_LENGTH: usize = 32;

/// Largest page the gateway will serve in one request.
const MAX_PAGE_SIZE: u32 = 1000;

/// Validate the entire configuration.
///
/// Expects the channel to have been normalized with [`parse_channel`] first.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_api_id(config.account.api_id)?;
    validate_api_hash(&config.account.api_hash)?;
    validate_component("session_name", &config.account.session_name)?;
    validate_channel(&config.target.channel_name)?;
    validate_limit(config.options.limit)?;
    validate_component("export_prefix", &config.options.export_prefix)?;
    validate_gateway_url(&config.options.gateway_url)?;

    Ok(())
}

fn pattern(re: &str) -> Result<Regex> {
    Regex::new(re).map_err(|e| Error::Config(format!("Invalid pattern '{}': {}", re, e)))
}

/// Validate the Telegram API ID.
pub fn validate_api_id(api_id: i32) -> Result<()> {
    if api_id == 0 {
        return Err(Error::MissingConfig("api_id".to_string()));
    }

    if api_id < 0 {
        return Err(Error::ConfigValidation {
            field: "api_id".to_string(),
            message: format!("API ID must be positive (got {})", api_id),
        });
    }

    Ok(())
}

/// Validate the Telegram API hash.
pub fn validate_api_hash(api_hash: &str) -> Result<()> {
    if api_hash.is_empty() {
        return Err(Error::MissingConfig("api_hash".to_string()));
    }

    let lower = api_hash.to_lowercase();
    if lower.contains("replaceme") || lower.contains("your_api_hash") {
        return Err(Error::ConfigValidation {
            field: "api_hash".to_string(),
            message: "API hash appears to be a placeholder. Please provide your actual API hash."
                .to_string(),
        });
    }

    if api_hash.len() != API_HASH_LENGTH || !api_hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::ConfigValidation {
            field: "api_hash".to_string(),
            message: format!(
                "API hash must be {} hexadecimal characters (got {})",
                API_HASH_LENGTH,
                api_hash.len()
            ),
        });
    }

    Ok(())
}

/// Validate a value that becomes part of a local path.
fn validate_component(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::MissingConfig(field.to_string()));
    }

    let sanitized = sanitize_path_component(value)?;
    if sanitized != value {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!("'{}' contains characters not allowed in a path", value),
        });
    }

    Ok(())
}

/// Validate a normalized channel handle.
pub fn validate_channel(channel: &str) -> Result<()> {
    if channel.is_empty() {
        return Err(Error::MissingConfig("channel_name".to_string()));
    }

    // Usernames: 5-32 chars, starting with a letter. Numeric ids may be negative.
    let username_pattern = pattern(r"^[A-Za-z][A-Za-z0-9_]{4,31}$")?;
    let id_pattern = pattern(r"^-?\d+$")?;

    if !username_pattern.is_match(channel) && !id_pattern.is_match(channel) {
        return Err(Error::ConfigValidation {
            field: "channel_name".to_string(),
            message: format!(
                "Channel '{}' is not a valid username (5-32 letters, digits, underscores) or numeric id",
                channel
            ),
        });
    }

    let lower = channel.to_lowercase();
    if lower == "replaceme" || lower == "channel_name" {
        return Err(Error::ConfigValidation {
            field: "channel_name".to_string(),
            message: format!(
                "Channel '{}' appears to be a placeholder. Please provide an actual channel.",
                channel
            ),
        });
    }

    Ok(())
}

/// Validate the page size.
pub fn validate_limit(limit: u32) -> Result<()> {
    if limit == 0 || limit > MAX_PAGE_SIZE {
        return Err(Error::ConfigValidation {
            field: "limit".to_string(),
            message: format!("Page size must be between 1 and {} (got {})", MAX_PAGE_SIZE, limit),
        });
    }

    Ok(())
}

/// Validate the gateway base URL.
pub fn validate_gateway_url(gateway_url: &str) -> Result<()> {
    let url = Url::parse(gateway_url)?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::ConfigValidation {
            field: "gateway_url".to_string(),
            message: format!("Unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(())
}

/// Extract a channel handle from a username, `@username` or t.me link.
pub fn parse_channel(input: &str) -> Result<String> {
    let input = input.trim();

    if input.starts_with("http://") || input.starts_with("https://") || input.starts_with("t.me/")
    {
        // Pattern: https://t.me/channel or https://t.me/s/channel/123
        let link_pattern = pattern(r"t\.me/(?:s/)?([A-Za-z][A-Za-z0-9_]{4,31})(?:/\d+)?/?$")?;

        if let Some(captures) = link_pattern.captures(input) {
            if let Some(name) = captures.get(1) {
                return Ok(name.as_str().to_string());
            }
        }

        return Err(Error::ConfigValidation {
            field: "channel_name".to_string(),
            message: format!("Could not extract channel from link: {}", input),
        });
    }

    Ok(input.trim_start_matches('@').to_string())
}
