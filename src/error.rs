//! Error types shared by the exporter and its CLI.

use thiserror::Error;

/// Everything that can go wrong while configuring or running an export.
///
/// Per-item download failures are absorbed by the orchestrator; only startup
/// problems reach `main` as an `Error`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required setting: {0}")]
    MissingConfig(String),

    /// The gateway answered, but not with what was asked for.
    #[error("Gateway error: {0}")]
    Api(String),

    /// Session not signed in, or credentials refused.
    #[error("Not authorized: {0}")]
    Authentication(String),

    /// Seconds to wait before the next request.
    #[error("Rate limited by gateway, retry in {0}s")]
    RateLimited(u64),

    /// Media reference of this message id must be refreshed by listing again.
    #[error("File reference expired for message {0}")]
    StaleReference(i64),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Unsafe path component: {0}")]
    InvalidFilename(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed config file: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error means the remote media pointer must be refreshed by re-listing.
    pub fn is_stale_reference(&self) -> bool {
        matches!(self, Error::StaleReference(_))
    }

    /// Process exit code for a run that failed with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_)
            | Error::ConfigValidation { .. }
            | Error::MissingConfig(_)
            | Error::InvalidFilename(_)
            | Error::TomlParse(_)
            | Error::UrlParse(_) => exit_codes::CONFIG_ERROR,
            Error::Api(_) | Error::Authentication(_) | Error::RateLimited(_) | Error::Http(_) => {
                exit_codes::API_ERROR
            }
            Error::StaleReference(_) | Error::Download(_) => exit_codes::DOWNLOAD_ERROR,
            Error::Io(_) | Error::Json(_) => exit_codes::UNEXPECTED_ERROR,
        }
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    /// Stopped by the operator.
    pub const ABORT: i32 = 1;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
