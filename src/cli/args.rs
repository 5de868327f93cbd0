//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, MediaFilter};

/// Telegram channel media exporter CLI.
#[derive(Parser, Debug)]
#[command(
    name = "tg-media-export",
    version,
    about = "Incrementally export media from a Telegram channel",
    long_about = "Walks a channel's history oldest-first and saves every media attachment.\n\n\
                  Files already present on disk are skipped, so an interrupted export can simply be run again."
)]
pub struct Args {
    /// Channel username, @username or t.me link.
    #[arg(long)]
    pub channel: Option<String>,

    /// Base directory for exports.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Telegram API ID.
    #[arg(long = "api-id", env = "TG_API_ID")]
    pub api_id: Option<i32>,

    /// Telegram API hash.
    #[arg(long = "api-hash", env = "TG_API_HASH", hide_env_values = true)]
    pub api_hash: Option<String>,

    /// Session name held by the gateway.
    #[arg(long)]
    pub session: Option<String>,

    /// Base URL of the messaging gateway.
    #[arg(long = "gateway", env = "TG_GATEWAY_URL")]
    pub gateway_url: Option<String>,

    /// Messages requested per page.
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Seconds to wait between pages.
    #[arg(long)]
    pub delay: Option<u64>,

    /// Suffix of the export directory name.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Only export this kind of media.
    #[arg(short = 't', long = "media-type", value_enum)]
    pub media_type: Option<MediaFilterArg>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Write logs to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Do not write a log file.
    #[arg(long, conflicts_with = "log_file")]
    pub no_log_file: bool,

    /// Hide the progress line.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI media filter argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MediaFilterArg {
    /// Every message with media.
    All,
    Photos,
    ChatPhotos,
    Document,
    Gif,
    Music,
    PhotoVideo,
    RoundVideo,
    RoundVoice,
    Video,
    Voice,
}

impl From<MediaFilterArg> for MediaFilter {
    fn from(arg: MediaFilterArg) -> Self {
        match arg {
            MediaFilterArg::All => MediaFilter::All,
            MediaFilterArg::Photos => MediaFilter::Photos,
            MediaFilterArg::ChatPhotos => MediaFilter::ChatPhotos,
            MediaFilterArg::Document => MediaFilter::Document,
            MediaFilterArg::Gif => MediaFilter::Gif,
            MediaFilterArg::Music => MediaFilter::Music,
            MediaFilterArg::PhotoVideo => MediaFilter::PhotoVideo,
            MediaFilterArg::RoundVideo => MediaFilter::RoundVideo,
            MediaFilterArg::RoundVoice => MediaFilter::RoundVoice,
            MediaFilterArg::Video => MediaFilter::Video,
            MediaFilterArg::Voice => MediaFilter::Voice,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(channel) = self.channel {
            config.target.channel_name = channel;
        }

        // Override account settings if provided
        if let Some(api_id) = self.api_id {
            config.account.api_id = api_id;
        }

        if let Some(api_hash) = self.api_hash {
            config.account.api_hash = api_hash;
        }

        if let Some(session) = self.session {
            config.account.session_name = session;
        }

        // Override options if provided
        if let Some(gateway_url) = self.gateway_url {
            config.options.gateway_url = gateway_url;
        }

        if let Some(dir) = self.download_directory {
            config.options.download_directory = Some(dir);
        }

        if let Some(limit) = self.limit {
            config.options.limit = limit;
        }

        if let Some(delay) = self.delay {
            config.options.delay_seconds = delay;
        }

        if let Some(prefix) = self.prefix {
            config.options.export_prefix = prefix;
        }

        if let Some(media_type) = self.media_type {
            config.options.media_type = media_type.into();
        }

        if let Some(log_file) = self.log_file {
            config.options.log_file = Some(log_file);
        }

        if self.no_log_file {
            config.options.log_file = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from([
            "tg-media-export",
            "--channel",
            "@rustlang",
            "--limit",
            "50",
            "--delay",
            "2",
            "--media-type",
            "photo-video",
            "--no-log-file",
        ]);

        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert_eq!(config.target.channel_name, "@rustlang");
        assert_eq!(config.options.limit, 50);
        assert_eq!(config.options.delay_seconds, 2);
        assert_eq!(config.options.media_type, MediaFilter::PhotoVideo);
        assert!(config.options.log_file.is_none());
    }

    #[test]
    fn test_unset_flags_keep_config() {
        let args = Args::parse_from(["tg-media-export"]);
        let mut config = Config::default();
        config.options.export_prefix = "media".to_string();
        config.options.media_type = MediaFilter::Voice;

        args.merge_into_config(&mut config);

        assert_eq!(config.options.export_prefix, "media");
        assert_eq!(config.options.media_type, MediaFilter::Voice);
        assert_eq!(config.options.limit, 200);
    }

    #[test]
    fn test_unknown_media_type_rejected() {
        assert!(Args::try_parse_from(["tg-media-export", "--media-type", "pictures"]).is_err());
    }
}
