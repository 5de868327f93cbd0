//! Media filter selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-side content filter applied when listing channel history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum MediaFilter {
    /// Every message; media presence is checked per message.
    #[default]
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

impl MediaFilter {
    /// Filter name sent to the gateway, or `None` to list everything.
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            MediaFilter::All => None,
            MediaFilter::Photos => Some("photos"),
            MediaFilter::ChatPhotos => Some("chat_photos"),
            MediaFilter::Document => Some("document"),
            MediaFilter::Gif => Some("gif"),
            MediaFilter::Music => Some("music"),
            MediaFilter::PhotoVideo => Some("photo_video"),
            MediaFilter::RoundVideo => Some("round_video"),
            MediaFilter::RoundVoice => Some("round_voice"),
            MediaFilter::Video => Some("video"),
            MediaFilter::Voice => Some("voice"),
        }
    }

    /// Whether each listed message still needs a media-presence check.
    ///
    /// Only the unfiltered listing can return messages without media; a specific
    /// filter is trusted to have done that work on the server.
    pub fn requires_media_check(&self) -> bool {
        matches!(self, MediaFilter::All)
    }
}

impl fmt::Display for MediaFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_query().unwrap_or("all"))
    }
}

impl FromStr for MediaFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(MediaFilter::All),
            "photos" => Ok(MediaFilter::Photos),
            "chat_photos" => Ok(MediaFilter::ChatPhotos),
            "document" => Ok(MediaFilter::Document),
            "gif" => Ok(MediaFilter::Gif),
            "music" => Ok(MediaFilter::Music),
            "photo_video" => Ok(MediaFilter::PhotoVideo),
            "round_video" => Ok(MediaFilter::RoundVideo),
            "round_voice" => Ok(MediaFilter::RoundVoice),
            "video" => Ok(MediaFilter::Video),
            "voice" => Ok(MediaFilter::Voice),
            _ => Err(format!(
                "Unknown media type: '{}'. Expected one of: all, photos, chat_photos, document, \
                 gif, music, photo_video, round_video, round_voice, video, voice",
                s
            )),
        }
    }
}

impl TryFrom<String> for MediaFilter {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_filters() {
        assert_eq!("photos".parse::<MediaFilter>().unwrap(), MediaFilter::Photos);
        assert_eq!(
            "Round_Voice".parse::<MediaFilter>().unwrap(),
            MediaFilter::RoundVoice
        );
        assert_eq!("all".parse::<MediaFilter>().unwrap(), MediaFilter::All);
        assert_eq!("".parse::<MediaFilter>().unwrap(), MediaFilter::All);
    }

    #[test]
    fn test_unknown_filter_is_rejected() {
        assert!("fotos".parse::<MediaFilter>().is_err());
        assert!("videos".parse::<MediaFilter>().is_err());
    }

    #[test]
    fn test_media_check_only_for_all() {
        assert!(MediaFilter::All.requires_media_check());
        assert!(!MediaFilter::Video.requires_media_check());
        assert_eq!(MediaFilter::All.as_query(), None);
        assert_eq!(MediaFilter::PhotoVideo.as_query(), Some("photo_video"));
    }

    #[test]
    fn test_deserialize_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            media_type: MediaFilter,
        }

        let w: Wrapper = toml::from_str("media_type = \"GIF\"").unwrap();
        assert_eq!(w.media_type, MediaFilter::Gif);
        assert!(toml::from_str::<Wrapper>("media_type = \"gifs\"").is_err());
    }
}
