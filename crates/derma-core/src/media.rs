// Video URL helpers: YouTube and Instagram id extraction, thumbnails and
// embed links.

use std::sync::LazyLock;

use derma_api::Video;
use regex::Regex;

/// Everything up to the last id marker, then the id up to `#`, `&` or `?`.
static YOUTUBE_ID: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^.*(?:youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*)").ok()
});

static INSTAGRAM_ID: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"instagram\.com/(?:p|reel)/([a-zA-Z0-9_-]+)").ok());

const YOUTUBE_ID_LEN: usize = 11;

/// YouTube thumbnail sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThumbnailQuality {
    Default,
    #[default]
    High,
    Standard,
    MaxRes,
}

impl ThumbnailQuality {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::High => "hqdefault",
            Self::Standard => "sddefault",
            Self::MaxRes => "maxresdefault",
        }
    }
}

/// The 11-character video id of a YouTube link, if it has one.
pub fn youtube_video_id(url: &str) -> Option<&str> {
    let caps = YOUTUBE_ID.as_ref()?.captures(url)?;
    let id = caps.get(1)?.as_str();
    (id.len() == YOUTUBE_ID_LEN).then_some(id)
}

pub fn youtube_thumbnail(url: &str, quality: ThumbnailQuality) -> Option<String> {
    youtube_video_id(url)
        .map(|id| format!("https://img.youtube.com/vi/{id}/{}.jpg", quality.as_str()))
}

pub fn is_instagram_reel(url: &str) -> bool {
    url.contains("instagram.com") && (url.contains("/reel/") || url.contains("/p/"))
}

/// Post or reel id of an Instagram link.
pub fn instagram_reel_id(url: &str) -> Option<&str> {
    let caps = INSTAGRAM_ID.as_ref()?.captures(url)?;
    caps.get(1).map(|m| m.as_str())
}

/// Embeddable player URL.
///
/// Instagram links without an id yield `None`. Links that are neither
/// Instagram nor a recognisable YouTube video are returned unchanged.
pub fn embed_url(url: &str) -> Option<String> {
    if is_instagram_reel(url) {
        return instagram_reel_id(url).map(|id| format!("https://www.instagram.com/p/{id}/embed/"));
    }
    Some(match youtube_video_id(url) {
        Some(id) => format!("https://www.youtube.com/embed/{id}"),
        None => url.to_owned(),
    })
}

/// Stored thumbnail if the record has one, else the YouTube default.
pub fn thumbnail_for(video: &Video) -> Option<String> {
    video
        .thumbnail
        .clone()
        .filter(|t| !t.is_empty())
        .or_else(|| youtube_thumbnail(&video.url, ThumbnailQuality::default()))
}
