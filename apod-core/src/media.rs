use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static YOUTUBE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:embed/|watch\?v=|youtu\.be/)([A-Za-z0-9_-]{11})").unwrap());

pub fn youtube_id(url: &str) -> Option<&str> {
    YOUTUBE_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn youtube_thumbnail(url: &str) -> Option<String> {
    youtube_id(url).map(|id| format!("https://img.youtube.com/vi/{id}/hqdefault.jpg"))
}

/// True when `url` is hosted on youtube.com (any subdomain).
pub fn is_video_host(url: &str) -> bool {
    Url::parse(url).map_or(false, |parsed| is_youtube(&parsed))
}

fn is_youtube(url: &Url) -> bool {
    url.host_str()
        .map(str::to_ascii_lowercase)
        .map_or(false, |host| host == "youtube.com" || host.ends_with(".youtube.com"))
}

/// Adds autoplay and related-video suppression to a youtube URL; other URLs are returned as-is.
pub fn embed_url(url: &str) -> String {
    let mut parsed = match Url::parse(url) {
        Ok(parsed) if is_youtube(&parsed) => parsed,
        _ => return url.to_string(),
    };
    parsed
        .query_pairs_mut()
        .append_pair("autoplay", "1")
        .append_pair("rel", "0");
    parsed.to_string()
}
