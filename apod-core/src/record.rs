use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn badge(self) -> &'static str {
        match self {
            MediaKind::Image => "IMAGE",
            MediaKind::Video => "VIDEO",
        }
    }

    pub fn is_video(self) -> bool {
        matches!(self, MediaKind::Video)
    }
}

/// One entry of the feed exactly as it arrives on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawRecord {
    pub title: String,
    pub explanation: String,
    pub date: String,
    pub media_type: MediaKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// A validated astronomy picture entry.
///
/// `day` is derived from `date` when the record is built and never leaves the
/// process: it is skipped on serialization so the record writes back in the
/// feed's own shape.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Record {
    pub title: String,
    pub explanation: String,
    pub date: String,
    pub media_type: MediaKind,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip)]
    day: NaiveDate,
}

impl Record {
    /// Builds a record, returning `None` when the date string is not a calendar date.
    pub fn from_raw(raw: RawRecord) -> Option<Self> {
        let day = parse_feed_date(&raw.date)?;
        Some(Self {
            title: raw.title,
            explanation: raw.explanation,
            date: raw.date,
            media_type: raw.media_type,
            url: raw.url,
            hdurl: non_empty(raw.hdurl),
            thumbnail_url: non_empty(raw.thumbnail_url),
            day,
        })
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses `YYYY-MM-DD`, or the date part of an RFC 3339 timestamp.
pub fn parse_feed_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
