use tracing::debug;

use crate::format::DateFormatter;
use crate::gallery::Thumbnail;
use crate::media::embed_url;
use crate::record::{MediaKind, Record};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailMedia {
    Image { src: String },
    Video { embed_url: String, poster: Thumbnail },
}

/// Everything the overlay shows for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub record: Record,
    pub media: DetailMedia,
    pub title: String,
    pub date_label: String,
    pub explanation: String,
}

impl Detail {
    pub fn from_record(record: Record, formatter: &DateFormatter) -> Self {
        let media = match record.media_type {
            MediaKind::Video => DetailMedia::Video {
                embed_url: embed_url(&record.url),
                poster: Thumbnail::for_record(&record),
            },
            MediaKind::Image => DetailMedia::Image {
                src: record.hdurl.clone().unwrap_or_else(|| record.url.clone()),
            },
        };
        Self {
            media,
            title: record.title.clone(),
            date_label: formatter.long(record.day()),
            explanation: record.explanation.clone(),
            record,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Content,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum OverlayState {
    #[default]
    Closed,
    Open(Box<Detail>),
}

#[derive(Debug, Clone, Default)]
pub struct Overlay {
    state: OverlayState,
    formatter: DateFormatter,
}

impl Overlay {
    pub fn new(formatter: DateFormatter) -> Self {
        Self {
            state: OverlayState::Closed,
            formatter,
        }
    }

    /// Shows `record`, replacing whatever was open.
    pub fn open(&mut self, record: Record) {
        debug!(title = %record.title, "overlay opened");
        self.state = OverlayState::Open(Box::new(Detail::from_record(record, &self.formatter)));
    }

    pub fn close(&mut self) {
        if self.is_open() {
            debug!("overlay closed");
        }
        self.state = OverlayState::Closed;
    }

    pub fn click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Backdrop {
            self.close();
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, OverlayState::Open(_))
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn detail(&self) -> Option<&Detail> {
        match &self.state {
            OverlayState::Open(detail) => Some(&**detail),
            OverlayState::Closed => None,
        }
    }
}
