use tracing::debug;

use crate::format::DateFormatter;
use crate::media::youtube_thumbnail;
use crate::record::{MediaKind, Record};

pub const NO_RESULTS_MESSAGE: &str = "No results for that range. Try a different selection.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    Url(String),
    /// Video whose URL is not on a recognised host and no thumbnail was supplied.
    Placeholder,
}

impl Thumbnail {
    pub fn for_record(record: &Record) -> Self {
        match record.media_type {
            MediaKind::Video => record
                .thumbnail_url
                .clone()
                .or_else(|| youtube_thumbnail(&record.url))
                .map(Thumbnail::Url)
                .unwrap_or(Thumbnail::Placeholder),
            MediaKind::Image => {
                if !record.url.is_empty() {
                    Thumbnail::Url(record.url.clone())
                } else {
                    record
                        .hdurl
                        .clone()
                        .map(Thumbnail::Url)
                        .unwrap_or(Thumbnail::Placeholder)
                }
            }
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Thumbnail::Url(url) => Some(url.as_str()),
            Thumbnail::Placeholder => None,
        }
    }
}

/// Display data for one gallery tile. Text is kept raw; surfaces escape it on insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub thumbnail: Thumbnail,
    pub kind: MediaKind,
    pub title: String,
    pub date_label: String,
}

impl Card {
    pub fn from_record(record: &Record, formatter: &DateFormatter) -> Self {
        Self {
            thumbnail: Thumbnail::for_record(record),
            kind: record.media_type,
            title: record.title.clone(),
            date_label: formatter.long(record.day()),
        }
    }

    pub fn badge(&self) -> &'static str {
        self.kind.badge()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Replace,
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendered {
    Cards(usize),
    /// Nothing matched; the caller must hide the load-more control.
    Placeholder,
}

/// Where gallery cards end up.
pub trait DisplaySurface {
    fn clear(&mut self);
    fn append_cards(&mut self, cards: Vec<Card>);
    fn show_placeholder(&mut self, message: &str);
}

/// In-memory surface holding whatever is currently on screen.
#[derive(Debug, Clone, Default)]
pub struct CardGrid {
    cards: Vec<Card>,
    placeholder: Option<String>,
}

impl CardGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.placeholder.is_none()
    }
}

impl DisplaySurface for CardGrid {
    fn clear(&mut self) {
        self.cards.clear();
        self.placeholder = None;
    }

    fn append_cards(&mut self, cards: Vec<Card>) {
        self.placeholder = None;
        self.cards.extend(cards);
    }

    fn show_placeholder(&mut self, message: &str) {
        self.cards.clear();
        self.placeholder = Some(message.to_string());
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GalleryRenderer {
    formatter: DateFormatter,
}

impl GalleryRenderer {
    pub fn new(formatter: DateFormatter) -> Self {
        Self { formatter }
    }

    pub fn render<S: DisplaySurface>(
        &self,
        surface: &mut S,
        batch: &[Record],
        mode: RenderMode,
    ) -> Rendered {
        if mode == RenderMode::Replace {
            surface.clear();
            if batch.is_empty() {
                surface.show_placeholder(NO_RESULTS_MESSAGE);
                debug!("gallery replaced by placeholder");
                return Rendered::Placeholder;
            }
        }

        let cards: Vec<Card> = batch
            .iter()
            .map(|record| Card::from_record(record, &self.formatter))
            .collect();
        let count = cards.len();
        if count > 0 {
            surface.append_cards(cards);
        }
        debug!(?mode, count, "gallery rendered");
        Rendered::Cards(count)
    }
}
