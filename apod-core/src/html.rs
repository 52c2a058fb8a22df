//! Markup rendering of the gallery and the detail overlay.
//!
//! Every piece of feed text goes through [`escape_html`] before it lands in
//! the output, in element content and attribute values alike.

use crate::format::escape_html;
use crate::gallery::{Card, CardGrid, DisplaySurface, Thumbnail};
use crate::overlay::{Detail, DetailMedia};

const VIDEO_ALLOW: &str = "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share";

pub fn card_markup(card: &Card) -> String {
    let title = escape_html(&card.title);
    let thumb = match &card.thumbnail {
        Thumbnail::Url(src) => format!(
            r#"<img class="thumb" src="{}" alt="{}" loading="lazy">"#,
            escape_html(src),
            title
        ),
        Thumbnail::Placeholder => r#"<div class="thumb thumb-missing">🛰️</div>"#.to_string(),
    };
    let play = if card.kind.is_video() {
        r#"<div class="play">▶</div>"#
    } else {
        ""
    };
    format!(
        r#"<article class="card" tabindex="0">
  <div class="thumb-wrap">
    {thumb}
    <span class="badge">{badge}</span>
    {play}
  </div>
  <div class="meta">
    <div class="title">{title}</div>
    <div class="date">{date}</div>
  </div>
</article>"#,
        badge = card.badge(),
        date = escape_html(&card.date_label),
    )
}

pub fn placeholder_markup(message: &str) -> String {
    format!(
        r#"<div class="placeholder"><div class="placeholder-icon">🛰️</div><p>{}</p></div>"#,
        escape_html(message)
    )
}

pub fn overlay_markup(detail: &Detail) -> String {
    let title = escape_html(&detail.title);
    let media = match &detail.media {
        DetailMedia::Image { src } => format!(
            r#"<img class="modal-media" src="{}" alt="{}">"#,
            escape_html(src),
            title
        ),
        DetailMedia::Video { embed_url, .. } => format!(
            r#"<iframe class="modal-media" src="{}" title="{}" frameborder="0" allow="{VIDEO_ALLOW}" referrerpolicy="strict-origin-when-cross-origin" allowfullscreen></iframe>"#,
            escape_html(embed_url),
            title
        ),
    };
    format!(
        r#"{media}
<div class="modal-body">
  <div class="modal-title">{title}</div>
  <div class="modal-date">{date}</div>
  <div class="modal-expl">{explanation}</div>
</div>"#,
        date = escape_html(&detail.date_label),
        explanation = escape_html(&detail.explanation),
    )
}

/// Surface that accumulates gallery markup.
#[derive(Debug, Clone, Default)]
pub struct HtmlSurface {
    fragments: Vec<String>,
    has_placeholder: bool,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_grid(grid: &CardGrid) -> Self {
        let mut surface = Self::new();
        match grid.placeholder() {
            Some(message) => surface.show_placeholder(message),
            None => surface.append_cards(grid.cards().to_vec()),
        }
        surface
    }

    pub fn markup(&self) -> String {
        self.fragments.join("\n")
    }
}

impl DisplaySurface for HtmlSurface {
    fn clear(&mut self) {
        self.fragments.clear();
        self.has_placeholder = false;
    }

    fn append_cards(&mut self, cards: Vec<Card>) {
        if self.has_placeholder {
            self.clear();
        }
        self.fragments.extend(cards.iter().map(card_markup));
    }

    fn show_placeholder(&mut self, message: &str) {
        self.fragments.clear();
        self.fragments.push(placeholder_markup(message));
        self.has_placeholder = true;
    }
}

/// Standalone page containing the gallery and, when given, the open detail.
pub fn gallery_document(surface: &HtmlSurface, columns: usize, detail: Option<&Detail>) -> String {
    let modal = detail
        .map(|d| format!("<div id=\"modal\" open>\n{}\n</div>", overlay_markup(d)))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Astronomy Picture Gallery</title>
</head>
<body>
<main id="gallery" data-cols="{columns}">
{cards}
</main>
{modal}
</body>
</html>
"#,
        cards = surface.markup(),
    )
}
