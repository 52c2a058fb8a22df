use apod_core::html::{card_markup, overlay_markup, placeholder_markup};
use apod_core::media::{embed_url, youtube_id};
use apod_core::{
    Card, CardGrid, ClickTarget, DateFormatter, DetailMedia, DisplaySurface, GalleryRenderer,
    HtmlSurface, Overlay, OverlayState, RawRecord, Record, RenderMode, Rendered, Thumbnail,
};
use apod_core::gallery::NO_RESULTS_MESSAGE;
use apod_core::MediaKind;

fn record(title: &str, date: &str, kind: MediaKind, url: &str) -> Record {
    Record::from_raw(RawRecord {
        title: title.to_string(),
        explanation: format!("About {title}"),
        date: date.to_string(),
        media_type: kind,
        url: url.to_string(),
        hdurl: None,
        thumbnail_url: None,
    })
    .unwrap()
}

fn image(title: &str, date: &str) -> Record {
    record(title, date, MediaKind::Image, &format!("https://e/{date}.jpg"))
}

#[test]
fn replace_discards_previous_cards() {
    let renderer = GalleryRenderer::default();
    let mut grid = CardGrid::new();

    renderer.render(&mut grid, &[image("A", "2024-01-02"), image("B", "2024-01-01")], RenderMode::Replace);
    let rendered = renderer.render(&mut grid, &[image("C", "2024-01-03")], RenderMode::Replace);

    assert_eq!(rendered, Rendered::Cards(1));
    let titles: Vec<&str> = grid.cards().iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["C"]);
}

#[test]
fn append_keeps_existing_cards() {
    let renderer = GalleryRenderer::default();
    let mut grid = CardGrid::new();

    renderer.render(&mut grid, &[image("A", "2024-01-02")], RenderMode::Replace);
    renderer.render(&mut grid, &[image("B", "2024-01-01")], RenderMode::Append);

    let titles: Vec<&str> = grid.cards().iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);
    assert!(grid.placeholder().is_none());
}

#[test]
fn append_after_placeholder_drops_it_on_both_surfaces() {
    let renderer = GalleryRenderer::default();
    let mut grid = CardGrid::new();
    let mut html = HtmlSurface::new();

    renderer.render(&mut grid, &[], RenderMode::Replace);
    renderer.render(&mut html, &[], RenderMode::Replace);
    assert!(grid.placeholder().is_some());
    assert!(html.markup().contains(&placeholder_markup(NO_RESULTS_MESSAGE)));

    renderer.render(&mut grid, &[image("A", "2024-01-02")], RenderMode::Append);
    renderer.render(&mut html, &[image("A", "2024-01-02")], RenderMode::Append);

    assert!(grid.placeholder().is_none());
    assert_eq!(grid.cards().len(), 1);
    let markup = html.markup();
    assert!(!markup.contains(NO_RESULTS_MESSAGE));
    assert_eq!(markup.matches("<article").count(), 1);
}

#[test]
fn empty_replace_shows_placeholder() {
    let renderer = GalleryRenderer::default();
    let mut grid = CardGrid::new();
    renderer.render(&mut grid, &[image("A", "2024-01-02")], RenderMode::Replace);

    let rendered = renderer.render(&mut grid, &[], RenderMode::Replace);

    assert_eq!(rendered, Rendered::Placeholder);
    assert!(grid.cards().is_empty());
    assert!(grid.placeholder().unwrap().starts_with("No results"));
}

#[test]
fn empty_append_changes_nothing() {
    let renderer = GalleryRenderer::default();
    let mut grid = CardGrid::new();
    renderer.render(&mut grid, &[image("A", "2024-01-02")], RenderMode::Replace);

    assert_eq!(renderer.render(&mut grid, &[], RenderMode::Append), Rendered::Cards(0));
    assert_eq!(grid.cards().len(), 1);
}

#[test]
fn card_carries_badge_and_long_date() {
    let card = Card::from_record(&image("Moon", "2024-01-07"), &DateFormatter::default());
    assert_eq!(card.badge(), "IMAGE");
    assert_eq!(card.date_label, "January 7, 2024");
    assert_eq!(card.thumbnail, Thumbnail::Url("https://e/2024-01-07.jpg".into()));
}

#[test]
fn video_thumbnail_prefers_explicit_url() {
    let mut raw = RawRecord {
        title: "Launch".into(),
        explanation: String::new(),
        date: "2024-01-01".into(),
        media_type: MediaKind::Video,
        url: "https://www.youtube.com/embed/abcdefghijk?rel=0".into(),
        hdurl: None,
        thumbnail_url: Some("https://e/thumb.jpg".into()),
    };
    let explicit = Record::from_raw(raw.clone()).unwrap();
    assert_eq!(Thumbnail::for_record(&explicit), Thumbnail::Url("https://e/thumb.jpg".into()));

    raw.thumbnail_url = None;
    let derived = Record::from_raw(raw).unwrap();
    assert_eq!(
        Thumbnail::for_record(&derived),
        Thumbnail::Url("https://img.youtube.com/vi/abcdefghijk/hqdefault.jpg".into())
    );
}

#[test]
fn unrecognised_video_gets_placeholder_thumbnail() {
    let video = record("Clip", "2024-01-01", MediaKind::Video, "https://vimeo.com/12345");
    assert_eq!(Thumbnail::for_record(&video), Thumbnail::Placeholder);
}

#[test]
fn image_without_url_falls_back_to_hdurl() {
    let mut raw = RawRecord {
        title: "Deep field".into(),
        explanation: String::new(),
        date: "2024-01-01".into(),
        media_type: MediaKind::Image,
        url: String::new(),
        hdurl: Some("https://e/hd.jpg".into()),
        thumbnail_url: None,
    };
    let rec = Record::from_raw(raw.clone()).unwrap();
    assert_eq!(Thumbnail::for_record(&rec), Thumbnail::Url("https://e/hd.jpg".into()));

    raw.url = "https://e/sd.jpg".into();
    let rec = Record::from_raw(raw).unwrap();
    assert_eq!(Thumbnail::for_record(&rec), Thumbnail::Url("https://e/sd.jpg".into()));
}

#[test]
fn youtube_ids_are_found_in_common_url_forms() {
    assert_eq!(youtube_id("https://www.youtube.com/embed/abcdefghijk"), Some("abcdefghijk"));
    assert_eq!(youtube_id("https://www.youtube.com/watch?v=A1b2C3d4E5_"), Some("A1b2C3d4E5_"));
    assert_eq!(youtube_id("https://youtu.be/-_-_-_-_-_-"), Some("-_-_-_-_-_-"));
    assert_eq!(youtube_id("https://vimeo.com/12345"), None);
}

#[test]
fn embed_parameters_only_for_youtube() {
    assert_eq!(
        embed_url("https://www.youtube.com/embed/abcdefghijk"),
        "https://www.youtube.com/embed/abcdefghijk?autoplay=1&rel=0"
    );
    assert_eq!(
        embed_url("https://www.youtube.com/embed/abcdefghijk?start=30"),
        "https://www.youtube.com/embed/abcdefghijk?start=30&autoplay=1&rel=0"
    );
    assert_eq!(
        embed_url("https://www.youtube.com/embed/abcdefghijk#t=10"),
        "https://www.youtube.com/embed/abcdefghijk?autoplay=1&rel=0#t=10"
    );
    assert_eq!(embed_url("https://vimeo.com/12345"), "https://vimeo.com/12345");
    assert_eq!(
        embed_url("https://example.com/youtube.com/clip"),
        "https://example.com/youtube.com/clip"
    );
}

#[test]
fn script_title_is_escaped_in_card_and_overlay() {
    let hostile = record(
        "<script>alert('x')</script>",
        "2024-01-01",
        MediaKind::Image,
        "https://e/a.jpg",
    );
    let formatter = DateFormatter::default();

    let card = card_markup(&Card::from_record(&hostile, &formatter));
    assert!(!card.contains("<script>"));
    assert!(card.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));

    let mut overlay = Overlay::new(formatter);
    overlay.open(hostile);
    let modal = overlay_markup(overlay.detail().unwrap());
    assert!(!modal.contains("<script>"));
    assert!(modal.contains("&lt;script&gt;"));
}

#[test]
fn html_surface_follows_replace_and_placeholder() {
    let renderer = GalleryRenderer::default();
    let mut surface = HtmlSurface::new();

    renderer.render(&mut surface, &[image("A", "2024-01-02"), image("B", "2024-01-01")], RenderMode::Replace);
    assert_eq!(surface.markup().matches("<article").count(), 2);

    renderer.render(&mut surface, &[], RenderMode::Replace);
    assert_eq!(surface.markup(), placeholder_markup("No results for that range. Try a different selection."));
}

#[test]
fn html_surface_mirrors_a_card_grid() {
    let renderer = GalleryRenderer::default();
    let mut grid = CardGrid::new();
    renderer.render(&mut grid, &[image("A", "2024-01-02")], RenderMode::Replace);

    let mut direct = HtmlSurface::new();
    direct.append_cards(grid.cards().to_vec());
    assert_eq!(HtmlSurface::from_grid(&grid).markup(), direct.markup());
}

#[test]
fn overlay_prefers_high_resolution_image() {
    let mut overlay = Overlay::default();
    let rec = Record::from_raw(RawRecord {
        title: "Pillars".into(),
        explanation: "Gas and dust.".into(),
        date: "2024-01-01".into(),
        media_type: MediaKind::Image,
        url: "https://e/sd.jpg".into(),
        hdurl: Some("https://e/hd.jpg".into()),
        thumbnail_url: None,
    })
    .unwrap();
    overlay.open(rec);

    let detail = overlay.detail().unwrap();
    assert_eq!(detail.media, DetailMedia::Image { src: "https://e/hd.jpg".into() });
    assert_eq!(detail.explanation, "Gas and dust.");
}

#[test]
fn overlay_builds_video_embed() {
    let mut overlay = Overlay::default();
    overlay.open(record("Launch", "2024-01-01", MediaKind::Video, "https://www.youtube.com/embed/abcdefghijk"));

    match &overlay.detail().unwrap().media {
        DetailMedia::Video { embed_url, .. } => {
            assert_eq!(embed_url, "https://www.youtube.com/embed/abcdefghijk?autoplay=1&rel=0")
        }
        other => panic!("expected video, got {other:?}"),
    }
}

#[test]
fn overlay_state_transitions() {
    let mut overlay = Overlay::default();
    assert_eq!(overlay.state(), &OverlayState::Closed);

    overlay.close();
    assert!(!overlay.is_open());

    overlay.open(image("First", "2024-01-01"));
    overlay.open(image("Second", "2024-01-02"));
    assert_eq!(overlay.detail().unwrap().title, "Second");

    overlay.click(ClickTarget::Content);
    assert!(overlay.is_open());

    overlay.click(ClickTarget::Backdrop);
    assert!(!overlay.is_open());
}
