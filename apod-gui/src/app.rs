use std::sync::Arc;
use std::time::Duration;

use apod_core::facts::{scroll_offset, ticker_segment, ticker_text};
use apod_core::html::gallery_document;
use apod_core::{
    AppConfig, Card, CardGrid, ClickTarget, DateFormatter, DateRange, Detail, DetailMedia,
    HtmlSurface, LoadEvent, LoadHandle, LoadStatus, Session, ThemeConfig, Thumbnail, UiEvent,
};
use eframe::egui::{self, Color32, Rounding, Stroke};
use reqwest::Client;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::thumbs::ImageCache;

const TICKER_SPEED: f32 = 60.0;
const CARD_SPACING: f32 = 12.0;

pub struct AppInit {
    pub runtime: Arc<Runtime>,
    pub client: Client,
    pub config: AppConfig,
    pub updates: mpsc::Receiver<LoadEvent>,
    pub load_task: LoadHandle,
}

pub struct GalleryApp {
    session: Session<CardGrid>,
    updates: mpsc::Receiver<LoadEvent>,
    load_task: Option<LoadHandle>,
    theme: ThemeConfig,
    thumbs: ImageCache,
    full_size: ImageCache,
    start_input: String,
    end_input: String,
    filter_feedback: Option<String>,
    export_feedback: Option<(bool, String)>,
    ticker: String,
    ticker_loop: String,
}

impl GalleryApp {
    pub fn new(init: AppInit) -> Self {
        let formatter = DateFormatter::new(init.config.gallery.locale);
        let mut session = Session::new(CardGrid::new(), init.config.gallery.batch_size, formatter);
        session.begin_load();

        Self {
            session,
            updates: init.updates,
            load_task: Some(init.load_task),
            theme: init.config.theme,
            thumbs: ImageCache::new(init.runtime.clone(), init.client.clone(), 480),
            full_size: ImageCache::new(init.runtime, init.client, 1600),
            start_input: String::new(),
            end_input: String::new(),
            filter_feedback: None,
            export_feedback: None,
            ticker: ticker_text(),
            ticker_loop: ticker_segment(),
        }
    }

    fn dispatch(&mut self, event: UiEvent) {
        if let Err(err) = self.session.handle(event) {
            self.filter_feedback = Some(err.to_string());
        }
    }

    fn refresh_updates(&mut self) {
        while let Ok(evt) = self.updates.try_recv() {
            let LoadEvent::Finished(result) = evt;
            self.load_task = None;
            self.dispatch(UiEvent::FeedLoaded(result));
        }
    }

    fn setup_theme(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let theme = &self.theme;

        let border = Stroke::new(1.0, theme.border_color32());
        let text = Stroke::new(1.0, theme.text_color32());
        let accent = theme.accent_color32();

        style.visuals.dark_mode = true;
        style.visuals.panel_fill = theme.panel_color32();
        style.visuals.window_fill = theme.background_color32();
        style.visuals.extreme_bg_color = theme.background_color32();
        style.visuals.override_text_color = Some(theme.text_color32());

        style.visuals.widgets.noninteractive.bg_fill = theme.panel_color32();
        style.visuals.widgets.noninteractive.bg_stroke = border;
        style.visuals.widgets.noninteractive.fg_stroke = text;

        style.visuals.widgets.inactive.bg_fill = theme.background_color32();
        style.visuals.widgets.inactive.weak_bg_fill = theme.background_color32();
        style.visuals.widgets.inactive.bg_stroke = border;
        style.visuals.widgets.inactive.fg_stroke = text;

        style.visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, accent);
        style.visuals.widgets.hovered.fg_stroke = text;

        style.visuals.widgets.active.bg_fill = accent;
        style.visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent);
        style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

        style.visuals.selection.stroke = Stroke::new(1.0, accent);

        for widget in [
            &mut style.visuals.widgets.noninteractive,
            &mut style.visuals.widgets.inactive,
            &mut style.visuals.widgets.hovered,
            &mut style.visuals.widgets.active,
        ] {
            widget.rounding = Rounding::same(6.0);
        }

        style.spacing.item_spacing = egui::vec2(10.0, 8.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);

        ctx.set_style(style);
    }

    fn draw_ticker(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("fact_ticker").show(ctx, |ui| {
            let color = self.theme.secondary_text_color32();
            let font = egui::FontId::proportional(14.0);
            let loop_width = ui
                .painter()
                .layout_no_wrap(self.ticker_loop.clone(), font.clone(), color)
                .size()
                .x;
            let galley = ui.painter().layout_no_wrap(self.ticker.clone(), font, color);
            let offset = scroll_offset(ui.input(|i| i.time), TICKER_SPEED, loop_width);

            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), galley.size().y + 6.0),
                egui::Sense::hover(),
            );
            let pos = rect.left_top() + egui::vec2(-offset, 3.0);
            ui.painter().with_clip_rect(rect).galley(pos, galley, color);
        });
    }

    fn draw_controls(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal_wrapped(|ui| {
                ui.heading(egui::RichText::new("🔭 Space Explorer").strong());
                ui.separator();

                ui.label("Start");
                ui.add(
                    egui::TextEdit::singleline(&mut self.start_input)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(110.0),
                );
                ui.label("End");
                ui.add(
                    egui::TextEdit::singleline(&mut self.end_input)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(110.0),
                );

                let ready = self.session.is_loaded();
                if ui
                    .add_enabled(ready, egui::Button::new("Get Space Images"))
                    .clicked()
                {
                    match DateRange::parse(&self.start_input, &self.end_input) {
                        Ok(range) => {
                            self.filter_feedback = None;
                            self.dispatch(UiEvent::ApplyFilter(range));
                        }
                        Err(msg) => self.filter_feedback = Some(msg),
                    }
                }

                if ui
                    .add_enabled(!self.session.gallery().is_empty(), egui::Button::new("💾 Export HTML"))
                    .on_hover_text("Save the displayed gallery as an HTML page")
                    .clicked()
                {
                    self.export_gallery();
                }
            });

            if let Some(msg) = &self.filter_feedback {
                ui.label(egui::RichText::new(msg).color(Color32::from_rgb(229, 57, 53)));
            }
            if let Some((ok, msg)) = &self.export_feedback {
                let color = if *ok {
                    Color32::from_rgb(67, 160, 71)
                } else {
                    Color32::from_rgb(229, 57, 53)
                };
                ui.label(egui::RichText::new(msg).color(color).size(13.0));
            }

            self.draw_status(ui);
            ui.add_space(4.0);
        });
    }

    fn draw_status(&self, ui: &mut egui::Ui) {
        let status = self.session.status();
        let Some(message) = status.message() else {
            return;
        };
        ui.horizontal(|ui| {
            if status.is_loading() {
                ui.spinner();
            }
            let text = egui::RichText::new(message).size(15.0);
            let text = match status {
                LoadStatus::Error(_) => text.color(Color32::from_rgb(229, 57, 53)),
                _ => text,
            };
            ui.label(text);
        });
    }

    fn draw_gallery(&mut self, ctx: &egui::Context) {
        let mut activated: Option<usize> = None;
        let mut load_more = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let grid = self.session.gallery();
                    if let Some(message) = grid.placeholder() {
                        ui.vertical_centered(|ui| {
                            ui.add_space(60.0);
                            ui.label(egui::RichText::new("🛰️").size(48.0));
                            ui.label(egui::RichText::new(message).size(16.0));
                        });
                        return;
                    }

                    let cards: Vec<Card> = grid.cards().to_vec();
                    let columns = self.session.columns();
                    for (row_index, row) in cards.chunks(columns).enumerate() {
                        ui.columns(columns, |cols| {
                            for (col_index, card) in row.iter().enumerate() {
                                let ui = &mut cols[col_index];
                                if draw_card(ui, &mut self.thumbs, &self.theme, card) {
                                    activated = Some(row_index * columns + col_index);
                                }
                            }
                        });
                        ui.add_space(CARD_SPACING);
                    }

                    if self.session.load_more_visible() {
                        ui.vertical_centered(|ui| {
                            let label = format!(
                                "Load More Images ({} remaining)",
                                self.session.remaining()
                            );
                            if ui.button(egui::RichText::new(label).size(15.0)).clicked() {
                                load_more = true;
                            }
                        });
                        ui.add_space(CARD_SPACING);
                    }
                });
        });

        if let Some(index) = activated {
            self.dispatch(UiEvent::CardActivated(index));
        }
        if load_more {
            self.dispatch(UiEvent::LoadMore);
        }
    }

    fn draw_overlay(&mut self, ctx: &egui::Context) {
        let Some(detail) = self.session.overlay().detail().cloned() else {
            return;
        };
        let mut event: Option<UiEvent> = None;
        let screen = ctx.screen_rect();

        // Dimmed backdrop; a click on it closes the detail view
        egui::Area::new(egui::Id::new("overlay_backdrop"))
            .order(egui::Order::Middle)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let response = ui.allocate_rect(screen, egui::Sense::click());
                ui.painter()
                    .rect_filled(screen, 0.0, Color32::from_black_alpha(210));
                if response.clicked() {
                    event = Some(UiEvent::OverlayClick(ClickTarget::Backdrop));
                }
            });

        egui::Area::new(egui::Id::new("overlay_content"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                egui::Frame::window(ui.style()).show(ui, |ui| {
                    let width = (screen.width() * 0.8).min(1000.0);
                    ui.set_width(width);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                        if ui.button("✕").on_hover_text("Close").clicked() {
                            event = Some(UiEvent::CloseOverlay);
                        }
                    });
                    self.draw_detail(ui, &detail, width, screen.height() * 0.55);
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            event = Some(UiEvent::CloseOverlay);
        }
        if let Some(event) = event {
            self.dispatch(event);
        }
    }

    fn draw_detail(&mut self, ui: &mut egui::Ui, detail: &Detail, width: f32, max_height: f32) {
        let ctx = ui.ctx().clone();
        match &detail.media {
            DetailMedia::Image { src } => {
                ui.vertical_centered(|ui| match self.full_size.get(&ctx, src) {
                    Some(texture) => {
                        ui.add(
                            egui::Image::new(&texture).max_size(egui::vec2(width, max_height)),
                        );
                    }
                    None if self.full_size.failed(src) => {
                        ui.label(egui::RichText::new("Image unavailable").weak());
                    }
                    None => {
                        ui.spinner();
                    }
                });
            }
            DetailMedia::Video { embed_url, poster } => {
                ui.vertical_centered(|ui| {
                    if let Some(texture) = poster.url().and_then(|url| self.thumbs.get(&ctx, url)) {
                        ui.add(
                            egui::Image::new(&texture).max_size(egui::vec2(width, max_height)),
                        );
                    }
                    if ui.button("▶ Play video").clicked() {
                        if let Err(e) = webbrowser::open(embed_url) {
                            warn!(error = %e, url = %embed_url, "cannot open video");
                        }
                    }
                });
            }
        }

        ui.add_space(8.0);
        ui.label(egui::RichText::new(&detail.title).strong().size(20.0));
        ui.label(
            egui::RichText::new(&detail.date_label)
                .color(self.theme.secondary_text_color32())
                .size(13.0),
        );
        ui.add_space(6.0);
        egui::ScrollArea::vertical()
            .max_height(180.0)
            .show(ui, |ui| {
                ui.label(egui::RichText::new(&detail.explanation).size(14.0));
            });
    }

    fn export_gallery(&mut self) {
        let surface = HtmlSurface::from_grid(self.session.gallery());
        let document = gallery_document(
            &surface,
            self.session.columns(),
            self.session.overlay().detail(),
        );
        let dir = dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(std::env::temp_dir);
        let path = dir.join(format!(
            "apod-gallery-{}.html",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        ));

        self.export_feedback = match std::fs::write(&path, document) {
            Ok(()) => {
                info!(path = %path.display(), "gallery exported");
                Some((true, format!("Saved to {}", path.display())))
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "gallery export failed");
                Some((false, format!("Export failed: {e}")))
            }
        };
    }
}

/// Draws one card; returns true when it was activated by click or keyboard.
fn draw_card(ui: &mut egui::Ui, thumbs: &mut ImageCache, theme: &ThemeConfig, card: &Card) -> bool {
    let ctx = ui.ctx().clone();
    let width = ui.available_width();
    let size = egui::vec2(width, width * 0.62);
    let mut activated = false;

    egui::Frame::group(ui.style())
        .fill(theme.panel_color32())
        .show(ui, |ui| {
            ui.set_width(width - 14.0);

            let texture = card.thumbnail.url().and_then(|url| thumbs.get(&ctx, url));
            let thumb_button = match &texture {
                Some(texture) => egui::Button::image(egui::Image::new(texture).fit_to_exact_size(size)),
                None => {
                    let missing = match &card.thumbnail {
                        Thumbnail::Url(url) if !thumbs.failed(url) => "…",
                        _ => "🛰️",
                    };
                    egui::Button::new(egui::RichText::new(missing).size(32.0)).min_size(size)
                }
            };
            if ui.add(thumb_button).clicked() {
                activated = true;
            }

            ui.horizontal(|ui| {
                let badge = if card.kind.is_video() {
                    format!("▶ {}", card.badge())
                } else {
                    card.badge().to_string()
                };
                ui.label(
                    egui::RichText::new(badge)
                        .small()
                        .strong()
                        .color(theme.accent_color32()),
                );
            });

            let title = ui.add(
                egui::Label::new(egui::RichText::new(&card.title).strong().size(16.0))
                    .wrap(true)
                    .sense(egui::Sense::click()),
            );
            if title.clicked() {
                activated = true;
            }
            ui.label(
                egui::RichText::new(&card.date_label)
                    .color(theme.secondary_text_color32())
                    .size(12.0),
            );
        });

    activated
}

impl Drop for GalleryApp {
    fn drop(&mut self) {
        if let Some(task) = self.load_task.take() {
            task.abort();
        }
    }
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.setup_theme(ctx);
        self.refresh_updates();
        self.thumbs.poll(ctx);
        self.full_size.poll(ctx);
        self.dispatch(UiEvent::Resized {
            width: ctx.screen_rect().width(),
        });

        self.draw_ticker(ctx);
        self.draw_controls(ctx);
        self.draw_gallery(ctx);
        self.draw_overlay(ctx);

        // The ticker scrolls continuously
        ctx.request_repaint_after(Duration::from_millis(16));
    }
}
