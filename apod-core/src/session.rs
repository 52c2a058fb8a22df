use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::{FetchError, SessionError};
use crate::filter::{filter, DateRange};
use crate::format::DateFormatter;
use crate::gallery::{DisplaySurface, GalleryRenderer, RenderMode, Rendered};
use crate::layout::columns_for_width;
use crate::overlay::{ClickTarget, Overlay};
use crate::pagination::Paginator;
use crate::record::Record;
use crate::status::LoadStatus;

/// Input from whatever shell hosts the gallery.
#[derive(Debug)]
pub enum UiEvent {
    LoadStarted,
    FeedLoaded(Result<Vec<Record>, FetchError>),
    ApplyFilter(DateRange),
    LoadMore,
    CardActivated(usize),
    OverlayClick(ClickTarget),
    CloseOverlay,
    Resized { width: f32 },
}

/// All state of one viewing session, owned by the shell.
pub struct Session<S: DisplaySurface> {
    status: LoadStatus,
    catalog: Option<Arc<[Record]>>,
    pager: Paginator,
    renderer: GalleryRenderer,
    gallery: S,
    shown: Vec<Record>,
    overlay: Overlay,
    columns: usize,
    load_more_visible: bool,
}

impl<S: DisplaySurface> Session<S> {
    pub fn new(gallery: S, batch_size: usize, formatter: DateFormatter) -> Self {
        Self {
            status: LoadStatus::Idle,
            catalog: None,
            pager: Paginator::new(batch_size),
            renderer: GalleryRenderer::new(formatter),
            gallery,
            shown: Vec::new(),
            overlay: Overlay::new(formatter),
            columns: 1,
            load_more_visible: false,
        }
    }

    pub fn handle(&mut self, event: UiEvent) -> Result<(), SessionError> {
        match event {
            UiEvent::LoadStarted => self.begin_load(),
            UiEvent::FeedLoaded(result) => self.finish_load(result),
            UiEvent::ApplyFilter(range) => {
                self.apply_filter(range)?;
            }
            UiEvent::LoadMore => {
                self.load_more()?;
            }
            UiEvent::CardActivated(index) => self.activate_card(index),
            UiEvent::OverlayClick(target) => self.overlay.click(target),
            UiEvent::CloseOverlay => self.overlay.close(),
            UiEvent::Resized { width } => self.resize(width),
        }
        Ok(())
    }

    pub fn begin_load(&mut self) {
        self.status = LoadStatus::Loading;
    }

    pub fn finish_load(&mut self, result: Result<Vec<Record>, FetchError>) {
        match result {
            Ok(records) => {
                info!(count = records.len(), "catalog ready");
                self.catalog = Some(records.into());
                self.status = LoadStatus::Idle;
            }
            Err(err) => {
                error!(error = %err, "feed load failed");
                self.status = LoadStatus::Error(err.to_string());
            }
        }
    }

    /// Recomputes the filtered view and shows its first batch.
    pub fn apply_filter(&mut self, range: DateRange) -> Result<Rendered, SessionError> {
        let catalog = self.catalog.as_ref().ok_or(SessionError::NotLoaded)?;
        let view = filter(catalog, range);
        debug!(matched = view.len(), "new filtered view");
        self.pager.reset(view);
        self.load_more()
    }

    /// Shows the next batch of the current view.
    pub fn load_more(&mut self) -> Result<Rendered, SessionError> {
        if self.catalog.is_none() {
            return Err(SessionError::NotLoaded);
        }
        let mode = if self.pager.revealed() == 0 {
            RenderMode::Replace
        } else {
            RenderMode::Append
        };
        let batch = self.pager.next_batch();
        let rendered = self.renderer.render(&mut self.gallery, &batch.items, mode);

        if mode == RenderMode::Replace {
            self.shown.clear();
        }
        self.shown.extend(batch.items);
        self.load_more_visible = batch.has_more && rendered != Rendered::Placeholder;
        Ok(rendered)
    }

    pub fn activate_card(&mut self, index: usize) {
        match self.shown.get(index) {
            Some(record) => self.overlay.open(record.clone()),
            None => debug!(index, "activation outside the gallery"),
        }
    }

    pub fn resize(&mut self, width: f32) {
        let columns = columns_for_width(width);
        if columns != self.columns {
            debug!(width, columns, "gallery columns changed");
            self.columns = columns;
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn catalog(&self) -> Option<&[Record]> {
        self.catalog.as_deref()
    }

    pub fn gallery(&self) -> &S {
        &self.gallery
    }

    pub fn shown(&self) -> &[Record] {
        &self.shown
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn load_more_visible(&self) -> bool {
        self.load_more_visible
    }

    pub fn remaining(&self) -> usize {
        self.pager.remaining()
    }
}
