pub mod config;
pub mod error;
pub mod facts;
pub mod filter;
pub mod format;
pub mod gallery;
pub mod html;
pub mod layout;
pub mod loader;
pub mod media;
pub mod overlay;
pub mod pagination;
pub mod record;
pub mod session;
pub mod status;

pub use config::{AppConfig, FeedConfig, GalleryConfig, ThemeConfig};
pub use error::{ConfigError, FetchError, SessionError};
pub use filter::{filter, DateRange};
pub use format::{escape_html, DateFormatter, DisplayLocale};
pub use gallery::{Card, CardGrid, DisplaySurface, GalleryRenderer, RenderMode, Rendered, Thumbnail};
pub use html::HtmlSurface;
pub use layout::columns_for_width;
pub use loader::{parse_feed, spawn_load, FeedLoader, LoadEvent, LoadHandle};
pub use overlay::{ClickTarget, Detail, DetailMedia, Overlay, OverlayState};
pub use pagination::{Batch, Paginator};
pub use record::{MediaKind, RawRecord, Record};
pub use session::{Session, UiEvent};
pub use status::LoadStatus;
