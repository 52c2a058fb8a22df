use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::format::DisplayLocale;

pub const DEFAULT_FEED_URL: &str = "https://cdn.jsdelivr.net/gh/GCA-Classroom/apod/data.json";
pub const DEFAULT_BATCH_SIZE: usize = 3;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: ThemeConfig,
    pub feed: FeedConfig,
    pub gallery: GalleryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub background_color: [u8; 3],
    pub panel_color: [u8; 3],
    pub accent_color: [u8; 3],
    pub text_color: [u8; 3],
    pub secondary_text_color: [u8; 3],
    pub border_color: [u8; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub batch_size: usize,
    pub locale: DisplayLocale,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            // Night sky palette
            background_color: [11, 13, 23],
            panel_color: [20, 24, 38],
            accent_color: [252, 61, 33],
            text_color: [226, 230, 240],
            secondary_text_color: [150, 158, 178],
            border_color: [48, 54, 76],
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            user_agent: "APODGallery/0.1".to_string(),
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            locale: DisplayLocale::default(),
        }
    }
}

impl AppConfig {
    /// Path of the optional configuration file.
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("apod-gallery").join("config.json"))
    }

    /// Loads the configuration file, falling back to defaults. Nothing is written back.
    pub fn load() -> Self {
        match Self::load_from_file() {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("no configuration file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(error = %e, "cannot load configuration, using defaults");
                Self::default()
            }
        }
    }

    fn load_from_file() -> Result<Self, ConfigError> {
        let config_path = Self::config_file_path()?;
        let config_content = std::fs::read_to_string(config_path)?;
        Self::from_json_str(&config_content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: AppConfig = serde_json::from_str(content)?;
        if config.gallery.batch_size == 0 {
            warn!("gallery.batch_size must be at least 1");
            config.gallery.batch_size = 1;
        }
        Ok(config)
    }
}

fn color32(rgb: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

impl ThemeConfig {
    pub fn background_color32(&self) -> egui::Color32 {
        color32(self.background_color)
    }

    pub fn panel_color32(&self) -> egui::Color32 {
        color32(self.panel_color)
    }

    pub fn accent_color32(&self) -> egui::Color32 {
        color32(self.accent_color)
    }

    pub fn text_color32(&self) -> egui::Color32 {
        color32(self.text_color)
    }

    pub fn secondary_text_color32(&self) -> egui::Color32 {
        color32(self.secondary_text_color)
    }

    pub fn border_color32(&self) -> egui::Color32 {
        color32(self.border_color)
    }
}
