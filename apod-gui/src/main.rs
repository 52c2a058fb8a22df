mod app;
mod thumbs;

use std::sync::Arc;

use apod_core::{spawn_load, AppConfig, FeedLoader};
use eframe::{egui, NativeOptions};
use reqwest::{redirect, ClientBuilder};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::app::{AppInit, GalleryApp};

fn main() -> eframe::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let runtime = Arc::new(Runtime::new().expect("failed to initialise Tokio runtime"));
    let client = ClientBuilder::new()
        .redirect(redirect::Policy::limited(5))
        .user_agent(config.feed.user_agent.clone())
        .build()
        .expect("failed to build HTTP client");
    let (load_tx, load_rx) = mpsc::channel(1);

    // One feed load, started before the window opens
    let load_task = {
        let guard = runtime.enter();
        let loader = FeedLoader::new(client.clone(), config.feed.url.clone());
        let handle = spawn_load(loader, load_tx);
        drop(guard);
        handle
    };

    let init = AppInit {
        runtime,
        client,
        config,
        updates: load_rx,
        load_task,
    };

    eframe::run_native(
        "APOD Gallery",
        NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 860.0])
                .with_min_inner_size([420.0, 500.0]),
            ..Default::default()
        },
        Box::new(move |cc| {
            install_symbol_fonts(&cc.egui_ctx);
            Box::new(GalleryApp::new(init))
        }),
    )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

// Badges and the ticker use emoji (▶ 🛰️ 🌙 🪐); add system fonts that carry them as fallbacks.
fn install_symbol_fonts(ctx: &egui::Context) {
    const CANDIDATES: [&str; 3] = [
        "/usr/share/fonts/truetype/noto/NotoEmoji-Regular.ttf",
        "/usr/share/fonts/opentype/noto/NotoSansSymbols2-Regular.otf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    ];

    let mut fonts = egui::FontDefinitions::default();
    let mut installed = 0usize;
    for path in CANDIDATES {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        let name = format!("symbols-{installed}");
        fonts
            .font_data
            .insert(name.clone(), egui::FontData::from_owned(bytes));
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            fonts.families.entry(family).or_default().push(name.clone());
        }
        installed += 1;
    }

    if installed > 0 {
        tracing::debug!(installed, "symbol fonts installed");
        ctx.set_fonts(fonts);
    }
}
