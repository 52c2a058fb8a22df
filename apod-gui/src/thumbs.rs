use std::collections::HashMap;
use std::sync::Arc;

use eframe::egui;
use reqwest::Client;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::warn;

type Decoded = (String, Result<egui::ColorImage, String>);

enum Slot {
    Pending,
    Ready(egui::TextureHandle),
    Failed,
}

/// Downloads pictures on the runtime and turns them into textures, keyed by URL.
pub struct ImageCache {
    runtime: Arc<Runtime>,
    client: Client,
    max_edge: u32,
    tx: mpsc::UnboundedSender<Decoded>,
    rx: mpsc::UnboundedReceiver<Decoded>,
    slots: HashMap<String, Slot>,
}

impl ImageCache {
    pub fn new(runtime: Arc<Runtime>, client: Client, max_edge: u32) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            client,
            max_edge,
            tx,
            rx,
            slots: HashMap::new(),
        }
    }

    /// Uploads whatever finished downloading since the last frame.
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok((url, result)) = self.rx.try_recv() {
            let slot = match result {
                Ok(image) => Slot::Ready(ctx.load_texture(url.clone(), image, egui::TextureOptions::LINEAR)),
                Err(err) => {
                    warn!(%url, error = %err, "image unavailable");
                    Slot::Failed
                }
            };
            self.slots.insert(url, slot);
        }
    }

    /// Texture for `url`, starting the download on first request.
    pub fn get(&mut self, ctx: &egui::Context, url: &str) -> Option<egui::TextureHandle> {
        match self.slots.get(url) {
            Some(Slot::Ready(texture)) => Some(texture.clone()),
            Some(_) => None,
            None => {
                self.request(ctx, url);
                None
            }
        }
    }

    pub fn failed(&self, url: &str) -> bool {
        matches!(self.slots.get(url), Some(Slot::Failed))
    }

    fn request(&mut self, ctx: &egui::Context, url: &str) {
        self.slots.insert(url.to_string(), Slot::Pending);
        let client = self.client.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        let url = url.to_string();
        let max_edge = self.max_edge;
        self.runtime.spawn(async move {
            let result = fetch_image(&client, &url, max_edge).await;
            let _ = tx.send((url, result));
            ctx.request_repaint();
        });
    }
}

async fn fetch_image(client: &Client, url: &str, max_edge: u32) -> Result<egui::ColorImage, String> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|e| e.to_string())?;
    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    let decoded = image::load_from_memory(&bytes).map_err(|e| e.to_string())?;
    let rgba = decoded.thumbnail(max_edge, max_edge).to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
