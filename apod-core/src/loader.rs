use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::record::{RawRecord, Record};

#[derive(Debug)]
pub enum LoadEvent {
    Finished(Result<Vec<Record>, FetchError>),
}

#[derive(Debug, Clone)]
pub struct FeedLoader {
    client: Client,
    url: String,
}

impl FeedLoader {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Fetches the feed once, bypassing caches, and returns the records newest first.
    pub async fn load(&self) -> Result<Vec<Record>, FetchError> {
        info!(url = %self.url, "loading feed");
        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "feed request rejected");
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let records = parse_feed(&bytes)?;
        info!(count = records.len(), "feed loaded");
        Ok(records)
    }
}

/// Parses a feed payload into records sorted newest first.
///
/// The payload must be a JSON array of record objects. Entries whose date
/// cannot be parsed are dropped; they do not fail the whole feed.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<Record>, FetchError> {
    let raw: Vec<RawRecord> = serde_json::from_slice(bytes)?;
    let total = raw.len();

    let mut records: Vec<Record> = raw
        .into_iter()
        .filter_map(|entry| {
            let date = entry.date.clone();
            let title = entry.title.clone();
            let record = Record::from_raw(entry);
            if record.is_none() {
                warn!(%date, %title, "dropping record with unparseable date");
            }
            record
        })
        .collect();

    records.sort_by(|a, b| b.day().cmp(&a.day()));
    debug!(kept = records.len(), dropped = total - records.len(), "feed normalised");
    Ok(records)
}

/// Handle on a background load. Aborting it stops the fetch as well as the
/// task that reports the outcome.
#[derive(Debug)]
pub struct LoadHandle {
    fetch: AbortHandle,
    join: JoinHandle<()>,
}

impl LoadHandle {
    pub fn abort(&self) {
        self.fetch.abort();
        self.join.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.fetch.is_finished() && self.join.is_finished()
    }

    pub async fn join(self) -> Result<(), FetchError> {
        self.join.await.map_err(FetchError::from)
    }
}

/// Runs a single load in the background and reports the outcome on `update_tx`.
pub fn spawn_load(loader: FeedLoader, update_tx: mpsc::Sender<LoadEvent>) -> LoadHandle {
    let fetch = tokio::spawn(async move { loader.load().await });
    let fetch_abort = fetch.abort_handle();
    let join = tokio::spawn(async move {
        let result = match fetch.await {
            Ok(result) => result,
            Err(err) => Err(FetchError::from(err)),
        };
        if update_tx.send(LoadEvent::Finished(result)).await.is_err() {
            warn!("load receiver dropped");
        }
    });
    LoadHandle {
        fetch: fetch_abort,
        join,
    }
}
