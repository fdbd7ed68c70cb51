use std::sync::Arc;
use std::time::Duration;

use reelbook_db::DataStore;
use reelbook_textgen::TextGenerator;
use tokio::sync::{Mutex, RwLock};
use crate::config::ServerConfig;
use crate::datasets::DatasetCache;

/// Per-image limit when fetching chart overlays.
const OVERLAY_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The record store. Every read and write holds this lock, which makes
    /// the store single-writer.
    pub store: Arc<Mutex<DataStore>>,
    pub config: Arc<ServerConfig>,
    /// Uploaded comparison datasets, at most `config.max_datasets` at a time.
    pub datasets: Arc<RwLock<DatasetCache>>,
    /// Text-generation backend for summaries and questions.
    pub textgen: Arc<dyn TextGenerator>,
    /// Client used to fetch chart overlay images.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(store: DataStore, config: ServerConfig, textgen: Arc<dyn TextGenerator>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            datasets: Arc::new(RwLock::new(DatasetCache::new(config.max_datasets))),
            config: Arc::new(config),
            textgen,
            http: reqwest::Client::builder()
                .timeout(OVERLAY_FETCH_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }
}
