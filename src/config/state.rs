// Application state module
// Read-only state shared by every connection

use std::sync::Arc;
use tokio::sync::Notify;

use super::types::{Config, GalleryConfig};

/// Application state
pub struct AppState {
    pub config: Config,
    /// Shared separately so scans on the blocking pool can own a handle
    pub gallery: Arc<GalleryConfig>,
    pub shutdown_signal: Arc<Notify>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            gallery: Arc::new(config.gallery.clone()),
            shutdown_signal: Arc::new(Notify::new()),
        }
    }

    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
