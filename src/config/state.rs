// Application state module
// Immutable per-process state shared by every connection task

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::api::ApiHandler;

use super::types::Config;

/// Application state
///
/// Built once at startup after the asset root has been verified; requests
/// only ever read from it, so no lock discipline is needed.
pub struct AppState {
    pub config: Config,
    /// Canonicalized asset directory, the containment root for every
    /// static file lookup
    pub asset_root: PathBuf,
    /// Externally-defined API routes mounted under `assets.api_prefix`
    pub api_handler: Option<Arc<dyn ApiHandler>>,

    // Cached so the hot path skips the config walk
    pub cached_access_log: AtomicBool,
}

impl AppState {
    pub fn new(config: Config, asset_root: PathBuf) -> Self {
        let cached_access_log = AtomicBool::new(config.logging.access_log);
        Self {
            config,
            asset_root,
            api_handler: None,
            cached_access_log,
        }
    }

    /// Mount an API handler for the reserved URL prefix
    #[must_use]
    pub fn with_api_handler(mut self, handler: Arc<dyn ApiHandler>) -> Self {
        self.api_handler = Some(handler);
        self
    }
}
