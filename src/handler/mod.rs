//! Request handling module

pub mod router;

pub use router::handle_request;

use crate::config::Config;
use crate::source::{FetchBytes, HttpFetcher};
use std::sync::Arc;
use std::time::Duration;

/// Process-wide state shared by every request, immutable after startup
pub struct AppState {
    pub config: Config,
    pub fetcher: Arc<dyn FetchBytes>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let timeout = Duration::from_secs(config.upstream.timeout_secs);
        Self::with_fetcher(config, Arc::new(HttpFetcher::new(timeout)))
    }

    /// Build state around an arbitrary fetcher; tests inject fakes here
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn FetchBytes>) -> Self {
        Self { config, fetcher }
    }
}
