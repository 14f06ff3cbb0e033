//! Raw-content fetching
//!
//! The remote variant pulls each file from a source-control raw-content
//! endpoint (`{base_url}/{filename}`) on every request, one attempt, no
//! caching. The trait exists so the router can be exercised without network
//! access.

use std::io::Read;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single raw-content fetch
#[derive(Debug, Error)]
pub enum FetchError {
    /// The upstream host answered with a non-success status
    #[error("upstream returned HTTP {0}")]
    Status(u16),
    /// The upstream host could not be reached (DNS, refused, timeout)
    #[error("{0}")]
    Transport(String),
    /// The response body could not be read in full
    #[error("failed to read upstream body: {0}")]
    Body(String),
}

/// Blocking fetch of a URL's bytes; runs on the blocking pool
pub trait FetchBytes: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// `ureq`-backed fetcher with a bounded overall timeout
pub struct HttpFetcher {
    timeout: Duration,
}

impl HttpFetcher {
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl FetchBytes for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        // A fresh agent per fetch: no connection reuse between requests
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        match agent.get(url).call() {
            Ok(response) => {
                let mut data = Vec::new();
                response
                    .into_reader()
                    .read_to_end(&mut data)
                    .map_err(|e| FetchError::Body(e.to_string()))?;
                Ok(data)
            }
            Err(ureq::Error::Status(code, _)) => Err(FetchError::Status(code)),
            Err(ureq::Error::Transport(transport)) => {
                Err(FetchError::Transport(transport.to_string()))
            }
        }
    }
}

/// Join a base URL and a filename with exactly one slash between them
pub fn join_url(base_url: &str, filename: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), filename)
}
