//! File source acquisition
//!
//! Resolves a routed `FileSource` to its bytes: a full read from disk for
//! local sources, a single bounded fetch from the raw-content endpoint for
//! remote ones. Every failure mode maps to one HTTP status at the request
//! boundary.

pub mod fetch;

pub use fetch::{FetchBytes, FetchError, HttpFetcher};

use crate::config::FileSource;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Why a file source could not produce bytes
#[derive(Debug, Error)]
pub enum SourceError {
    /// No file was ever bound to this route (configuration bug)
    #[error("Server not properly configured")]
    NotConfigured,
    /// The configured local file vanished after startup
    #[error("{filename} not found")]
    LocalMissing { filename: String },
    /// The upstream host answered with a non-success status
    #[error("Upstream returned HTTP {status} for {filename}")]
    UpstreamStatus { status: u16, filename: String },
    /// Network-level failure reaching the upstream host
    #[error("Failed to fetch from upstream: {0}")]
    UpstreamTransport(String),
    /// Catch-all for anything else that went wrong during acquisition
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl SourceError {
    /// HTTP status this error is reported as
    pub const fn status(&self) -> u16 {
        match self {
            Self::NotConfigured | Self::Unexpected(_) => 500,
            Self::LocalMissing { .. } => 404,
            Self::UpstreamStatus { .. } | Self::UpstreamTransport(_) => 502,
        }
    }
}

/// Resolve a file source to its bytes.
///
/// Remote fetches are blocking (`ureq`), so they run on the blocking pool;
/// the fetcher's own timeout bounds how long that can take.
pub async fn acquire(
    source: &FileSource,
    fetcher: &Arc<dyn FetchBytes>,
) -> Result<Vec<u8>, SourceError> {
    match source {
        FileSource::Local { path } => read_local(path).await,
        FileSource::Remote { base_url, filename } => {
            let url = fetch::join_url(base_url, filename);
            crate::logger::log_fetch_start(&url);

            let fetcher = Arc::clone(fetcher);
            let result = tokio::task::spawn_blocking(move || fetcher.fetch(&url))
                .await
                .map_err(|e| SourceError::Unexpected(format!("fetch task failed: {e}")))?;

            match result {
                Ok(data) => {
                    crate::logger::log_fetch_done(data.len());
                    Ok(data)
                }
                Err(FetchError::Status(status)) => Err(SourceError::UpstreamStatus {
                    status,
                    filename: filename.clone(),
                }),
                Err(FetchError::Transport(reason)) => Err(SourceError::UpstreamTransport(reason)),
                Err(FetchError::Body(reason)) => Err(SourceError::Unexpected(reason)),
            }
        }
        // Prompt sources are resolved to Local before the listener starts
        FileSource::Prompt => Err(SourceError::NotConfigured),
    }
}

async fn read_local(path: &str) -> Result<Vec<u8>, SourceError> {
    if path.is_empty() {
        return Err(SourceError::NotConfigured);
    }
    match tokio::fs::read(path).await {
        Ok(data) => Ok(data),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SourceError::LocalMissing {
            filename: basename(path),
        }),
        Err(e) => Err(SourceError::Unexpected(e.to_string())),
    }
}

/// Final path component, for error bodies that name the missing file
fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map_or_else(|| path.to_string(), |n| n.to_string_lossy().into_owned())
}
