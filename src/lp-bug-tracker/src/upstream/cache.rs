//! On-disk cache of Launchpad responses keyed by request URL.
//!
//! Entries keep the `ETag` of the response so later requests can be made
//! conditional. The cache only saves bandwidth: any read or write failure is
//! logged and treated as a miss.

use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A cached response body and its validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    /// Request URL the body belongs to.
    pub url: String,

    /// `ETag` header returned with the body.
    pub etag: String,

    /// Response body.
    pub body: String,
}

/// Directory of cached Launchpad responses.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    /// Creates a cache rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the cache directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Looks up the cached response for a URL.
    #[must_use]
    pub fn load(&self, url: &str) -> Option<CachedResponse> {
        let path = self.entry_path(url);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read cache entry");
                return None;
            }
        };

        match serde_json::from_str::<CachedResponse>(&content) {
            // Hash collisions are possible; the stored URL decides.
            Ok(entry) if entry.url == url => Some(entry),
            Ok(_) => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring corrupt cache entry");
                None
            }
        }
    }

    /// Stores a response for a URL.
    pub fn store(&self, url: &str, etag: &str, body: &str) {
        let entry = CachedResponse {
            url: url.to_string(),
            etag: etag.to_string(),
            body: body.to_string(),
        };

        if let Err(e) = self.write_entry(&entry) {
            warn!(dir = %self.dir.display(), error = %e, "Failed to write cache entry");
        } else {
            debug!(url, "Cached Launchpad response");
        }
    }

    fn write_entry(&self, entry: &CachedResponse) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string(entry)?;
        std::fs::write(self.entry_path(&entry.url), content)
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        self.dir.join(format!("{}.json", entry_name(url)))
    }
}

/// File stem of the entry for a URL: the URL-safe base64 of its SHA-256.
fn entry_name(url: &str) -> String {
    let hash = Sha256::digest(url.as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hash)
}
