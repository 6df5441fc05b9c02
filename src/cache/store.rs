// Cache store for the fetched portfolio payload.
// Handles JSON serialization, TTL checking, and soft-failing reads.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FolioError, Result};
use crate::github::{RawRepo, RawUser};

use super::paths;

/// Maximum trusted age of a cache entry: 15 minutes.
pub const CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// The cached payload: raw API responses, re-normalized on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachePayload {
    pub user: RawUser,
    pub repos: Vec<RawRepo>,
}

/// Wrapper for cached data with its write timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub cached_at: DateTime<Utc>,
    pub data: T,
}

impl<T> CacheEntry<T> {
    pub fn new(data: T) -> Self {
        Self {
            cached_at: Utc::now(),
            data,
        }
    }

    /// Check freshness against a TTL. A timestamp in the future reads as
    /// stale rather than fresh.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::MAX);
        elapsed < ttl
    }
}

/// Filesystem-backed store, one entry per username. Single reader/writer per
/// session; overwrite-on-write, no locking.
#[derive(Debug, Clone)]
pub struct CacheStore {
    cache_dir: PathBuf,
}

impl CacheStore {
    /// Create a store in the XDG cache directory. Returns `None` when no
    /// home directory can be determined; callers run uncached in that case.
    pub fn new() -> Option<Self> {
        paths::cache_dir().map(|cache_dir| Self { cache_dir })
    }

    /// Create a store with a custom directory.
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    fn entry_path(&self, username: &str) -> PathBuf {
        self.cache_dir.join(paths::entry_file_name(username))
    }

    /// Read the cached payload for a username.
    ///
    /// Fails soft: a missing entry yields `None`; a corrupt or structurally
    /// invalid entry is cleared and yields `None`; an entry past the TTL is
    /// cleared and yields `None`.
    pub fn read(&self, username: &str) -> Option<CachePayload> {
        let path = self.entry_path(username);
        if !path.exists() {
            return None;
        }

        match self.load_entry(username) {
            Ok(entry) if entry.is_fresh(CACHE_TTL) => {
                debug!(username, "cache hit");
                Some(entry.data)
            }
            Ok(_) => {
                debug!(username, "cache entry expired");
                self.clear(username);
                None
            }
            Err(err) => {
                warn!(username, error = %err, "discarding malformed cache entry");
                self.clear(username);
                None
            }
        }
    }

    fn load_entry(&self, username: &str) -> Result<CacheEntry<CachePayload>> {
        let contents = fs::read_to_string(self.entry_path(username))?;
        serde_json::from_str(&contents).map_err(|_| FolioError::MalformedCache)
    }

    /// Write a payload, overwriting any existing entry. Atomic via temp-file
    /// rename.
    pub fn write(&self, username: &str, payload: &CachePayload) -> Result<()> {
        fs::create_dir_all(&self.cache_dir)?;

        let entry = CacheEntry::new(payload);
        let json = serde_json::to_string_pretty(&entry)?;

        let path = self.entry_path(username);
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Remove the entry for a username, ignoring absence.
    pub fn clear(&self, username: &str) {
        let path = self.entry_path(username);
        if path.exists() {
            if let Err(err) = fs::remove_file(&path) {
                warn!(username, error = %err, "failed to clear cache entry");
            }
        }
    }
}
