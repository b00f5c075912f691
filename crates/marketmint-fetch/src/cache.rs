//! File-backed response cache keyed by request URL.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    fetched_at: DateTime<Utc>,
    body: String,
}

/// Stores successful response bodies as one JSON file per URL.
///
/// File names are the blake3 hash of the URL. Entries older than the TTL
/// are treated as misses and overwritten on the next store.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    ttl: Duration,
}

impl ResponseCache {
    /// Creates a cache rooted at `dir`. The directory is created on first store.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    /// Returns the platform cache directory for marketmint.
    #[must_use]
    pub fn default_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "marketmint").map(|d| d.cache_dir().to_path_buf())
    }

    /// Returns the cache directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the time-to-live of an entry.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the file an entry for `url` is stored in.
    #[must_use]
    pub fn entry_path(&self, url: &str) -> PathBuf {
        let hash = blake3::hash(url.as_bytes());
        self.dir.join(format!("{}.json", hash.to_hex()))
    }

    /// Returns the cached body for `url` if it is younger than the TTL.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<String> {
        self.get_at(url, Utc::now())
    }

    /// Same as [`get`](Self::get), evaluated at `now`.
    #[must_use]
    pub fn get_at(&self, url: &str, now: DateTime<Utc>) -> Option<String> {
        let json = std::fs::read_to_string(self.entry_path(url)).ok()?;
        let entry: CacheEntry = serde_json::from_str(&json).ok()?;
        if entry.url != url {
            return None;
        }

        let age = now.signed_duration_since(entry.fetched_at).to_std().ok()?;
        (age < self.ttl).then_some(entry.body)
    }

    /// Stores `body` as the response for `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn put(&self, url: &str, body: &str) -> std::io::Result<()> {
        self.put_at(url, body, Utc::now())
    }

    /// Same as [`put`](Self::put), stamped with `fetched_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn put_at(&self, url: &str, body: &str, fetched_at: DateTime<Utc>) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let entry = CacheEntry {
            url: url.to_string(),
            fetched_at,
            body: body.to_string(),
        };
        let json = serde_json::to_string(&entry).map_err(std::io::Error::other)?;
        std::fs::write(self.entry_path(url), json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    const URL: &str = "https://api.coingecko.com/api/v3/coins/pax-gold/market_chart?vs_currency=usd&days=30";

    #[test]
    fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().join("nested"), Duration::from_secs(3600));

        assert!(cache.get(URL).is_none());
        cache.put(URL, r#"{"prices":[]}"#).unwrap();
        assert_eq!(cache.get(URL).as_deref(), Some(r#"{"prices":[]}"#));
    }

    #[test]
    fn test_stale_entry_is_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path(), Duration::from_secs(60));
        let fetched = Utc::now();
        cache.put_at(URL, "body", fetched).unwrap();

        assert!(cache.get_at(URL, fetched + TimeDelta::seconds(59)).is_some());
        assert!(cache.get_at(URL, fetched + TimeDelta::seconds(60)).is_none());
    }

    #[test]
    fn test_corrupt_entry_is_miss_and_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path(), Duration::from_secs(60));
        std::fs::write(cache.entry_path(URL), "garbage").unwrap();

        assert!(cache.get(URL).is_none());
        cache.put(URL, "fresh").unwrap();
        assert_eq!(cache.get(URL).as_deref(), Some("fresh"));
    }

    #[test]
    fn test_entry_path_is_per_url() {
        let cache = ResponseCache::new("/tmp/marketmint", Duration::from_secs(1));
        let a = cache.entry_path(URL);
        let b = cache.entry_path("https://example.com/other");

        assert_ne!(a, b);
        assert_eq!(a, cache.entry_path(URL));
        assert_eq!(a.extension().and_then(|e| e.to_str()), Some("json"));
    }
}
