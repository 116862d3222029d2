//! Per-entity lists of previously generated chronicles, newest first.
//!
//! Read-modify-write on one list is not guarded across processes; two
//! concurrent writers to the same key resolve as last writer wins.

use crate::armory::Region;
use crate::error::CacheError;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const DEFAULT_MAX_ENTRIES: usize = 10;

const REALM_PREFIX: &str = "aiSummary";
const CHARACTER_PREFIX: &str = "aiPlayerSummary";
const KEY_SUFFIX: &str = "-list";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedSummary {
    pub text: String,
    #[serde(rename = "timestamp")]
    pub generated_at_epoch_millis: i64,
}

impl CachedSummary {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            generated_at_epoch_millis: Utc::now().timestamp_millis(),
        }
    }

    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.generated_at_epoch_millis).single()
    }

    /// Local time for selection lists, e.g. `2026-10-17 14:05`.
    pub fn formatted_timestamp(&self) -> String {
        self.generated_at().map_or_else(
            || "unknown time".to_string(),
            |at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        )
    }
}

/// Storage key of one summary list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SummaryKey(String);

impl SummaryKey {
    pub fn realm(region: Region, realm_slug: &str) -> Self {
        Self(format!(
            "{REALM_PREFIX}-{}-{realm_slug}{KEY_SUFFIX}",
            region.label()
        ))
    }

    pub fn character(region: Region, realm_slug: &str, character_name: &str) -> Self {
        Self(format!(
            "{CHARACTER_PREFIX}-{}-{realm_slug}-{}{KEY_SUFFIX}",
            region.label(),
            character_name.trim().to_lowercase()
        ))
    }

    /// Wrap a key read back from a store listing.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SummaryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durable key-value storage for summary lists.
pub trait SummaryStore: Send + Sync {
    fn load(&self, key: &SummaryKey) -> Result<Option<Vec<CachedSummary>>, CacheError>;
    fn save(&self, key: &SummaryKey, entries: &[CachedSummary]) -> Result<(), CacheError>;
    fn remove(&self, key: &SummaryKey) -> Result<(), CacheError>;
    fn keys(&self) -> Result<Vec<SummaryKey>, CacheError>;
}

// ── File store ──────────────────────────────────────────────────────────────

/// One JSON array per key under a directory.
pub struct FileSummaryStore {
    dir: PathBuf,
}

impl FileSummaryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &SummaryKey) -> PathBuf {
        let file: String = key
            .as_str()
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file}.json"))
    }
}

impl SummaryStore for FileSummaryStore {
    fn load(&self, key: &SummaryKey) -> Result<Option<Vec<CachedSummary>>, CacheError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path).map_err(|e| CacheError::Read {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| CacheError::Read {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    fn save(&self, key: &SummaryKey, entries: &[CachedSummary]) -> Result<(), CacheError> {
        let write_err = |message: String| CacheError::Write {
            key: key.to_string(),
            message,
        };
        fs::create_dir_all(&self.dir).map_err(|e| write_err(e.to_string()))?;
        let json = serde_json::to_string_pretty(entries).map_err(|e| write_err(e.to_string()))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| write_err(e.to_string()))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(e.to_string()));
        }
        Ok(())
    }

    fn remove(&self, key: &SummaryKey) -> Result<(), CacheError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::Write {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn keys(&self) -> Result<Vec<SummaryKey>, CacheError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(CacheError::Read {
                    key: self.dir.display().to_string(),
                    message: e.to_string(),
                });
            }
        };
        let mut keys: Vec<SummaryKey> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    path.file_stem()
                        .map(|stem| SummaryKey::from_raw(stem.to_string_lossy()))
                } else {
                    None
                }
            })
            .collect();
        keys.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(keys)
    }
}

// ── Memory store ────────────────────────────────────────────────────────────

/// Process-local store, for tests and one-shot runs.
#[derive(Default)]
pub struct MemorySummaryStore {
    lists: Mutex<HashMap<String, Vec<CachedSummary>>>,
}

impl MemorySummaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<CachedSummary>>> {
        self.lists
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SummaryStore for MemorySummaryStore {
    fn load(&self, key: &SummaryKey) -> Result<Option<Vec<CachedSummary>>, CacheError> {
        Ok(self.lock().get(key.as_str()).cloned())
    }

    fn save(&self, key: &SummaryKey, entries: &[CachedSummary]) -> Result<(), CacheError> {
        self.lock().insert(key.as_str().to_string(), entries.to_vec());
        Ok(())
    }

    fn remove(&self, key: &SummaryKey) -> Result<(), CacheError> {
        self.lock().remove(key.as_str());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<SummaryKey>, CacheError> {
        let mut keys: Vec<SummaryKey> = self.lock().keys().map(SummaryKey::from_raw).collect();
        keys.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(keys)
    }
}

// ── Cache ───────────────────────────────────────────────────────────────────

/// Capped, newest-first summary lists over a [`SummaryStore`].
#[derive(Clone)]
pub struct SummaryCache {
    store: Arc<dyn SummaryStore>,
    max_entries: usize,
}

impl SummaryCache {
    pub fn new(store: Arc<dyn SummaryStore>, max_entries: usize) -> Self {
        Self {
            store,
            max_entries: max_entries.max(1),
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Stored list, newest first. Unreadable lists read as empty.
    pub fn get(&self, key: &SummaryKey) -> Vec<CachedSummary> {
        match self.store.load(key) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(%key, error = %err, "discarding unreadable summary list");
                Vec::new()
            }
        }
    }

    /// Prepend, evict beyond the cap, persist.
    pub fn add(&self, key: &SummaryKey, text: &str) -> Result<CachedSummary, CacheError> {
        let entry = CachedSummary::new(text);
        let mut entries = self.get(key);
        entries.insert(0, entry.clone());
        entries.truncate(self.max_entries);
        self.store.save(key, &entries)?;
        Ok(entry)
    }

    /// Remove the entry at `index`. Out of range is a logged no-op that
    /// returns `false` and leaves the stored list untouched.
    pub fn delete(&self, key: &SummaryKey, index: usize) -> Result<bool, CacheError> {
        let mut entries = self.get(key);
        if index >= entries.len() {
            tracing::warn!(
                %key,
                index,
                len = entries.len(),
                "summary index out of range; nothing deleted"
            );
            return Ok(false);
        }
        entries.remove(index);
        if entries.is_empty() {
            self.store.remove(key)?;
        } else {
            self.store.save(key, &entries)?;
        }
        Ok(true)
    }

    pub fn select(&self, key: &SummaryKey, index: usize) -> Option<CachedSummary> {
        self.get(key).into_iter().nth(index)
    }

    pub fn latest(&self, key: &SummaryKey) -> Option<CachedSummary> {
        self.select(key, 0)
    }

    pub fn clear(&self, key: &SummaryKey) -> Result<(), CacheError> {
        self.store.remove(key)
    }

    pub fn keys(&self) -> Result<Vec<SummaryKey>, CacheError> {
        self.store.keys()
    }
}
