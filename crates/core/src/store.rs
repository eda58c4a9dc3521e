//! Persistent key/value store and the key-migration policy.
//!
//! Values are small text blobs (JSON unless noted otherwise) owned by the
//! [`Tracker`](crate::tracker::Tracker); the store is the sole source of
//! truth at process start but is never treated as external input, so any
//! unreadable value simply falls back to the field's default.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::warn;

/// Durable, synchronous, process-local key/value storage.
///
/// `write` must complete before it returns; there are no transactions and no
/// cross-process atomicity guarantees.
pub trait KvStore {
    /// Return the stored text for `key`, or `None` when absent.
    fn read(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// A logical field name together with an optional legacy alias kept readable
/// and writable during a rolling schema migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreKey {
    /// Key name used by the current schema.
    pub current: &'static str,
    /// Key name used by the previous schema, if the field was renamed.
    pub legacy: Option<&'static str>,
}

impl StoreKey {
    /// A field that has only ever had one key name.
    pub const fn single(current: &'static str) -> Self {
        Self {
            current,
            legacy: None,
        }
    }

    /// A renamed field still readable under its old name.
    pub const fn renamed(current: &'static str, legacy: &'static str) -> Self {
        Self {
            current,
            legacy: Some(legacy),
        }
    }

    /// Read with strict priority: current name first, then the legacy name.
    pub fn read(&self, store: &dyn KvStore) -> Option<String> {
        store
            .read(self.current)
            .or_else(|| self.legacy.and_then(|key| store.read(key)))
    }

    /// Write `value` under the current name and, when present, the legacy
    /// name, so older and newer readers of the same store stay consistent.
    pub fn write(&self, store: &mut dyn KvStore, value: &str) -> Result<()> {
        store.write(self.current, value)?;
        if let Some(legacy) = self.legacy {
            store.write(legacy, value)?;
        }
        Ok(())
    }

    /// Decode the stored JSON into `T`. Missing or malformed text resolves to
    /// `None`; corruption is logged, never surfaced as an error.
    pub fn read_json<T: DeserializeOwned>(&self, store: &dyn KvStore) -> Option<T> {
        let text = self.read(store)?;
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Discarding malformed value under {:?}: {err}", self.current);
                None
            }
        }
    }
}

/// Persistence keys used by the tracker.
pub mod keys {
    use super::StoreKey;

    /// Player roster, previously persisted as `users`.
    pub const PLAYERS: StoreKey = StoreKey::renamed("players", "users");
    /// Game log, previously persisted as `games`. Despite the spelling this
    /// is a separate collection from the matches embedded in sessions.
    pub const GAMES: StoreKey = StoreKey::renamed("matches", "games");
    /// Session list.
    pub const SESSIONS: StoreKey = StoreKey::single("sessions");
    /// Write-only ranking snapshot; never read back as source of truth.
    pub const RANKING_TOTALS: StoreKey = StoreKey::single("rankingTotals");
    /// Color scheme preference, stored as a bare `light`/`dark` string.
    pub const SCHEME: StoreKey = StoreKey::single("scheme");
}

/// File-backed store keeping one file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the provided directory. The directory is
    /// created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the store keeps its files in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(sanitize_component(key))
    }
}

impl KvStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(err) => {
                warn!("Failed to read {:?}: {err}", path);
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create {}", self.root.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("failed to write {}", path.display()))
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn sanitize_component(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_') {
            result.push(ch);
        }
    }
    if result.is_empty() {
        "key".to_string()
    } else {
        result
    }
}
