//! History store — bounded, deduplicated, most-recent-first lists.

use super::{HistorySnapshot, HISTORY_CAPACITY};
use crate::error::StoreError;
use crate::shared::{ChatId, Pair};

use async_lock::Mutex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Per-user query history backed by a snapshot file.
///
/// The snapshot is rewritten after every mutation while the lock is held, so
/// the file never lags behind or runs ahead of memory.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    capacity: usize,
    entries: Mutex<HistorySnapshot>,
}

impl HistoryStore {
    /// Empty store writing to `path`. Nothing is read until [`load_snapshot`].
    ///
    /// [`load_snapshot`]: HistoryStore::load_snapshot
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_capacity(path, HISTORY_CAPACITY)
    }

    pub fn with_capacity(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity: capacity.max(1),
            entries: Mutex::new(HistorySnapshot::new()),
        }
    }

    /// Create the store and load whatever snapshot exists.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let store = Self::new(path);
        store.load_snapshot().await;
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace memory with the snapshot file. Returns the number of users loaded.
    ///
    /// A missing, empty or corrupt file yields an empty store.
    pub async fn load_snapshot(&self) -> usize {
        let mut loaded = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => HistorySnapshot::new(),
            Ok(content) => match serde_json::from_str::<HistorySnapshot>(&content) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    tracing::warn!(
                        "History snapshot {} is corrupt, starting empty: {}",
                        self.path.display(),
                        e
                    );
                    HistorySnapshot::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No history snapshot at {}", self.path.display());
                HistorySnapshot::new()
            }
            Err(e) => {
                tracing::warn!(
                    "Cannot read history snapshot {}, starting empty: {}",
                    self.path.display(),
                    e
                );
                HistorySnapshot::new()
            }
        };

        for pairs in loaded.values_mut() {
            pairs.truncate(self.capacity);
        }

        let users = loaded.len();
        *self.entries.lock().await = loaded;
        tracing::info!("Loaded history for {} user(s)", users);
        users
    }

    /// Move `pair` to the front of the user's list and persist.
    ///
    /// Memory is updated even if the write fails; the error is returned so the
    /// caller can log it.
    pub async fn record(&self, chat: ChatId, pair: Pair) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;

        let list = entries.entry(chat).or_default();
        list.retain(|p| p != &pair);
        list.insert(0, pair);
        list.truncate(self.capacity);

        self.persist(&entries).await
    }

    /// Most recent first; empty if the user has no history.
    pub async fn list(&self, chat: ChatId) -> Vec<Pair> {
        self.entries
            .lock()
            .await
            .get(&chat)
            .cloned()
            .unwrap_or_default()
    }

    /// Copy of the whole map.
    pub async fn snapshot(&self) -> HistorySnapshot {
        self.entries.lock().await.clone()
    }

    /// Write to a sibling temp file, then rename over the snapshot.
    async fn persist(&self, entries: &HistorySnapshot) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "history.json".into());
        tmp_name.push(".tmp");
        let tmp = self.path.with_file_name(tmp_name);

        tokio::fs::write(&tmp, json.as_bytes()).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
