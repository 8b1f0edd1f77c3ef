//! Status-check storage backends.
//!
//! # Responsibilities
//! - Insert-only log with unique ids
//! - Listing in insertion order, bounded by a limit
//!
//! # Backends
//! - `MemoryStatusStore`: DashMap keyed by id plus an insertion sequence
//! - `FileStatusStore`: one JSON document per line, appended; a torn last
//!   line is skipped on read and terminated before the next append

use std::collections::HashSet;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::{StorageBackend, StorageConfig};
use crate::status::models::StatusCheck;

/// Storage failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("status check {id} already exists")]
    Duplicate { id: Uuid },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage misconfigured: {0}")]
    Config(String),
}

/// Backing store for the status-check log.
#[async_trait]
pub trait StatusStore: Send + Sync + 'static {
    /// Insert a record; ids are unique.
    async fn insert(&self, check: StatusCheck) -> Result<(), StoreError>;

    /// Up to `limit` records in insertion order.
    async fn list(&self, limit: usize) -> Result<Vec<StatusCheck>, StoreError>;
}

/// Open the store selected by configuration.
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn StatusStore>, StoreError> {
    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStatusStore::new())),
        StorageBackend::File => {
            let path = config.path.as_deref().ok_or_else(|| {
                StoreError::Config("file backend requires storage.path".to_string())
            })?;
            Ok(Arc::new(FileStatusStore::open(path).await?))
        }
    }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStatusStore {
    records: DashMap<Uuid, (u64, StatusCheck)>,
    sequence: AtomicU64,
}

impl MemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatusStore for MemoryStatusStore {
    async fn insert(&self, check: StatusCheck) -> Result<(), StoreError> {
        match self.records.entry(check.id) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(StoreError::Duplicate { id: check.id })
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
                slot.insert((seq, check));
                Ok(())
            }
        }
    }

    async fn list(&self, limit: usize) -> Result<Vec<StatusCheck>, StoreError> {
        let mut records: Vec<(u64, StatusCheck)> =
            self.records.iter().map(|r| r.value().clone()).collect();
        records.sort_by_key(|(seq, _)| *seq);
        Ok(records.into_iter().take(limit).map(|(_, check)| check).collect())
    }
}

/// Append-only JSON-lines document file.
#[derive(Debug)]
pub struct FileStatusStore {
    path: PathBuf,
    ids: Mutex<HashSet<Uuid>>,
}

impl FileStatusStore {
    /// Open (or create) the document file and index existing ids.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let ids = read_records(&path)
            .await?
            .into_iter()
            .map(|check| check.id)
            .collect::<HashSet<_>>();

        tracing::info!(path = %path.display(), records = ids.len(), "Status store opened");
        Ok(Self {
            path,
            ids: Mutex::new(ids),
        })
    }
}

#[async_trait]
impl StatusStore for FileStatusStore {
    async fn insert(&self, check: StatusCheck) -> Result<(), StoreError> {
        // The id set lock also serializes appends.
        let mut ids = self.ids.lock().await;
        if ids.contains(&check.id) {
            return Err(StoreError::Duplicate { id: check.id });
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .await?;

        let mut line = Vec::new();
        if ends_unterminated(&mut file).await? {
            line.push(b'\n');
        }
        serde_json::to_writer(&mut line, &check)?;
        line.push(b'\n');

        file.write_all(&line).await?;
        file.flush().await?;

        ids.insert(check.id);
        Ok(())
    }

    async fn list(&self, limit: usize) -> Result<Vec<StatusCheck>, StoreError> {
        let _guard = self.ids.lock().await;
        let mut records = read_records(&self.path).await?;
        records.truncate(limit);
        Ok(records)
    }
}

async fn read_records(path: &Path) -> Result<Vec<StatusCheck>, StoreError> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let records: Vec<StatusCheck> = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match serde_json::from_str(line) {
            Ok(check) => Some(check),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    line = index + 1,
                    error = %e,
                    "Skipping unreadable status record"
                );
                None
            }
        })
        .collect();
    Ok(records)
}

/// Whether the file has content that does not end in a newline, as left by
/// an interrupted append.
async fn ends_unterminated(file: &mut File) -> Result<bool, StoreError> {
    if file.metadata().await?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1)).await?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last).await?;
    Ok(last[0] != b'\n')
}
