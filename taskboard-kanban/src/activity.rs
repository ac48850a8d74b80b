//! Activity log sinks
//!
//! A sink records [`LogEntry`] values after an operation has committed. Sinks
//! are best-effort: the processor reports their errors through `tracing` and
//! carries on, so a broken sink can never undo or fail a board change.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use taskboard_operations::LogEntry;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};

/// Errors a sink may report. They never reach the operation's caller.
#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("activity log IO error: {0}")]
    Io(#[from] io::Error),

    #[error("activity log JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Destination for activity entries
#[async_trait]
pub trait ActivitySink: Send + Sync {
    async fn record(&self, entry: &LogEntry) -> Result<(), ActivityError>;
}

/// Discards every entry
#[derive(Debug, Default, Clone, Copy)]
pub struct NullActivitySink;

#[async_trait]
impl ActivitySink for NullActivitySink {
    async fn record(&self, _entry: &LogEntry) -> Result<(), ActivityError> {
        Ok(())
    }
}

/// Keeps entries in memory, newest first
#[derive(Debug, Default)]
pub struct MemoryActivityLog {
    entries: RwLock<Vec<LogEntry>>,
}

impl MemoryActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent entries first, at most `limit` of them
    pub async fn recent(&self, limit: Option<usize>) -> Vec<LogEntry> {
        let entries = self.entries.read().await;
        let take = limit.unwrap_or(entries.len());
        entries.iter().take(take).cloned().collect()
    }

    /// Entries about one card or column, newest first, at most `limit` of them
    pub async fn for_subject(&self, subject: &str, limit: Option<usize>) -> Vec<LogEntry> {
        let entries = self.entries.read().await;
        let matching = entries
            .iter()
            .filter(|e| e.subject.as_deref() == Some(subject))
            .cloned();
        match limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ActivitySink for MemoryActivityLog {
    async fn record(&self, entry: &LogEntry) -> Result<(), ActivityError> {
        self.entries.write().await.insert(0, entry.clone());
        Ok(())
    }
}

/// Appends one JSON object per line to a file.
///
/// Lines are written oldest first; [`read`](JsonlActivityLog::read) returns
/// them newest first.
#[derive(Debug)]
pub struct JsonlActivityLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlActivityLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read entries newest first, at most `limit` of them. A missing file
    /// reads as empty.
    pub async fn read(&self, limit: Option<usize>) -> Result<Vec<LogEntry>, ActivityError> {
        self.read_matching(limit, |_| true).await
    }

    /// Entries about one card or column, newest first, at most `limit` of them
    pub async fn for_subject(
        &self,
        subject: &str,
        limit: Option<usize>,
    ) -> Result<Vec<LogEntry>, ActivityError> {
        self.read_matching(limit, |e| e.subject.as_deref() == Some(subject))
            .await
    }

    async fn read_matching<F>(
        &self,
        limit: Option<usize>,
        keep: F,
    ) -> Result<Vec<LogEntry>, ActivityError>
    where
        F: Fn(&LogEntry) -> bool,
    {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str::<LogEntry>)
            .collect::<Result<Vec<_>, _>>()?;
        entries.retain(|e| keep(e));
        entries.reverse();
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        Ok(entries)
    }
}

#[async_trait]
impl ActivitySink for JsonlActivityLog {
    async fn record(&self, entry: &LogEntry) -> Result<(), ActivityError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
