//! Per-session metadata log: one record for every image that was annotated.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::{app_data_path, data_env_dirs, ConfigPathError, APP_DIR};

pub const DEFAULT_MAX_SESSIONS: usize = 100;
const HISTORY_FILE: &str = "annotation_history.json";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("cannot resolve history path: {0}")]
    Path(#[from] ConfigPathError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("history encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type HistoryResult<T> = std::result::Result<T, HistoryError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub image_width: u32,
    pub image_height: u32,
    pub annotation_count: usize,
}

impl SessionRecord {
    pub fn new(image_width: u32, image_height: u32, annotation_count: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            image_width,
            image_height,
            annotation_count,
        }
    }
}

pub trait SessionLog {
    fn append(&mut self, record: SessionRecord) -> HistoryResult<()>;
    /// Oldest first.
    fn sessions(&self) -> &[SessionRecord];
    fn clear(&mut self) -> HistoryResult<()>;
}

/// Bounded in-memory log; also the backing list of [`JsonSessionLog`].
#[derive(Debug, Clone)]
pub struct MemorySessionLog {
    records: Vec<SessionRecord>,
    max_sessions: usize,
}

impl Default for MemorySessionLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}

impl MemorySessionLog {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            records: Vec::new(),
            max_sessions: max_sessions.max(1),
        }
    }

    fn push(&mut self, record: SessionRecord) {
        self.records.push(record);
        self.trim();
    }

    fn trim(&mut self) {
        let overflow = self.records.len().saturating_sub(self.max_sessions);
        if overflow > 0 {
            self.records.drain(..overflow);
        }
    }
}

impl SessionLog for MemorySessionLog {
    fn append(&mut self, record: SessionRecord) -> HistoryResult<()> {
        self.push(record);
        Ok(())
    }

    fn sessions(&self) -> &[SessionRecord] {
        &self.records
    }

    fn clear(&mut self) -> HistoryResult<()> {
        self.records.clear();
        Ok(())
    }
}

/// Log persisted as a pretty-printed JSON array, rewritten on every change.
#[derive(Debug, Clone)]
pub struct JsonSessionLog {
    path: PathBuf,
    log: MemorySessionLog,
}

impl JsonSessionLog {
    /// Opens the log at `path`. A missing file starts an empty log; an
    /// unreadable or corrupt one is logged and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>, max_sessions: usize) -> Self {
        let path = path.into();
        let mut log = MemorySessionLog::new(max_sessions);
        log.records = read_records(&path);
        log.trim();
        Self { path, log }
    }

    pub fn with_default_path(max_sessions: usize) -> HistoryResult<Self> {
        let (xdg_data_home, home) = data_env_dirs();
        let path = app_data_path(APP_DIR, HISTORY_FILE, xdg_data_home.as_deref(), home.as_deref())?;
        Ok(Self::open(path, max_sessions))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> HistoryResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_string_pretty(&self.log.records)?;
        fs::write(&self.path, encoded)?;
        tracing::debug!(
            path = ?self.path,
            sessions = self.log.records.len(),
            "session history saved"
        );
        Ok(())
    }
}

impl SessionLog for JsonSessionLog {
    fn append(&mut self, record: SessionRecord) -> HistoryResult<()> {
        self.log.push(record);
        self.save()
    }

    fn sessions(&self) -> &[SessionRecord] {
        self.log.sessions()
    }

    fn clear(&mut self) -> HistoryResult<()> {
        self.log.records.clear();
        self.save()
    }
}

fn read_records(path: &Path) -> Vec<SessionRecord> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read session history; starting empty");
            return Vec::new();
        }
    };
    serde_json::from_str(&contents).unwrap_or_else(|err| {
        tracing::warn!(?err, ?path, "failed to parse session history; starting empty");
        Vec::new()
    })
}
