//! Optional persistent record of per-file processing status.
//!
//! The guard store lets repeated runs over the same library skip files that
//! were already handled, including files whose crop came out all-zero and
//! therefore carry no container metadata to detect. One SQLite table keyed
//! by absolute path; a single mutex-guarded connection serializes the
//! check-and-set traffic coming from concurrent file pipelines.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::CoreResult;

/// Processing status recorded for one file path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    NotProcessed,
    Processed,
    Errored,
}

impl FileStatus {
    fn as_str(self) -> &'static str {
        match self {
            FileStatus::NotProcessed => "not-processed",
            FileStatus::Processed => "processed",
            FileStatus::Errored => "errored",
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "processed" => FileStatus::Processed,
            "errored" => FileStatus::Errored,
            _ => FileStatus::NotProcessed,
        }
    }
}

/// SQLite-backed path→status table.
#[derive(Debug)]
pub struct GuardStore {
    conn: Mutex<Connection>,
}

impl GuardStore {
    /// Opens (and if needed creates) the store at the given path.
    pub fn open(db_path: &Path) -> CoreResult<Self> {
        let conn = Connection::open(db_path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS processed_files (
                path TEXT PRIMARY KEY,
                status TEXT NOT NULL
            )",
            [],
        )?;
        log::debug!("opened guard store at {}", db_path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Locks the connection, recovering from poisoning. Every statement is a
    /// self-contained single-row read or upsert, so the table stays usable
    /// after a panic elsewhere poisoned the lock.
    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Looks up the recorded status for a file path.
    pub fn status(&self, file_path: &Path) -> CoreResult<FileStatus> {
        let conn = self.conn();
        let status: Option<String> = conn
            .query_row(
                "SELECT status FROM processed_files WHERE path = ?1",
                params![file_path.to_string_lossy()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(status
            .map(|s| FileStatus::from_str(&s))
            .unwrap_or(FileStatus::NotProcessed))
    }

    /// Records the status for a file path, replacing any previous record.
    pub fn set_status(&self, file_path: &Path, status: FileStatus) -> CoreResult<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO processed_files (path, status) VALUES (?1, ?2)
             ON CONFLICT(path) DO UPDATE SET status = excluded.status",
            params![file_path.to_string_lossy(), status.as_str()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_store() -> (tempfile::TempDir, GuardStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = GuardStore::open(&dir.path().join("guard.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_unknown_path_is_not_processed() {
        let (_dir, store) = temp_store();
        let status = store.status(&PathBuf::from("/nowhere/movie.mkv")).unwrap();
        assert_eq!(status, FileStatus::NotProcessed);
    }

    #[test]
    fn test_set_and_get_roundtrip() {
        let (_dir, store) = temp_store();
        let path = PathBuf::from("/library/movie.mkv");
        store.set_status(&path, FileStatus::Processed).unwrap();
        assert_eq!(store.status(&path).unwrap(), FileStatus::Processed);
    }

    #[test]
    fn test_status_can_be_overwritten() {
        let (_dir, store) = temp_store();
        let path = PathBuf::from("/library/movie.mkv");
        store.set_status(&path, FileStatus::Errored).unwrap();
        store.set_status(&path, FileStatus::Processed).unwrap();
        assert_eq!(store.status(&path).unwrap(), FileStatus::Processed);
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(GuardStore::open(&dir.path().join("guard.db")).unwrap());
        let path = PathBuf::from("/library/movie.mkv");

        // Poison the mutex by panicking while holding it.
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.conn.lock().unwrap();
            panic!("deliberate panic while holding the guard store lock");
        })
        .join();

        store.set_status(&path, FileStatus::Processed).unwrap();
        assert_eq!(store.status(&path).unwrap(), FileStatus::Processed);
    }

    #[test]
    fn test_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("guard.db");
        let path = PathBuf::from("/library/movie.mkv");
        {
            let store = GuardStore::open(&db).unwrap();
            store.set_status(&path, FileStatus::Processed).unwrap();
        }
        let store = GuardStore::open(&db).unwrap();
        assert_eq!(store.status(&path).unwrap(), FileStatus::Processed);
    }
}
