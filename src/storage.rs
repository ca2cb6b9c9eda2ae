//! Durable slot: a single JSON file holding the full task list.
//!
//! The slot is replaced wholesale on every save and read wholesale on load.
//! Both directions are total: a missing or corrupt slot loads as an empty
//! board, and a failed write leaves the in-memory board authoritative for
//! the rest of the session. Failures are reported to the log and swallowed.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use thiserror::Error;

use crate::logging;
use crate::task::Task;

/// Default slot file name. Versioned so a future format change can pick a
/// fresh slot instead of fighting old data.
pub const SLOT_FILE: &str = "board-v1.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed slot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Persistence adapter for one slot file.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: &Path) -> Self {
        Storage {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the slot. Absent, unreadable, or malformed data yields an empty
    /// list; the failure is logged, never raised.
    pub fn load(&self) -> Vec<Task> {
        if !self.path.exists() {
            return Vec::new();
        }
        match self.read_slot() {
            Ok(tasks) => tasks,
            Err(e) => {
                logging::report("failed to read board slot, starting empty", &e);
                Vec::new()
            }
        }
    }

    /// Write the full list, replacing any previous value. Write failures are
    /// logged and swallowed; the caller's in-memory state stays correct.
    pub fn save(&self, tasks: &[Task]) {
        if let Err(e) = self.write_slot(tasks) {
            logging::report("failed to write board slot", &e);
        }
    }

    /// Last modification time of the slot, used to notice writes by another
    /// process. `None` while the slot does not exist yet.
    pub fn modified(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).and_then(|m| m.modified()).ok()
    }

    fn read_slot(&self) -> Result<Vec<Task>, StorageError> {
        let mut buf = String::new();
        File::open(&self.path)?.read_to_string(&mut buf)?;
        Ok(serde_json::from_str(&buf)?)
    }

    /// Atomic-ish write via temp + rename, so a crash mid-write cannot leave
    /// a half-serialized slot behind.
    fn write_slot(&self, tasks: &[Task]) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(tasks)?;
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Status;
    use tempfile::tempdir;

    fn slot_in(dir: &Path) -> Storage {
        Storage::new(&dir.join(SLOT_FILE))
    }

    #[test]
    fn missing_slot_loads_empty() {
        let dir = tempdir().unwrap();
        assert!(slot_in(dir.path()).load().is_empty());
    }

    #[test]
    fn round_trip_preserves_fields_and_order() {
        let dir = tempdir().unwrap();
        let storage = slot_in(dir.path());
        let mut b = Task::new("second", "desc b");
        b.status = Status::Done;
        let tasks = vec![b, Task::new("first", "")];
        storage.save(&tasks);
        assert_eq!(storage.load(), tasks);
    }

    #[test]
    fn empty_list_round_trips() {
        let dir = tempdir().unwrap();
        let storage = slot_in(dir.path());
        storage.save(&[]);
        assert!(storage.load().is_empty());
    }

    #[test]
    fn corrupt_slot_loads_empty() {
        let dir = tempdir().unwrap();
        let storage = slot_in(dir.path());
        fs::write(storage.path(), "{not json").unwrap();
        assert!(storage.load().is_empty());
        // Wrong shape counts as malformed too.
        fs::write(storage.path(), "{\"tasks\": 3}").unwrap();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let storage = Storage::new(&dir.path().join("deep/nested").join(SLOT_FILE));
        storage.save(&[Task::new("t", "")]);
        assert_eq!(storage.load().len(), 1);
    }

    #[test]
    fn modified_tracks_writes() {
        let dir = tempdir().unwrap();
        let storage = slot_in(dir.path());
        assert!(storage.modified().is_none());
        storage.save(&[]);
        assert!(storage.modified().is_some());
    }
}
