//! The board store: the single in-memory source of truth for the task list.
//!
//! The list is ordered; new tasks go to the front ("newest on top") and drag
//! moves change only the status, never the position. Every mutating
//! operation writes the slot synchronously before returning, so the
//! persisted copy is always a snapshot of the in-memory state.

use crate::fields::Status;
use crate::storage::Storage;
use crate::task::Task;

/// Owns the canonical ordered task list plus its persistence adapter.
#[derive(Debug)]
pub struct Board {
    tasks: Vec<Task>,
    storage: Storage,
}

impl Board {
    /// Load the board from its slot. A missing or corrupt slot starts empty.
    pub fn load(storage: Storage) -> Self {
        let tasks = storage.load();
        Board { tasks, storage }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Create a task at the head of the list and persist.
    ///
    /// Title validation is the caller's job (form or CLI boundary); the store
    /// assumes a non-empty trimmed title.
    pub fn create(&mut self, title: &str, desc: &str) -> &Task {
        let task = Task::new(title, desc);
        self.tasks.insert(0, task);
        self.persist();
        &self.tasks[0]
    }

    /// Apply title/desc overrides to an existing task and persist.
    ///
    /// A new title only replaces the old one when its trimmed form is
    /// non-empty; a desc replaces unconditionally, so it can be cleared.
    /// Unknown ids are a silent no-op (stale ids race external reloads).
    pub fn update(&mut self, id: &str, title: Option<&str>, desc: Option<&str>) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if let Some(title) = title {
            let trimmed = title.trim();
            if !trimmed.is_empty() {
                task.title = trimmed.to_string();
            }
        }
        if let Some(desc) = desc {
            task.desc = desc.trim().to_string();
        }
        self.persist();
        true
    }

    /// Move a task to another column. Does not reorder the list.
    pub fn set_status(&mut self, id: &str, status: Status) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.status = status;
        self.persist();
        true
    }

    /// Remove a task. Removal is final; unknown ids are a no-op.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Wholesale replace after another process rewrote the slot. The new
    /// list was already persisted by the writer, so this does not save.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Re-read the slot and adopt its contents (last writer wins).
    pub fn reload(&mut self) {
        let tasks = self.storage.load();
        self.replace_all(tasks);
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    fn persist(&self) {
        self.storage.save(&self.tasks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SLOT_FILE;
    use tempfile::{tempdir, TempDir};

    fn board() -> (Board, TempDir) {
        let dir = tempdir().unwrap();
        let storage = Storage::new(&dir.path().join(SLOT_FILE));
        (Board::load(storage), dir)
    }

    #[test]
    fn create_prepends_and_defaults_to_todo() {
        let (mut board, _dir) = board();
        let t = board.create("Write report", "");
        assert_eq!(t.title, "Write report");
        assert_eq!(t.status, Status::Todo);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn newest_task_is_first() {
        let (mut board, _dir) = board();
        board.create("A", "");
        board.create("B", "");
        let titles: Vec<&str> = board.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["B", "A"]);
    }

    #[test]
    fn set_status_moves_without_reordering() {
        let (mut board, _dir) = board();
        board.create("A", "");
        board.create("B", "");
        let id_a = board.tasks()[1].id.clone();
        assert!(board.set_status(&id_a, Status::Done));
        let titles: Vec<&str> = board.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["B", "A"]);
        assert_eq!(board.get(&id_a).unwrap().status, Status::Done);
        let done = board
            .tasks()
            .iter()
            .filter(|t| t.status == Status::Done)
            .count();
        assert_eq!(done, 1);
    }

    #[test]
    fn update_keeps_title_when_new_one_is_blank() {
        let (mut board, _dir) = board();
        let id = board.create("Original", "some desc").id.clone();
        assert!(board.update(&id, Some("   "), Some("")));
        let t = board.get(&id).unwrap();
        assert_eq!(t.title, "Original");
        assert_eq!(t.desc, "", "desc replaces unconditionally, clearing it");
        assert!(board.update(&id, Some("  Renamed "), None));
        assert_eq!(board.get(&id).unwrap().title, "Renamed");
    }

    #[test]
    fn delete_is_final_and_repeat_is_noop() {
        let (mut board, _dir) = board();
        let id = board.create("T", "").id.clone();
        assert!(board.delete(&id));
        assert!(board.is_empty());
        assert!(!board.delete(&id));
        assert!(!board.set_status(&id, Status::Done));
        assert!(!board.update(&id, Some("x"), None));
    }

    #[test]
    fn count_tracks_creates_minus_deletes() {
        let (mut board, _dir) = board();
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(board.create(&format!("task {i}"), "").id.clone());
        }
        board.delete(&ids[1]);
        board.delete(&ids[3]);
        board.set_status(&ids[0], Status::InProgress);
        assert_eq!(board.len(), 3);
        assert_eq!(board.get(&ids[0]).unwrap().status, Status::InProgress);
    }

    #[test]
    fn mutations_persist_synchronously() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SLOT_FILE);
        let mut board = Board::load(Storage::new(&path));
        let id = board.create("persisted", "").id.clone();
        // A second adapter sees the write immediately.
        let other = Storage::new(&path).load();
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].id, id);
    }

    #[test]
    fn replace_all_does_not_write_the_slot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SLOT_FILE);
        let mut board = Board::load(Storage::new(&path));
        board.create("on disk", "");
        board.replace_all(vec![Task::new("memory only", "")]);
        assert_eq!(board.tasks()[0].title, "memory only");
        let on_disk = Storage::new(&path).load();
        assert_eq!(on_disk[0].title, "on disk");
    }

    #[test]
    fn reload_adopts_external_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SLOT_FILE);
        let mut board = Board::load(Storage::new(&path));
        board.create("mine", "");
        // Another process rewrites the slot.
        let external = Storage::new(&path);
        external.save(&[Task::new("theirs", "")]);
        board.reload();
        assert_eq!(board.len(), 1);
        assert_eq!(board.tasks()[0].title, "theirs");
    }
}
