//! Command implementations for the CLI interface.
//!
//! Everything the TUI can do to the board is also scriptable: add, list,
//! move, edit, and delete cards against the same slot file. Mutations go
//! through the same `Board` store, so persistence rules are identical.

use std::path::Path;

use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::board::Board;
use crate::cli::Cli;
use crate::fields::{format_status, Status};
use crate::task::Task;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive board.
    Ui,

    /// Add a new card to the To Do column.
    Add {
        /// Card title. Must not be empty after trimming.
        title: String,
        /// Optional longer description.
        #[arg(long, default_value = "")]
        desc: String,
    },

    /// List cards, optionally for a single column.
    List {
        /// Filter by column: todo | inprogress | done.
        #[arg(long, value_enum)]
        status: Option<Status>,
    },

    /// Move a card to another column.
    Move {
        /// Card id (a unique prefix works) or exact title.
        id: String,
        /// Target column: todo | inprogress | done.
        #[arg(value_enum)]
        status: Status,
    },

    /// Edit a card's title and/or description.
    Edit {
        /// Card id (a unique prefix works) or exact title.
        id: String,
        /// New title. Ignored if empty after trimming.
        #[arg(long)]
        title: Option<String>,
        /// New description. An empty string clears it.
        #[arg(long)]
        desc: Option<String>,
    },

    /// Delete a card.
    Delete {
        /// Card id (a unique prefix works) or exact title.
        id: String,
    },

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the TUI.
pub fn cmd_ui(db_path: &Path) {
    if let Err(e) = run_tui(db_path) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Add a card. The empty-title check lives here, at the input boundary;
/// the store itself assumes valid input.
pub fn cmd_add(board: &mut Board, title: &str, desc: &str) {
    if title.trim().is_empty() {
        eprintln!("Error: title must not be empty");
        std::process::exit(1);
    }
    let task = board.create(title, desc);
    println!("Added {} [{}]", task.short_id(), task.title);
}

/// Print cards in a table, newest first, optionally filtered to one column.
pub fn cmd_list(board: &Board, status: Option<Status>) {
    let rows: Vec<&Task> = board
        .tasks()
        .iter()
        .filter(|t| status.map_or(true, |s| t.status == s))
        .collect();
    if rows.is_empty() {
        println!("No tasks.");
        return;
    }
    println!(
        "{:<10} {:<12} {:<17} {}",
        "ID", "Status", "Created", "Title"
    );
    for t in rows {
        let desc = if t.desc.is_empty() {
            String::new()
        } else {
            format!("  - {}", truncate(&t.desc, 40))
        };
        println!(
            "{:<10} {:<12} {:<17} {}{}",
            t.short_id(),
            format_status(t.status),
            t.created_display(),
            truncate(&t.title, 50),
            desc
        );
    }
}

/// Move a card to another column.
pub fn cmd_move(board: &mut Board, id: &str, status: Status) {
    let task_id = resolve_or_exit(board, id);
    if board.set_status(&task_id, status) {
        let short = &task_id[..task_id.len().min(8)];
        println!("Moved {} to {}", short, status.column_title());
    } else {
        println!("Task {id} not found; nothing to do.");
    }
}

/// Apply title/desc changes to a card.
pub fn cmd_edit(board: &mut Board, id: &str, title: Option<String>, desc: Option<String>) {
    if title.is_none() && desc.is_none() {
        eprintln!("Error: nothing to change (pass --title and/or --desc)");
        std::process::exit(1);
    }
    let task_id = resolve_or_exit(board, id);
    if board.update(&task_id, title.as_deref(), desc.as_deref()) {
        let t = board.get(&task_id).unwrap();
        println!("Updated {} [{}]", t.short_id(), t.title);
    } else {
        println!("Task {id} not found; nothing to do.");
    }
}

/// Delete a card. Unknown ids are a quiet no-op.
pub fn cmd_delete(board: &mut Board, id: &str) {
    let task_id = resolve_or_exit(board, id);
    if board.delete(&task_id) {
        println!("Deleted {}", &task_id[..task_id.len().min(8)]);
    } else {
        println!("Task {id} not found; nothing to do.");
    }
}

/// Emit shell completions on stdout.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}

/// Resolve user input to a task id: exact id, unique id prefix, or exact
/// title (case-insensitive). Ambiguity is an error listing the candidates.
pub fn resolve_task_id(board: &Board, input: &str) -> Result<String, String> {
    if board.get(input).is_some() {
        return Ok(input.to_string());
    }

    let by_prefix: Vec<&Task> = board
        .tasks()
        .iter()
        .filter(|t| t.id.starts_with(input))
        .collect();
    match by_prefix.len() {
        1 => return Ok(by_prefix[0].id.clone()),
        n if n > 1 => {
            return Err(format!("id prefix '{input}' matches {n} tasks; use more characters"));
        }
        _ => {}
    }

    let lowered = input.to_lowercase();
    let by_title: Vec<&Task> = board
        .tasks()
        .iter()
        .filter(|t| t.title.to_lowercase() == lowered)
        .collect();
    match by_title.len() {
        0 => Err(format!("no task matches '{input}'")),
        1 => Ok(by_title[0].id.clone()),
        _ => {
            let mut msg = format!("multiple tasks titled '{input}':\n");
            for t in by_title {
                msg.push_str(&format!("  {}  {}\n", t.short_id(), t.title));
            }
            msg.push_str("Use the id instead.");
            Err(msg)
        }
    }
}

fn resolve_or_exit(board: &Board, input: &str) -> String {
    match resolve_task_id(board, input) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Truncate to a display width, adding an ellipsis when cut.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Storage, SLOT_FILE};
    use tempfile::{tempdir, TempDir};

    fn board() -> (Board, TempDir) {
        let dir = tempdir().unwrap();
        let storage = Storage::new(&dir.path().join(SLOT_FILE));
        (Board::load(storage), dir)
    }

    #[test]
    fn resolve_by_prefix_and_title() {
        let (mut board, _dir) = board();
        let id = board.create("Ship it", "").id.clone();
        assert_eq!(resolve_task_id(&board, &id).unwrap(), id);
        assert_eq!(resolve_task_id(&board, &id[..8]).unwrap(), id);
        assert_eq!(resolve_task_id(&board, "ship it").unwrap(), id);
        assert!(resolve_task_id(&board, "nope").is_err());
    }

    #[test]
    fn resolve_rejects_ambiguous_titles() {
        let (mut board, _dir) = board();
        board.create("dup", "");
        board.create("dup", "");
        let err = resolve_task_id(&board, "dup").unwrap_err();
        assert!(err.contains("multiple tasks"));
    }

    #[test]
    fn truncate_keeps_short_strings_intact() {
        assert_eq!(truncate("short", 10), "short");
        let cut = truncate("a very long title that will not fit", 10);
        assert!(cut.chars().count() <= 10);
        assert!(cut.ends_with('…'));
    }
}
