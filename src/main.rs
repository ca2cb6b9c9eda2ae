//! # TB - Terminal Kanban Board
//!
//! A single-file task board for the terminal: three fixed columns
//! (To Do, In Progress, Done), card creation and editing, and mouse
//! drag-and-drop between columns.
//!
//! ## Key Features
//!
//! - **Three-Column Board**: fixed To Do / In Progress / Done columns with
//!   per-column counts; new cards land on top of To Do.
//! - **Drag and Drop**: pick a card up with the mouse and drop it on another
//!   column; Ctrl+←/→ does the same from the keyboard.
//! - **Local File Storage**: one JSON file, written on every change; a
//!   corrupt or missing file simply starts an empty board.
//! - **Multi-Process Aware**: the board notices when another process writes
//!   the same file and reloads it (last writer wins).
//! - **Scriptable**: every board operation is also a CLI subcommand.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the board
//! tb
//!
//! # Add a card from the shell
//! tb add "Write report" --desc "Q3 numbers"
//!
//! # List cards, move one, delete one
//! tb list
//! tb move 1a2b3c4d inprogress
//! tb delete "Write report"
//! ```
//!
//! Data lives in `~/.taskboard/board-v1.json` by default; pass `--db` to use
//! a different file (handy for per-project boards kept under git).

use std::path::PathBuf;

use clap::Parser;

pub mod board;
pub mod cli;
pub mod cmd;
pub mod fields;
pub mod logging;
pub mod storage;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod board_view;
    pub mod card_form;
    pub mod colors;
    pub mod drag;
    pub mod input;
    pub mod run;
    pub mod utils;
}

use board::Board;
use cli::Cli;
use cmd::*;
use storage::{Storage, SLOT_FILE};

fn main() {
    let cli = Cli::parse();

    // Completions need neither a data dir nor a board.
    if let Some(Commands::Completions { shell }) = &cli.command {
        cmd_completions(*shell);
        return;
    }

    // Determine the data directory: next to an explicit --db file, otherwise
    // ~/.taskboard. Logs live under it either way.
    let data_dir = if let Some(db_path) = cli.db.as_ref() {
        db_path
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .to_path_buf()
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let dir = PathBuf::from(home).join(".taskboard");
        if let Err(e) = std::fs::create_dir_all(&dir) {
            eprintln!("Failed to create data directory {}: {}", dir.display(), e);
            std::process::exit(1);
        }
        dir
    };

    logging::init(&data_dir);

    let db_path = cli
        .db
        .unwrap_or_else(|| data_dir.join(SLOT_FILE));

    match cli.command.unwrap_or(Commands::Ui) {
        Commands::Ui => cmd_ui(&db_path),
        Commands::Completions { .. } => unreachable!("completions handled above"),

        Commands::Add { title, desc } => {
            let mut board = Board::load(Storage::new(&db_path));
            cmd_add(&mut board, &title, &desc);
        }
        Commands::List { status } => {
            let board = Board::load(Storage::new(&db_path));
            cmd_list(&board, status);
        }
        Commands::Move { id, status } => {
            let mut board = Board::load(Storage::new(&db_path));
            cmd_move(&mut board, &id, status);
        }
        Commands::Edit { id, title, desc } => {
            let mut board = Board::load(Storage::new(&db_path));
            cmd_edit(&mut board, &id, title, desc);
        }
        Commands::Delete { id } => {
            let mut board = Board::load(Storage::new(&db_path));
            cmd_delete(&mut board, &id);
        }
    }
}
