use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// File-backed kanban board for the terminal.
/// Storage defaults to ~/.taskboard/board-v1.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "tb", version, about = "Terminal kanban board")]
pub struct Cli {
    /// Path to the JSON board file.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Defaults to `ui` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
