//! Platform-specific directories.
//!
//! - saves: `~/.local/share/dungeon/saves` on Linux, the platform data
//!   directory elsewhere; `./save_data/saves` as a last resort
//! - logs: `~/.cache/dungeon/logs` on Linux, the platform cache directory
//!   elsewhere; `/tmp/dungeon/logs` as a last resort

use std::path::PathBuf;

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", "dungeon")
}

/// Directory holding save slots.
pub fn save_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
        .join("saves")
}

/// Directory holding per-session log folders.
pub fn log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/dungeon"))
        .join("logs")
}
