//! Content loaders for reading game data from files.
//!
//! Each loader reads one file format into the core's table types. Every
//! loader also has a `parse` entry point over a string, used for the data
//! embedded at compile time.

pub mod config;
pub mod factory;
pub mod tables;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use tables::TablesLoader;

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file {}", path.display()))
}

/// Parse a RON document, naming `source` in the error.
pub(crate) fn parse_ron<T: DeserializeOwned>(text: &str, source: &str) -> LoadResult<T> {
    ron::from_str(text).with_context(|| format!("Failed to parse {source}"))
}
