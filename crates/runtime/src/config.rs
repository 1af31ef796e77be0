//! Runtime configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Settings a binary needs before it can start a session.
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    pub session_id: Option<String>,
    pub save_data_dir: Option<PathBuf>,
    pub content_dir: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GAME_SESSION_ID` - Log session name (default: auto-generated)
    /// - `SAVE_DATA_DIR` - Directory for save slots (default: platform-specific)
    /// - `CONTENT_DIR` - Directory of RON/TOML content (default: built-in data)
    /// - `GAME_SEED` - RNG seed (default: random)
    pub fn from_env() -> Self {
        Self {
            session_id: env::var("GAME_SESSION_ID").ok(),
            save_data_dir: env::var("SAVE_DATA_DIR").ok().map(PathBuf::from),
            content_dir: env::var("CONTENT_DIR").ok().map(PathBuf::from),
            seed: read_env::<u64>("GAME_SEED"),
        }
    }

    pub fn save_dir(&self) -> PathBuf {
        self.save_data_dir
            .clone()
            .unwrap_or_else(crate::dirs::save_dir)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
