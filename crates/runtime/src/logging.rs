//! Subscriber setup for binaries.
//!
//! Everything goes to `<log_dir>/<session>/dungeon.log`; stderr output is
//! optional. `RUST_LOG` overrides the default `info` filter.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE: &str = "dungeon.log";

/// Logging options.
#[derive(Clone, Debug)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    /// Subdirectory for this run; generated from the clock when absent.
    pub session_id: Option<String>,
    pub stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: crate::dirs::log_dir(),
            session_id: None,
            stderr: false,
        }
    }
}

/// Install the global subscriber.
///
/// Keep the returned guard alive for the life of the program; dropping it
/// flushes and closes the log file.
pub fn init(config: &LogConfig) -> Result<WorkerGuard> {
    let session_id = config.session_id.clone().unwrap_or_else(default_session_id);
    let session_dir = config.log_dir.join(&session_id);
    std::fs::create_dir_all(&session_dir)
        .with_context(|| format!("Failed to create log directory {}", session_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&session_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = config
        .stderr
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}", log_path(&config.log_dir, &session_id).display());

    Ok(guard)
}

pub fn log_path(log_dir: &Path, session_id: &str) -> PathBuf {
    log_dir.join(session_id).join(LOG_FILE)
}

fn default_session_id() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("session_{secs}")
}
