use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing::Level;

pub const DEFAULT_LOG_FILE: &str = "computeSales.log";

/// Where diagnostics go and how much of them. Built once in `main` and
/// installed as the process-wide subscriber.
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub path: PathBuf,
    pub level: Level,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            path: PathBuf::from(DEFAULT_LOG_FILE),
            level: Level::ERROR,
        }
    }
}

impl LogConfig {
    fn open(&self) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("unable to open log file {}", self.path.display()))
    }

    pub fn init(&self) -> Result<()> {
        let file = self.open()?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(self.level)
            .try_init()
            .map_err(|e| anyhow!("unable to install log subscriber: {}", e))
    }
}
