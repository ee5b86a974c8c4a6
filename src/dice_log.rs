//! Append-only dice log mirrored to a file and the console.
//!
//! A `DiceLog` owns an ordered list of write targets. Each recorded event is
//! formatted once as `<timestamp> - <message>` and written to every target
//! while a single lock is held, so lines from concurrent requests never
//! interleave. Handlers see the log only through the [`EventSink`] trait.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;

use crate::config::DICE_LOG_TIMESTAMP_FORMAT;

/// Destination for operational events recorded by request handlers.
pub trait EventSink: Send + Sync {
    /// Record one event. Errors are reported but callers treat them as non-fatal.
    fn record(&self, message: &str) -> Result<(), SinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to create log directory '{}': {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to open log file '{}': {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("Failed to write to {target}: {source}")]
    Write { target: String, source: io::Error },
}

/// A single named write destination.
struct Target {
    name: String,
    writer: Box<dyn Write + Send>,
}

/// Dice log fanning out to an ordered list of writers.
pub struct DiceLog {
    targets: Mutex<Vec<Target>>,
}

impl DiceLog {
    /// Create an empty log; add destinations with [`DiceLog::with_target`].
    pub fn new() -> Self {
        Self {
            targets: Mutex::new(Vec::new()),
        }
    }

    /// Append a destination after the existing ones.
    pub fn with_target(self, name: impl Into<String>, writer: impl Write + Send + 'static) -> Self {
        let mut targets = self.targets.into_inner().unwrap_or_else(|e| e.into_inner());
        targets.push(Target {
            name: name.into(),
            writer: Box::new(writer),
        });
        Self {
            targets: Mutex::new(targets),
        }
    }

    /// Open the dice log file for appending, creating its parent directory if needed,
    /// and optionally mirror every line to stdout.
    pub fn open(path: &Path, console: bool) -> Result<Self, SinkError> {
        let file = open_append(path)?;
        let log = Self::new().with_target(path.display().to_string(), file);
        Ok(if console {
            log.with_target("stdout", io::stdout())
        } else {
            log
        })
    }

    /// Number of configured destinations
    pub fn target_count(&self) -> usize {
        self.targets.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for DiceLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for DiceLog {
    fn record(&self, message: &str) -> Result<(), SinkError> {
        let timestamp = Local::now().format(DICE_LOG_TIMESTAMP_FORMAT).to_string();
        let line = format_line(&timestamp, message);

        let mut targets = self.targets.lock().unwrap_or_else(|e| e.into_inner());
        let mut first_error = None;

        for target in targets.iter_mut() {
            let result = target
                .writer
                .write_all(line.as_bytes())
                .and_then(|()| target.writer.flush());

            if let Err(source) = result {
                if first_error.is_none() {
                    first_error = Some(SinkError::Write {
                        target: target.name.clone(),
                        source,
                    });
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn open_append(path: &Path) -> Result<File, SinkError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SinkError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| SinkError::Open {
            path: path.to_path_buf(),
            source,
        })
}

fn format_line(timestamp: &str, message: &str) -> String {
    format!("{} - {}\n", timestamp, message)
}
