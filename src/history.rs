//! Command history for keyprompt
//!
//! Keeps a bounded list of submitted commands and persists it to a plain
//! text file, one command per line. The file location is found by probing a
//! few candidate directories so the same binary works from a source checkout
//! and from an installed location.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

/// Maximum number of history entries
pub const HISTORY_LIMIT: usize = 100;

/// History file name inside the resolved directory
pub const HISTORY_FILE: &str = ".history";

/// Commands that are never recorded
const SKIP_HISTORY: [&str; 7] = ["clear", "q", "quit", "exit", "ls", "h", "help"];

/// History persistence errors. Reported and absorbed, never fatal.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to read history from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write history to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No history location available")]
    Unresolved,
}

/// Check whether a submitted line is kept out of history
pub fn is_skipped(line: &str) -> bool {
    SKIP_HISTORY.contains(&line)
}

/// Directories probed for the history file, in order
pub fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from("./"), PathBuf::from("../")];
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir);
    }
    candidates
}

/// Command history storage
#[derive(Debug)]
pub struct CommandHistory {
    /// All history entries (newest last)
    entries: Vec<String>,
    /// File path for persistence
    file_path: Option<PathBuf>,
    /// Maximum entries
    max_entries: usize,
}

impl CommandHistory {
    /// History that is never written to disk
    pub fn in_memory(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            file_path: None,
            max_entries,
        }
    }

    /// Resolve the history file in the first candidate directory that exists
    /// and read it. Any failure leaves the history empty.
    pub fn load(candidates: &[PathBuf], file_name: &str, max_entries: usize) -> Self {
        let mut history = Self::in_memory(max_entries);

        let Some(dir) = candidates.iter().find(|dir| dir.is_dir()) else {
            warn!("no {} file", file_name);
            return history;
        };

        let path = dir.join(file_name);
        info!("load from {}", path.display());

        match read_entries(&path) {
            Ok(entries) => history.entries = entries,
            Err(e) => warn!("{}", e),
        }
        history.trim();
        history.file_path = Some(path);
        history
    }

    /// Record a submitted line and rewrite the history file.
    ///
    /// Lines in the skip set are ignored. A failed write is logged; the
    /// in-memory history stays authoritative.
    pub fn save(&mut self, line: &str) {
        if is_skipped(line) {
            return;
        }

        self.entries.push(line.to_string());
        self.trim();

        if let Err(e) = self.persist() {
            warn!("{}", e);
        }
    }

    /// Write all entries, newline separated
    fn persist(&self) -> Result<(), HistoryError> {
        let path = self.file_path.as_ref().ok_or(HistoryError::Unresolved)?;
        fs::write(path, self.entries.join("\n")).map_err(|source| HistoryError::Write {
            path: path.clone(),
            source,
        })
    }

    /// Drop the oldest entries beyond the limit
    fn trim(&mut self) {
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolved history file, if any
    pub fn path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

fn read_entries(path: &Path) -> Result<Vec<String>, HistoryError> {
    let content = fs::read_to_string(path).map_err(|source| HistoryError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
