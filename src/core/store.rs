//! Durable note persistence.
//!
//! Writes replace a whole file, appends add a timestamped block at the end.
//! Parent folders are created on demand. Failures surface as
//! [`VaultError::Io`] with the offending path and are never retried.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::{Local, NaiveTime};

use super::error::{Result, VaultError};

pub const ENTRY_SEPARATOR: &str = "---";
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Fail when the note already exists.
    Create,
    /// Replace whatever is there.
    #[default]
    Overwrite,
}

/// A block appended to an existing note, labelled with an `HH:MM` time.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampedEntry {
    pub time: String,
    pub content: String,
}

impl TimestampedEntry {
    pub fn new(time: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            content: content.into(),
        }
    }

    pub fn at(time: NaiveTime, content: impl Into<String>) -> Self {
        Self::new(time.format(TIME_FORMAT).to_string(), content)
    }

    pub fn now(content: impl Into<String>) -> Self {
        Self::at(Local::now().time(), content)
    }

    /// `\n\n---\n\n**[HH:MM]**\n\n<content>`. Every entry carries the
    /// separator, including the first one in a fresh file.
    pub fn render(&self) -> String {
        format!(
            "\n\n{}\n\n**[{}]**\n\n{}",
            ENTRY_SEPARATOR, self.time, self.content
        )
    }
}

/// Parses an `HH:MM` label.
pub fn parse_time_label(label: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(label, TIME_FORMAT)
        .map_err(|_| VaultError::InvalidTime(label.to_string()))
}

/// Creates the parent folder chain of `path`. Calling it again is a no-op.
pub fn ensure_folder(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| VaultError::io(parent, e))?;
    }
    Ok(())
}

pub fn write_note(path: &Path, content: &str, mode: WriteMode) -> Result<()> {
    ensure_folder(path)?;

    let mut options = OpenOptions::new();
    options.write(true);
    match mode {
        WriteMode::Create => options.create_new(true),
        WriteMode::Overwrite => options.create(true).truncate(true),
    };

    let mut file = options.open(path).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => VaultError::AlreadyExists(path.to_path_buf()),
        _ => VaultError::io(path, e),
    })?;
    file.write_all(content.as_bytes())
        .map_err(|e| VaultError::io(path, e))?;

    log::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

pub fn append_entry(path: &Path, entry: &TimestampedEntry) -> Result<()> {
    ensure_folder(path)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| VaultError::io(path, e))?;
    file.write_all(entry.render().as_bytes())
        .map_err(|e| VaultError::io(path, e))?;

    log::debug!("Appended [{}] entry to {}", entry.time, path.display());
    Ok(())
}

/// Full text of the note, or `None` when there is no file at `path`.
pub fn read_note(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(VaultError::io(path, e)),
    }
}

pub fn note_exists(path: &Path) -> bool {
    path.exists()
}
