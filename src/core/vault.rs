//! High-level note operations on a vault.
//!
//! Configuration is re-read from `.obsidian` on every call; the filesystem is
//! the only source of truth.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use super::config::VaultConfig;
use super::error::{Result, VaultError};
use super::frontmatter::Frontmatter;
use super::listing;
use super::note::Note;
use super::paths::VaultPaths;
use super::settings::Settings;
use super::store::{self, TimestampedEntry, WriteMode};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct Vault {
    paths: VaultPaths,
}

impl Vault {
    pub fn new(settings: &Settings) -> Self {
        Self::at(settings.vault_root.clone())
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            paths: VaultPaths::from_root(root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.paths.root
    }

    pub fn paths(&self) -> &VaultPaths {
        &self.paths
    }

    pub fn config(&self) -> VaultConfig {
        VaultConfig::load(&self.paths.root)
    }

    pub fn daily_note_path(&self, date: Option<NaiveDate>) -> PathBuf {
        let date = date.unwrap_or_else(today);
        self.paths.daily_note_path(&self.config(), date)
    }

    pub fn note_path(&self, title: &str, folder: Option<&str>) -> PathBuf {
        self.paths.note_path(&self.config(), title, folder)
    }

    pub fn attachment_path(&self, filename: &str, note_path: Option<&Path>) -> PathBuf {
        self.paths.attachment_path(&self.config(), filename, note_path)
    }

    /// Writes the daily note, replacing any previous content. A template is
    /// placed before the content, separated by a blank line.
    pub fn create_daily_note(
        &self,
        content: &str,
        date: Option<NaiveDate>,
        template: Option<&str>,
    ) -> Result<PathBuf> {
        let path = self.daily_note_path(date);
        let full_content = match template {
            Some(template) => format!("{}\n\n{}", template, content),
            None => content.to_string(),
        };

        store::write_note(&path, &full_content, WriteMode::Overwrite)?;
        Ok(path)
    }

    /// Appends a timestamped block to the daily note, creating it if needed.
    /// Without an explicit time label the current local time is used.
    pub fn append_to_daily_note(
        &self,
        content: &str,
        date: Option<NaiveDate>,
        time: Option<&str>,
    ) -> Result<PathBuf> {
        let path = self.daily_note_path(date);
        let entry = match time {
            Some(time) => TimestampedEntry::new(time, content),
            None => TimestampedEntry::now(content),
        };

        store::append_entry(&path, &entry)?;
        Ok(path)
    }

    pub fn create_note(
        &self,
        title: &str,
        content: &str,
        folder: Option<&str>,
        frontmatter: Option<&Frontmatter>,
    ) -> Result<PathBuf> {
        self.create_note_with_mode(title, content, folder, frontmatter, WriteMode::Overwrite)
    }

    pub fn create_note_with_mode(
        &self,
        title: &str,
        content: &str,
        folder: Option<&str>,
        frontmatter: Option<&Frontmatter>,
        mode: WriteMode,
    ) -> Result<PathBuf> {
        let path = self.note_path(title, folder);
        let full_content = match frontmatter {
            Some(fm) => fm.apply(content),
            None => content.to_string(),
        };

        store::write_note(&path, &full_content, mode)?;
        Ok(path)
    }

    /// Reads a note given relative to the vault (or as an absolute path
    /// inside it). `Ok(None)` when the note does not exist.
    pub fn read_note(&self, path: &Path) -> Result<Option<String>> {
        store::read_note(&self.paths.resolve(path))
    }

    pub fn load_note(&self, path: &Path) -> Result<Option<Note>> {
        Note::load(&self.paths.resolve(path))
    }

    pub fn note_exists(&self, path: &Path) -> bool {
        store::note_exists(&self.paths.resolve(path))
    }

    pub fn list_daily_notes(&self, year: Option<i32>, month: Option<u32>) -> Vec<PathBuf> {
        listing::list_daily_notes(&self.paths, &self.config(), year, month)
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| VaultError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_path_without_config() {
        let dir = tempdir().unwrap();
        let vault = Vault::at(dir.path());

        assert_eq!(
            vault.daily_note_path(Some(date(2024, 3, 15))),
            dir.path().join("01-daily-journey/2024/03-March/2024-03-15.md")
        );
    }

    #[test]
    fn test_config_is_reread_each_call() {
        let dir = tempdir().unwrap();
        let vault = Vault::at(dir.path());
        let day = Some(date(2024, 3, 15));
        let before = vault.daily_note_path(day);

        fs::create_dir_all(dir.path().join(".obsidian")).unwrap();
        fs::write(
            dir.path().join(".obsidian/daily-notes.json"),
            r#"{"folder": "Daily/"}"#,
        )
        .unwrap();

        let after = vault.daily_note_path(day);
        assert_ne!(before, after);
        assert_eq!(after, dir.path().join("Daily/2024/03-March/2024-03-15.md"));
    }

    #[test]
    fn test_create_daily_note_with_template() {
        let dir = tempdir().unwrap();
        let vault = Vault::at(dir.path());

        let path = vault
            .create_daily_note("Today I learned", Some(date(2024, 1, 5)), Some("# 2024-01-05"))
            .unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# 2024-01-05\n\nToday I learned"
        );
    }

    #[test]
    fn test_append_to_daily_note() {
        let dir = tempdir().unwrap();
        let vault = Vault::at(dir.path());
        let day = Some(date(2024, 1, 5));

        vault.create_daily_note("# Friday", day, None).unwrap();
        let path = vault
            .append_to_daily_note("Lunch idea", day, Some("12:30"))
            .unwrap();

        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "# Friday\n\n---\n\n**[12:30]**\n\nLunch idea"
        );
    }

    #[test]
    fn test_create_note_with_frontmatter() {
        let dir = tempdir().unwrap();
        let vault = Vault::at(dir.path());
        let fm = Frontmatter::new()
            .with("title", "X")
            .with("tags", vec!["a".to_string(), "b".to_string()]);

        let path = vault.create_note("X", "body", None, Some(&fm)).unwrap();
        assert_eq!(path, dir.path().join("00-inbox/X.md"));
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "---\ntitle: X\ntags: ['a', 'b']\n---\n\nbody"
        );
    }

    #[test]
    fn test_create_note_respects_app_config() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".obsidian")).unwrap();
        fs::write(
            dir.path().join(".obsidian/app.json"),
            r#"{"newFileFolderPath": "Inbox"}"#,
        )
        .unwrap();
        let vault = Vault::at(dir.path());

        let path = vault.create_note("Hello/World:Test?", "", None, None).unwrap();
        assert_eq!(path, dir.path().join("Inbox/HelloWorldTest.md"));
        assert!(vault.note_exists(Path::new("Inbox/HelloWorldTest.md")));
    }

    #[test]
    fn test_read_note_relative_and_absolute() {
        let dir = tempdir().unwrap();
        let vault = Vault::at(dir.path());
        let path = vault.create_note("Idea", "content", Some("notes"), None).unwrap();

        assert_eq!(
            vault.read_note(Path::new("notes/Idea.md")).unwrap().as_deref(),
            Some("content")
        );
        assert_eq!(vault.read_note(&path).unwrap().as_deref(), Some("content"));
        assert!(vault.read_note(Path::new("nonexistent.md")).unwrap().is_none());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-02-29").unwrap(), date(2024, 2, 29));
        assert!(matches!(
            parse_date("2023-02-29"),
            Err(VaultError::InvalidDate(_))
        ));
        assert!(parse_date("15/03/2024").is_err());
    }
}
