use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use super::config::VaultConfig;
use super::paths::{VaultPaths, NOTE_EXTENSION};

/// Daily notes, optionally narrowed to a year or a single month, in
/// lexicographic (and therefore chronological) order.
///
/// A month without a year is ignored. Directories that don't exist simply
/// contribute nothing.
pub fn list_daily_notes(
    paths: &VaultPaths,
    config: &VaultConfig,
    year: Option<i32>,
    month: Option<u32>,
) -> Vec<PathBuf> {
    let mut notes = match (year, month) {
        (Some(year), Some(month)) => match paths.month_dir(config, year, month) {
            Some(dir) => notes_in(&dir),
            None => Vec::new(),
        },
        (Some(year), None) => notes_in_year(&paths.year_dir(config, year)),
        (None, _) => notes_under(&paths.daily_root(config)),
    };

    notes.sort();
    notes
}

fn is_note(path: &Path) -> bool {
    path.extension().map(|e| e == NOTE_EXTENSION).unwrap_or(false)
}

fn notes_in(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.is_file() && is_note(p))
                .collect()
        })
        .unwrap_or_default()
}

// One level of month folders below the year, notes directly inside them.
fn notes_in_year(year_dir: &Path) -> Vec<PathBuf> {
    let pattern = format!(
        "{}/*/*.{}",
        Pattern::escape(&year_dir.to_string_lossy()),
        NOTE_EXTENSION
    );

    match glob::glob(&pattern) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .filter(|p| p.is_file())
            .collect(),
        Err(e) => {
            log::warn!("Bad listing pattern {}: {}", pattern, e);
            Vec::new()
        }
    }
}

fn notes_under(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_note(e.path()))
        .map(|e| e.into_path())
        .collect()
}
