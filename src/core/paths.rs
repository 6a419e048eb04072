use std::path::{Component, Path, PathBuf};

use chrono::{Datelike, NaiveDate};

use super::config::{VaultConfig, CONFIG_DIR};

pub const NOTE_EXTENSION: &str = "md";
pub const UNTITLED: &str = "Untitled";

/// Address scheme for notes inside a vault. Every method is pure: it only
/// builds paths and never touches the filesystem.
#[derive(Debug, Clone)]
pub struct VaultPaths {
    pub root: PathBuf,
    pub config_dir: PathBuf,
}

impl VaultPaths {
    pub fn from_root(root: PathBuf) -> Self {
        Self {
            config_dir: root.join(CONFIG_DIR),
            root,
        }
    }

    pub fn daily_root(&self, config: &VaultConfig) -> PathBuf {
        self.root.join(confine(&config.daily_note_folder))
    }

    pub fn year_dir(&self, config: &VaultConfig, year: i32) -> PathBuf {
        self.daily_root(config).join(format!("{:04}", year))
    }

    pub fn month_dir(&self, config: &VaultConfig, year: i32, month: u32) -> Option<PathBuf> {
        let folder = month_folder(year, month)?;
        Some(self.year_dir(config, year).join(folder))
    }

    /// `root/<daily folder>/YYYY/MM-Month/YYYY-MM-DD.md`
    pub fn daily_note_path(&self, config: &VaultConfig, date: NaiveDate) -> PathBuf {
        self.year_dir(config, date.year())
            .join(date.format("%m-%B").to_string())
            .join(format!("{}.{}", date.format("%Y-%m-%d"), NOTE_EXTENSION))
    }

    /// `root/<folder>/<sanitized title>.md`, folder defaulting to the
    /// configured location for new files.
    pub fn note_path(&self, config: &VaultConfig, title: &str, folder: Option<&str>) -> PathBuf {
        let folder = folder.unwrap_or(config.default_note_folder.as_str());
        self.root
            .join(confine(folder))
            .join(format!("{}.{}", sanitize_title(title), NOTE_EXTENSION))
    }

    /// Attachment folders starting with `./` are relative to the referencing
    /// note when one is given, otherwise everything hangs off the vault root.
    pub fn attachment_path(
        &self,
        config: &VaultConfig,
        filename: &str,
        note_path: Option<&Path>,
    ) -> PathBuf {
        let folder = config.attachment_folder.as_str();
        let base = match (folder.strip_prefix("./"), note_path.and_then(Path::parent)) {
            (Some(relative), Some(note_dir)) => note_dir.join(confine(relative)),
            _ => self.root.join(confine(folder)),
        };
        base.join(confine(filename))
    }

    /// Maps a caller-supplied note location onto the vault. Absolute paths
    /// already inside the root are kept, everything else is joined to it.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        let escapes = path.components().any(|c| c == Component::ParentDir);
        if path.is_absolute() && path.starts_with(&self.root) && !escapes {
            return path.to_path_buf();
        }
        self.root.join(confine(path))
    }
}

/// Reduces a title to alphanumerics, spaces, `-` and `_`, trims trailing
/// whitespace and turns spaces into hyphens.
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(*c, ' ' | '-' | '_'))
        .collect();
    let safe = kept.trim_end().replace(' ', "-");

    if safe.is_empty() {
        UNTITLED.to_string()
    } else {
        safe
    }
}

/// Month directory name, e.g. `03-March`.
pub fn month_folder(year: i32, month: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|d| d.format("%m-%B").to_string())
}

// Keeps only normal components so the result can't leave the directory it's joined to.
fn confine(path: impl AsRef<Path>) -> PathBuf {
    path.as_ref()
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> VaultPaths {
        VaultPaths::from_root(PathBuf::from("/vault"))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_note_path_defaults() {
        let path = paths().daily_note_path(&VaultConfig::default(), date(2024, 3, 15));
        assert_eq!(
            path,
            PathBuf::from("/vault/01-daily-journey/2024/03-March/2024-03-15.md")
        );
    }

    #[test]
    fn test_daily_note_path_is_deterministic() {
        let config = VaultConfig::default();
        let first = paths().daily_note_path(&config, date(2023, 12, 1));
        let second = paths().daily_note_path(&config, date(2023, 12, 1));
        assert_eq!(first, second);
        assert!(first.ends_with("2023/12-December/2023-12-01.md"));
    }

    #[test]
    fn test_daily_note_path_custom_folder() {
        let config = VaultConfig {
            daily_note_folder: "Journal/Daily".to_string(),
            ..VaultConfig::default()
        };
        let path = paths().daily_note_path(&config, date(2025, 1, 9));
        assert_eq!(
            path,
            PathBuf::from("/vault/Journal/Daily/2025/01-January/2025-01-09.md")
        );
    }

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("Hello/World:Test?"), "HelloWorldTest");
        assert_eq!(sanitize_title("Meeting notes: Q3 plan"), "Meeting-notes-Q3-plan");
        assert_eq!(sanitize_title("keep_under-score  "), "keep_under-score");
        assert_eq!(sanitize_title("Café résumé"), "Café-résumé");
        assert_eq!(sanitize_title("???"), UNTITLED);
    }

    #[test]
    fn test_sanitized_title_is_path_safe() {
        let safe = sanitize_title("a/b\\c:d*e?f\"g<h>i|j k.md");
        assert!(safe
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_note_path_default_and_explicit_folder() {
        let config = VaultConfig::default();
        assert_eq!(
            paths().note_path(&config, "Project Idea", None),
            PathBuf::from("/vault/00-inbox/Project-Idea.md")
        );
        assert_eq!(
            paths().note_path(&config, "Project Idea", Some("10-projects/")),
            PathBuf::from("/vault/10-projects/Project-Idea.md")
        );
    }

    #[test]
    fn test_note_path_stays_inside_root() {
        let config = VaultConfig::default();
        let path = paths().note_path(&config, "x", Some("../../etc"));
        assert!(path.starts_with("/vault"));
        assert_eq!(path, PathBuf::from("/vault/etc/x.md"));
    }

    #[test]
    fn test_month_folder() {
        assert_eq!(month_folder(2024, 2).as_deref(), Some("02-February"));
        assert_eq!(month_folder(2024, 13), None);
        assert_eq!(month_folder(2024, 0), None);
    }

    #[test]
    fn test_attachment_path() {
        let config = VaultConfig::default();
        let note = PathBuf::from("/vault/00-inbox/Idea.md");
        assert_eq!(
            paths().attachment_path(&config, "img.png", Some(&note)),
            PathBuf::from("/vault/00-inbox/attachments/img.png")
        );
        assert_eq!(
            paths().attachment_path(&config, "img.png", None),
            PathBuf::from("/vault/attachments/img.png")
        );

        let config = VaultConfig {
            attachment_folder: "99-system/assets".to_string(),
            ..VaultConfig::default()
        };
        assert_eq!(
            paths().attachment_path(&config, "img.png", Some(&note)),
            PathBuf::from("/vault/99-system/assets/img.png")
        );
    }

    #[test]
    fn test_resolve() {
        let p = paths();
        assert_eq!(
            p.resolve(Path::new("00-inbox/Idea.md")),
            PathBuf::from("/vault/00-inbox/Idea.md")
        );
        assert_eq!(
            p.resolve(Path::new("/vault/00-inbox/Idea.md")),
            PathBuf::from("/vault/00-inbox/Idea.md")
        );
        assert_eq!(
            p.resolve(Path::new("/etc/passwd")),
            PathBuf::from("/vault/etc/passwd")
        );
        assert_eq!(
            p.resolve(Path::new("/vault/../etc/passwd")),
            PathBuf::from("/vault/vault/etc/passwd")
        );
    }
}
