use std::path::{Path, PathBuf};

use super::error::Result;
use super::frontmatter::Frontmatter;
use super::store;

/// A note read back from disk.
#[derive(Debug, Clone)]
pub struct Note {
    pub path: PathBuf,
    pub name: String,
    pub content: String,
}

impl Note {
    /// `Ok(None)` when nothing exists at `path`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let Some(content) = store::read_note(path)? else {
            return Ok(None);
        };

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        Ok(Some(Self {
            path: path.to_path_buf(),
            name,
            content,
        }))
    }

    pub fn folder(&self) -> &str {
        self.path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }

    pub fn frontmatter(&self) -> Result<Option<Frontmatter>> {
        Frontmatter::parse(&self.content)
    }

    pub fn body(&self) -> &str {
        Frontmatter::strip(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::frontmatter::FrontmatterValue;
    use crate::core::store::{write_note, WriteMode};
    use tempfile::tempdir;

    #[test]
    fn test_load_note_with_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("00-inbox/Idea.md");
        write_note(&path, "---\nstatus: draft\n---\n\nText", WriteMode::Overwrite).unwrap();

        let note = Note::load(&path).unwrap().unwrap();
        assert_eq!(note.name, "Idea");
        assert_eq!(note.folder(), "00-inbox");
        assert_eq!(note.body(), "Text");
        assert_eq!(
            note.frontmatter().unwrap().unwrap().get("status"),
            Some(&FrontmatterValue::from("draft"))
        );
    }

    #[test]
    fn test_load_missing_note() {
        let dir = tempdir().unwrap();
        assert!(Note::load(&dir.path().join("gone.md")).unwrap().is_none());
    }
}
