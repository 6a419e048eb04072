use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("I/O failure at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Note already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Invalid time '{0}' (expected HH:MM)")]
    InvalidTime(String),
    #[error("{engine} failed: {diagnostic}")]
    EngineFailure { engine: String, diagnostic: String },
    #[error("Invalid frontmatter: {0}")]
    Frontmatter(#[from] serde_yaml::Error),
}

impl VaultError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn engine(engine: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self::EngineFailure {
            engine: engine.into(),
            diagnostic: diagnostic.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VaultError>;
