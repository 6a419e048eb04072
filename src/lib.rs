//! vault-assistant library
//!
//! Daily notes, note creation and voice capture for an Obsidian vault.
//!
//! # Modules
//!
//! - `core`: Vault configuration, note addressing and persistence
//! - `voice`: Speech-to-text and text-to-speech engines around the vault

pub mod core;
pub mod voice;

// Re-exports for convenience
pub use self::core::config::VaultConfig;
pub use self::core::error::{Result, VaultError};
pub use self::core::frontmatter::{Frontmatter, FrontmatterValue};
pub use self::core::note::Note;
pub use self::core::paths::{month_folder, sanitize_title, VaultPaths};
pub use self::core::settings::Settings;
pub use self::core::store::{TimestampedEntry, WriteMode};
pub use self::core::vault::{parse_date, Vault};
