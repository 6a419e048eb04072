//! Vault configuration read from the `.obsidian` directory.
//!
//! Each JSON document is loaded on its own. A missing or malformed document
//! leaves its section empty and the affected settings at their defaults.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

pub const CONFIG_DIR: &str = ".obsidian";
pub const APP_CONFIG: &str = "app.json";
pub const DAILY_NOTES_CONFIG: &str = "daily-notes.json";
pub const CORE_PLUGINS_CONFIG: &str = "core-plugins.json";

pub const DEFAULT_DAILY_FOLDER: &str = "01-daily-journey";
pub const DEFAULT_NOTE_FOLDER: &str = "00-inbox";
pub const DEFAULT_ATTACHMENT_FOLDER: &str = "./attachments";

pub type ConfigSection = Map<String, Value>;

#[derive(Debug, Clone, Serialize)]
pub struct VaultConfig {
    pub daily_note_folder: String,
    pub default_note_folder: String,
    pub attachment_folder: String,
    pub enabled_plugins: Vec<String>,
    pub app: ConfigSection,
    pub daily_notes: ConfigSection,
    pub core_plugins: ConfigSection,
}

impl VaultConfig {
    /// Loads the configuration of the vault at `root`. Never fails.
    pub fn load(root: &Path) -> Self {
        let dir = root.join(CONFIG_DIR);

        let app = load_section(&dir, APP_CONFIG).and_then(into_object).unwrap_or_default();
        let daily_notes = load_section(&dir, DAILY_NOTES_CONFIG)
            .and_then(into_object)
            .unwrap_or_default();
        let core_plugins = load_section(&dir, CORE_PLUGINS_CONFIG)
            .and_then(plugins_to_object)
            .unwrap_or_default();

        Self::from_sections(app, daily_notes, core_plugins)
    }

    pub fn from_sections(
        app: ConfigSection,
        daily_notes: ConfigSection,
        core_plugins: ConfigSection,
    ) -> Self {
        let daily_note_folder = folder_setting(&daily_notes, "folder", DEFAULT_DAILY_FOLDER);
        let default_note_folder = folder_setting(&app, "newFileFolderPath", DEFAULT_NOTE_FOLDER);
        let attachment_folder =
            folder_setting(&app, "attachmentFolderPath", DEFAULT_ATTACHMENT_FOLDER);

        let enabled_plugins = core_plugins
            .iter()
            .filter(|(_, enabled)| enabled.as_bool().unwrap_or(false))
            .map(|(name, _)| name.clone())
            .collect();

        Self {
            daily_note_folder,
            default_note_folder,
            attachment_folder,
            enabled_plugins,
            app,
            daily_notes,
            core_plugins,
        }
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self::from_sections(Map::new(), Map::new(), Map::new())
    }
}

fn load_section(dir: &Path, name: &str) -> Option<Value> {
    let path = dir.join(name);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("{} not present, using defaults", path.display());
            return None;
        }
        Err(e) => {
            log::warn!("Cannot read {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed {}: {}", path.display(), e);
            None
        }
    }
}

fn into_object(value: Value) -> Option<ConfigSection> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

// core-plugins.json is either {"name": bool} or a list of enabled names.
// Both keep file order; a name listed twice keeps its first position.
fn plugins_to_object(value: Value) -> Option<ConfigSection> {
    match value {
        Value::Object(map) => Some(map),
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| item.as_str().map(|s| (s.to_string(), Value::Bool(true))))
                .collect(),
        ),
        _ => None,
    }
}

fn folder_setting(section: &ConfigSection, key: &str, default: &str) -> String {
    section
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}
