use anyhow::Result;
use colored::*;
use serde::Serialize;

use vault_assistant::{Settings, Vault, VaultConfig};

const PLUGIN_PREVIEW: usize = 5;

#[derive(Serialize)]
struct ConfigReport<'a> {
    vault_root: String,
    config_dir: String,
    #[serde(flatten)]
    config: &'a VaultConfig,
}

pub fn run(settings: &Settings, json: bool) -> Result<()> {
    let vault = Vault::new(settings);
    let config = vault.config();

    if json {
        let report = ConfigReport {
            vault_root: vault.root().display().to_string(),
            config_dir: vault.paths().config_dir.display().to_string(),
            config: &config,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Vault Configuration".bold());
    println!("{}", "=".repeat(50));
    println!();
    println!("Vault root:         {}", vault.root().display());
    println!(
        "Daily notes folder: {}{}",
        config.daily_note_folder,
        source_hint(config.daily_notes.contains_key("folder"))
    );
    println!(
        "New file location:  {}{}",
        config.default_note_folder,
        source_hint(config.app.contains_key("newFileFolderPath"))
    );
    println!(
        "Attachments:        {}{}",
        config.attachment_folder,
        source_hint(config.app.contains_key("attachmentFolderPath"))
    );
    println!();

    let plugins = &config.enabled_plugins;
    if plugins.is_empty() {
        println!("Enabled plugins: {}", "none".dimmed());
    } else {
        let preview: Vec<&str> = plugins
            .iter()
            .take(PLUGIN_PREVIEW)
            .map(String::as_str)
            .collect();
        let more = if plugins.len() > PLUGIN_PREVIEW {
            format!(" (+{} more)", plugins.len() - PLUGIN_PREVIEW)
        } else {
            String::new()
        };
        println!("Enabled plugins: {}{}", preview.join(", ").green(), more);
    }

    Ok(())
}

fn source_hint(configured: bool) -> ColoredString {
    if configured {
        "".normal()
    } else {
        " (default)".dimmed()
    }
}
