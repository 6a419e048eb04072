use std::path::Path;

use anyhow::{bail, Result};
use colored::*;
use serde_json::{Map, Value};

use vault_assistant::{Frontmatter, FrontmatterValue, Settings, Vault, WriteMode};

pub fn create(
    settings: &Settings,
    title: &str,
    content: &str,
    folder: Option<&str>,
    meta: &[String],
    tags: &[String],
    no_clobber: bool,
) -> Result<()> {
    let vault = Vault::new(settings);
    let frontmatter = build_frontmatter(meta, tags)?;
    let mode = if no_clobber {
        WriteMode::Create
    } else {
        WriteMode::Overwrite
    };

    let path = vault.create_note_with_mode(
        title,
        content,
        folder,
        (!frontmatter.is_empty()).then_some(&frontmatter),
        mode,
    )?;
    println!("{} {}", "Created:".green(), path.display());
    Ok(())
}

pub fn read(settings: &Settings, path: &Path, frontmatter: bool) -> Result<()> {
    let vault = Vault::new(settings);

    let Some(note) = vault.load_note(path)? else {
        eprintln!("{} {}", "Note not found:".red(), path.display());
        std::process::exit(1);
    };

    if frontmatter {
        let header = note.frontmatter()?.unwrap_or_default();
        let object: Map<String, Value> = header
            .iter()
            .map(|(key, value)| (key.to_string(), to_json(value)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&object)?);
    } else {
        println!("{}", note.content);
    }
    Ok(())
}

fn build_frontmatter(meta: &[String], tags: &[String]) -> Result<Frontmatter> {
    let mut frontmatter = Frontmatter::new();
    for entry in meta {
        let Some((key, value)) = entry.split_once('=') else {
            bail!("Invalid --meta '{}' (expected KEY=VALUE)", entry);
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("Invalid --meta '{}' (empty key)", entry);
        }
        frontmatter.insert(key, value.trim());
    }

    let tags: Vec<String> = tags
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if !tags.is_empty() {
        frontmatter.insert("tags", tags);
    }
    Ok(frontmatter)
}

fn to_json(value: &FrontmatterValue) -> Value {
    match value {
        FrontmatterValue::Text(text) => Value::String(text.clone()),
        FrontmatterValue::List(items) => {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        }
    }
}
