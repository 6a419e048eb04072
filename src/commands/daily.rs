use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::*;

use vault_assistant::core::store::parse_time_label;
use vault_assistant::{parse_date, Settings, Vault};

fn date_arg(date: Option<&str>) -> Result<Option<NaiveDate>> {
    Ok(date.map(parse_date).transpose()?)
}

pub fn path(settings: &Settings, date: Option<&str>) -> Result<()> {
    let vault = Vault::new(settings);
    println!("{}", vault.daily_note_path(date_arg(date)?).display());
    Ok(())
}

pub fn create(
    settings: &Settings,
    content: &str,
    date: Option<&str>,
    template: Option<&Path>,
) -> Result<()> {
    let vault = Vault::new(settings);
    let template = template
        .map(|t| {
            fs::read_to_string(t).with_context(|| format!("Cannot read template {}", t.display()))
        })
        .transpose()?;

    let path = vault.create_daily_note(content, date_arg(date)?, template.as_deref())?;
    println!("{} {}", "Created:".green(), path.display());
    Ok(())
}

pub fn append(
    settings: &Settings,
    content: &str,
    date: Option<&str>,
    time: Option<&str>,
) -> Result<()> {
    let vault = Vault::new(settings);
    if let Some(time) = time {
        parse_time_label(time)?;
    }

    let path = vault.append_to_daily_note(content, date_arg(date)?, time)?;
    println!("{} {}", "Appended to:".green(), path.display());
    Ok(())
}
