use anyhow::{bail, Result};

use vault_assistant::{Settings, Vault};

pub fn run(settings: &Settings, year: Option<i32>, month: Option<u32>) -> Result<()> {
    check_month(year, month)?;

    let vault = Vault::new(settings);
    for note in vault.list_daily_notes(year, month) {
        println!("{}", note.display());
    }
    Ok(())
}

// A month only narrows a listing together with a year; on its own it is ignored.
fn check_month(year: Option<i32>, month: Option<u32>) -> Result<()> {
    if let (Some(_), Some(month)) = (year, month) {
        if !(1..=12).contains(&month) {
            bail!("Invalid month {} (must be 1-12)", month);
        }
    }
    Ok(())
}
