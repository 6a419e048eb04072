use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tempfile::tempdir;
use vault_assistant::core::store::ENTRY_SEPARATOR;
use vault_assistant::{Frontmatter, Settings, Vault};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn daily_journal_flow() {
    let dir = tempdir().unwrap();
    let vault = Vault::new(&Settings::for_vault(dir.path()));

    let jan = vault
        .create_daily_note("# Jan 5", Some(date(2024, 1, 5)), None)
        .unwrap();
    let feb = vault
        .append_to_daily_note("first thought", Some(date(2024, 2, 10)), Some("07:45"))
        .unwrap();
    vault
        .append_to_daily_note("second thought", Some(date(2024, 2, 10)), Some("21:10"))
        .unwrap();

    assert_eq!(vault.list_daily_notes(Some(2024), None), vec![jan.clone(), feb.clone()]);
    assert_eq!(vault.list_daily_notes(Some(2024), Some(1)), vec![jan.clone()]);
    assert_eq!(vault.list_daily_notes(None, None), vec![jan, feb.clone()]);

    let content = vault.read_note(&feb).unwrap().unwrap();
    assert_eq!(content.matches(ENTRY_SEPARATOR).count(), 2);
    assert!(content.find("**[07:45]**").unwrap() < content.find("**[21:10]**").unwrap());
}

#[test]
fn obsidian_config_drives_addressing() {
    let dir = tempdir().unwrap();
    let config_dir = dir.path().join(".obsidian");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("daily-notes.json"), r#"{"folder": "Journal/"}"#).unwrap();
    fs::write(
        config_dir.join("app.json"),
        r#"{"newFileFolderPath": "Inbox/", "attachmentFolderPath": "./assets"}"#,
    )
    .unwrap();

    let vault = Vault::at(dir.path());
    let daily = vault.daily_note_path(Some(date(2024, 3, 15)));
    assert_eq!(daily, dir.path().join("Journal/2024/03-March/2024-03-15.md"));

    let fm = Frontmatter::new().with("source", "test");
    let note = vault
        .create_note("Reading list: 2024", "- Dune", None, Some(&fm))
        .unwrap();
    assert_eq!(note, dir.path().join("Inbox/Reading-list-2024.md"));
    assert_eq!(
        vault.attachment_path("cover.png", Some(&note)),
        dir.path().join("Inbox/assets/cover.png")
    );

    let loaded = vault
        .load_note(Path::new("Inbox/Reading-list-2024.md"))
        .unwrap()
        .unwrap();
    assert_eq!(loaded.body(), "- Dune");
    assert_eq!(loaded.frontmatter().unwrap().unwrap(), fm);
}

#[test]
fn missing_notes_are_absent_not_errors() {
    let dir = tempdir().unwrap();
    let vault = Vault::at(dir.path());

    assert!(vault.read_note(Path::new("nonexistent.md")).unwrap().is_none());
    assert!(!vault.note_exists(Path::new("nonexistent.md")));
    assert!(vault.list_daily_notes(Some(2030), Some(5)).is_empty());
}
