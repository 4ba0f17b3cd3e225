//! Loading configuration and opening the override slot from disk.

use jobtrail_client::{open_overrides, ClientConfig, ConfigError};
use jobtrail_core::{ColumnId, JobId, JobRecord};
use jobtrail_storage::OverrideStore;
use std::io::Write;

fn write_config(dir: &tempfile::TempDir, overrides_path: &std::path::Path) -> std::path::PathBuf {
    let path = dir.path().join("jobtrail.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"
api_base_url = "https://jobs.example.com/api/"
request_timeout_ms = 2500

[auth]
bearer_token = "token-123"

[overrides]
scope = "board"
path = "{}"
"#,
        overrides_path.display()
    )
    .unwrap();
    path
}

#[test]
fn test_from_path_reads_all_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, &dir.path().join("overrides.json"));

    let config = ClientConfig::from_path(&path).unwrap();
    assert_eq!(config.request_timeout_ms, 2500);
    assert_eq!(config.auth.bearer_token.as_deref(), Some("token-123"));
    assert_eq!(config.overrides.scope, "board");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ClientConfig::from_path(&dir.path().join("nope.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_override_slot_persists_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let overrides_path = dir.path().join("state").join("overrides.json");
    let config = ClientConfig::from_path(&write_config(&dir, &overrides_path)).unwrap();

    let items = vec![JobRecord::new(JobId::new(4), ColumnId::Column2).with_titles("Dev", "Acme")];
    open_overrides(&config)
        .unwrap()
        .write(ColumnId::Column2, &items)
        .unwrap();

    let reopened = open_overrides(&config).unwrap();
    let stored = reopened.read().unwrap().unwrap();
    assert_eq!(stored.column_id, ColumnId::Column2);
    assert_eq!(stored.items, items);

    let raw = std::fs::read_to_string(&overrides_path).unwrap();
    assert!(raw.contains("board:destItems"));
    assert!(raw.contains("board:destId"));
}
