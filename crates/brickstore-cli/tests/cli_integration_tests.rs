//! CLI integration tests
//!
//! Each test runs the `brickstore` binary against a fresh database in a
//! temporary directory.

use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn brickstore(dir: &TempDir, db: &Path, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_brickstore");
    Command::new(cli_bin)
        .current_dir(dir.path())
        .env("RUST_LOG", "off")
        .arg("--db")
        .arg(db)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn setup() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("sets.db");
    (temp_dir, db_path)
}

#[test]
fn test_init_creates_aliased_schema() {
    let (dir, db) = setup();

    let output = brickstore(&dir, &db, &["init"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Schema up to date (0 sets stored)"));

    let conn = Connection::open(&db).unwrap();
    let columns: Vec<String> = conn
        .prepare("SELECT name FROM pragma_table_info('lego_set')")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(columns.contains(&"min_age".to_string()));
    assert!(columns.contains(&"max_age".to_string()));
}

#[test]
fn test_add_then_show_round_trips_the_aggregate() {
    let (dir, db) = setup();

    let output = brickstore(
        &dir,
        &db,
        &[
            "add",
            "--name",
            "Star Destroyer",
            "--min-age",
            "5",
            "--max-age",
            "12",
            "--manual-author",
            "Jens Schauder",
            "--manual-text",
            "Just put all the pieces together in the right order",
            "--model",
            "FAST_TIE=Small TIE fighter",
            "--model",
            "BIG_DESTROYER=Big Destroyer",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Saved LEGO set 1"));

    let output = brickstore(&dir, &db, &["show", "1"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "#1 Star Destroyer (ages 5-12)\n\
         \x20 manual by Jens Schauder: Just put all the pieces together in the right order\n\
         \x20 model BIG_DESTROYER: Big Destroyer\n\
         \x20 model FAST_TIE: Small TIE fighter\n"
    );
}

#[test]
fn test_ids_continue_across_invocations() {
    let (dir, db) = setup();

    for name in ["Tower", "Bridge", "Castle"] {
        let output = brickstore(&dir, &db, &["add", "--name", name]);
        assert!(output.status.success(), "stderr: {}", stderr(&output));
    }

    let output = brickstore(&dir, &db, &["list"]);
    let listing = stdout(&output);
    assert!(listing.contains("#1 Tower"));
    assert!(listing.contains("#2 Bridge"));
    assert!(listing.contains("#3 Castle"));
}

#[test]
fn test_remove_deletes_and_reports_missing() {
    let (dir, db) = setup();
    brickstore(&dir, &db, &["add", "--name", "Tower"]);

    let output = brickstore(&dir, &db, &["remove", "1"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Removed LEGO set 1"));

    let output = brickstore(&dir, &db, &["remove", "1"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No LEGO set 1"));

    let output = brickstore(&dir, &db, &["list"]);
    assert!(stdout(&output).contains("No LEGO sets stored"));
}

#[test]
fn test_show_missing_set_fails() {
    let (dir, db) = setup();

    let output = brickstore(&dir, &db, &["show", "42"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERR_NOT_FOUND"));
}

#[test]
fn test_manual_author_requires_text() {
    let (dir, db) = setup();

    let output = brickstore(
        &dir,
        &db,
        &["add", "--name", "Tower", "--manual-author", "Alfred"],
    );
    assert!(!output.status.success());
}

#[test]
fn test_columns_reflect_config_file() {
    let (dir, db) = setup();
    let config = dir.path().join("brickstore.toml");
    fs::write(
        &config,
        r#"
        [logging]
        profile = "test"

        [naming.column_aliases]
        "lego_set.name" = "title"

        [naming.key_column_aliases]
        models = "model_key"
        "#,
    )
    .unwrap();

    let output = brickstore(
        &dir,
        &db,
        &["--config", config.to_str().unwrap(), "columns"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let listing = stdout(&output);
    assert!(listing.contains("title"));
    assert!(listing.contains("model_key"));
    // Aliases not in the file fall back to the convention
    assert!(listing.contains("int_maximum_age"));
    assert!(!listing.contains("handbuch_id"));
}

#[test]
fn test_unknown_id_column_alias_fails() {
    let (dir, db) = setup();
    let config = dir.path().join("brickstore.toml");
    fs::write(
        &config,
        "[naming.column_aliases]\n\"lego_set.id\" = \"set_id\"\n",
    )
    .unwrap();

    let output = brickstore(
        &dir,
        &db,
        &["--config", config.to_str().unwrap(), "columns"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERR_PERSISTENCE"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let (dir, db) = setup();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[naming.column_aliases]\nname = \"title\"\n").unwrap();

    let output = brickstore(&dir, &db, &["--config", config.to_str().unwrap(), "list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERR_INVALID_INPUT"));
}
