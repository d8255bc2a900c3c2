use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Isolated working directory with helpers to build fixture databases.
struct PeekTestEnv {
    tmp: TempDir,
}

impl PeekTestEnv {
    fn new() -> Result<Self> {
        Ok(Self {
            tmp: tempfile::tempdir()?,
        })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.tmp.path().join(name)
    }

    fn sqlite(&self, name: &str, sql: &str) -> Result<PathBuf> {
        let path = self.path(name);
        let conn = rusqlite::Connection::open(&path)?;
        // Forces the header to disk even when `sql` creates nothing
        conn.execute_batch("PRAGMA user_version = 1;")?;
        conn.execute_batch(sql)?;
        conn.close().map_err(|(_, e)| e)?;
        Ok(path)
    }

    fn duckdb(&self, name: &str, sql: &str) -> Result<PathBuf> {
        let path = self.path(name);
        let conn = duckdb::Connection::open(&path)?;
        conn.execute_batch(sql)?;
        drop(conn);
        Ok(path)
    }

    fn dbpeek(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dbpeek"));
        cmd.current_dir(self.tmp.path())
            .env_remove("DBPEEK_DB_PATH")
            .env_remove("DBPEEK_ENGINE")
            .env_remove("DBPEEK_FORMAT")
            .env_remove("DBPEEK_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    fn stdout_of(&self, db: &Path) -> Result<String> {
        let output = self.dbpeek().arg(db).output()?;
        anyhow::ensure!(output.status.success(), "dbpeek failed: {:?}", output);
        String::from_utf8(output.stdout).context("stdout is not UTF-8")
    }
}

const USERS: &str = "CREATE TABLE T (id INTEGER, name TEXT);
                     INSERT INTO T VALUES (1, 'a');";

#[test]
fn test_no_tables() -> Result<()> {
    let env = PeekTestEnv::new()?;
    let db = env.sqlite("empty.sqlite", "")?;

    env.dbpeek()
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::eq("Tables: []\n"));
    Ok(())
}

#[test]
fn test_single_table_report() -> Result<()> {
    let env = PeekTestEnv::new()?;
    let db = env.sqlite("users.sqlite", USERS)?;

    let stdout = env.stdout_of(&db)?;
    insta::assert_snapshot!(stdout.trim_end(), @r"
Tables: ['T']

Schema for T:
  id: INTEGER
  name: TEXT

Sample row: (1, 'a')
");
    Ok(())
}

#[test]
fn test_empty_table_prints_no_row() -> Result<()> {
    let env = PeekTestEnv::new()?;
    let db = env.sqlite("logs.sqlite", "CREATE TABLE logs (id INTEGER, line TEXT);")?;

    env.dbpeek()
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema for logs:\n  id: INTEGER\n  line: TEXT\n"))
        .stdout(predicate::str::ends_with("\nSample row: None\n"));
    Ok(())
}

#[test]
fn test_missing_file_is_fatal() -> Result<()> {
    let env = PeekTestEnv::new()?;
    let missing = env.path("missing.sqlite");

    env.dbpeek()
        .arg(&missing)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Could not open database"));

    assert!(!missing.exists(), "a read-only open must not create the file");
    Ok(())
}

#[test]
fn test_not_a_database_is_fatal() -> Result<()> {
    let env = PeekTestEnv::new()?;
    let path = env.path("notes.txt");
    std::fs::write(&path, "definitely not a database\n".repeat(64))?;

    env.dbpeek()
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Could not open database"));

    std::fs::remove_file(&path)?;
    Ok(())
}

#[test]
fn test_connection_released_after_run() -> Result<()> {
    let env = PeekTestEnv::new()?;
    let db = env.sqlite("users.sqlite", USERS)?;

    env.dbpeek().arg(&db).assert().success();

    let conn = rusqlite::Connection::open(&db)?;
    conn.execute_batch("BEGIN EXCLUSIVE; COMMIT;")?;
    conn.close().map_err(|(_, e)| e)?;
    std::fs::remove_file(&db)?;
    Ok(())
}

#[test]
fn test_output_is_stable_across_runs() -> Result<()> {
    let env = PeekTestEnv::new()?;
    let db = env.sqlite(
        "shop.sqlite",
        "CREATE TABLE products (sku TEXT PRIMARY KEY, price REAL, image BLOB);
         INSERT INTO products VALUES ('it''s-1', 9.5, x'00ff');
         CREATE TABLE orders (id INTEGER);",
    )?;

    let first = env.stdout_of(&db)?;
    let second = env.stdout_of(&db)?;
    assert_eq!(first, second);
    assert!(first.starts_with("Tables: ['products', 'orders']\n"));
    assert!(first.ends_with("Sample row: (\"it's-1\", 9.5, b'\\x00\\xff')\n"));
    Ok(())
}

#[test]
fn test_duckdb_file_is_detected() -> Result<()> {
    let env = PeekTestEnv::new()?;
    let db = env.duckdb(
        "warehouse.duckdb",
        "CREATE TABLE users (id INTEGER, name VARCHAR); INSERT INTO users VALUES (1, 'a');",
    )?;

    env.dbpeek()
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::eq(
            "Tables: ['users']\n\nSchema for users:\n  id: INTEGER\n  name: VARCHAR\n\nSample row: (1, 'a')\n",
        ));
    Ok(())
}

#[test]
fn test_json_format() -> Result<()> {
    let env = PeekTestEnv::new()?;
    let db = env.sqlite("users.sqlite", USERS)?;

    let output = env.dbpeek().args(["--format", "json"]).arg(&db).output()?;
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["engine"], "sqlite");
    assert_eq!(report["tables"], serde_json::json!(["T"]));
    assert_eq!(report["schema"]["columns"][0]["name"], "id");
    assert_eq!(report["sample_row"], serde_json::json!([1, "a"]));
    Ok(())
}

#[test]
fn test_settings_file_and_env() -> Result<()> {
    let env = PeekTestEnv::new()?;
    env.sqlite("users.sqlite", USERS)?;
    let other = env.sqlite("other.sqlite", "CREATE TABLE other (x TEXT);")?;
    std::fs::write(env.path("dbpeek.yaml"), "database: users.sqlite\n")?;

    // Settings file alone
    env.dbpeek()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Tables: ['T']\n"));

    // Environment beats the settings file
    env.dbpeek()
        .env("DBPEEK_DB_PATH", &other)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Tables: ['other']\n"));
    Ok(())
}

#[test]
fn test_no_database_configured() -> Result<()> {
    let env = PeekTestEnv::new()?;

    env.dbpeek()
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no database path configured"));
    Ok(())
}
