//! Shared fixtures for CLI end-to-end tests

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use rusqlite::{params, Connection};
use tempfile::TempDir;

/// `(timestamp, raw_intensity, steps, raw_kind, heart_rate)`
pub type Row = (i64, i64, i64, i64, i64);

pub const SCENARIO: [Row; 2] = [(1000, 5, 10, 1, 70), (1001, 3, 0, 2, 0)];

/// A Gadgetbridge-shaped database holding `rows`
pub fn gadgetbridge_db(rows: &[Row]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Gadgetbridge");
    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "CREATE TABLE MI_BAND_ACTIVITY_SAMPLE (
            TIMESTAMP INTEGER NOT NULL,
            DEVICE_ID INTEGER NOT NULL,
            USER_ID INTEGER NOT NULL,
            RAW_INTENSITY INTEGER NOT NULL,
            STEPS INTEGER NOT NULL,
            RAW_KIND INTEGER NOT NULL,
            HEART_RATE INTEGER NOT NULL,
            PRIMARY KEY (TIMESTAMP, DEVICE_ID)
        )",
        [],
    )
    .unwrap();
    for (timestamp, intensity, steps, kind, heart_rate) in rows {
        conn.execute(
            "INSERT INTO MI_BAND_ACTIVITY_SAMPLE VALUES (?1, 1, 1, ?2, ?3, ?4, ?5)",
            params![timestamp, intensity, steps, kind, heart_rate],
        )
        .unwrap();
    }
    (dir, path)
}

/// The `band2influx` binary with a clean environment
pub fn band2influx() -> Command {
    let mut cmd = Command::cargo_bin("band2influx").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("B2I_HOST")
        .env_remove("B2I_USER")
        .env_remove("B2I_PASS")
        .env_remove("B2I_DB")
        .env_remove("B2I_INFLUX_ENDPOINT")
        .env_remove("LOG_LEVEL")
        .env_remove("LOG_OUTPUT");
    cmd
}
