//! Tests for server configuration loading.

use std::io::Write;
use std::time::Duration;
use tictac::{Difficulty, ServerConfig};

#[test]
fn test_from_file_reads_all_keys() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        "host = \"127.0.0.1\"\nport = 8081\ndifficulty = \"casual\"\n\
         max_sessions = 8\nsession_idle_secs = 60"
    )
    .expect("write config");

    let config = ServerConfig::from_file(file.path()).expect("valid config");
    assert_eq!(config.bind_addr(), "127.0.0.1:8081");
    assert_eq!(*config.difficulty(), Difficulty::Casual);
    assert_eq!(*config.max_sessions(), 8);
    assert_eq!(config.session_idle_timeout(), Duration::from_secs(60));
}

#[test]
fn test_missing_keys_take_defaults() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "port = 9000").expect("write config");

    let config = ServerConfig::from_file(file.path()).expect("valid config");
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(*config.port(), 9000);
    assert_eq!(*config.difficulty(), Difficulty::Unbeatable);
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "port = \"not a number\"").expect("write config");

    let err = ServerConfig::from_file(file.path()).expect_err("bad port");
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = ServerConfig::from_file(dir.path().join("absent.toml")).expect_err("no file");
    assert!(err.message.contains("Failed to read config file"));
}
