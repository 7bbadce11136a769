//! Tests for config loading

use findserver::config::Config;
use findserver::error::Error;
use findserver::models::Endpoint;
use serial_test::serial;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const ENV_VARS: &[&str] = &[
    "FINDSERVER_TIMEOUT_MS",
    "FINDSERVER_USER_AGENT",
    "FINDSERVER_MAX_REDIRECTS",
    "FINDSERVER_SERVERS",
    "FINDSERVER_LOG_LEVEL",
    "FINDSERVER_LOG_FORMAT",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

#[test]
fn test_project_config_loads() {
    let config = Config::from_file(Path::new("config.toml")).expect("config.toml should parse");

    assert!(config.validate().is_ok());
    assert_eq!(config.servers.len(), 4);
    assert_eq!(config.servers[1], Endpoint::new("https://gitlab.com", 4));
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[probe]
timeout_ms = 750
max_redirects = 0

[[servers]]
url = "https://primary.example.com"
priority = 1

[[servers]]
address = "https://backup.example.com"
priority = 2
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.probe.timeout_ms, 750);
    assert_eq!(config.probe.max_redirects, 0);
    assert_eq!(
        config.servers,
        vec![
            Endpoint::new("https://primary.example.com", 1),
            Endpoint::new("https://backup.example.com", 2),
        ]
    );
}

#[test]
fn test_from_file_missing() {
    let result = Config::from_file(Path::new("does/not/exist.toml"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_from_file_malformed() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[[servers]]\npriority = \"high\"\n").unwrap();

    assert!(matches!(Config::from_file(file.path()), Err(Error::Toml(_))));
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.probe.timeout_ms, 5000);
    assert_eq!(config.probe.max_redirects, 10);
    assert_eq!(config.servers.len(), 4);
    assert_eq!(config.logging.level, "info");
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var("FINDSERVER_TIMEOUT_MS", "1200");
    std::env::set_var("FINDSERVER_MAX_REDIRECTS", "0");
    std::env::set_var(
        "FINDSERVER_SERVERS",
        "2=https://b.example.com,1=https://a.example.com",
    );
    std::env::set_var("FINDSERVER_LOG_FORMAT", "json");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.probe.timeout_ms, 1200);
    assert_eq!(config.probe.max_redirects, 0);
    assert_eq!(config.logging.format, "json");
    assert_eq!(
        config.servers,
        vec![
            Endpoint::new("https://b.example.com", 2),
            Endpoint::new("https://a.example.com", 1),
        ]
    );
}

#[test]
#[serial]
fn test_from_env_rejects_bad_server_list() {
    clear_env();
    std::env::set_var("FINDSERVER_SERVERS", "https://no-priority.example.com");

    let result = Config::from_env();
    clear_env();

    assert!(matches!(result, Err(Error::Config(_))));
}
