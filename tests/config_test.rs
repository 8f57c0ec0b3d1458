use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use portfolio_app::config::AppConfig;

#[test]
fn test_defaults() -> Result<()> {
    let config = AppConfig::default();
    assert_eq!(config.port, 8080);
    assert_eq!(config.github_user, "JamesMcCannCoding");
    assert_eq!(config.socket_addr()?.to_string(), "127.0.0.1:8080");
    assert_eq!(config.resume_path(), PathBuf::from("static").join("Resume.pdf"));
    Ok(())
}

#[test]
fn test_partial_file_keeps_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{"port": 9000, "github_user": "someone"}"#)?;

    let config = AppConfig::load_from(&path)?;
    assert_eq!(config.port, 9000);
    assert_eq!(config.github_user, "someone");
    assert_eq!(config.bind_address, "127.0.0.1");
    assert_eq!(config.request_timeout_secs, 10);
    Ok(())
}

#[test]
fn test_save_creates_parent_directories() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("nested").join("portfolio").join("config.json");

    let mut config = AppConfig::default();
    config.contact_email = "someone@example.com".to_string();
    config.save_to(&path)?;

    assert_eq!(AppConfig::load_from(&path)?, config);
    Ok(())
}

#[test]
fn test_malformed_file_is_an_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "{ not json")?;

    let err = AppConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));

    assert!(AppConfig::load_from(&temp_dir.path().join("missing.json")).is_err());
    Ok(())
}

#[test]
fn test_env_overrides() -> Result<()> {
    let env: HashMap<&str, &str> = [
        ("PORTFOLIO_PORT", "3000"),
        ("PORTFOLIO_BIND", "0.0.0.0"),
        ("PORTFOLIO_GITHUB_USER", "octocat"),
        ("PORTFOLIO_STATIC_DIR", "/srv/portfolio"),
    ]
    .into_iter()
    .collect();

    let mut config = AppConfig::default();
    config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

    assert_eq!(config.socket_addr()?.to_string(), "0.0.0.0:3000");
    assert_eq!(config.github_user, "octocat");
    assert_eq!(config.resume_path(), PathBuf::from("/srv/portfolio/Resume.pdf"));
    Ok(())
}

#[test]
fn test_invalid_env_overrides_are_ignored() {
    let mut config = AppConfig::default();
    config.apply_env_overrides(|key| match key {
        "PORTFOLIO_PORT" => Some("eighty".to_string()),
        "PORTFOLIO_BIND" => Some("localhost:80".to_string()),
        "PORTFOLIO_GITHUB_USER" => Some(String::new()),
        _ => None,
    });

    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_bad_bind_address_fails() {
    let mut config = AppConfig::default();
    config.bind_address = "not an ip".to_string();
    assert!(config.socket_addr().is_err());
}
