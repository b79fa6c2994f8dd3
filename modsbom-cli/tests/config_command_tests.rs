//! Integration tests for `modsbom config` command.
//!
//! Tests config validation and display functionality with real TOML files.

use std::fs;
use tempfile::TempDir;

use modsbom_core::config::ModsbomConfig;

#[tokio::test]
async fn test_config_validate_valid_toml() {
    // Given: A valid config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("modsbom.toml");

    let valid_config = r#"
[general]
log_level = "info"
log_format = "json"

[sbom]
apps_dir = "services"
"#;

    fs::write(&config_path, valid_config).expect("should write config");

    // When: Loading the config
    let result = ModsbomConfig::load(&config_path).await;

    // Then: Should succeed
    let config = result.expect("valid config should load successfully");
    assert_eq!(config.sbom.apps_dir, "services");
    assert_eq!(config.sbom.entry_point, "main.go", "unset fields keep defaults");
}

#[tokio::test]
async fn test_config_validate_malformed_toml() {
    // Given: A malformed TOML file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("bad.toml");

    fs::write(&config_path, "[general\nlog_level = \"info\"\n").expect("should write bad config");

    // When/Then: Loading should fail, also with the default fallback
    assert!(ModsbomConfig::load(&config_path).await.is_err());
    assert!(
        ModsbomConfig::load_or_default(&config_path).await.is_err(),
        "a malformed file must not silently fall back to defaults"
    );
}

#[tokio::test]
async fn test_config_validate_missing_file() {
    // Given: A nonexistent file path
    let config_path = std::path::PathBuf::from("/nonexistent/modsbom.toml");

    // When/Then: strict load fails, default fallback succeeds
    assert!(ModsbomConfig::load(&config_path).await.is_err());
    let config = ModsbomConfig::load_or_default(&config_path)
        .await
        .expect("missing file should fall back to defaults");
    assert_eq!(config.sbom.output_prefix, "sbom-");
}

#[tokio::test]
async fn test_config_validate_empty_file() {
    // Given: An empty config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("empty.toml");
    fs::write(&config_path, "").expect("should write empty file");

    // When: Loading the config
    let config = ModsbomConfig::load(&config_path)
        .await
        .expect("empty config should use defaults");

    // Then: Defaults apply
    assert_eq!(config.sbom.go_binary, "go");
    assert_eq!(config.sbom.tool_timeout_secs, 300);
    assert!(config.sbom.detect_project_type);
}

#[tokio::test]
async fn test_config_validate_invalid_value() {
    // Given: A config with a path separator in the output prefix
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("modsbom.toml");
    fs::write(&config_path, "[sbom]\noutput_prefix = \"out/sbom-\"\n")
        .expect("should write config");

    // When: Loading the config
    let err = ModsbomConfig::load(&config_path)
        .await
        .expect_err("invalid prefix should be rejected");

    // Then: The error names the field
    assert!(err.to_string().contains("output_prefix"));
}

#[tokio::test]
async fn test_config_show_full_config_round_trip() {
    // Given: A full config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("modsbom.toml");

    let full_config = r#"
[general]
log_level = "debug"
log_format = "pretty"

[sbom]
repo_root = "/src/monorepo"
apps_dir = "cmd"
entry_point = "main.go"
output_dir = "build/sbom"
output_prefix = "sbom-"
go_binary = "/usr/local/go/bin/go"
tool_timeout_secs = 600
supplier_name = "Platform Team"
app_version = "2.1.0"
detect_project_type = false
"#;

    fs::write(&config_path, full_config).expect("should write config");

    // When: Loading and re-serializing the config
    let config = ModsbomConfig::load(&config_path)
        .await
        .expect("full config should load");
    let rendered = toml::to_string_pretty(&config).expect("config should serialize");
    let reparsed = ModsbomConfig::parse(&rendered).expect("rendered config should parse");

    // Then: Values survive the round trip
    assert_eq!(reparsed.general.log_level, "debug");
    assert_eq!(reparsed.sbom.output_dir, "build/sbom");
    assert_eq!(reparsed.sbom.tool_timeout_secs, 600);
    assert_eq!(reparsed.sbom.supplier_name, "Platform Team");
    assert!(!reparsed.sbom.detect_project_type);
}

#[tokio::test]
async fn test_config_unicode_values() {
    // Given: A config with unicode values
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("unicode.toml");

    fs::write(&config_path, "[sbom]\nsupplier_name = \"플랫폼 팀\"\n")
        .expect("should write config");

    // When/Then: Unicode values are preserved
    let config = ModsbomConfig::load(&config_path)
        .await
        .expect("unicode config should load");
    assert_eq!(config.sbom.supplier_name, "플랫폼 팀");
}
