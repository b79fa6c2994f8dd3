//! `modsbom generate` command handler

use std::io::Write;

use serde::Serialize;
use tracing::{info, warn};

use modsbom_core::config::ModsbomConfig;
use modsbom_generator::{
    RunSummary, SbomGeneratorBuilder, SbomGeneratorConfig, SbomGeneratorConfigBuilder,
};

use crate::cli::GenerateArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `generate` command.
///
/// Per-application failures are reported in the summary and do not fail the command.
/// Only discovery failures and global module resolution failures abort.
pub async fn execute(
    args: GenerateArgs,
    config: &ModsbomConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let generator_config = build_generator_config(args, config)?;

    let generator = SbomGeneratorBuilder::new()
        .config(generator_config)
        .build()?;

    let project_type = if generator.config().detect_project_type {
        match generator.detect_project_types().await {
            Ok(types) => {
                info!(project_type = %types, "detected project type");
                Some(types.to_string())
            }
            Err(e) => {
                warn!(error = %e, "project detection failed, continuing");
                None
            }
        }
    } else {
        None
    };

    info!(
        repo_root = %generator.config().repo_root,
        apps_root = %generator.config().apps_root().display(),
        "starting SBOM generation"
    );
    let summary = generator.run().await?;

    let report = GenerateReport {
        project_type,
        summary,
    };
    writer.render(&report)?;

    Ok(())
}

/// Apply command-line overrides on top of the `[sbom]` section.
fn build_generator_config(
    args: GenerateArgs,
    config: &ModsbomConfig,
) -> Result<SbomGeneratorConfig, CliError> {
    let mut builder =
        SbomGeneratorConfigBuilder::from_config(SbomGeneratorConfig::from_core(&config.sbom));

    if let Some(repo_root) = args.repo_root {
        builder = builder.repo_root(repo_root);
    }
    if let Some(apps_dir) = args.apps_dir {
        builder = builder.apps_dir(apps_dir);
    }
    if let Some(output_dir) = args.output_dir {
        builder = builder.output_dir(output_dir);
    }
    if let Some(go_binary) = args.go_binary {
        builder = builder.go_binary(go_binary);
    }
    if args.no_detect {
        builder = builder.detect_project_type(false);
    }

    Ok(builder.build()?)
}

/// Result of one `generate` run.
#[derive(Serialize)]
pub struct GenerateReport {
    /// Detected project type (`None` when detection was skipped or failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(flatten)]
    pub summary: RunSummary,
}

impl Render for GenerateReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref project_type) = self.project_type {
            writeln!(w, "Project type: {}", project_type.bold())?;
        }
        writeln!(w, "Applications discovered: {}", self.summary.apps_discovered)?;
        writeln!(w)?;

        if !self.summary.generated.is_empty() {
            writeln!(
                w,
                "{:<6} {:<20} {:>10} {:>9}  Output",
                "", "Application", "Components", "Indirect"
            )?;
            writeln!(w, "{}", "-".repeat(80))?;
            for g in &self.summary.generated {
                writeln!(
                    w,
                    "{:<6} {:<20} {:>10} {:>9}  {}",
                    "OK".green().bold(),
                    g.app,
                    g.component_count,
                    g.indirect_count,
                    g.path.display()
                )?;
            }
        }

        for f in &self.summary.failed {
            writeln!(
                w,
                "{:<6} {:<20} [{}] {}",
                "FAIL".red().bold(),
                f.app,
                f.stage,
                f.reason.red()
            )?;
        }

        writeln!(w)?;
        let totals = format!(
            "{} generated, {} failed",
            self.summary.generated.len(),
            self.summary.failed.len()
        );
        if self.summary.has_failures() {
            writeln!(w, "Result: {}", totals.yellow().bold())?;
        } else {
            writeln!(w, "Result: {}", totals.green().bold())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use modsbom_generator::{AppFailure, GeneratedSbom};

    use crate::cli::OutputFormat;

    /// Fake `go` that lists one module globally and fails inside `cmd/broken`.
    #[cfg(unix)]
    const FAKE_GO: &str = r#"#!/bin/sh
if [ "$2" = "-m" ]; then
  printf '{"Path":"lib/a","Version":"v1.0.0","Indirect":true}\n'
  exit 0
fi
case "$(basename "$(pwd -P)")" in
  broken)
    echo "go: build constraints exclude all Go files" >&2
    exit 1
    ;;
esac
printf '{"ImportPath":"lib/a","Module":{"Path":"lib/a","Version":"v1.0.0"}}\n'
"#;

    #[cfg(unix)]
    fn write_fake_go(dir: &std::path::Path) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join("fake-go");
        std::fs::write(&script, FAKE_GO).expect("should write fake go");
        let mut perms = std::fs::metadata(&script)
            .expect("should stat fake go")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script, perms).expect("should chmod fake go");
        script
    }

    fn sample_report() -> GenerateReport {
        GenerateReport {
            project_type: Some("docker+go".to_owned()),
            summary: RunSummary {
                apps_discovered: 2,
                generated: vec![GeneratedSbom {
                    app: "api".to_owned(),
                    path: PathBuf::from("./sbom-api.json"),
                    component_count: 42,
                    indirect_count: 12,
                }],
                failed: vec![AppFailure {
                    app: "worker".to_owned(),
                    stage: "resolution".to_owned(),
                    reason: "resolution error [app:worker]: exit status: 1".to_owned(),
                }],
            },
        }
    }

    #[test]
    fn test_build_generator_config_applies_overrides() {
        let args = GenerateArgs {
            repo_root: Some("/src/monorepo".to_owned()),
            apps_dir: Some("services".to_owned()),
            output_dir: None,
            go_binary: Some("/opt/go/bin/go".to_owned()),
            no_detect: true,
        };
        let config = build_generator_config(args, &ModsbomConfig::default())
            .expect("overrides should be valid");

        assert_eq!(config.repo_root, "/src/monorepo");
        assert_eq!(config.apps_dir, "services");
        assert_eq!(config.output_dir, ".");
        assert_eq!(config.go_binary, "/opt/go/bin/go");
        assert!(!config.detect_project_type);
    }

    #[test]
    fn test_build_generator_config_keeps_file_values() {
        let mut core = ModsbomConfig::default();
        core.sbom.output_prefix = "bom-".to_owned();
        let config = build_generator_config(GenerateArgs::default(), &core)
            .expect("defaults should be valid");
        assert_eq!(config.output_prefix, "bom-");
        assert!(config.detect_project_type);
    }

    #[test]
    fn test_build_generator_config_rejects_invalid_override() {
        let args = GenerateArgs {
            apps_dir: Some("../outside".to_owned()),
            ..Default::default()
        };
        let err = build_generator_config(args, &ModsbomConfig::default())
            .expect_err("parent traversal should be rejected");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_generate_report_render_text() {
        let mut buffer = Vec::new();
        sample_report()
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("docker+go"), "should show project type");
        assert!(output.contains("api"), "should list generated app");
        assert!(output.contains("42"), "should show component count");
        assert!(output.contains("sbom-api.json"), "should show output path");
        assert!(output.contains("worker"), "should list failed app");
        assert!(output.contains("resolution"), "should show failure stage");
        assert!(output.contains("1 generated, 1 failed"));
    }

    #[test]
    fn test_generate_report_json_flattens_summary() {
        let json = serde_json::to_string(&sample_report()).expect("JSON serialization should succeed");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("should parse JSON");

        assert_eq!(parsed["project_type"].as_str(), Some("docker+go"));
        assert_eq!(parsed["apps_discovered"].as_u64(), Some(2));
        assert_eq!(parsed["generated"][0]["component_count"].as_u64(), Some(42));
        assert_eq!(parsed["failed"][0]["stage"].as_str(), Some("resolution"));
    }

    #[test]
    fn test_generate_report_json_omits_missing_project_type() {
        let mut report = sample_report();
        report.project_type = None;
        let json = serde_json::to_string(&report).expect("JSON serialization should succeed");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("should parse JSON");
        assert!(parsed.get("project_type").is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_execute_succeeds_when_one_app_fails() {
        let repo = tempfile::tempdir().expect("should create temp dir");
        for app in ["api", "broken"] {
            let dir = repo.path().join("cmd").join(app);
            std::fs::create_dir_all(&dir).expect("should create app dir");
            std::fs::write(dir.join("main.go"), "package main\n").expect("should write main.go");
        }
        let tools = tempfile::tempdir().expect("should create temp dir");
        let go = write_fake_go(tools.path());
        let out = repo.path().join("out");

        let args = GenerateArgs {
            repo_root: Some(repo.path().display().to_string()),
            output_dir: Some(out.display().to_string()),
            go_binary: Some(go.display().to_string()),
            no_detect: true,
            ..Default::default()
        };
        let result = execute(
            args,
            &ModsbomConfig::default(),
            &OutputWriter::new(OutputFormat::Json),
        )
        .await;

        assert!(result.is_ok(), "per-app failure must not fail the command: {result:?}");
        let sbom = std::fs::read_to_string(out.join("sbom-api.json")).expect("api SBOM should exist");
        assert!(sbom.contains("pkg:golang/lib/a@v1.0.0"));
        assert!(!out.join("sbom-broken.json").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_execute_fails_when_global_listing_fails() {
        let repo = tempfile::tempdir().expect("should create temp dir");
        let dir = repo.path().join("cmd/api");
        std::fs::create_dir_all(&dir).expect("should create app dir");
        std::fs::write(dir.join("main.go"), "package main\n").expect("should write main.go");

        let args = GenerateArgs {
            repo_root: Some(repo.path().display().to_string()),
            go_binary: Some("/nonexistent/bin/go-for-modsbom-test".to_owned()),
            no_detect: true,
            ..Default::default()
        };
        let err = execute(
            args,
            &ModsbomConfig::default(),
            &OutputWriter::new(OutputFormat::Json),
        )
        .await
        .expect_err("global listing failure should abort");
        assert_eq!(err.exit_code(), 3);
    }
}
