//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// modsbom -- per-application CycloneDX SBOMs for multi-application Go repositories.
///
/// Use `modsbom <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "modsbom", version, about, long_about = None)]
pub struct Cli {
    /// Path to the modsbom.toml configuration file (defaults apply if missing).
    #[arg(short, long, default_value = "modsbom.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one SBOM per discovered application.
    Generate(GenerateArgs),

    /// Detect the project types used in a directory tree.
    Detect(DetectArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- generate ----

/// Generate SBOMs for every application under the applications directory.
///
/// Flags override the `[sbom]` section of the configuration file.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Repository root (where `go list -m -json all` runs).
    #[arg(long)]
    pub repo_root: Option<String>,

    /// Applications directory, relative to the repository root.
    #[arg(long)]
    pub apps_dir: Option<String>,

    /// Directory the SBOM files are written to.
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Go toolchain binary.
    #[arg(long)]
    pub go_binary: Option<String>,

    /// Skip project-type detection before generation.
    #[arg(long)]
    pub no_detect: bool,
}

// ---- detect ----

/// Classify a directory tree by the build files it contains.
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Path to inspect (default: current directory).
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

// ---- config ----

/// Manage modsbom configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, sbom).
        #[arg(long)]
        section: Option<String>,
    },
}
