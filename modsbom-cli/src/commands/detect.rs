//! `modsbom detect` command handler

use std::io::Write;

use serde::Serialize;
use tracing::info;

use modsbom_generator::ProjectTypes;
use modsbom_generator::generator::detect_in_background;

use crate::cli::DetectArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `detect` command.
pub async fn execute(args: DetectArgs, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %args.path.display(), "detecting project type");

    let types = detect_in_background(args.path.clone()).await?;
    let report = DetectReport::new(args.path.display().to_string(), &types);

    writer.render(&report)?;
    Ok(())
}

/// Project-type detection report.
#[derive(Serialize)]
pub struct DetectReport {
    pub path: String,
    /// Combined label, e.g. `docker+go` or `unknown`
    pub project_type: String,
    pub kinds: Vec<String>,
}

impl DetectReport {
    fn new(path: String, types: &ProjectTypes) -> Self {
        Self {
            path,
            project_type: types.to_string(),
            kinds: types.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl Render for DetectReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Path: {}", self.path.bold())?;
        if self.kinds.is_empty() {
            writeln!(w, "Project type: {}", self.project_type.dimmed())?;
        } else {
            writeln!(w, "Project type: {}", self.project_type.green().bold())?;
        }
        Ok(())
    }
}
