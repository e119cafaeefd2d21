//! Application entrypoint: parses the CLI, builds the generation context,
//! runs the pipeline, and persists results.

use clap::Parser;
use iconweave::catalog::AssetCatalog;
use iconweave::cli::{build_inputs, Cli, Command};
use iconweave::context::GenerationContext;
use iconweave::error::ConfigError;
use iconweave::output;
use iconweave::pipeline::{run_pipeline, RunReport};
use iconweave::render::ResvgBackend;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Command::GetData { print, destination } => get_data(*print, destination),
        command => generate(command),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn get_data(print: bool, destination: &Path) -> Result<ExitCode, ConfigError> {
    let json = AssetCatalog::embedded_json();
    if print {
        println!("{json}");
        return Ok(ExitCode::SUCCESS);
    }
    let path = destination.join("data.json");
    fs::create_dir_all(destination)
        .and_then(|()| fs::write(&path, json))
        .map_err(|source| ConfigError::WriteOutput {
            path: path.display().to_string(),
            source,
        })?;
    info!(path = %path.display(), "catalog written; edit and pass via --alternate-data");
    Ok(ExitCode::SUCCESS)
}

fn generate(command: &Command) -> Result<ExitCode, ConfigError> {
    let inputs = build_inputs(command)?;
    let ctx = GenerationContext::build(inputs)?;

    let mut report = run_pipeline(&ctx, &ResvgBackend);

    if ctx.write_images {
        let write_warnings = output::write_images(&report, &ctx.layout);
        report.warnings.extend(write_warnings);
    }
    if let Err(warning) = output::write_html_snippet(&report, &ctx.layout) {
        report.warnings.push(warning);
    }
    if let Err(warning) = output::write_manifest_fragment(&report, &ctx.layout) {
        report.warnings.push(warning);
    }

    summarize(&report);
    // Partial success still exits zero; only configuration errors are fatal.
    Ok(ExitCode::SUCCESS)
}

/// Consolidated end-of-run summary: per-category artifact counts, then
/// every warning in one block.
fn summarize(report: &RunReport) {
    let mut last: Option<&str> = None;
    for artifact in &report.artifacts {
        if last != Some(artifact.category) {
            let count = report
                .artifacts
                .iter()
                .filter(|a| a.category == artifact.category)
                .count();
            info!(category = artifact.category, count, "generated");
            last = Some(artifact.category);
        }
    }
    if report.warnings.is_empty() {
        info!(total = report.artifacts.len(), "run completed without warnings");
    } else {
        warn!(
            total = report.artifacts.len(),
            warnings = report.warnings.len(),
            "run completed with warnings"
        );
        for warning in &report.warnings {
            warn!("{warning}");
        }
    }
}
