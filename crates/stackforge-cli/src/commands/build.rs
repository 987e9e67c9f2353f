//! `stackforge build` — Merge build options into the template.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use stackforge_common::config::BuildSettings;
use stackforge_compose::conflicts::find_port_conflicts;
use stackforge_compose::merge::merge_build;

use crate::output;

/// Arguments for the `build` command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Base service template (YAML). Defaults to the settings value.
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Build options document (JSON). Defaults to the settings value.
    #[arg(short = 'p', long)]
    pub options: Option<PathBuf>,

    /// Where to write the compiled compose file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the compiled compose file to stdout instead of writing it.
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Seed generated values for a reproducible build.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Executes the `build` command.
///
/// Loads the template and options, merges every configured service,
/// warns about host port conflicts, and writes the compose document.
///
/// # Errors
///
/// Returns an error if loading, merging, or writing fails.
pub fn execute(args: BuildArgs, settings: &BuildSettings) -> anyhow::Result<()> {
    let template_path = args
        .template
        .unwrap_or_else(|| settings.template_file.clone());
    let options_path = args
        .options
        .unwrap_or_else(|| settings.options_file.clone());

    let template = super::load_template(&template_path)?;
    let options = super::load_options(&options_path)?;
    let mut values = super::value_source(args.seed, settings);

    let report = merge_build(template, &options, values.as_mut())?;
    for conflict in find_port_conflicts(&report.template) {
        tracing::warn!(%conflict, "host port conflict");
    }
    let yaml = report.template.to_yaml()?;

    if args.stdout {
        print!("{yaml}");
        return Ok(());
    }

    let output_path = args.output.unwrap_or_else(|| settings.output_file.clone());
    std::fs::write(&output_path, &yaml)
        .with_context(|| format!("writing {}", output_path.display()))?;
    tracing::info!(build = %report.build_id, path = %output_path.display(), "build written");

    println!("Build {} -> {}", report.build_id, output_path.display());
    for line in output::change_summary(&report) {
        println!("  {line}");
    }
    Ok(())
}
