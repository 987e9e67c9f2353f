//! `stackforge check` — Detect host port conflicts in a compose file.

use std::path::PathBuf;

use clap::Args;
use stackforge_common::config::BuildSettings;
use stackforge_compose::conflicts::find_port_conflicts;

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Compose file to check. Defaults to the settings output file.
    #[arg(short, long)]
    pub template: Option<PathBuf>,
}

/// Executes the `check` command.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or conflicts exist.
pub fn execute(args: CheckArgs, settings: &BuildSettings) -> anyhow::Result<()> {
    let path = args.template.unwrap_or_else(|| settings.output_file.clone());
    let template = super::load_template(&path)?;
    let conflicts = find_port_conflicts(&template);

    if conflicts.is_empty() {
        println!("No port conflicts in {}", path.display());
        return Ok(());
    }
    for conflict in &conflicts {
        println!("  ! {conflict}");
    }
    anyhow::bail!("{} port conflict(s) in {}", conflicts.len(), path.display())
}
