//! CLI command definitions and dispatch.

pub mod build;
pub mod check;
pub mod options;
pub mod services;

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use stackforge_common::config::BuildSettings;
use stackforge_common::constants::BIN_NAME;
use stackforge_compose::generate::{RandomValues, ValueSource};
use stackforge_compose::options::BuildOptions;
use stackforge_compose::template::BuildTemplate;

/// Stackforge — compiles service templates into a compose file.
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// JSON settings file overriding the default paths.
    #[arg(long, global = true, env = "STACKFORGE_SETTINGS")]
    pub settings: Option<std::path::PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge build options into the template and write the compose file.
    Build(build::BuildArgs),
    /// List the registered service providers.
    Services(services::ServicesArgs),
    /// Show the customisable options and help of one service.
    Options(options::OptionsArgs),
    /// Report host ports published by more than one service.
    Check(check::CheckArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli, settings: &BuildSettings) -> anyhow::Result<()> {
    match cli.command {
        Command::Build(args) => build::execute(args, settings),
        Command::Services(args) => services::execute(&args),
        Command::Options(args) => options::execute(&args),
        Command::Check(args) => check::execute(args, settings),
    }
}

/// Loads settings from `path`, or the defaults when none is given.
///
/// # Errors
///
/// Returns an error if the settings file cannot be read or parsed.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<BuildSettings> {
    match path {
        Some(path) => BuildSettings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => Ok(BuildSettings::default()),
    }
}

fn load_template(path: &Path) -> anyhow::Result<BuildTemplate> {
    tracing::info!(path = %path.display(), "loading template");
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading template {}", path.display()))?;
    BuildTemplate::from_yaml(&content)
        .with_context(|| format!("parsing template {}", path.display()))
}

fn load_options(path: &Path) -> anyhow::Result<BuildOptions> {
    tracing::info!(path = %path.display(), "loading build options");
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading build options {}", path.display()))?;
    BuildOptions::from_json(&content)
        .with_context(|| format!("parsing build options {}", path.display()))
}

/// Picks the value generator: seeded if asked, otherwise per settings.
fn value_source(seed: Option<u64>, settings: &BuildSettings) -> Box<dyn ValueSource> {
    match seed {
        Some(seed) => Box::new(RandomValues::seeded(seed)),
        None if settings.secure_random => Box::new(RandomValues::secure()),
        None => Box::new(RandomValues::from_entropy()),
    }
}
