//! # stackforge — service template compiler
//!
//! Merges user build options into per-service compose templates and
//! writes the resulting compose document.

mod commands;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = commands::load_settings(cli.settings.as_deref())?;
    init_tracing(&settings.log_filter, cli.json);
    commands::execute(cli, &settings)
}

/// Logs go to stderr so compiled output can be piped from stdout.
fn init_tracing(default_filter: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
