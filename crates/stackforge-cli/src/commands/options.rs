//! `stackforge options` — Show one service's customisable options.

use clap::Args;
use serde::Serialize;
use stackforge_compose::registry::{
    ConfigOptions, ProviderRegistry, ServiceCommands, ServiceHelp, ServiceMeta,
};

/// Arguments for the `options` command.
#[derive(Args, Debug)]
pub struct OptionsArgs {
    /// Service name as registered.
    pub service: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceDescription {
    meta: ServiceMeta,
    config_options: ConfigOptions,
    help: ServiceHelp,
    commands: ServiceCommands,
}

/// Executes the `options` command, printing the description as JSON.
///
/// # Errors
///
/// Returns an error if the service has no registered provider.
pub fn execute(args: &OptionsArgs) -> anyhow::Result<()> {
    let registry = ProviderRegistry::builtin();
    let provider = registry.get(&args.service)?;
    let description = ServiceDescription {
        meta: provider.meta(),
        config_options: provider.config_options(),
        help: registry.help(&args.service)?,
        commands: provider.commands(),
    };
    println!("{}", serde_json::to_string_pretty(&description)?);
    Ok(())
}
