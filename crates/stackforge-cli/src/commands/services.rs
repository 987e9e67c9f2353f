//! `stackforge services` — List registered service providers.

use clap::Args;
use stackforge_compose::registry::ProviderRegistry;

use crate::output;

/// Arguments for the `services` command.
#[derive(Args, Debug)]
pub struct ServicesArgs {
    /// Only list services carrying this tag.
    #[arg(long)]
    pub tag: Option<String>,
}

/// Executes the `services` command.
///
/// # Errors
///
/// Returns an error if a registered provider cannot be resolved.
pub fn execute(args: &ServicesArgs) -> anyhow::Result<()> {
    let registry = ProviderRegistry::builtin();
    for name in registry.names() {
        let meta = registry.get(name)?.meta();
        if args
            .tag
            .as_ref()
            .is_some_and(|tag| !meta.service_type_tags.contains(tag))
        {
            continue;
        }
        println!("{}", output::service_row(name, &meta));
    }
    Ok(())
}
