//! Network mode mutator.

use stackforge_common::constants::NETWORK_MODE_HOST;

use crate::options::{NetworkModeOverride, ServiceOptions};
use crate::template::ServiceDefinition;

/// Applies the `networkMode` option.
///
/// `none` deletes `network_mode` rather than storing the literal. Whenever
/// an option was given and the resulting mode is `host`, `ports` is
/// deleted. Returns `true` iff the stored mode differs from the original.
pub fn apply(service: &mut ServiceDefinition, options: &ServiceOptions) -> bool {
    let Some(requested) = options.network_mode_override() else {
        return false;
    };
    let original = service.network_mode.clone();

    match requested {
        NetworkModeOverride::Unchanged => {}
        NetworkModeOverride::Clear => service.network_mode = None,
        NetworkModeOverride::Host => service.network_mode = Some(NETWORK_MODE_HOST.to_owned()),
        NetworkModeOverride::Custom(mode) => service.network_mode = Some(mode),
    }

    if service.network_mode.as_deref() == Some(NETWORK_MODE_HOST) && service.ports.take().is_some()
    {
        tracing::debug!("host network mode, published ports removed");
    }

    original != service.network_mode
}
