//! Ports mutator.

use stackforge_common::constants::NETWORK_MODE_HOST;

use crate::codec::PortEntry;
use crate::generate::ValueSource;
use crate::interpolate::interpolate;
use crate::options::ServiceOptions;
use crate::template::ServiceDefinition;

/// Replaces template ports addressed by `options.ports`.
///
/// In host network mode the whole list is deleted. Otherwise each override
/// replaces the first entry with a matching internal port; overrides with no
/// match are ignored, as are overrides that are not valid port entries once
/// interpolated.
pub fn apply(
    service: &mut ServiceDefinition,
    options: &ServiceOptions,
    values: &mut dyn ValueSource,
) -> bool {
    if service.network_mode.as_deref() == Some(NETWORK_MODE_HOST) {
        return service.ports.take().is_some();
    }
    let Some(ports) = service.ports.as_mut() else {
        return false;
    };

    let mut changed = false;
    for (key, replacement) in &options.ports {
        let Some(index) = ports.iter().position(|entry| match PortEntry::parse(entry) {
            Ok(port) => port.matches(key),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring malformed template port");
                false
            }
        }) else {
            tracing::debug!(port = %key, "no template port matches override");
            continue;
        };

        let resolved = interpolate(replacement, values);
        if let Err(err) = PortEntry::parse(&resolved) {
            tracing::warn!(port = %key, error = %err, "rejecting port override");
            continue;
        }
        if ports[index] != resolved {
            ports[index] = resolved;
            changed = true;
        }
    }
    changed
}
