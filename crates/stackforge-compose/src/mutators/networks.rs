//! Networks mutator.

use crate::mutators::same_set;
use crate::options::ServiceOptions;
use crate::template::ServiceDefinition;

/// Rebuilds `networks` from the entries of `options.networks` set to `true`.
///
/// Does nothing when no network flags were supplied. Reports a change only
/// when the resulting set differs from the original, order aside.
pub fn apply(service: &mut ServiceDefinition, options: &ServiceOptions) -> bool {
    if options.networks.is_empty() {
        return false;
    }
    let rebuilt: Vec<String> = options
        .networks
        .iter()
        .filter(|(_, enabled)| **enabled)
        .map(|(name, _)| name.clone())
        .collect();

    let changed = !same_set(service.networks.as_deref().unwrap_or_default(), &rebuilt);
    if !(rebuilt.is_empty() && service.networks.is_none()) {
        service.networks = Some(rebuilt);
    }
    changed
}
