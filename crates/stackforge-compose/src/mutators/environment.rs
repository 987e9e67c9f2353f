//! Environment mutator.

use crate::codec::{EnvEntry, env_key};
use crate::generate::ValueSource;
use crate::interpolate::interpolate;
use crate::mutators::{Field, position_by_key};
use crate::options::ServiceOptions;
use crate::template::ServiceDefinition;

/// Applies `options.environment`, matched on the variable name.
///
/// `KEY=` removes a matched variable, `KEY=value` replaces and interpolates
/// it, and an unmatched non-empty override is appended as given.
pub fn apply(
    service: &mut ServiceDefinition,
    options: &ServiceOptions,
    values: &mut dyn ValueSource,
) -> bool {
    let Some(overrides) = options.environment.as_deref() else {
        return false;
    };
    let was_absent = service.environment.is_none();
    let environment = service.environment.get_or_insert_with(Vec::new);
    let mut changed = false;

    for raw in overrides {
        let requested = match EnvEntry::parse(raw) {
            Ok(requested) => requested,
            Err(err) => {
                tracing::warn!(error = %err, "rejecting environment override");
                continue;
            }
        };

        match position_by_key(environment, requested.key(), Field::Environment, env_key) {
            Some(index) if requested.is_removal() => {
                let removed = environment.remove(index);
                tracing::debug!(variable = %removed, "environment variable removed");
                changed = true;
            }
            Some(index) => {
                let Ok(existing) = EnvEntry::parse(&environment[index]) else {
                    continue;
                };
                let resolved = interpolate(&existing.with_value(requested.value()), values);
                if environment[index] != resolved {
                    environment[index] = resolved;
                    changed = true;
                }
            }
            None if requested.is_removal() => {}
            None => {
                environment.push(raw.clone());
                changed = true;
            }
        }
    }

    if was_absent && environment.is_empty() {
        service.environment = None;
    }
    changed
}
