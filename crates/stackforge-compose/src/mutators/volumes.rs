//! Volumes mutator.

use crate::codec::{VolumeEntry, volume_key};
use crate::generate::ValueSource;
use crate::interpolate::interpolate;
use crate::mutators::{Field, position_by_key};
use crate::options::ServiceOptions;
use crate::template::ServiceDefinition;

/// Applies `options.volumes`, matched on the container path.
///
/// For each override, in order:
/// - matched with an empty host side: the template mount is removed;
/// - matched otherwise: the host side (and mode, if given) is replaced and
///   the result interpolated;
/// - unmatched: the override is appended as given, unless it is itself a
///   removal, in which case there is nothing to do.
pub fn apply(
    service: &mut ServiceDefinition,
    options: &ServiceOptions,
    values: &mut dyn ValueSource,
) -> bool {
    let Some(overrides) = options.volumes.as_deref() else {
        return false;
    };
    let was_absent = service.volumes.is_none();
    let volumes = service.volumes.get_or_insert_with(Vec::new);
    let mut changed = false;

    for raw in overrides {
        let requested = match VolumeEntry::parse(raw) {
            Ok(requested) => requested,
            Err(err) => {
                tracing::warn!(error = %err, "rejecting volume override");
                continue;
            }
        };

        match position_by_key(volumes, requested.key(), Field::Volumes, volume_key) {
            Some(index) if requested.is_removal() => {
                let removed = volumes.remove(index);
                tracing::debug!(volume = %removed, "volume removed");
                changed = true;
            }
            Some(index) => {
                let Ok(existing) = VolumeEntry::parse(&volumes[index]) else {
                    continue;
                };
                let resolved = interpolate(&existing.merged_with(&requested), values);
                if volumes[index] != resolved {
                    volumes[index] = resolved;
                    changed = true;
                }
            }
            None if requested.is_removal() => {}
            None => {
                volumes.push(raw.clone());
                changed = true;
            }
        }
    }

    if was_absent && volumes.is_empty() {
        service.volumes = None;
    }
    changed
}
