//! Field mutators: one rewrite per field category.
//!
//! Each mutator edits a single [`ServiceDefinition`] in place and returns
//! whether it changed anything. Mutators never fail: malformed entries are
//! logged and left untouched so the remaining fields still apply.

pub mod devices;
pub mod environment;
pub mod image;
pub mod logging;
pub mod network_mode;
pub mod networks;
pub mod ports;
pub mod volumes;

use std::fmt;

use stackforge_common::error::Result;

use crate::generate::ValueSource;
use crate::options::ServiceOptions;
use crate::template::ServiceDefinition;

/// A field category handled by one mutator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `image`, `{tag}` substitution.
    ImageTag,
    /// `network_mode`.
    NetworkMode,
    /// `ports`.
    Ports,
    /// `volumes`.
    Volumes,
    /// `environment`.
    Environment,
    /// `networks`.
    Networks,
    /// `logging`.
    Logging,
    /// `devices`.
    Devices,
}

/// Order in which a service's fields are merged.
///
/// Network mode runs before ports because switching to host mode deletes
/// the port list.
pub const MERGE_ORDER: [Field; 8] = [
    Field::ImageTag,
    Field::NetworkMode,
    Field::Ports,
    Field::Volumes,
    Field::Environment,
    Field::Networks,
    Field::Logging,
    Field::Devices,
];

impl Field {
    /// Field name as it appears in the compose document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ImageTag => "image",
            Self::NetworkMode => "network_mode",
            Self::Ports => "ports",
            Self::Volumes => "volumes",
            Self::Environment => "environment",
            Self::Networks => "networks",
            Self::Logging => "logging",
            Self::Devices => "devices",
        }
    }

    /// Runs this field's mutator.
    pub fn apply(
        self,
        service: &mut ServiceDefinition,
        options: &ServiceOptions,
        values: &mut dyn ValueSource,
    ) -> bool {
        match self {
            Self::ImageTag => image::apply(service, options),
            Self::NetworkMode => network_mode::apply(service, options),
            Self::Ports => ports::apply(service, options, values),
            Self::Volumes => volumes::apply(service, options, values),
            Self::Environment => environment::apply(service, options, values),
            Self::Networks => networks::apply(service, options),
            Self::Logging => logging::apply(service, options),
            Self::Devices => devices::apply(service, options),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order-insensitive equality: both sides sorted, duplicates counted.
pub(crate) fn same_set(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a: Vec<&String> = a.iter().collect();
    let mut b: Vec<&String> = b.iter().collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

/// Index of the first entry whose key equals `key`.
///
/// Entries that do not parse are skipped with a warning.
pub(crate) fn position_by_key(
    entries: &[String],
    key: &str,
    field: Field,
    extract_key: fn(&str) -> Result<&str>,
) -> Option<usize> {
    entries
        .iter()
        .position(|entry| match extract_key(entry) {
            Ok(existing) => existing == key,
            Err(err) => {
                tracing::warn!(field = %field, error = %err, "ignoring malformed template entry");
                false
            }
        })
}

#[cfg(test)]
pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}
