//! Merge orchestration: applies every field mutator to a service, and
//! every configured service to a template.
//!
//! Merges are not transactional. If a later service is missing, the
//! services already merged stay merged.

use std::collections::BTreeMap;

use stackforge_common::error::Result;
use stackforge_common::types::{BuildId, CompiledAt, ServiceName};

use crate::generate::ValueSource;
use crate::mutators::MERGE_ORDER;
use crate::options::{BuildOptions, ServiceOptions};
use crate::template::{BuildTemplate, ServiceDefinition};

/// Outcome of merging a whole build.
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// Identifier of this build.
    pub build_id: BuildId,
    /// When the merge ran.
    pub compiled_at: CompiledAt,
    /// The template with all overrides applied.
    pub template: BuildTemplate,
    /// Whether each merged service changed.
    pub changed: BTreeMap<ServiceName, bool>,
}

impl MergeReport {
    /// Services whose definition changed.
    pub fn changed_services(&self) -> impl Iterator<Item = &ServiceName> {
        self.changed
            .iter()
            .filter(|(_, changed)| **changed)
            .map(|(name, _)| name)
    }

    /// Whether any service changed.
    #[must_use]
    pub fn any_changed(&self) -> bool {
        self.changed.values().any(|changed| *changed)
    }
}

/// Applies all field mutators to one service definition in [`MERGE_ORDER`].
pub fn merge_definition(
    service: &mut ServiceDefinition,
    options: &ServiceOptions,
    values: &mut dyn ValueSource,
) -> bool {
    let mut changed = false;
    for field in MERGE_ORDER {
        if field.apply(service, options, values) {
            tracing::debug!(field = %field, "field updated");
            changed = true;
        }
    }
    changed
}

/// Merges the options for `service_name` into the template.
///
/// A service without options is still run through every mutator with
/// defaults, which only enforces the host-mode invariant.
///
/// # Errors
///
/// Returns [`stackforge_common::error::StackforgeError::NotFound`] if the
/// service is not declared in the template.
pub fn merge_service(
    template: &mut BuildTemplate,
    options: &BuildOptions,
    service_name: &str,
    values: &mut dyn ValueSource,
) -> Result<bool> {
    let service = template.service_mut(service_name)?;
    let defaults = ServiceOptions::default();
    let service_options = options.service(service_name).unwrap_or(&defaults);

    let span = tracing::debug_span!("merge_service", service = %service_name);
    let _guard = span.enter();
    let changed = merge_definition(service, service_options, values);
    tracing::debug!(changed, "service merged");
    Ok(changed)
}

/// Merges every service named in `options` into `template`.
///
/// # Errors
///
/// Returns an error if the options name a service the template does not
/// declare.
pub fn merge_build(
    mut template: BuildTemplate,
    options: &BuildOptions,
    values: &mut dyn ValueSource,
) -> Result<MergeReport> {
    let build_id = BuildId::generate();
    tracing::info!(build = %build_id, services = options.services.len(), "merging build");

    let mut changed = BTreeMap::new();
    for name in options.services.keys() {
        let service_changed = merge_service(&mut template, options, name, values)?;
        let _ = changed.insert(ServiceName::new(name.as_str()), service_changed);
    }

    Ok(MergeReport {
        build_id,
        compiled_at: CompiledAt::now(),
        template,
        changed,
    })
}
