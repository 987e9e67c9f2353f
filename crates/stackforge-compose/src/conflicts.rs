//! Detection of host ports published by more than one service.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use stackforge_common::constants::DEFAULT_PORT_PROTOCOL;
use stackforge_common::types::ServiceName;

use crate::codec::PortEntry;
use crate::template::BuildTemplate;

/// A host port bound more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortConflict {
    /// The contested host port.
    pub host_port: String,
    /// Transport protocol of the binding.
    pub protocol: String,
    /// Every service binding it, in template order. A service appears once
    /// per binding.
    pub services: Vec<ServiceName>,
}

impl fmt::Display for PortConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.services.iter().map(ServiceName::as_str).collect();
        write!(
            f,
            "port {}/{} is published by {}",
            self.host_port,
            self.protocol,
            names.join(", ")
        )
    }
}

/// Lists every host port/protocol pair published by more than one binding.
///
/// Entries without a host side and malformed entries publish nothing.
#[must_use]
pub fn find_port_conflicts(template: &BuildTemplate) -> Vec<PortConflict> {
    let mut bindings: BTreeMap<(String, String), Vec<ServiceName>> = BTreeMap::new();

    for (name, service) in &template.services {
        for entry in service.ports.iter().flatten() {
            let Ok(port) = PortEntry::parse(entry) else {
                continue;
            };
            let Some(host_port) = port.host_port() else {
                continue;
            };
            let protocol = port.protocol().unwrap_or(DEFAULT_PORT_PROTOCOL);
            bindings
                .entry((host_port.to_owned(), protocol.to_owned()))
                .or_default()
                .push(ServiceName::new(name.as_str()));
        }
    }

    let conflicts: Vec<PortConflict> = bindings
        .into_iter()
        .filter(|(_, services)| services.len() > 1)
        .map(|((host_port, protocol), services)| PortConflict {
            host_port,
            protocol,
            services,
        })
        .collect();

    if !conflicts.is_empty() {
        tracing::warn!(count = conflicts.len(), "host port conflicts detected");
    }
    conflicts
}
