//! User-authored build options applied on top of the template.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stackforge_common::constants::{NETWORK_MODE_HOST, NETWORK_MODE_NONE, NETWORK_MODE_UNCHANGED};
use stackforge_common::error::{Result, StackforgeError};

/// Per-service overrides for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Overrides keyed by service name.
    #[serde(default)]
    pub services: BTreeMap<String, ServiceOptions>,
}

impl BuildOptions {
    /// Parses build options from JSON.
    ///
    /// Accepts either `{"services": {...}}` or the nested
    /// `{"configurations": {"services": {...}}}` layout.
    ///
    /// # Errors
    ///
    /// Returns [`StackforgeError::Config`] if the document, its
    /// `configurations` section or its `services` section is not a JSON
    /// object, and a serialization error for any other invalid content.
    pub fn from_json(input: &str) -> Result<Self> {
        tracing::debug!("parsing build options");
        let mut document: serde_json::Value = serde_json::from_str(input)?;
        expect_object(&document, "build options document")?;
        if let Some(configurations) = document.get_mut("configurations") {
            expect_object(configurations, "`configurations`")?;
            document = configurations.take();
        }
        if let Some(services) = document.get("services") {
            expect_object(services, "`services`")?;
        }
        let options: Self = serde_json::from_value(document)?;
        Ok(options)
    }

    /// Returns the overrides for one service, if any were supplied.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&ServiceOptions> {
        self.services.get(name)
    }
}

fn expect_object(value: &serde_json::Value, what: &str) -> Result<()> {
    if value.is_object() {
        Ok(())
    } else {
        Err(StackforgeError::Config {
            message: format!("{what} must be a JSON object"),
        })
    }
}

/// Overrides for a single service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceOptions {
    /// Value substituted for `{tag}` in the image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Internal port (or `external:internal`) to replacement port entry.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub ports: BTreeMap<String, String>,
    /// Volume overrides; an empty external part removes the mount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<String>>,
    /// Environment overrides; an empty value removes the variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Vec<String>>,
    /// Network name to inclusion flag.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub networks: BTreeMap<String, bool>,
    /// Replacement device list; empty strings are dropped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<String>>,
    /// `Some(false)` strips the logging section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging_enabled: Option<bool>,
    /// Raw network mode option, see [`NetworkModeOverride`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,
}

impl ServiceOptions {
    /// Interprets the raw `networkMode` option.
    ///
    /// Returns `None` when the option is absent or empty.
    #[must_use]
    pub fn network_mode_override(&self) -> Option<NetworkModeOverride> {
        self.network_mode
            .as_deref()
            .filter(|mode| !mode.is_empty())
            .map(NetworkModeOverride::from)
    }
}

/// What the user asked to do with `network_mode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkModeOverride {
    /// Leave the template value as it is.
    Unchanged,
    /// Delete `network_mode` from the service.
    Clear,
    /// Use the host network stack; published ports are dropped.
    Host,
    /// Any other Docker network mode (`bridge`, `service:x`, ...).
    Custom(String),
}

impl From<&str> for NetworkModeOverride {
    fn from(mode: &str) -> Self {
        match mode {
            "" | NETWORK_MODE_UNCHANGED => Self::Unchanged,
            NETWORK_MODE_NONE => Self::Clear,
            NETWORK_MODE_HOST => Self::Host,
            other => Self::Custom(other.to_owned()),
        }
    }
}
