//! In-memory model of the base compose document.
//!
//! Only the fields the merge engine rewrites are typed. Every other key,
//! at document or service level, is carried through untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use stackforge_common::error::{Result, StackforgeError};

/// Base deployment document: service name to service definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildTemplate {
    /// Top-level keys other than `services` (`version`, `networks`, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
    /// Service definitions keyed by unique service name.
    #[serde(default)]
    pub services: BTreeMap<String, ServiceDefinition>,
}

/// Runtime configuration of one deployable service.
///
/// `None` means the key is absent from the document, which mutators treat
/// differently from an explicit empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    /// Image reference, possibly containing a `{tag}` placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Port mappings, `EXTERNAL:INTERNAL[/PROTOCOL]`.
    #[serde(
        default,
        deserialize_with = "scalar_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub ports: Option<Vec<String>>,
    /// Volume mounts, `EXTERNAL:INTERNAL[:MODE]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<String>>,
    /// Environment entries, `KEY=VALUE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Vec<String>>,
    /// Attached network names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub networks: Option<Vec<String>>,
    /// Device paths passed through to the container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<String>>,
    /// Logging configuration, opaque beyond presence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<serde_yaml::Value>,
    /// Docker network mode (`host`, `bridge`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,
    /// Keys the merge engine does not rewrite.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(i64),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Accepts `- 80` as well as `- "80:80"`.
fn scalar_list<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Scalar>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|items| items.into_iter().map(Scalar::into_string).collect()))
}

impl BuildTemplate {
    /// Parses a template from compose YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid YAML or its known
    /// fields have the wrong shape.
    pub fn from_yaml(input: &str) -> Result<Self> {
        tracing::debug!("parsing build template");
        let template: Self = serde_yaml::from_str(input)?;
        Ok(template)
    }

    /// Serializes the template back to compose YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Returns the named service definition.
    ///
    /// # Errors
    ///
    /// Returns [`StackforgeError::NotFound`] if the service was never
    /// declared in the template.
    pub fn service(&self, name: &str) -> Result<&ServiceDefinition> {
        self.services.get(name).ok_or_else(|| missing_service(name))
    }

    /// Returns the named service definition for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`StackforgeError::NotFound`] if the service was never
    /// declared in the template.
    pub fn service_mut(&mut self, name: &str) -> Result<&mut ServiceDefinition> {
        self.services
            .get_mut(name)
            .ok_or_else(|| missing_service(name))
    }
}

fn missing_service(name: &str) -> StackforgeError {
    StackforgeError::NotFound {
        kind: "service",
        id: name.to_owned(),
    }
}
