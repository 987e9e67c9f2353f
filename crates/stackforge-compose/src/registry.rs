//! Statically registered service providers.
//!
//! A provider describes what a service lets the user customise and where
//! its documentation lives. The merge engine never consults providers; they
//! feed the option forms and help output that produce [`BuildOptions`].
//!
//! [`BuildOptions`]: crate::options::BuildOptions

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use stackforge_common::error::{Result, StackforgeError};

/// Token in help link titles replaced by the provider's display name.
const DISPLAY_NAME_TOKEN: &str = "{$displayName}";

/// Capabilities every service provider exposes.
pub trait ServiceProvider: Send + Sync {
    /// Service name, matching the template's service key.
    fn name(&self) -> &'static str;

    /// Which fields of the service the user may customise.
    fn config_options(&self) -> ConfigOptions;

    /// Documentation links.
    fn help(&self) -> ServiceHelp;

    /// Display metadata.
    fn meta(&self) -> ServiceMeta;

    /// Helper commands the user can run locally.
    fn commands(&self) -> ServiceCommands {
        ServiceCommands::default()
    }
}

/// Customisable fields of one service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOptions {
    /// Service this schema belongs to.
    pub service_name: String,
    /// Template port mapping to a human label.
    pub labeled_ports: BTreeMap<String, String>,
    /// Environment variables offered for editing, with defaults.
    pub modifiable_environment: Vec<EnvironmentDefault>,
    /// Volumes may be overridden.
    pub volumes: bool,
    /// Networks may be toggled.
    pub networks: bool,
    /// Logging may be disabled.
    pub logging: bool,
}

/// An editable environment variable and its default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentDefault {
    /// Variable name.
    pub key: String,
    /// Default value.
    pub value: String,
}

/// Documentation links for a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHelp {
    /// Service these links belong to.
    pub service_name: String,
    /// Link title and URL, in display order.
    pub links: Vec<HelpLink>,
}

/// One titled documentation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpLink {
    /// Link title, may contain `{$displayName}`.
    pub title: String,
    /// Target URL.
    pub url: String,
}

impl HelpLink {
    /// Creates a link.
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

impl ServiceHelp {
    /// Expands `{$displayName}` in every link title.
    #[must_use]
    pub fn with_display_name(mut self, display_name: &str) -> Self {
        for link in &mut self.links {
            link.title = link.title.replace(DISPLAY_NAME_TOKEN, display_name);
        }
        self
    }
}

/// Display metadata for a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMeta {
    /// Service this metadata belongs to.
    pub service_name: String,
    /// Human-readable name.
    pub display_name: String,
    /// Category tags (`mqtt`, `dashboard`, ...).
    pub service_type_tags: Vec<String>,
    /// Logo location.
    pub icon_uri: String,
}

/// Helper commands for a service, name to shell command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCommands {
    /// Command label to command line.
    pub commands: BTreeMap<String, String>,
}

/// Name-keyed set of service providers.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<&'static str, Box<dyn ServiceProvider>>,
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in providers.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for provider in crate::providers::builtin() {
            let _ = registry.register(provider);
        }
        registry
    }

    /// Registers a provider, returning the one it replaced, if any.
    pub fn register(
        &mut self,
        provider: Box<dyn ServiceProvider>,
    ) -> Option<Box<dyn ServiceProvider>> {
        tracing::debug!(service = provider.name(), "registering service provider");
        self.providers.insert(provider.name(), provider)
    }

    /// Looks up a provider by service name.
    ///
    /// # Errors
    ///
    /// Returns [`StackforgeError::NotFound`] if no provider is registered
    /// under `name`.
    pub fn get(&self, name: &str) -> Result<&dyn ServiceProvider> {
        match self.providers.get(name) {
            Some(provider) => Ok(provider.as_ref()),
            None => Err(StackforgeError::NotFound {
                kind: "service provider",
                id: name.to_owned(),
            }),
        }
    }

    /// Registered service names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.providers.keys().copied()
    }

    /// Number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no provider is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Help for a service with `{$displayName}` expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if no provider is registered under `name`.
    pub fn help(&self, name: &str) -> Result<ServiceHelp> {
        let provider = self.get(name)?;
        Ok(provider.help().with_display_name(&provider.meta().display_name))
    }

    /// Config options of every registered service.
    #[must_use]
    pub fn all_config_options(&self) -> BTreeMap<String, ConfigOptions> {
        self.providers
            .iter()
            .map(|(name, provider)| ((*name).to_owned(), provider.config_options()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub;

    impl ServiceProvider for Stub {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn config_options(&self) -> ConfigOptions {
            ConfigOptions {
                service_name: "stub".into(),
                ..ConfigOptions::default()
            }
        }

        fn help(&self) -> ServiceHelp {
            ServiceHelp {
                service_name: "stub".into(),
                links: vec![HelpLink::new("{$displayName} docs", "https://example.org")],
            }
        }

        fn meta(&self) -> ServiceMeta {
            ServiceMeta {
                service_name: "stub".into(),
                display_name: "Stub Service".into(),
                ..ServiceMeta::default()
            }
        }
    }

    #[test]
    fn register_and_get() {
        let mut registry = ProviderRegistry::new();
        assert!(registry.register(Box::new(Stub)).is_none());
        assert!(registry.register(Box::new(Stub)).is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("stub").expect("stub").name(), "stub");
    }

    #[test]
    fn unknown_provider_is_not_found() {
        let registry = ProviderRegistry::new();
        let err = registry.get("ghost").err().expect("should fail");
        assert_eq!(err.to_string(), "service provider not found: ghost");
    }

    #[test]
    fn help_expands_display_name() {
        let mut registry = ProviderRegistry::new();
        let _ = registry.register(Box::new(Stub));
        let help = registry.help("stub").expect("help");
        assert_eq!(help.links[0].title, "Stub Service docs");
    }

    #[test]
    fn default_commands_are_empty() {
        assert!(Stub.commands().commands.is_empty());
    }

    #[test]
    fn config_options_serialize_camel_case() {
        let json = serde_json::to_value(Stub.config_options()).expect("serialize");
        assert!(json.get("labeledPorts").is_some());
        assert!(json.get("modifiableEnvironment").is_some());
    }

    #[test]
    fn builtin_registry_lists_known_services() {
        let registry = ProviderRegistry::builtin();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["grafana", "mosquitto"]);
        assert_eq!(registry.all_config_options().len(), 2);
    }
}
