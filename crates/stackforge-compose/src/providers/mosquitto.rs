//! Eclipse Mosquitto MQTT broker.

use std::collections::BTreeMap;

use crate::registry::{ConfigOptions, HelpLink, ServiceHelp, ServiceMeta, ServiceProvider};

const NAME: &str = "mosquitto";

/// Provider for the `mosquitto` service.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mosquitto;

impl ServiceProvider for Mosquitto {
    fn name(&self) -> &'static str {
        NAME
    }

    fn config_options(&self) -> ConfigOptions {
        ConfigOptions {
            service_name: NAME.to_owned(),
            labeled_ports: BTreeMap::from([("1883:1883".to_owned(), "mosquitto".to_owned())]),
            modifiable_environment: Vec::new(),
            volumes: true,
            networks: true,
            logging: true,
        }
    }

    fn help(&self) -> ServiceHelp {
        ServiceHelp {
            service_name: NAME.to_owned(),
            links: vec![
                HelpLink::new("Website", "https://mosquitto.org/"),
                HelpLink::new("Docker", "https://hub.docker.com/_/eclipse-mosquitto"),
                HelpLink::new(
                    "{$displayName} Documentation",
                    "https://mosquitto.org/documentation/",
                ),
                HelpLink::new(
                    "IOTstack Documentation for {$displayName}",
                    "https://sensorsiot.github.io/IOTstack/Containers/Mosquitto/",
                ),
            ],
        }
    }

    fn meta(&self) -> ServiceMeta {
        ServiceMeta {
            service_name: NAME.to_owned(),
            display_name: "Mosquitto".to_owned(),
            service_type_tags: vec!["mqtt".to_owned(), "server".to_owned()],
            icon_uri: "/logos/mosquitto.png".to_owned(),
        }
    }
}
