//! Grafana dashboards.

use std::collections::BTreeMap;

use crate::registry::{
    ConfigOptions, EnvironmentDefault, HelpLink, ServiceHelp, ServiceMeta, ServiceProvider,
};

const NAME: &str = "grafana";

/// Provider for the `grafana` service.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grafana;

impl ServiceProvider for Grafana {
    fn name(&self) -> &'static str {
        NAME
    }

    fn config_options(&self) -> ConfigOptions {
        ConfigOptions {
            service_name: NAME.to_owned(),
            labeled_ports: BTreeMap::from([("3000:3000".to_owned(), "http".to_owned())]),
            modifiable_environment: vec![
                EnvironmentDefault {
                    key: "GF_PATHS_DATA".to_owned(),
                    value: "/var/lib/grafana".to_owned(),
                },
                EnvironmentDefault {
                    key: "GF_PATHS_LOGS".to_owned(),
                    value: "/var/log/grafana".to_owned(),
                },
            ],
            volumes: true,
            networks: true,
            logging: true,
        }
    }

    fn help(&self) -> ServiceHelp {
        ServiceHelp {
            service_name: NAME.to_owned(),
            links: vec![
                HelpLink::new("Website", "https://grafana.com/"),
                HelpLink::new("Docker", "https://hub.docker.com/r/grafana/grafana"),
                HelpLink::new("Source Code", "https://github.com/grafana/grafana"),
                HelpLink::new("Community", "https://community.grafana.com/"),
                HelpLink::new("Tutorials", "https://grafana.com/tutorials/"),
                HelpLink::new(
                    "IOTstack Documentation for {$displayName}",
                    "https://sensorsiot.github.io/IOTstack/Containers/Grafana/",
                ),
            ],
        }
    }

    fn meta(&self) -> ServiceMeta {
        ServiceMeta {
            service_name: NAME.to_owned(),
            display_name: "Grafana".to_owned(),
            service_type_tags: ["aggregator", "wui", "graphs", "dashboard"]
                .map(str::to_owned)
                .to_vec(),
            icon_uri: "/logos/grafana.svg".to_owned(),
        }
    }
}
