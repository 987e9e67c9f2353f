//! End-to-end tests for the template merge pipeline.
//!
//! These tests drive the public API the way the CLI does:
//! 1. Parse a compose template and a build options document
//! 2. Merge every configured service
//! 3. Serialize the result and check what a compose runtime would see
//! 4. Check host port conflicts on the merged template

#![allow(clippy::expect_used, clippy::unwrap_used)]

use stackforge_common::types::ServiceName;
use stackforge_compose::conflicts::find_port_conflicts;
use stackforge_compose::generate::RandomValues;
use stackforge_compose::merge::{merge_build, merge_service};
use stackforge_compose::options::BuildOptions;
use stackforge_compose::registry::ProviderRegistry;
use stackforge_compose::template::BuildTemplate;

const TEMPLATE: &str = r#"
version: "3.6"
services:
  mosquitto:
    container_name: mosquitto
    image: "eclipse-mosquitto:{tag}"
    restart: unless-stopped
    ports:
      - "1883:1883"
    volumes:
      - ./volumes/mosquitto/data:/mosquitto/data
      - ./volumes/mosquitto/log:/mosquitto/log
    networks:
      - iotstack_nw
    logging:
      driver: json-file
  grafana:
    container_name: grafana
    image: grafana/grafana
    ports:
      - "3000:3000"
    environment:
      - GF_PATHS_DATA=/var/lib/grafana
      - GF_PATHS_LOGS=/var/log/grafana
      - GF_SECURITY_ADMIN_PASSWORD=admin
    devices:
      - /dev/ttyUSB0
  nodered:
    image: nodered/node-red
    ports:
      - "1880:1880"
      - "3000:3001"
"#;

fn template() -> BuildTemplate {
    BuildTemplate::from_yaml(TEMPLATE).expect("template should parse")
}

// ── Scenarios ────────────────────────────────────────────────────────

#[test]
fn pipeline_full_build_rewrites_every_field_category() {
    let options = BuildOptions::from_json(
        r#"{"services": {
            "mosquitto": {
                "tag": "2.0.18",
                "ports": {"1883": "8883:1883/tcp"},
                "volumes": [":/mosquitto/log", "/mnt/ssd/mqtt:/mosquitto/data"],
                "networks": {"iotstack_nw": true, "vpn_nw": true},
                "loggingEnabled": false
            },
            "grafana": {
                "environment": ["GF_SECURITY_ADMIN_PASSWORD={adminPassword}", "GF_PATHS_LOGS="],
                "devices": ["", "/dev/ttyACM0"]
            }
        }}"#,
    )
    .expect("options should parse");

    let report = merge_build(template(), &options, &mut RandomValues::seeded(9))
        .expect("merge should succeed");

    assert_eq!(report.changed.get(&ServiceName::from("mosquitto")), Some(&true));
    assert_eq!(report.changed.get(&ServiceName::from("grafana")), Some(&true));
    assert!(!report.changed.contains_key(&ServiceName::from("nodered")));

    let mosquitto = report.template.service("mosquitto").expect("mosquitto");
    assert_eq!(mosquitto.image.as_deref(), Some("eclipse-mosquitto:2.0.18"));
    assert_eq!(mosquitto.ports, Some(vec!["8883:1883/tcp".to_owned()]));
    assert_eq!(
        mosquitto.volumes,
        Some(vec!["/mnt/ssd/mqtt:/mosquitto/data".to_owned()])
    );
    let mut networks = mosquitto.networks.clone().expect("networks");
    networks.sort();
    assert_eq!(networks, vec!["iotstack_nw", "vpn_nw"]);
    assert!(mosquitto.logging.is_none());

    let grafana = report.template.service("grafana").expect("grafana");
    let env = grafana.environment.as_ref().expect("environment");
    assert_eq!(env.len(), 2);
    assert_eq!(env[0], "GF_PATHS_DATA=/var/lib/grafana");
    let password = env[1]
        .strip_prefix("GF_SECURITY_ADMIN_PASSWORD=")
        .expect("password entry");
    assert_eq!(password.len(), 32);
    assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(grafana.devices, Some(vec!["/dev/ttyACM0".to_owned()]));
}

#[test]
fn pipeline_output_keeps_untouched_keys() {
    let options =
        BuildOptions::from_json(r#"{"services": {"mosquitto": {"tag": "latest"}}}"#).expect("options");
    let report = merge_build(template(), &options, &mut RandomValues::seeded(1)).expect("merge");
    let yaml = report.template.to_yaml().expect("serialize");

    assert!(yaml.contains("container_name: mosquitto"));
    assert!(yaml.contains("restart: unless-stopped"));
    assert!(yaml.contains("eclipse-mosquitto:latest"));
    assert!(yaml.contains("version:"));

    let reparsed = BuildTemplate::from_yaml(&yaml).expect("output should reparse");
    assert_eq!(reparsed, report.template);
}

#[test]
fn pipeline_host_mode_drops_ports_and_is_idempotent() {
    let options =
        BuildOptions::from_json(r#"{"services": {"nodered": {"networkMode": "host"}}}"#).expect("options");
    let mut template = template();
    let mut values = RandomValues::seeded(2);

    assert!(merge_service(&mut template, &options, "nodered", &mut values).expect("merge"));
    let nodered = template.service("nodered").expect("nodered");
    assert_eq!(nodered.network_mode.as_deref(), Some("host"));
    assert!(nodered.ports.is_none());
    assert!(!template.to_yaml().expect("yaml").contains("1880:1880"));

    assert!(!merge_service(&mut template, &options, "nodered", &mut values).expect("merge"));
}

#[test]
fn pipeline_removal_overrides_are_idempotent() {
    let options = BuildOptions::from_json(
        r#"{"services": {"grafana": {"environment": ["GF_PATHS_LOGS="]}, "mosquitto": {"volumes": [":/mosquitto/log"]}}}"#,
    )
    .expect("options");
    let mut values = RandomValues::seeded(3);

    let first = merge_build(template(), &options, &mut values).expect("first merge");
    assert!(first.any_changed());

    let second = merge_build(first.template.clone(), &options, &mut values).expect("second merge");
    assert!(!second.any_changed());
    assert_eq!(second.template, first.template);
}

#[test]
fn pipeline_nested_options_layout() {
    let options = BuildOptions::from_json(
        r#"{"configurations": {"services": {"mosquitto": {"loggingEnabled": false}}}}"#,
    )
    .expect("options");
    let report = merge_build(template(), &options, &mut RandomValues::seeded(4)).expect("merge");
    assert!(report.template.service("mosquitto").expect("svc").logging.is_none());
}

// ── Failures ─────────────────────────────────────────────────────────

#[test]
fn pipeline_undeclared_service_is_reported() {
    let options =
        BuildOptions::from_json(r#"{"services": {"influxdb": {"tag": "1.8"}}}"#).expect("options");
    let err = merge_build(template(), &options, &mut RandomValues::seeded(5)).unwrap_err();
    assert_eq!(err.to_string(), "service not found: influxdb");
}

#[test]
fn pipeline_corrupt_template_is_fatal() {
    assert!(BuildTemplate::from_yaml("services: [not, a, map]").is_err());
}

// ── Conflicts & providers ────────────────────────────────────────────

#[test]
fn pipeline_conflicts_follow_the_merge() {
    let before = find_port_conflicts(&template());
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].host_port, "3000");

    let options = BuildOptions::from_json(
        r#"{"services": {"grafana": {"ports": {"3000": "3030:3000"}}}}"#,
    )
    .expect("options");
    let report = merge_build(template(), &options, &mut RandomValues::seeded(6)).expect("merge");
    assert!(find_port_conflicts(&report.template).is_empty());
}

#[test]
fn pipeline_labeled_ports_address_template_entries() {
    let registry = ProviderRegistry::builtin();
    let labeled = registry
        .get("grafana")
        .expect("grafana provider")
        .config_options()
        .labeled_ports;
    let key = labeled.keys().next().expect("labeled port").clone();

    let options = BuildOptions::from_json(&format!(
        r#"{{"services": {{"grafana": {{"ports": {{"{key}": "3001:3000"}}}}}}}}"#
    ))
    .expect("options");
    let report = merge_build(template(), &options, &mut RandomValues::seeded(7)).expect("merge");
    assert_eq!(
        report.template.service("grafana").expect("grafana").ports,
        Some(vec!["3001:3000".to_owned()])
    );
}
