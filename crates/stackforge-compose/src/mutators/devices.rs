//! Devices mutator.

use crate::mutators::same_set;
use crate::options::ServiceOptions;
use crate::template::ServiceDefinition;

/// Replaces `devices` with `options.devices`, minus empty strings.
///
/// A template that declared an empty `devices` list loses the key
/// altogether. Change is judged by order-insensitive comparison of the
/// previous list with the requested one.
pub fn apply(service: &mut ServiceDefinition, options: &ServiceOptions) -> bool {
    let Some(requested) = options.devices.as_deref() else {
        return false;
    };
    let devices: Vec<String> = requested
        .iter()
        .filter(|device| !device.is_empty())
        .cloned()
        .collect();

    let prior = service.devices.take();
    let changed = !same_set(prior.as_deref().unwrap_or_default(), &devices);
    if prior.as_ref().is_some_and(Vec::is_empty) {
        tracing::debug!("empty device list removed");
    } else {
        service.devices = Some(devices);
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutators::strings;

    fn requested(devices: &[&str]) -> ServiceOptions {
        ServiceOptions {
            devices: Some(strings(devices)),
            ..ServiceOptions::default()
        }
    }

    fn service(devices: Option<&[&str]>) -> ServiceDefinition {
        ServiceDefinition {
            devices: devices.map(strings),
            ..ServiceDefinition::default()
        }
    }

    #[test]
    fn reordering_is_not_a_change() {
        let mut svc = service(Some(&["/dev/a", "/dev/b"]));
        assert!(!apply(&mut svc, &requested(&["/dev/b", "/dev/a"])));
    }

    #[test]
    fn empty_strings_are_filtered() {
        let mut svc = service(Some(&["/dev/ttyUSB0", "/dev/ttyAMA0"]));
        assert!(apply(&mut svc, &requested(&["/dev/ttyUSB0", ""])));
        assert_eq!(svc.devices, Some(strings(&["/dev/ttyUSB0"])));
    }

    #[test]
    fn all_empty_override_stores_empty_list() {
        let mut svc = service(Some(&["/dev/ttyUSB0"]));
        assert!(apply(&mut svc, &requested(&[""])));
        assert_eq!(svc.devices, Some(Vec::new()));
    }

    #[test]
    fn prior_empty_list_is_deleted() {
        let mut svc = service(Some(&[]));
        assert!(!apply(&mut svc, &requested(&[])));
        assert!(svc.devices.is_none());
    }

    #[test]
    fn prior_empty_list_is_deleted_even_with_new_devices() {
        let mut svc = service(Some(&[]));
        assert!(apply(&mut svc, &requested(&["/dev/ttyACM0"])));
        assert!(svc.devices.is_none());
    }

    #[test]
    fn adds_devices_to_absent_list() {
        let mut svc = service(None);
        assert!(apply(&mut svc, &requested(&["/dev/ttyACM0"])));
        assert_eq!(svc.devices, Some(strings(&["/dev/ttyACM0"])));
        assert!(!apply(&mut svc, &requested(&["/dev/ttyACM0"])));
    }

    #[test]
    fn no_device_options_is_noop() {
        let mut svc = service(Some(&["/dev/a"]));
        assert!(!apply(&mut svc, &ServiceOptions::default()));
        assert_eq!(svc.devices, Some(strings(&["/dev/a"])));
    }
}
