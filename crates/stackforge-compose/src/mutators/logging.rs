//! Logging mutator.

use crate::options::ServiceOptions;
use crate::template::ServiceDefinition;

/// Deletes the `logging` section when `loggingEnabled` is `false`.
pub fn apply(service: &mut ServiceDefinition, options: &ServiceOptions) -> bool {
    if options.logging_enabled != Some(false) {
        return false;
    }
    service.logging.take().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_logging() -> ServiceDefinition {
        let logging: serde_yaml::Value =
            serde_yaml::from_str("driver: json-file\noptions:\n  max-size: 10m\n").expect("yaml");
        ServiceDefinition {
            logging: Some(logging),
            ..ServiceDefinition::default()
        }
    }

    fn enabled(flag: Option<bool>) -> ServiceOptions {
        ServiceOptions {
            logging_enabled: flag,
            ..ServiceOptions::default()
        }
    }

    #[test]
    fn disabling_removes_section_once() {
        let mut svc = with_logging();
        assert!(apply(&mut svc, &enabled(Some(false))));
        assert!(svc.logging.is_none());
        assert!(!apply(&mut svc, &enabled(Some(false))));
    }

    #[test]
    fn enabled_or_unset_keeps_section() {
        let mut svc = with_logging();
        assert!(!apply(&mut svc, &enabled(Some(true))));
        assert!(!apply(&mut svc, &enabled(None)));
        assert!(svc.logging.is_some());
    }
}
