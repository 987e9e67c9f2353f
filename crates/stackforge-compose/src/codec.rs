//! Codecs for the compact ports, volumes and environment entry grammars.
//!
//! Each entry has a stable internal key used to match template entries
//! against overrides:
//!
//! | Field | Grammar | Key |
//! |---|---|---|
//! | ports | `[EXTERNAL:]INTERNAL[/PROTOCOL]` | `INTERNAL` |
//! | volumes | `[EXTERNAL:]INTERNAL[:MODE]` | `INTERNAL` |
//! | environment | `KEY=VALUE` | `KEY` |
//!
//! Rebuilding an entry keeps every part that is not replaced verbatim.

use stackforge_common::error::{Result, StackforgeError};

/// A parsed port entry, borrowing from the raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortEntry<'a> {
    mapping: &'a str,
    external: Option<&'a str>,
    internal: &'a str,
    protocol: Option<&'a str>,
}

impl<'a> PortEntry<'a> {
    /// Parses `[EXTERNAL:]INTERNAL[/PROTOCOL]`.
    ///
    /// `EXTERNAL` may carry a host IP (`127.0.0.1:8080:80`). `INTERNAL` must
    /// be a port number or a `start-end` range.
    ///
    /// # Errors
    ///
    /// Returns [`StackforgeError::MalformedEntry`] if the entry does not
    /// follow the grammar.
    pub fn parse(raw: &'a str) -> Result<Self> {
        let (mapping, protocol) = match raw.split_once('/') {
            Some((_, "")) => return Err(StackforgeError::malformed("port", raw, "empty protocol")),
            Some((mapping, protocol)) => (mapping, Some(protocol)),
            None => (raw, None),
        };
        let (external, internal) = match mapping.rsplit_once(':') {
            Some((external, internal)) => (Some(external), internal),
            None => (None, mapping),
        };
        if internal.is_empty() {
            return Err(StackforgeError::malformed("port", raw, "missing internal port"));
        }
        if !internal.chars().all(|c| c.is_ascii_digit() || c == '-') {
            return Err(StackforgeError::malformed(
                "port",
                raw,
                "internal port is not numeric",
            ));
        }
        Ok(Self {
            mapping,
            external,
            internal,
            protocol,
        })
    }

    /// The container-side port, used as the match key.
    #[must_use]
    pub const fn key(&self) -> &'a str {
        self.internal
    }

    /// The host side (`8080` or `127.0.0.1:8080`), if published.
    #[must_use]
    pub const fn external(&self) -> Option<&'a str> {
        self.external
    }

    /// The host port alone, without any bind address.
    #[must_use]
    pub fn host_port(&self) -> Option<&'a str> {
        self.external
            .and_then(|external| external.rsplit(':').next())
            .filter(|port| !port.is_empty())
    }

    /// The `/PROTOCOL` suffix, if any.
    #[must_use]
    pub const fn protocol(&self) -> Option<&'a str> {
        self.protocol
    }

    /// Whether an override key addresses this entry.
    ///
    /// Both the bare internal port (`1883`) and the full mapping without
    /// protocol (`1883:1883`) are accepted.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        key == self.internal || key == self.mapping
    }

    /// Rebuilds the entry with a different host side.
    #[must_use]
    pub fn with_external(&self, external: &str) -> String {
        let mut entry = format!("{external}:{}", self.internal);
        if let Some(protocol) = self.protocol {
            entry.push('/');
            entry.push_str(protocol);
        }
        entry
    }
}

/// A parsed volume entry, borrowing from the raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeEntry<'a> {
    external: Option<&'a str>,
    internal: &'a str,
    mode: Option<&'a str>,
}

impl<'a> VolumeEntry<'a> {
    /// Parses `[EXTERNAL:]INTERNAL[:MODE]`.
    ///
    /// # Errors
    ///
    /// Returns [`StackforgeError::MalformedEntry`] if the entry has more
    /// than three parts or no container path.
    pub fn parse(raw: &'a str) -> Result<Self> {
        let parts: Vec<&str> = raw.split(':').collect();
        let (external, internal, mode) = match parts.as_slice() {
            [internal] => (None, *internal, None),
            [external, internal] => (Some(*external), *internal, None),
            [external, internal, mode] => (Some(*external), *internal, Some(*mode)),
            _ => {
                return Err(StackforgeError::malformed(
                    "volume",
                    raw,
                    "too many ':' separators",
                ));
            }
        };
        if internal.is_empty() {
            return Err(StackforgeError::malformed("volume", raw, "missing container path"));
        }
        Ok(Self {
            external,
            internal,
            mode,
        })
    }

    /// The container-side mount path, used as the match key.
    #[must_use]
    pub const fn key(&self) -> &'a str {
        self.internal
    }

    /// The host path or named volume, if present.
    #[must_use]
    pub const fn external(&self) -> Option<&'a str> {
        self.external
    }

    /// The `:MODE` suffix (`ro`, `rw`, ...), if any.
    #[must_use]
    pub const fn mode(&self) -> Option<&'a str> {
        self.mode
    }

    /// An override with no host side asks for the mount to be removed.
    #[must_use]
    pub fn is_removal(&self) -> bool {
        self.external.is_none_or(str::is_empty)
    }

    /// Rebuilds the entry with a different host side, keeping the mode.
    #[must_use]
    pub fn with_external(&self, external: &str) -> String {
        self.rebuild(external, self.mode)
    }

    /// Applies an override: host side from `requested`, mode from
    /// `requested` when it names one, otherwise from `self`.
    #[must_use]
    pub fn merged_with(&self, requested: &VolumeEntry<'_>) -> String {
        self.rebuild(
            requested.external.unwrap_or_default(),
            requested.mode.or(self.mode),
        )
    }

    fn rebuild(&self, external: &str, mode: Option<&str>) -> String {
        let mut entry = format!("{external}:{}", self.internal);
        if let Some(mode) = mode {
            entry.push(':');
            entry.push_str(mode);
        }
        entry
    }
}

/// A parsed environment entry, borrowing from the raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvEntry<'a> {
    key: &'a str,
    value: &'a str,
}

impl<'a> EnvEntry<'a> {
    /// Parses `KEY=VALUE`. The value may itself contain `=`.
    ///
    /// # Errors
    ///
    /// Returns [`StackforgeError::MalformedEntry`] if there is no `=` or
    /// the key is empty.
    pub fn parse(raw: &'a str) -> Result<Self> {
        let Some((key, value)) = raw.split_once('=') else {
            return Err(StackforgeError::malformed("environment", raw, "missing '='"));
        };
        if key.is_empty() {
            return Err(StackforgeError::malformed("environment", raw, "empty key"));
        }
        Ok(Self { key, value })
    }

    /// The variable name, used as the match key.
    #[must_use]
    pub const fn key(&self) -> &'a str {
        self.key
    }

    /// Everything after the first `=`.
    #[must_use]
    pub const fn value(&self) -> &'a str {
        self.value
    }

    /// An override with an empty value asks for the variable to be removed.
    #[must_use]
    pub const fn is_removal(&self) -> bool {
        self.value.is_empty()
    }

    /// Rebuilds the entry with a different value.
    #[must_use]
    pub fn with_value(&self, value: &str) -> String {
        format!("{}={value}", self.key)
    }
}

/// Extracts the internal port of a port entry.
///
/// # Errors
///
/// Returns an error if the entry is malformed.
pub fn port_key(raw: &str) -> Result<&str> {
    PortEntry::parse(raw).map(|entry| entry.key())
}

/// Extracts the container path of a volume entry.
///
/// # Errors
///
/// Returns an error if the entry is malformed.
pub fn volume_key(raw: &str) -> Result<&str> {
    VolumeEntry::parse(raw).map(|entry| entry.key())
}

/// Extracts the variable name of an environment entry.
///
/// # Errors
///
/// Returns an error if the entry is malformed.
pub fn env_key(raw: &str) -> Result<&str> {
    EnvEntry::parse(raw).map(|entry| entry.key())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_key_strips_protocol_and_external() {
        let port = PortEntry::parse("8883:1883/tcp").expect("should parse");
        assert_eq!(port.key(), "1883");
        assert_eq!(port.external(), Some("8883"));
        assert_eq!(port.protocol(), Some("tcp"));
    }

    #[test]
    fn port_without_external_publishes_nothing() {
        let port = PortEntry::parse("9001").expect("should parse");
        assert_eq!(port.key(), "9001");
        assert_eq!(port.external(), None);
        assert_eq!(port.host_port(), None);
    }

    #[test]
    fn port_with_bind_address() {
        let port = PortEntry::parse("127.0.0.1:8080:80/udp").expect("should parse");
        assert_eq!(port.key(), "80");
        assert_eq!(port.external(), Some("127.0.0.1:8080"));
        assert_eq!(port.host_port(), Some("8080"));
    }

    #[test]
    fn port_matches_internal_or_full_mapping() {
        let port = PortEntry::parse("1883:1883/tcp").expect("should parse");
        assert!(port.matches("1883"));
        assert!(port.matches("1883:1883"));
        assert!(!port.matches("1883:1883/tcp"));
        assert!(!port.matches("188"));
    }

    #[test]
    fn port_with_external_keeps_protocol() {
        let port = PortEntry::parse("1883:1883/udp").expect("should parse");
        assert_eq!(port.with_external("8883"), "8883:1883/udp");
    }

    #[test]
    fn port_ranges_are_accepted() {
        let port = PortEntry::parse("8000-8010:8000-8010").expect("should parse");
        assert_eq!(port.key(), "8000-8010");
    }

    #[test]
    fn malformed_ports_are_rejected() {
        for raw in ["", "80:", "80:http", "80:80/", "abc"] {
            let err = PortEntry::parse(raw).unwrap_err();
            assert!(err.is_recoverable(), "{raw}: {err}");
        }
    }

    #[test]
    fn volume_parts() {
        let volume = VolumeEntry::parse("./data:/var/lib/data:ro").expect("should parse");
        assert_eq!(volume.key(), "/var/lib/data");
        assert_eq!(volume.external(), Some("./data"));
        assert_eq!(volume.mode(), Some("ro"));
        assert!(!volume.is_removal());
    }

    #[test]
    fn volume_with_empty_external_is_removal() {
        assert!(VolumeEntry::parse(":/data").expect("parse").is_removal());
        assert!(VolumeEntry::parse("/data").expect("parse").is_removal());
    }

    #[test]
    fn volume_with_external_keeps_mode() {
        let volume = VolumeEntry::parse("./a:/data:ro").expect("should parse");
        assert_eq!(volume.with_external("/mnt/b"), "/mnt/b:/data:ro");
    }

    #[test]
    fn volume_merge_prefers_requested_mode() {
        let existing = VolumeEntry::parse("./a:/data:ro").expect("parse");
        let keep_mode = VolumeEntry::parse("/mnt/b:/data").expect("parse");
        let new_mode = VolumeEntry::parse("/mnt/b:/data:rw").expect("parse");
        assert_eq!(existing.merged_with(&keep_mode), "/mnt/b:/data:ro");
        assert_eq!(existing.merged_with(&new_mode), "/mnt/b:/data:rw");
    }

    #[test]
    fn malformed_volumes_are_rejected() {
        assert!(VolumeEntry::parse("a:b:c:d").is_err());
        assert!(VolumeEntry::parse("./data:").is_err());
        assert!(VolumeEntry::parse("").is_err());
    }

    #[test]
    fn env_value_may_contain_equals() {
        let env = EnvEntry::parse("OPTS=a=b").expect("should parse");
        assert_eq!(env.key(), "OPTS");
        assert_eq!(env.value(), "a=b");
        assert_eq!(env.with_value("c"), "OPTS=c");
    }

    #[test]
    fn env_removal_and_malformed() {
        assert!(EnvEntry::parse("TZ=").expect("parse").is_removal());
        assert!(EnvEntry::parse("TZ").is_err());
        assert!(EnvEntry::parse("=value").is_err());
    }

    #[test]
    fn key_helpers() {
        assert_eq!(port_key("80:8080/tcp").expect("port"), "8080");
        assert_eq!(volume_key("vol:/data").expect("volume"), "/data");
        assert_eq!(env_key("A=1").expect("env"), "A");
    }
}
