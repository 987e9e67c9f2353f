//! System-wide constants and default paths.

use std::ops::RangeInclusive;

/// Binary name for the CLI.
pub const BIN_NAME: &str = "stackforge";

/// Default path of the base service template document.
pub const DEFAULT_TEMPLATE_FILE: &str = "services.yml";

/// Default path of the user build options document.
pub const DEFAULT_OPTIONS_FILE: &str = "build-options.json";

/// Default path of the compiled compose document.
pub const DEFAULT_OUTPUT_FILE: &str = "docker-compose.yml";

/// Default `tracing` filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Placeholder rewritten by the image tag mutator.
pub const TAG_PLACEHOLDER: &str = "tag";

/// Placeholder names filled by the value generator on every interpolation.
pub const PLACEHOLDER_RANDOM_PASSWORD: &str = "randomPassword";
/// See [`PLACEHOLDER_RANDOM_PASSWORD`].
pub const PLACEHOLDER_PASSWORD: &str = "password";
/// See [`PLACEHOLDER_RANDOM_PASSWORD`].
pub const PLACEHOLDER_ADMIN_PASSWORD: &str = "adminPassword";
/// See [`PLACEHOLDER_RANDOM_PASSWORD`].
pub const PLACEHOLDER_FOLDER_NAME: &str = "folderName";
/// See [`PLACEHOLDER_RANDOM_PASSWORD`].
pub const PLACEHOLDER_COMPILED_TIME: &str = "compiledTime";
/// See [`PLACEHOLDER_RANDOM_PASSWORD`].
pub const PLACEHOLDER_RANDOM_ALPHANUMERIC: &str = "randomAlphanumeric";
/// See [`PLACEHOLDER_RANDOM_PASSWORD`].
pub const PLACEHOLDER_RANDOM_PORT: &str = "randomPort";

/// IANA dynamic/private port range used for `{randomPort}`.
pub const EPHEMERAL_PORT_RANGE: RangeInclusive<u16> = 49152..=65535;

/// Length of a generated `{password}` / `{randomPassword}`.
pub const PASSWORD_LENGTH: usize = 16;

/// Length of a generated `{adminPassword}`.
pub const ADMIN_PASSWORD_LENGTH: usize = 32;

/// Length of a generated `{randomAlphanumeric}` token.
pub const ALPHANUMERIC_LENGTH: usize = 32;

/// Length of a generated `{folderName}`.
pub const FOLDER_NAME_LENGTH: usize = 12;

/// `network_mode` value that removes published ports.
pub const NETWORK_MODE_HOST: &str = "host";

/// Network mode option value that deletes `network_mode`.
pub const NETWORK_MODE_NONE: &str = "none";

/// Network mode option value that leaves `network_mode` alone.
pub const NETWORK_MODE_UNCHANGED: &str = "unchanged";

/// Protocol assumed for port entries without a `/proto` suffix.
pub const DEFAULT_PORT_PROTOCOL: &str = "tcp";
