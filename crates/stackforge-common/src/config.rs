//! Build settings for the Stackforge compiler.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{Result, StackforgeError};

/// Root settings for a build invocation.
///
/// Every field has a default, so a settings file only needs the keys it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildSettings {
    /// Base service template document (YAML).
    pub template_file: PathBuf,
    /// User build options document (JSON).
    pub options_file: PathBuf,
    /// Where the compiled compose document is written.
    pub output_file: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Draw passwords and tokens from the operating system CSPRNG.
    pub secure_random: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            template_file: PathBuf::from(constants::DEFAULT_TEMPLATE_FILE),
            options_file: PathBuf::from(constants::DEFAULT_OPTIONS_FILE),
            output_file: PathBuf::from(constants::DEFAULT_OUTPUT_FILE),
            log_filter: constants::DEFAULT_LOG_FILTER.to_owned(),
            secure_random: true,
        }
    }
}

impl BuildSettings {
    /// Loads settings from a JSON file, defaulting any missing keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| StackforgeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&raw)?;
        Ok(settings)
    }
}
