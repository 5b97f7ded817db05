//! Executor configuration via TOML
//!
//! Everything has a default, so an empty document is a valid config.
//! Scenario suites that want verbose traces for every run can keep an
//! `interleave.toml` next to them instead of passing `debug = true` by hand.

use interleave_core::IsolationLevel;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "interleave.toml";

/// Executor configuration.
///
/// # Example
///
/// ```toml
/// # Isolation level every BEGIN_TX requests (default "read_uncommitted")
/// isolation = "read_uncommitted"
///
/// # Trace each step and the store after it at INFO (default false)
/// debug = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExecutorConfig {
    /// Isolation level passed to `begin_tx`.
    #[serde(default)]
    pub isolation: IsolationLevel,
    /// Trace every step, regardless of the `debug` argument to `execute`.
    #[serde(default)]
    pub debug: bool,
}

impl ExecutorConfig {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the text is not valid TOML or names an
    /// unknown isolation level.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse executor config: {}", e)))
    }

    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Interleave executor configuration
#
# Isolation level requested by every BEGIN_TX.
# Only "read_uncommitted" is implemented by the bundled stores.
isolation = "read_uncommitted"

# Log each executed step and the store snapshot after it at INFO
# (target "interleave::trace"). Does not change scheduling.
debug = false
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_empty_document_is_default() {
        let config = ExecutorConfig::from_toml_str("").unwrap();
        assert_eq!(config, ExecutorConfig::default());
        assert_eq!(config.isolation, IsolationLevel::ReadUncommitted);
        assert!(!config.debug);
    }

    #[test]
    fn test_default_toml_parses_to_default() {
        let config = ExecutorConfig::from_toml_str(ExecutorConfig::default_toml()).unwrap();
        assert_eq!(config, ExecutorConfig::default());
    }

    #[test]
    fn test_parse_all_fields() {
        let config = ExecutorConfig::from_toml_str(
            r#"
isolation = "serializable"
debug = true
"#,
        )
        .unwrap();
        assert_eq!(config.isolation, IsolationLevel::Serializable);
        assert!(config.debug);
    }

    #[test]
    fn test_unknown_isolation_is_rejected() {
        let err = ExecutorConfig::from_toml_str(r#"isolation = "snapshot-ish""#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "debug = true").unwrap();

        let config = ExecutorConfig::from_file(file.path()).unwrap();
        assert!(config.debug);
        assert_eq!(config.isolation, IsolationLevel::ReadUncommitted);
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let err = ExecutorConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = ExecutorConfig {
            isolation: IsolationLevel::ReadCommitted,
            debug: true,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(ExecutorConfig::from_toml_str(&text).unwrap(), config);
    }
}
