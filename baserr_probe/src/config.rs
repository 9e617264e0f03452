//! Probe file loading.
//!
//! Probe files are TOML. They share the `[shared]` section layout used by
//! every binary in this workspace and add an ordered catch table plus the
//! probes to run through it.
//!
//! # Usage
//!
//! ```rust,no_run
//! use baserr_probe::config::{ConfigError, ConfigLoader, ProbeConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = ProbeConfig::load(Path::new("config/probe.toml"))?;
//!     config.validate()?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::family::{FamilyMember, TargetName};

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, includes every ancestry link visited.
    Trace,
    /// Reports which catch clause fired.
    Debug,
    /// One line per probe.
    #[default]
    Info,
    /// Failed probes only.
    Warn,
    /// Fatal errors only.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Common configuration fields.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "baserr-probe-01"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// One error to build and route through the catch table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeCase {
    /// Unique probe name, used in the report.
    pub name: String,

    /// Family member to build.
    pub error: FamilyMember,

    /// Message carried by the built error.
    #[serde(default)]
    pub message: String,

    /// Clause expected to catch the error. Absent means "not caught".
    #[serde(default)]
    pub expect: Option<TargetName>,
}

/// Full probe file.
///
/// # TOML Example
///
/// ```toml
/// catch_order = ["disk_full", "storage", "root"]
///
/// [shared]
/// service_name = "baserr-probe"
///
/// [[probe]]
/// name = "full disk"
/// error = "disk_full"
/// message = "no space left on /var"
/// expect = "disk_full"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    pub shared: SharedConfig,

    /// Catch clauses, most specific first.
    pub catch_order: Vec<TargetName>,

    #[serde(default, rename = "probe")]
    pub probes: Vec<ProbeCase>,
}

impl ProbeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - the shared section is invalid
    /// - `catch_order` is empty or lists a target twice
    /// - two probes share a name
    /// - a probe expects a target missing from `catch_order`
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;

        if self.catch_order.is_empty() {
            return Err(ConfigError::ValidationError(
                "catch_order cannot be empty".to_string(),
            ));
        }

        let mut targets = HashSet::new();
        for target in &self.catch_order {
            if !targets.insert(*target) {
                return Err(ConfigError::ValidationError(format!(
                    "catch_order lists '{target}' more than once"
                )));
            }
        }

        let mut names = HashSet::new();
        for probe in &self.probes {
            if !names.insert(probe.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate probe name '{}'",
                    probe.name
                )));
            }
            if let Some(expect) = probe.expect {
                if !targets.contains(&expect) {
                    return Err(ConfigError::ValidationError(format!(
                        "probe '{}' expects '{expect}', which is not in catch_order",
                        probe.name
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config(probes: Vec<ProbeCase>) -> ProbeConfig {
        ProbeConfig {
            shared: SharedConfig {
                log_level: LogLevel::Info,
                service_name: "test-probe".to_string(),
            },
            catch_order: vec![TargetName::DiskFull, TargetName::Storage, TargetName::Root],
            probes,
        }
    }

    fn probe(name: &str, expect: Option<TargetName>) -> ProbeCase {
        ProbeCase {
            name: name.to_string(),
            error: FamilyMember::DiskFull,
            message: String::new(),
            expect,
        }
    }

    #[test]
    fn test_log_level_default() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_log_level_deserialization() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct TestWrapper {
            level: LogLevel,
        }

        for (text, level) in [
            ("trace", LogLevel::Trace),
            ("debug", LogLevel::Debug),
            ("info", LogLevel::Info),
            ("warn", LogLevel::Warn),
            ("error", LogLevel::Error),
        ] {
            let parsed: TestWrapper = toml::from_str(&format!("level = \"{text}\"")).unwrap();
            assert_eq!(parsed.level, level);
        }
    }

    #[test]
    fn test_log_level_to_tracing() {
        assert_eq!(tracing::Level::from(LogLevel::Trace), tracing::Level::TRACE);
        assert_eq!(tracing::Level::from(LogLevel::Warn), tracing::Level::WARN);
    }

    #[test]
    fn test_shared_config_validation_empty_service_name() {
        let config = SharedConfig {
            log_level: LogLevel::Info,
            service_name: "".to_string(),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_probe_config_validation_success() {
        let config = config(vec![
            probe("a", Some(TargetName::DiskFull)),
            probe("b", None),
        ]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_probe_config_empty_catch_order() {
        let mut config = config(vec![]);
        config.catch_order.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_probe_config_duplicate_target() {
        let mut config = config(vec![]);
        config.catch_order.push(TargetName::Storage);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(msg)) if msg.contains("storage")
        ));
    }

    #[test]
    fn test_probe_config_duplicate_probe_name() {
        let config = config(vec![probe("same", None), probe("same", None)]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(msg)) if msg.contains("same")
        ));
    }

    #[test]
    fn test_probe_config_expectation_outside_catch_order() {
        let config = config(vec![probe("net", Some(TargetName::Network))]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(msg)) if msg.contains("network")
        ));
    }

    #[test]
    fn test_config_loader_file_not_found() {
        let result = ProbeConfig::load(Path::new("/nonexistent/path/probe.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound)));
    }

    #[test]
    fn test_config_loader_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid toml {{{{").unwrap();

        let result = ProbeConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_config_loader_rejects_unknown_member() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"catch_order = ["root"]

[shared]
service_name = "test-probe"

[[probe]]
name = "bogus"
error = "printer_on_fire"
"#
        )
        .unwrap();
        file.flush().unwrap();

        let result = ProbeConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_config_loader_success() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"catch_order = ["disk_full", "storage", "any"]

[shared]
log_level = "debug"
service_name = "test-probe"

[[probe]]
name = "full disk"
error = "disk_full"
message = "no space left"
expect = "disk_full"

[[probe]]
name = "bare root"
error = "root"
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = ProbeConfig::load(file.path()).unwrap();
        assert_eq!(config.shared.log_level, LogLevel::Debug);
        assert_eq!(
            config.catch_order,
            [TargetName::DiskFull, TargetName::Storage, TargetName::Any]
        );
        assert_eq!(config.probes.len(), 2);
        assert_eq!(config.probes[0].message, "no space left");
        assert_eq!(config.probes[1].expect, None);
        assert_eq!(config.probes[1].message, "");
        assert!(config.validate().is_ok());
    }
}
