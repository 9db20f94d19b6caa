//! Converter configuration file support
//!
//! Handles parsing of `.iflow-converter.toml` configuration files and
//! environment variable overrides.

use crate::graph::OrphanPolicy;
use crate::layout::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".iflow-converter.toml";

/// Environment variable for the orphaned-component policy
pub const ENV_ORPHAN_POLICY: &str = "IFLOW_ORPHAN_POLICY";

/// Environment variable for the horizontal layout step
pub const ENV_LAYOUT_STEP_X: &str = "IFLOW_LAYOUT_STEP_X";

/// Error while loading or saving configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Configuration error: {0}")]
    ParseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Graph assembly section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GraphSection {
    /// `warn` (default) or `error`
    #[serde(default)]
    pub orphan_policy: OrphanPolicy,
}

/// Packaging section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PackageSection {
    /// Directory whose files are added as scripts (relative to the config file)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_dir: Option<String>,
}

/// Main configuration structure
///
/// Represents the `.iflow-converter.toml` configuration file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConverterConfig {
    #[serde(default)]
    pub graph: GraphSection,

    /// Diagram placement
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub package: PackageSection,
}

impl ConverterConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with the given orphan policy
    pub fn with_orphan_policy(orphan_policy: OrphanPolicy) -> Self {
        Self {
            graph: GraphSection { orphan_policy },
            ..Default::default()
        }
    }

    /// Load configuration from a directory
    ///
    /// Looks for `.iflow-converter.toml` in `dir`.
    /// Falls back to defaults if not found.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILENAME);
        if config_path.exists() {
            Self::load_file(&config_path)
        } else {
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Load configuration from an explicit file path
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::IoError(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let mut config = Self::parse(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse config: {}", e)))?;

        let step_x = config.layout.step_x;
        if step_x.is_nan() || step_x <= 0.0 {
            return Err(ConfigError::ParseError(format!(
                "layout.step_x must be greater than 0, got {}",
                step_x
            )));
        }
        Ok(config)
    }

    /// Save configuration to a directory
    pub fn save(&self, dir: &Path) -> Result<(), ConfigError> {
        let config_path = dir.join(CONFIG_FILENAME);
        let content = self.to_toml()?;

        std::fs::write(&config_path, content)
            .map_err(|e| ConfigError::IoError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::SerializationError(format!("Failed to serialize config: {}", e))
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides from any variable source; unparsable values are ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(policy) = lookup(ENV_ORPHAN_POLICY)
            && let Ok(policy) = policy.parse()
        {
            self.graph.orphan_policy = policy;
        }

        if let Some(step) = lookup(ENV_LAYOUT_STEP_X)
            && let Ok(step) = step.parse::<f64>()
            && step > 0.0
        {
            self.layout.step_x = step;
        }
    }

    /// Resolve the script directory against `base`
    pub fn script_dir(&self, base: &Path) -> Option<PathBuf> {
        let dir = self.package.script_dir.as_deref()?;
        if Path::new(dir).is_absolute() {
            Some(PathBuf::from(dir))
        } else {
            Some(base.join(dir))
        }
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# iFlow converter configuration

[graph]
# What to do with components that no sequence flow touches:
# "warn" (default) renders them and reports a warning, "error" fails the conversion
orphan_policy = "warn"

[layout]
# Position of the first shape and horizontal distance between shapes
origin_x = 100.0
origin_y = 100.0
step_x = 200.0

[package]
# Files in this directory are added under src/main/resources/script/
# script_dir = "scripts"
"#
}
