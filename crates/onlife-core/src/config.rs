//! Configuration loading and typed config structures for the `OnLife` server.
//!
//! The configuration lives in `onlife-config.yaml` (or the path named by
//! `ONLIFE_CONFIG`). Every section and field has a default, so an empty or
//! missing file yields a runnable server on `0.0.0.0:8080` with a random
//! 5x5 grid.
//!
//! ```yaml
//! server:
//!   host: "0.0.0.0"
//!   port: 8080
//! world:
//!   name: "OnLife"
//!   width: 5
//!   height: 5
//!   seed: 42
//!   scenario: "scenarios/ring.json"
//!   layout: random
//!   save_on_exit: "snapshots/last.json"
//! logging:
//!   level: info
//!   format: text
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "ONLIFE_CONFIG";

/// Configuration file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "onlife-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is not usable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OnlifeConfig {
    /// Listen address.
    #[serde(default)]
    pub server: ListenConfig,

    /// Initial grid selection and persistence.
    #[serde(default)]
    pub world: WorldConfig,

    /// Log level and output format.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl OnlifeConfig {
    /// Load configuration from a YAML file, then apply environment overrides.
    ///
    /// Environment variables:
    /// - `ONLIFE_HOST` overrides `server.host`
    /// - `ONLIFE_PORT` overrides `server.port`
    /// - `ONLIFE_SCENARIO` overrides `world.scenario`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if an override or value is unusable.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `$ONLIFE_CONFIG` or `onlife-config.yaml`, falling back to
    /// defaults (plus environment overrides) when the file does not exist.
    ///
    /// # Errors
    ///
    /// Same as [`from_file`](Self::from_file).
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
        if path.exists() {
            return Self::from_file(&path);
        }
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `ONLIFE_PORT` is not a port number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the port override is not a port number.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("ONLIFE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("ONLIFE_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("ONLIFE_PORT={port:?}: {e}")))?;
        }
        if let Some(scenario) = lookup("ONLIFE_SCENARIO") {
            self.world.scenario = (!scenario.is_empty()).then(|| PathBuf::from(scenario));
        }
        Ok(())
    }

    /// Reject configurations that cannot produce a grid.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a random grid is requested
    /// with a zero dimension.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let random = self.world.scenario.is_none() && self.world.layout == Layout::Random;
        if random && (self.world.width == 0 || self.world.height == 0) {
            return Err(ConfigError::Invalid(format!(
                "random grid needs a non-zero size, got {}x{}",
                self.world.width, self.world.height
            )));
        }
        Ok(())
    }
}

/// Listen address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListenConfig {
    /// Host or IP to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Built-in starting layouts used when no scenario document is configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Every cell drawn uniformly from the five kinds.
    #[default]
    Random,
    /// The 5x5 water-ringed grass field with a central fire.
    Demo,
}

/// Initial grid selection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Name written into saved scenarios.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random grid width.
    #[serde(default = "default_grid_size")]
    pub width: usize,

    /// Random grid height.
    #[serde(default = "default_grid_size")]
    pub height: usize,

    /// Seed for the random grid. Unseeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Scenario document to load. Takes precedence over `layout`.
    #[serde(default)]
    pub scenario: Option<PathBuf>,

    /// Layout used when `scenario` is absent.
    #[serde(default)]
    pub layout: Layout,

    /// Where to save the final grid on graceful shutdown.
    #[serde(default)]
    pub save_on_exit: Option<PathBuf>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            width: default_grid_size(),
            height: default_grid_size(),
            seed: None,
            scenario: None,
            layout: Layout::default(),
            save_on_exit: None,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}

fn default_world_name() -> String {
    String::from("OnLife")
}

const fn default_grid_size() -> usize {
    onlife_world::DEFAULT_GRID_SIZE
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = OnlifeConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.world.width, 5);
        assert_eq!(config.world.height, 5);
        assert_eq!(config.world.layout, Layout::Random);
        assert!(config.world.scenario.is_none());
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_yaml_yields_defaults() {
        assert_eq!(OnlifeConfig::parse("").unwrap(), OnlifeConfig::default());
        assert_eq!(OnlifeConfig::parse("{}").unwrap(), OnlifeConfig::default());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 9000
world:
  name: "Ring"
  width: 12
  height: 8
  seed: 99
  scenario: "scenarios/ring.json"
  layout: demo
  save_on_exit: "out.json"
logging:
  level: debug
  format: json
"#;
        let config = OnlifeConfig::parse(yaml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.world.name, "Ring");
        assert_eq!(config.world.width, 12);
        assert_eq!(config.world.height, 8);
        assert_eq!(config.world.seed, Some(99));
        assert_eq!(
            config.world.scenario.as_deref(),
            Some(Path::new("scenarios/ring.json"))
        );
        assert_eq!(config.world.layout, Layout::Demo);
        assert_eq!(config.world.save_on_exit.as_deref(), Some(Path::new("out.json")));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = OnlifeConfig::parse("server:\n  port: 3000\n").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.world, WorldConfig::default());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let err = OnlifeConfig::parse("server: [unterminated").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn overrides_replace_values() {
        let env: BTreeMap<&str, &str> = [
            ("ONLIFE_HOST", "127.0.0.1"),
            ("ONLIFE_PORT", "9999"),
            ("ONLIFE_SCENARIO", "ring.json"),
        ]
        .into_iter()
        .collect();
        let mut config = OnlifeConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| (*v).to_owned()))
            .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.world.scenario.as_deref(), Some(Path::new("ring.json")));
    }

    #[test]
    fn empty_scenario_override_clears_scenario() {
        let mut config = OnlifeConfig::default();
        config.world.scenario = Some(PathBuf::from("a.json"));
        config
            .apply_overrides(|key| (key == "ONLIFE_SCENARIO").then(String::new))
            .unwrap();
        assert!(config.world.scenario.is_none());
    }

    #[test]
    fn bad_port_override_is_rejected() {
        let mut config = OnlifeConfig::default();
        let err = config
            .apply_overrides(|key| (key == "ONLIFE_PORT").then(|| String::from("http")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_sized_random_grid_is_rejected() {
        let mut config = OnlifeConfig::default();
        config.world.width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        // A scenario or the demo layout ignores width/height.
        config.world.layout = Layout::Demo;
        assert!(config.validate().is_ok());
    }
}
