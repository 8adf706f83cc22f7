//! # Settings Module
//!
//! ## Purpose
//! Persistent configuration of OxiState: where the element library lives, which oxidation
//! state estimator is used, how duplicate symbols in a formula are treated, how reports are
//! printed and how verbose logging is.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "element_data": "element_data.json",
//!   "policy": "simple",
//!   "duplicate_policy": "overwrite",
//!   "output": "text",
//!   "log_level": "warn"
//! }
//! ```
//! The file `oxistate_config.json` in the working directory is read at startup. If it does not
//! exist the defaults above are used.
//!
//! ## Usage Pattern
//! ```rust, ignore
//! use OxiState::settings::Settings;
//!
//! let mut settings = Settings::new();
//! settings.set_policy("central_atom")?;
//! settings.save_config()?;
//! ```
use crate::Oxidation::estimator_api::{EstimatorEnum, create_estimator_by_name};
use crate::Oxidation::formula_parser::DuplicatePolicy;
use crate::errors::ConfigError;
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "oxistate_config.json";

/// How reports are printed by the terminal front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Table,
}

/// Serializable configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OxiConfig {
    /// path to the JSON element library
    pub element_data: String,
    /// estimator policy name: "simple" or "central_atom"
    pub policy: String,
    pub duplicate_policy: DuplicatePolicy,
    pub output: OutputFormat,
    pub log_level: String,
}

impl Default for OxiConfig {
    fn default() -> Self {
        Self {
            element_data: "element_data.json".to_string(),
            policy: "simple".to_string(),
            duplicate_policy: DuplicatePolicy::Overwrite,
            output: OutputFormat::Text,
            log_level: "warn".to_string(),
        }
    }
}

/// Configuration together with the file it is persisted to
#[derive(Debug, Clone)]
pub struct Settings {
    config: OxiConfig,
    config_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Loads `oxistate_config.json` from the working directory. A malformed file is reported
    /// and replaced by the defaults.
    pub fn new() -> Self {
        let (settings, error) = Self::load_or_default(DEFAULT_CONFIG_FILE);
        if let Some(e) = error {
            warn!("{}, using default settings", e);
        }
        settings
    }

    /// Settings from `config_file`, or the defaults together with the reason the file was
    /// rejected. Lets the caller report the error once its logger is running.
    pub fn load_or_default(config_file: &str) -> (Self, Option<ConfigError>) {
        match Self::with_config_file(config_file) {
            Ok(settings) => (settings, None),
            Err(e) => (
                Self {
                    config: OxiConfig::default(),
                    config_file: config_file.to_string(),
                },
                Some(e),
            ),
        }
    }

    /// # Returns
    /// * `Ok(Settings)` - loaded configuration, or defaults if the file does not exist
    /// * `Err(ConfigError)` - if the file exists but cannot be read or parsed
    pub fn with_config_file(config_file: &str) -> Result<Self, ConfigError> {
        let config = Self::load_config(config_file)?;
        Ok(Self {
            config,
            config_file: config_file.to_string(),
        })
    }

    fn load_config(config_file: &str) -> Result<OxiConfig, ConfigError> {
        if !Path::new(config_file).exists() {
            return Ok(OxiConfig::default());
        }
        let content = fs::read_to_string(config_file).map_err(|source| ConfigError::Io {
            path: config_file.to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: config_file.to_string(),
            source,
        })
    }

    pub fn save_config(&self) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_file, content).map_err(|source| ConfigError::Io {
            path: self.config_file.clone(),
            source,
        })
    }

    pub fn get_config(&self) -> &OxiConfig {
        &self.config
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    pub fn element_data_path(&self) -> &str {
        &self.config.element_data
    }

    /// Points the session at another element library. The file must exist.
    pub fn set_element_data(&mut self, path: &str) -> Result<(), ConfigError> {
        if !Path::new(path).exists() {
            return Err(ConfigError::MissingFile(path.to_string()));
        }
        self.config.element_data = path.to_string();
        Ok(())
    }

    /// estimator named by the configuration
    pub fn estimator(&self) -> Result<EstimatorEnum, ConfigError> {
        create_estimator_by_name(&self.config.policy)
    }

    pub fn set_policy(&mut self, name: &str) -> Result<(), ConfigError> {
        create_estimator_by_name(name)?;
        self.config.policy = name.to_string();
        Ok(())
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.config.duplicate_policy
    }

    pub fn set_duplicate_policy(&mut self, policy: DuplicatePolicy) {
        self.config.duplicate_policy = policy;
    }

    pub fn output(&self) -> OutputFormat {
        self.config.output
    }

    pub fn set_output(&mut self, output: OutputFormat) {
        self.config.output = output;
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.config
            .log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::InvalidLogLevel(self.config.log_level.clone()))
    }

    pub fn reset_to_defaults(&mut self) {
        self.config = OxiConfig::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Oxidation::estimator_api::OxidationEstimator;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_when_file_missing() {
        let settings = Settings::with_config_file("no_such_oxistate_config.json").unwrap();
        assert_eq!(settings.get_config(), &OxiConfig::default());
        assert_eq!(settings.element_data_path(), "element_data.json");
        assert_eq!(settings.estimator().unwrap().name(), "simple");
        assert_eq!(settings.duplicate_policy(), DuplicatePolicy::Overwrite);
        assert_eq!(settings.output(), OutputFormat::Text);
        assert_eq!(settings.log_level_filter().unwrap(), LevelFilter::Warn);
    }

    #[test]
    fn test_load_config_file() {
        let mut temp_config = NamedTempFile::new().unwrap();
        temp_config
            .write_all(
                br#"{"policy": "central_atom", "duplicate_policy": "accumulate", "output": "table"}"#,
            )
            .unwrap();

        let settings = Settings::with_config_file(temp_config.path().to_str().unwrap()).unwrap();
        assert_eq!(settings.estimator().unwrap().name(), "central_atom");
        assert_eq!(settings.duplicate_policy(), DuplicatePolicy::Accumulate);
        assert_eq!(settings.output(), OutputFormat::Table);
        // fields missing from the file keep their defaults
        assert_eq!(settings.element_data_path(), "element_data.json");
    }

    #[test]
    fn test_malformed_config_file() {
        let mut temp_config = NamedTempFile::new().unwrap();
        temp_config.write_all(b"{ \"policy\": ").unwrap();
        let result = Settings::with_config_file(temp_config.path().to_str().unwrap());
        assert!(matches!(result, Err(ConfigError::Json { .. })));
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let mut temp_config = NamedTempFile::new().unwrap();
        temp_config.write_all(b"{ \"policy\": ").unwrap();
        let path = temp_config.path().to_str().unwrap();

        let (settings, error) = Settings::load_or_default(path);
        assert!(matches!(error, Some(ConfigError::Json { .. })));
        assert_eq!(settings.get_config(), &OxiConfig::default());
        assert_eq!(settings.config_file(), path);

        let (_, error) = Settings::load_or_default("no_such_oxistate_config.json");
        assert!(error.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_config = NamedTempFile::new().unwrap();
        let path = temp_config.path().to_str().unwrap().to_string();
        let mut temp_data = NamedTempFile::new().unwrap();
        temp_data.write_all(b"{}").unwrap();
        let data_path = temp_data.path().to_str().unwrap();

        let mut settings = Settings::with_config_file("no_such_oxistate_config.json").unwrap();
        settings.set_policy("B").unwrap();
        settings.set_element_data(data_path).unwrap();
        settings.set_output(OutputFormat::Table);
        settings.config_file = path.clone();
        settings.save_config().unwrap();

        let reloaded = Settings::with_config_file(&path).unwrap();
        assert_eq!(reloaded.get_config().policy, "B");
        assert_eq!(reloaded.element_data_path(), data_path);
        assert_eq!(reloaded.output(), OutputFormat::Table);
    }

    #[test]
    fn test_invalid_updates() {
        let mut settings = Settings::with_config_file("no_such_oxistate_config.json").unwrap();
        assert!(matches!(
            settings.set_policy("quantum"),
            Err(ConfigError::UnknownPolicy(_))
        ));
        assert!(matches!(
            settings.set_element_data("no_such_element_data.json"),
            Err(ConfigError::MissingFile(_))
        ));
        // nothing changed
        assert_eq!(settings.get_config(), &OxiConfig::default());
    }

    #[test]
    fn test_log_level() {
        let mut settings = Settings::with_config_file("no_such_oxistate_config.json").unwrap();
        settings.config.log_level = "debug".to_string();
        assert_eq!(settings.log_level_filter().unwrap(), LevelFilter::Debug);
        settings.config.log_level = "chatty".to_string();
        assert!(matches!(
            settings.log_level_filter(),
            Err(ConfigError::InvalidLogLevel(_))
        ));
        settings.reset_to_defaults();
        assert_eq!(settings.log_level_filter().unwrap(), LevelFilter::Warn);
    }
}
