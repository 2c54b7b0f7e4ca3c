//! Configuration file layer
//!
//! Provides TOML-based configuration mapped onto the domain snapshot.
//! Categories and type matchers use string forms in the file.

use super::{NotifierConfig, ThrottleConfig, TypeMatcher};
use crate::error::{ConfigError, Result};
use crate::fault::FaultCategory;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    /// Email settings
    pub email: EmailSection,
    /// Throttle settings
    pub throttle: ThrottleSection,
}

/// Email settings section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSection {
    /// Enable or disable emailing of faults
    pub enabled: bool,
    /// Categories eligible for notification (string forms: "exception",
    /// "error", "warning", "notice", "strict", "deprecated")
    pub categories: Vec<String>,
    /// Types that should never be emailed
    pub skip_email: Vec<String>,
    /// The host's "do not log" types; also never emailed
    pub skip_log: Vec<String>,
    /// Recipient address
    pub to_address: Option<String>,
    /// Sender address
    pub from_address: Option<String>,
    /// Environment label for subjects and payload fields
    pub environment: Option<String>,
    /// Site label for subjects and payload fields
    pub site: Option<String>,
}

impl Default for EmailSection {
    fn default() -> Self {
        Self {
            enabled: false,
            categories: vec!["exception".to_string(), "error".to_string()],
            skip_email: Vec::new(),
            skip_log: Vec::new(),
            to_address: None,
            from_address: None,
            environment: None,
            site: None,
        }
    }
}

/// Throttle settings section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleSection {
    /// Enable or disable throttling
    pub enabled: bool,
    /// Dedup window in seconds
    pub window_secs: u64,
    /// Types exempt from throttling
    pub skip: Vec<String>,
}

impl Default for ThrottleSection {
    fn default() -> Self {
        Self {
            enabled: false,
            window_secs: 300,
            skip: Vec::new(),
        }
    }
}

impl ConfigFile {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(format!("{}", e)))?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(file)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(format!("Failed to serialize: {}", e)))?;

        fs::write(path.as_ref(), contents)?;

        Ok(())
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("faultmail").join("faultmail.toml")
        } else {
            PathBuf::from("faultmail.toml")
        }
    }

    /// Convert to the domain snapshot, validating string forms
    pub fn to_notifier_config(&self) -> Result<NotifierConfig> {
        let categories = self
            .email
            .categories
            .iter()
            .map(|s| parse_category(s))
            .collect::<std::result::Result<_, _>>()?;

        Ok(NotifierConfig {
            email_enabled: self.email.enabled,
            categories,
            skip_email: parse_matchers(&self.email.skip_email),
            skip_log: parse_matchers(&self.email.skip_log),
            throttle: ThrottleConfig {
                enabled: self.throttle.enabled,
                window: Duration::from_secs(self.throttle.window_secs),
                skip: parse_matchers(&self.throttle.skip),
            },
            to_address: self.email.to_address.clone(),
            from_address: self.email.from_address.clone(),
            environment_label: self.email.environment.clone(),
            site_label: self.email.site.clone(),
        })
    }
}

fn parse_matchers(patterns: &[String]) -> Vec<TypeMatcher> {
    patterns.iter().map(|p| TypeMatcher::parse(p)).collect()
}

fn parse_category(name: &str) -> std::result::Result<FaultCategory, ConfigError> {
    match name.to_lowercase().as_str() {
        "exception" => Ok(FaultCategory::Exception),
        "error" => Ok(FaultCategory::FatalError),
        "warning" => Ok(FaultCategory::Warning),
        "notice" => Ok(FaultCategory::Notice),
        "strict" => Ok(FaultCategory::Strict),
        "deprecated" => Ok(FaultCategory::Deprecated),
        _ => Err(ConfigError::InvalidValue {
            key: "email.categories".to_string(),
            message: format!("Unknown fault category: {}", name),
        }),
    }
}
