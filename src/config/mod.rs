//! Configuration system
//!
//! Domain configuration for the notification engine: one read-only snapshot
//! passed into the engine at construction, no ambient global lookup. The
//! TOML file layer lives in [`file`].

pub mod file;

pub use file::ConfigFile;

use crate::error::ConfigError;
use crate::fault::FaultCategory;
use std::collections::BTreeSet;
use std::time::Duration;

/// Default throttle window (5 minutes)
pub const DEFAULT_THROTTLE_WINDOW: Duration = Duration::from_secs(300);

/// Matcher for fault type names in deny-lists
///
/// Entries are either exact fully-qualified names or trailing-`*` prefix
/// globs ("App\\Exception\\*"). Prefix globs stand in for the subtype checks
/// the flat type name cannot express.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeMatcher {
    /// Exact type-name match
    Exact(String),
    /// Prefix match, parsed from a trailing-`*` pattern
    Prefix(String),
}

impl TypeMatcher {
    /// Parse a matcher from its string form
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix('*') {
            Some(prefix) => Self::Prefix(prefix.to_string()),
            None => Self::Exact(pattern.to_string()),
        }
    }

    /// Check whether a type name matches this entry
    pub fn matches(&self, type_name: &str) -> bool {
        match self {
            Self::Exact(name) => type_name == name,
            Self::Prefix(prefix) => type_name.starts_with(prefix),
        }
    }

    /// Render back to the string form used in config files
    pub fn pattern(&self) -> String {
        match self {
            Self::Exact(name) => name.clone(),
            Self::Prefix(prefix) => format!("{}*", prefix),
        }
    }
}

/// Check whether a type name matches any entry in a deny-list
pub fn in_deny_list(list: &[TypeMatcher], type_name: &str) -> bool {
    list.iter().any(|m| m.matches(type_name))
}

/// Throttling configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrottleConfig {
    /// Whether throttling is enabled
    pub enabled: bool,
    /// Sliding dedup window; repeats of a fingerprint inside it are dropped
    pub window: Duration,
    /// Types exempt from throttling
    pub skip: Vec<TypeMatcher>,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            window: DEFAULT_THROTTLE_WINDOW,
            skip: Vec::new(),
        }
    }
}

/// Engine configuration snapshot, read-only after load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Global toggle; false suppresses everything
    pub email_enabled: bool,
    /// Category allow-list; empty means nothing is ever eligible
    pub categories: BTreeSet<FaultCategory>,
    /// Types never emailed, regardless of recurrence
    pub skip_email: Vec<TypeMatcher>,
    /// The host's "do not log" list; implies "do not email"
    pub skip_log: Vec<TypeMatcher>,
    /// Throttling settings
    pub throttle: ThrottleConfig,
    /// Recipient address override
    pub to_address: Option<String>,
    /// Sender address override
    pub from_address: Option<String>,
    /// Environment label appended to subjects and exposed in payload fields
    pub environment_label: Option<String>,
    /// Site label appended to subjects and exposed in payload fields
    pub site_label: Option<String>,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            email_enabled: false,
            categories: BTreeSet::new(),
            skip_email: Vec::new(),
            skip_log: Vec::new(),
            throttle: ThrottleConfig::default(),
            to_address: None,
            from_address: None,
            environment_label: None,
            site_label: None,
        }
    }
}

impl NotifierConfig {
    /// Validate the snapshot at startup
    ///
    /// When emailing is enabled, delivery addresses must be present; when
    /// throttling is enabled, the window must be non-zero. Raised once at
    /// startup; the resulting fault is self-suppressed by the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.email_enabled {
            if self.to_address.is_none() {
                return Err(ConfigError::MissingField("to_address".to_string()));
            }
            if self.from_address.is_none() {
                return Err(ConfigError::MissingField("from_address".to_string()));
            }
        }
        if self.throttle.enabled && self.throttle.window.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "throttle.window_secs".to_string(),
                message: "throttle window must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Check whether a category is in the allow-list
    pub fn category_enabled(&self, category: FaultCategory) -> bool {
        self.categories.contains(&category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_matcher_exact() {
        let matcher = TypeMatcher::parse("App\\Exception\\PaymentError");
        assert!(matcher.matches("App\\Exception\\PaymentError"));
        assert!(!matcher.matches("App\\Exception\\PaymentErrorExtra"));
        assert!(!matcher.matches("App\\Exception"));
    }

    #[test]
    fn test_type_matcher_prefix() {
        let matcher = TypeMatcher::parse("App\\Exception\\*");
        assert!(matcher.matches("App\\Exception\\PaymentError"));
        assert!(matcher.matches("App\\Exception\\Nested\\Inner"));
        assert!(!matcher.matches("Other\\Exception\\PaymentError"));
    }

    #[test]
    fn test_type_matcher_pattern_round_trip() {
        assert_eq!(TypeMatcher::parse("Foo").pattern(), "Foo");
        assert_eq!(TypeMatcher::parse("Foo\\*").pattern(), "Foo\\*");
    }

    #[test]
    fn test_in_deny_list() {
        let list = vec![
            TypeMatcher::parse("App\\NotFound"),
            TypeMatcher::parse("App\\Http\\*"),
        ];
        assert!(in_deny_list(&list, "App\\NotFound"));
        assert!(in_deny_list(&list, "App\\Http\\Timeout"));
        assert!(!in_deny_list(&list, "App\\Payment"));
    }

    #[test]
    fn test_default_config_disabled() {
        let config = NotifierConfig::default();
        assert!(!config.email_enabled);
        assert!(!config.throttle.enabled);
        assert_eq!(config.throttle.window, DEFAULT_THROTTLE_WINDOW);
        assert!(config.categories.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_addresses_when_enabled() {
        let config = NotifierConfig {
            email_enabled: true,
            ..NotifierConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField(field)) if field == "to_address"
        ));

        let config = NotifierConfig {
            email_enabled: true,
            to_address: Some("dev@example.com".to_string()),
            ..NotifierConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField(field)) if field == "from_address"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let config = NotifierConfig {
            throttle: ThrottleConfig {
                enabled: true,
                window: Duration::ZERO,
                skip: Vec::new(),
            },
            ..NotifierConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_category_enabled() {
        let mut config = NotifierConfig::default();
        config.categories.insert(FaultCategory::Exception);
        assert!(config.category_enabled(FaultCategory::Exception));
        assert!(!config.category_enabled(FaultCategory::Warning));
    }
}
