//! Configuration file and configuration errors.
//!
//! An `hdlint.toml` file expresses the same choices as the command line:
//!
//! ```toml
//! ruleset = "default"
//! rules = ["-no-tabs", "line-length=length:120"]
//! rules_config_search = true
//! waiver_files = ["lint.waiver"]
//!
//! [[policies]]
//! name = "third-party"
//! path_substrings = ["third_party/"]
//! disabled_rules = ["line-length"]
//! ```

use crate::configuration::{LinterOptions, ProjectPolicy, RuleBundle, RuleSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base rule set.
    pub ruleset: RuleSet,

    /// Rule entries applied on top of the rule set, as `[+|-]name[=config]`.
    pub rules: Vec<String>,

    /// Explicit rules file, in the `.rules.hdlint` format.
    pub rules_config: Option<PathBuf>,

    /// Search for a `.rules.hdlint` file upward from each linted file.
    pub rules_config_search: bool,

    /// External waiver files.
    pub waiver_files: Vec<PathBuf>,

    /// Per-path rule adjustments.
    pub policies: Vec<ProjectPolicy>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Renders this configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Builds the options for linting `start_file`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRules`] if a rule entry names an unknown
    /// rule.
    pub fn to_options(&self, start_file: &Path) -> Result<LinterOptions, ConfigError> {
        let mut rules = RuleBundle::default();
        rules.parse_configuration(&self.rules.join(","), ',')?;
        Ok(LinterOptions {
            ruleset: self.ruleset,
            rules,
            config_file: self.rules_config.clone(),
            rules_config_search: self.rules_config_search,
            linting_start_file: start_file.to_path_buf(),
            waiver_files: self.waiver_files.clone(),
        })
    }
}

/// A rule whose configuration string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfigFailure {
    /// The rule name.
    pub rule: String,
    /// Why its configuration was rejected.
    pub message: String,
}

impl fmt::Display for RuleConfigFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.rule, self.message)
    }
}

fn join_lines(items: &[impl fmt::Display]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading a configuration file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in a configuration file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A configuration string was given to a rule that takes none.
    #[error("rule does not support configuration, got {configuration:?}")]
    NotConfigurable {
        /// The rejected configuration.
        configuration: String,
    },

    /// A rule rejected a parameter.
    #[error("{0}")]
    InvalidParameter(String),

    /// A rules list named unknown rules.
    #[error("{}", .errors.join("\n"))]
    InvalidRules {
        /// One `[ERR]` line per unknown rule.
        errors: Vec<String>,
        /// Warnings produced while parsing.
        warnings: Vec<String>,
    },

    /// One or more enabled rules rejected their configuration.
    #[error("{}", join_lines(.0))]
    RuleConfigurations(Vec<RuleConfigFailure>),

    /// A rule set name other than `all`, `none` or `default`.
    #[error("unknown rule set '{0}', expected one of: all, none, default")]
    UnknownRuleSet(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_rules::register_test_rules;

    #[test]
    fn test_parse_full_config() {
        register_test_rules();
        let config = Config::parse(
            r#"
ruleset = "none"
rules = ["test-rule-1", "-test-rule-2"]
rules_config_search = true
waiver_files = ["a.waiver"]

[[policies]]
name = "vendor"
path_substrings = ["vendor/"]
disabled_rules = ["test-rule-1"]
"#,
        )
        .unwrap();
        assert_eq!(config.ruleset, RuleSet::None);
        assert_eq!(config.rules.len(), 2);
        assert!(config.rules_config_search);
        assert_eq!(config.policies.len(), 1);
        assert_eq!(config.policies[0].disabled_rules, vec!["test-rule-1"]);

        let options = config.to_options(Path::new("top.sv")).unwrap();
        assert_eq!(options.ruleset, RuleSet::None);
        assert!(options.rules.rules["test-rule-1"].enabled);
        assert!(!options.rules.rules["test-rule-2"].enabled);
        assert_eq!(options.waiver_files, vec![PathBuf::from("a.waiver")]);
        assert_eq!(options.linting_start_file, PathBuf::from("top.sv"));
    }

    #[test]
    fn test_empty_config_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.ruleset, RuleSet::Default);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Config::parse("rulez = []").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_bad_ruleset_rejected() {
        assert!(Config::parse(r#"ruleset = "most""#).is_err());
    }

    #[test]
    fn test_unknown_rule_in_options() {
        register_test_rules();
        let config = Config {
            rules: vec!["not-a-rule".to_string()],
            ..Config::default()
        };
        let err = config.to_options(Path::new("x.sv")).unwrap_err();
        assert_eq!(err.to_string(), "[ERR] Invalid flag \"not-a-rule\"");
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file(Path::new("/nonexistent/hdlint.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            ruleset: RuleSet::All,
            rules: vec!["-no-tabs".to_string()],
            ..Config::default()
        };
        let text = config.to_toml().unwrap();
        assert_eq!(Config::parse(&text).unwrap(), config);
    }

    #[test]
    fn test_rule_configuration_failures_display() {
        let err = ConfigError::RuleConfigurations(vec![
            RuleConfigFailure {
                rule: "a".to_string(),
                message: "bad".to_string(),
            },
            RuleConfigFailure {
                rule: "b".to_string(),
                message: "worse".to_string(),
            },
        ]);
        assert_eq!(err.to_string(), "a: bad\nb: worse");
    }
}
