//! Which rules run, and how they are configured.
//!
//! A [`LinterConfiguration`] starts from a [`RuleSet`], is adjusted by
//! [`RuleBundle`]s parsed from the command line or a `.rules.hdlint` file,
//! and may be further adjusted per file by a [`ProjectPolicy`]. It then
//! creates configured rule instances for each of the four rule kinds.

use crate::config::{ConfigError, RuleConfigFailure};
use crate::registry::{
    all_registered_lint_rule_names, create_rule, default_rule_set, is_registered_lint_rule,
    RuleKind,
};
use crate::rule::{
    LineLintRule, LintRule, SyntaxTreeLintRule, TextStructureLintRule, TokenStreamLintRule,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

/// Name of the rules file searched for upward from a linted file.
pub const RULES_CONFIG_FILE_NAME: &str = ".rules.hdlint";

const STRAY_COMMA_WARNING: &str = "[WARN] Ignoring stray comma at the end of configuration";
const REPEATED_FLAG_WARNING: &str =
    "[WARN] Repeated flag in the configuration. Last provided value will be used";
const INVALID_FLAG_ERROR: &str = "[ERR] Invalid flag";

/// Base set of rules to enable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSet {
    /// Every registered rule.
    All,
    /// No rules.
    None,
    /// The curated default list.
    #[default]
    Default,
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::All => "all",
            Self::None => "none",
            Self::Default => "default",
        };
        f.write_str(name)
    }
}

impl FromStr for RuleSet {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "none" => Ok(Self::None),
            "default" => Ok(Self::Default),
            other => Err(ConfigError::UnknownRuleSet(other.to_string())),
        }
    }
}

/// Whether a rule is enabled, and its configuration string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSetting {
    /// Whether the rule runs.
    pub enabled: bool,
    /// Configuration passed to the rule's `configure`.
    pub configuration: String,
}

impl RuleSetting {
    /// An enabled rule with the given configuration.
    #[must_use]
    pub fn on(configuration: impl Into<String>) -> Self {
        Self {
            enabled: true,
            configuration: configuration.into(),
        }
    }

    /// A disabled rule with the given configuration.
    #[must_use]
    pub fn off(configuration: impl Into<String>) -> Self {
        Self {
            enabled: false,
            configuration: configuration.into(),
        }
    }
}

/// A set of rule settings, keyed by rule name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleBundle {
    /// Settings by rule name.
    pub rules: BTreeMap<String, RuleSetting>,
}

fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}

impl RuleBundle {
    /// Parses `[+|-]name[=config]` entries separated by `separator` into
    /// this bundle.
    ///
    /// `#` starts a comment running to the end of the line. A leading `+` or
    /// no sign enables the rule, `-` disables it. Entries naming unknown
    /// rules are reported while every known entry is still applied. When a
    /// rule is given twice with different configurations the last one wins.
    ///
    /// Returns the warnings produced.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRules`] if any entry names an unknown
    /// rule.
    pub fn parse_configuration(
        &mut self,
        text: &str,
        separator: char,
    ) -> Result<Vec<String>, ConfigError> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for raw in text.split(separator) {
            let mut part = raw.split_once('#').map_or(raw, |(before, _)| before).trim();
            if separator == '\n' {
                let stripped = part.trim_end_matches(',').trim_end();
                if stripped.len() != part.len() {
                    warnings.push(STRAY_COMMA_WARNING.to_string());
                    part = stripped;
                }
            }
            if part.is_empty() {
                continue;
            }

            let (enabled, rest) = if let Some(rest) = part.strip_prefix('-') {
                (false, rest)
            } else if let Some(rest) = part.strip_prefix('+') {
                (true, rest)
            } else {
                (true, part)
            };
            let (name, configuration) = match rest.split_once('=') {
                Some((name, configuration)) => (name.trim(), strip_quotes(configuration.trim())),
                None => (rest.trim(), ""),
            };

            if !is_registered_lint_rule(name) {
                errors.push(format!("{INVALID_FLAG_ERROR} \"{name}\""));
                continue;
            }
            if let Some(previous) = self.rules.get(name) {
                if !previous.configuration.is_empty() && previous.configuration != configuration {
                    warnings.push(format!("{REPEATED_FLAG_WARNING} \"{name}\""));
                }
            }
            self.rules.insert(
                name.to_string(),
                RuleSetting {
                    enabled,
                    configuration: configuration.to_string(),
                },
            );
        }

        for warning in &warnings {
            warn!("{warning}");
        }
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigError::InvalidRules { errors, warnings })
        }
    }

    /// Renders the bundle back to `[-]name[=config]` entries, sorted by
    /// name, descending when `reverse` is set.
    #[must_use]
    pub fn unparse_configuration(&self, separator: char, reverse: bool) -> String {
        let entries = self.rules.iter().map(|(name, setting)| {
            let sign = if setting.enabled { "" } else { "-" };
            if setting.configuration.is_empty() {
                format!("{sign}{name}")
            } else {
                format!("{sign}{name}={}", setting.configuration)
            }
        });
        let entries: Vec<String> = if reverse {
            entries.rev().collect()
        } else {
            entries.collect()
        };
        entries.join(&separator.to_string())
    }
}

/// Rule adjustments for files whose path matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectPolicy {
    /// Name shown in logs.
    pub name: String,
    /// The policy applies to paths containing any of these.
    pub path_substrings: Vec<String>,
    /// The policy never applies to paths containing any of these.
    pub path_exclusions: Vec<String>,
    /// People responsible for the policy.
    pub owners: Vec<String>,
    /// Rules turned off by the policy.
    pub disabled_rules: Vec<String>,
    /// Rules turned on by the policy. Wins over `disabled_rules`.
    pub enabled_rules: Vec<String>,
}

fn first_substring_match<'a>(filename: &str, items: &'a [String]) -> Option<&'a str> {
    items
        .iter()
        .map(String::as_str)
        .find(|item| filename.contains(item))
}

impl ProjectPolicy {
    /// The first path substring contained in `filename`.
    #[must_use]
    pub fn matches_any_path(&self, filename: &str) -> Option<&str> {
        first_substring_match(filename, &self.path_substrings)
    }

    /// The first exclusion contained in `filename`.
    #[must_use]
    pub fn matches_any_exclusions(&self, filename: &str) -> Option<&str> {
        first_substring_match(filename, &self.path_exclusions)
    }

    /// Returns true if every rule the policy names is registered.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.disabled_rules
            .iter()
            .chain(&self.enabled_rules)
            .all(|rule| is_registered_lint_rule(rule))
    }

    /// The path substrings rendered as globs, e.g. `*a* | *b*`.
    #[must_use]
    pub fn list_path_globs(&self) -> String {
        self.path_substrings
            .iter()
            .map(|pattern| format!("*{pattern}*"))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Inputs to [`LinterConfiguration::configure_from_options`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinterOptions {
    /// Base rule set.
    pub ruleset: RuleSet,
    /// Adjustments applied last.
    pub rules: RuleBundle,
    /// Explicit rules file.
    pub config_file: Option<PathBuf>,
    /// Search for [`RULES_CONFIG_FILE_NAME`] upward from `linting_start_file`.
    pub rules_config_search: bool,
    /// The file about to be linted.
    pub linting_start_file: PathBuf,
    /// External waiver files.
    pub waiver_files: Vec<PathBuf>,
}

/// The rules to run on one file.
#[derive(Debug, Clone, Default)]
pub struct LinterConfiguration {
    configuration: BTreeMap<String, RuleSetting>,
    external_waivers: Vec<PathBuf>,
}

impl LinterConfiguration {
    /// A configuration with no rules enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables `rule`, keeping any configuration it has.
    pub fn turn_on(&mut self, rule: &str) {
        self.configuration.entry(rule.to_string()).or_default().enabled = true;
    }

    /// Disables `rule`. Disabling an unknown or inactive rule is a no-op.
    pub fn turn_off(&mut self, rule: &str) {
        if let Some(setting) = self.configuration.get_mut(rule) {
            setting.enabled = false;
        }
    }

    /// Returns true if `rule` is enabled.
    #[must_use]
    pub fn rule_is_on(&self, rule: &str) -> bool {
        self.configuration
            .get(rule)
            .is_some_and(|setting| setting.enabled)
    }

    /// Replaces all settings with `rules`.
    pub fn use_rule_set(&mut self, rules: RuleSet) {
        self.configuration.clear();
        let names = match rules {
            RuleSet::All => all_registered_lint_rule_names(),
            RuleSet::None => BTreeSet::new(),
            RuleSet::Default => default_rule_set(),
        };
        for name in names {
            self.turn_on(&name);
        }
    }

    /// Applies every setting of `bundle`, overriding existing ones.
    pub fn use_rule_bundle(&mut self, bundle: &RuleBundle) {
        for (name, setting) in &bundle.rules {
            self.configuration.insert(name.clone(), setting.clone());
        }
    }

    /// The current settings as a bundle.
    #[must_use]
    pub fn get_rule_bundle(&self) -> RuleBundle {
        RuleBundle {
            rules: self.configuration.clone(),
        }
    }

    /// Applies `policy` if `filename` matches it.
    ///
    /// An exclusion match vetoes the policy. Otherwise, on a path match,
    /// the disabled rules are turned off and then the enabled rules on.
    pub fn use_project_policy(&mut self, policy: &ProjectPolicy, filename: &str) {
        if let Some(exclusion) = policy.matches_any_exclusions(filename) {
            debug!(
                file = filename,
                exclusion,
                policy = %policy.name,
                "file excluded from project policy"
            );
            return;
        }
        let Some(matched) = policy.matches_any_path(filename) else {
            return;
        };
        debug!(
            file = filename,
            path = matched,
            policy = %policy.name,
            "applying project policy"
        );
        for rule in &policy.disabled_rules {
            debug!(rule = %rule, "disabling rule");
            self.turn_off(rule);
        }
        for rule in &policy.enabled_rules {
            debug!(rule = %rule, "enabling rule");
            self.turn_on(rule);
        }
    }

    /// Names of the enabled rules.
    #[must_use]
    pub fn active_rule_ids(&self) -> BTreeSet<String> {
        self.configuration
            .iter()
            .filter(|(_, setting)| setting.enabled)
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn create_rules<K: RuleKind + LintRule + ?Sized>(&self) -> Result<Vec<Box<K>>, ConfigError> {
        let mut rules = Vec::new();
        let mut failures = Vec::new();
        for (name, setting) in self.configuration.iter().filter(|(_, s)| s.enabled) {
            let Some(mut rule) = create_rule::<K>(name) else {
                continue;
            };
            match rule.configure(&setting.configuration) {
                Ok(()) => rules.push(rule),
                Err(e) => failures.push(RuleConfigFailure {
                    rule: name.clone(),
                    message: e.to_string(),
                }),
            }
        }
        if failures.is_empty() {
            Ok(rules)
        } else {
            Err(ConfigError::RuleConfigurations(failures))
        }
    }

    /// Configured instances of every enabled line rule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RuleConfigurations`] listing every rule that
    /// rejected its configuration.
    pub fn create_line_rules(&self) -> Result<Vec<Box<dyn LineLintRule>>, ConfigError> {
        self.create_rules()
    }

    /// Configured instances of every enabled token stream rule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RuleConfigurations`] listing every rule that
    /// rejected its configuration.
    pub fn create_token_stream_rules(
        &self,
    ) -> Result<Vec<Box<dyn TokenStreamLintRule>>, ConfigError> {
        self.create_rules()
    }

    /// Configured instances of every enabled syntax tree rule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RuleConfigurations`] listing every rule that
    /// rejected its configuration.
    pub fn create_syntax_tree_rules(
        &self,
    ) -> Result<Vec<Box<dyn SyntaxTreeLintRule>>, ConfigError> {
        self.create_rules()
    }

    /// Configured instances of every enabled text structure rule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RuleConfigurations`] listing every rule that
    /// rejected its configuration.
    pub fn create_text_structure_rules(
        &self,
    ) -> Result<Vec<Box<dyn TextStructureLintRule>>, ConfigError> {
        self.create_rules()
    }

    /// External waiver files to apply.
    #[must_use]
    pub fn external_waivers(&self) -> &[PathBuf] {
        &self.external_waivers
    }

    /// Reads a rules file (one entry per line) and applies it.
    ///
    /// Returns the warnings produced.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or names unknown rules.
    pub fn append_from_file(&mut self, path: &Path) -> Result<Vec<String>, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut bundle = RuleBundle::default();
        let warnings = bundle.parse_configuration(&content, '\n')?;
        debug!(path = %path.display(), rules = bundle.rules.len(), "loaded rules file");
        self.use_rule_bundle(&bundle);
        Ok(warnings)
    }

    /// Applies `options` in order: the rule set, a rules file found by
    /// search, the explicit rules file, the inline bundle, then the waiver
    /// files.
    ///
    /// # Errors
    ///
    /// Returns an error if a rules file cannot be read or names unknown
    /// rules.
    pub fn configure_from_options(&mut self, options: &LinterOptions) -> Result<(), ConfigError> {
        self.use_rule_set(options.ruleset);

        if options.rules_config_search {
            if let Some(found) = find_rules_config(&options.linting_start_file) {
                self.append_from_file(&found)?;
            }
        }
        if let Some(config_file) = &options.config_file {
            self.append_from_file(config_file)?;
        }
        self.use_rule_bundle(&options.rules);

        if !options.waiver_files.is_empty() {
            self.external_waivers.clone_from(&options.waiver_files);
        }
        Ok(())
    }
}

/// Finds [`RULES_CONFIG_FILE_NAME`] in the directory of `start_file` or the
/// nearest ancestor that has one.
#[must_use]
pub fn find_rules_config(start_file: &Path) -> Option<PathBuf> {
    let start = match start_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    start
        .ancestors()
        .map(|dir| dir.join(RULES_CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

impl PartialEq for LinterConfiguration {
    fn eq(&self, other: &Self) -> bool {
        self.active_rule_ids() == other.active_rule_ids()
    }
}

impl fmt::Display for LinterConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules = self.active_rule_ids().into_iter().collect::<Vec<_>>();
        write!(f, "{{ {} }}", rules.join(", "))
    }
}
