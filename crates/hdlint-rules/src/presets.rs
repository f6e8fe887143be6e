//! Rule presets for common configurations.

use crate::{
    forbidden_token_text, line_length, max_nesting_depth, no_tabs, no_trailing_spaces, posix_eof,
};
use hdlint_core::{RuleBundle, RuleSetting};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Preset configurations for `hdlint init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// The default rule set with its default parameters.
    #[default]
    Recommended,
    /// Every rule, with tighter limits.
    Strict,
    /// Whitespace rules only, for gradual adoption.
    Minimal,
}

impl Preset {
    /// All presets.
    pub const ALL: [Self; 3] = [Self::Recommended, Self::Strict, Self::Minimal];

    /// Returns the rule entries of this preset.
    #[must_use]
    pub fn rules(self) -> RuleBundle {
        let entries: &[(&str, &str)] = match self {
            Self::Recommended => &[
                (line_length::NAME, ""),
                (no_tabs::NAME, ""),
                (no_trailing_spaces::NAME, ""),
                (posix_eof::NAME, ""),
            ],
            Self::Strict => &[
                (line_length::NAME, "length:80"),
                (no_tabs::NAME, ""),
                (no_trailing_spaces::NAME, ""),
                (posix_eof::NAME, ""),
                (forbidden_token_text::NAME, r"pattern:^\$display$"),
                (max_nesting_depth::NAME, "depth:10"),
            ],
            Self::Minimal => &[(no_tabs::NAME, ""), (no_trailing_spaces::NAME, "")],
        };
        RuleBundle {
            rules: entries
                .iter()
                .map(|(name, config)| ((*name).to_string(), RuleSetting::on(*config)))
                .collect(),
        }
    }

    /// Rule entries in `[+|-]name[=config]` form.
    #[must_use]
    pub fn rule_entries(self) -> Vec<String> {
        self.rules()
            .unparse_configuration(',', false)
            .split(',')
            .map(str::to_string)
            .collect()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::Minimal => "minimal",
        })
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.to_string() == s)
            .ok_or_else(|| {
                format!("unknown preset '{s}', expected one of: recommended, strict, minimal")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register_builtin_rules;
    use hdlint_core::LinterConfiguration;

    #[test]
    fn test_preset_rules() {
        for preset in Preset::ALL {
            assert!(!preset.rules().rules.is_empty(), "{preset}");
        }
        assert_eq!(
            Preset::Minimal.rule_entries(),
            vec!["no-tabs", "no-trailing-spaces"]
        );
    }

    #[test]
    fn test_strict_configurations_are_accepted() {
        register_builtin_rules();
        let mut config = LinterConfiguration::new();
        config.use_rule_bundle(&Preset::Strict.rules());
        assert_eq!(config.active_rule_ids().len(), 6);
        assert!(config.create_line_rules().is_ok());
        assert!(config.create_token_stream_rules().is_ok());
        assert!(config.create_syntax_tree_rules().is_ok());
    }

    #[test]
    fn test_recommended_matches_default_set() {
        let names: Vec<String> = Preset::Recommended.rules().rules.into_keys().collect();
        assert_eq!(names, crate::DEFAULT_RULE_SET);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("strict".parse::<Preset>(), Ok(Preset::Strict));
        assert!("lax".parse::<Preset>().is_err());
        assert_eq!(Preset::Minimal.to_string(), "minimal");
    }
}
