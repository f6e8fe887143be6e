//! Rule to forbid tokens whose text matches a pattern.
//!
//! # Configuration
//!
//! - `pattern`: regular expression searched in each token's text. Without
//!   a pattern the rule reports nothing.
//!
//! ```text
//! forbidden-token-text=pattern:^\$display$
//! ```

use hdlint_core::params::{parse_name_values, set_regex, NamedParam};
use hdlint_core::{
    ConfigError, DescribedRule, LintRule, LintRuleDescriptor, LintRuleStatus, LintViolation,
    TokenInfo, TokenStreamLintRule,
};
use regex::Regex;
use std::collections::BTreeSet;

/// Rule name for forbidden-token-text.
pub const NAME: &str = "forbidden-token-text";

/// Flags tokens matching the configured pattern.
#[derive(Debug, Default)]
pub struct ForbiddenTokenText {
    pattern: Option<Regex>,
    violations: BTreeSet<LintViolation>,
}

impl DescribedRule for ForbiddenTokenText {
    fn descriptor() -> LintRuleDescriptor {
        LintRuleDescriptor::new(NAME, "Checks that no token matches a forbidden pattern.")
            .with_param("pattern", "", "Regular expression of forbidden token text")
    }
}

impl LintRule for ForbiddenTokenText {
    fn configure(&mut self, configuration: &str) -> Result<(), ConfigError> {
        parse_name_values(
            configuration,
            &mut [NamedParam::new("pattern", set_regex(&mut self.pattern))],
        )
    }

    fn report(&self) -> LintRuleStatus {
        LintRuleStatus::new(self.violations.clone(), &Self::descriptor())
    }
}

impl TokenStreamLintRule for ForbiddenTokenText {
    fn handle_token(&mut self, token: &TokenInfo) {
        let Some(pattern) = &self.pattern else {
            return;
        };
        if token.is_eof() || !pattern.is_match(token.text()) {
            return;
        }
        self.violations.insert(LintViolation::new(
            token.clone(),
            format!("Token '{}' matches forbidden pattern '{pattern}'.", token.text()),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> Vec<TokenInfo> {
        vec![
            TokenInfo::new(1, 0, "$display"),
            TokenInfo::new(2, 8, "("),
            TokenInfo::new(1, 9, "$displayb"),
            TokenInfo::eof("$display($displayb"),
        ]
    }

    fn lint(configuration: &str) -> Vec<(usize, String)> {
        let mut rule = ForbiddenTokenText::default();
        rule.configure(configuration).unwrap();
        for token in &tokens() {
            rule.handle_token(token);
        }
        rule.report()
            .violations
            .iter()
            .map(|v| (v.offset(), v.reason.clone()))
            .collect()
    }

    #[test]
    fn test_unconfigured_reports_nothing() {
        assert!(lint("").is_empty());
    }

    #[test]
    fn test_anchored_pattern() {
        assert_eq!(
            lint(r"pattern:^\$display$"),
            vec![(
                0,
                r"Token '$display' matches forbidden pattern '^\$display$'.".to_string()
            )]
        );
    }

    #[test]
    fn test_unanchored_pattern_matches_all() {
        let offsets: Vec<usize> = lint("pattern:display").iter().map(|(o, _)| *o).collect();
        assert_eq!(offsets, vec![0, 9]);
    }

    #[test]
    fn test_bad_regex_rejected() {
        let mut rule = ForbiddenTokenText::default();
        let err = rule.configure("pattern:(").unwrap_err();
        assert!(err
            .to_string()
            .starts_with("pattern: Failed to parse regular expression:"));
    }
}
