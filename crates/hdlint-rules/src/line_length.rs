//! Rule to limit line length.
//!
//! # Rationale
//!
//! Long lines are hard to read side by side and in review tools.
//!
//! # Configuration
//!
//! - `length`: longest accepted line in characters, 40 to 1000 (default 100)
//!
//! Lines holding nothing but a `//` comment are exempt, as are lines whose
//! trailing comment carries an `hdlint` waiver.

use hdlint_core::params::{parse_name_values, set_int_range, NamedParam};
use hdlint_core::{
    ConfigError, DescribedRule, Line, LineLintRule, LintRule, LintRuleDescriptor, LintRuleStatus,
    LintViolation,
};
use std::collections::BTreeSet;

/// Rule name for line-length.
pub const NAME: &str = "line-length";

/// Default line length limit.
pub const DEFAULT_LENGTH: i32 = 100;

const MINIMUM_LENGTH: i32 = 40;
const MAXIMUM_LENGTH: i32 = 1000;

/// Flags lines longer than the configured limit.
#[derive(Debug)]
pub struct LineLength {
    length: i32,
    violations: BTreeSet<LintViolation>,
}

impl Default for LineLength {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            violations: BTreeSet::new(),
        }
    }
}

fn is_exempt(text: &str) -> bool {
    let trimmed = text.trim_start();
    if trimmed.starts_with("//") {
        return true;
    }
    text.rfind("//")
        .is_some_and(|start| text[start + 2..].trim_start().starts_with("hdlint"))
}

impl DescribedRule for LineLength {
    fn descriptor() -> LintRuleDescriptor {
        LintRuleDescriptor::new(
            NAME,
            "Checks that all lines do not exceed the maximum allowed length.",
        )
        .with_topic("line-length")
        .with_param("length", "100", "Desired line length")
    }
}

impl LintRule for LineLength {
    fn configure(&mut self, configuration: &str) -> Result<(), ConfigError> {
        parse_name_values(
            configuration,
            &mut [NamedParam::new(
                "length",
                set_int_range(&mut self.length, MINIMUM_LENGTH, MAXIMUM_LENGTH),
            )],
        )
    }

    fn report(&self) -> LintRuleStatus {
        LintRuleStatus::new(self.violations.clone(), &Self::descriptor())
    }
}

impl LineLintRule for LineLength {
    fn handle_line(&mut self, line: &Line<'_>) {
        let text = line.text();
        let text = text.strip_suffix('\r').unwrap_or(text);
        let observed = text.chars().count();
        let limit = usize::try_from(self.length).unwrap_or(usize::MAX);
        if observed <= limit || is_exempt(text) {
            return;
        }
        // Anchor at the first character past the limit.
        let Some((start, _)) = text.char_indices().nth(limit) else {
            return;
        };
        self.violations.insert(LintViolation::new(
            line.sub_token(start..text.len()),
            format!("Line length exceeds max: {}; is: {observed}", self.length),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdlint_core::text::split_lines;

    fn lint(configuration: &str, text: &str) -> Vec<(usize, String)> {
        let mut rule = LineLength::default();
        rule.configure(configuration).unwrap();
        for line in split_lines(text) {
            rule.handle_line(&line);
        }
        rule.report()
            .violations
            .iter()
            .map(|v| (v.offset(), v.reason.clone()))
            .collect()
    }

    #[test]
    fn test_default_limit() {
        let ok = "x".repeat(100);
        let long = "y".repeat(101);
        let text = format!("{ok}\n{long}\n");
        assert_eq!(
            lint("", &text),
            vec![(201, "Line length exceeds max: 100; is: 101".to_string())]
        );
    }

    #[test]
    fn test_configured_limit() {
        let text = format!("{}\n", "a".repeat(45));
        assert_eq!(
            lint("length:40", &text),
            vec![(40, "Line length exceeds max: 40; is: 45".to_string())]
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = format!("{}\n", "ä".repeat(40));
        assert!(lint("length:40", &text).is_empty());
    }

    #[test]
    fn test_comment_lines_exempt() {
        let comment = format!("  // {}\n", "c".repeat(60));
        let waived = format!("assign a = {}; // hdlint waive line-length\n", "b".repeat(40));
        assert!(lint("length:40", &comment).is_empty());
        assert!(lint("length:40", &waived).is_empty());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut rule = LineLength::default();
        let err = rule.configure("length:39").unwrap_err();
        assert_eq!(err.to_string(), "length: 39 out of range [40...1000]");
        let err = rule.configure("width:80").unwrap_err();
        assert_eq!(
            err.to_string(),
            "width: unknown parameter; supported parameter is 'length'"
        );
    }
}
