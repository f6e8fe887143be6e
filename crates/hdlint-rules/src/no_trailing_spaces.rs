//! Rule to forbid whitespace at the end of a line.
//!
//! # Rationale
//!
//! Trailing whitespace is invisible, yet it shows up in diffs.
//!
//! # Autofix
//!
//! Deletes the trailing whitespace.

use hdlint_core::{
    AutoFix, DescribedRule, Line, LineLintRule, LintRule, LintRuleDescriptor, LintRuleStatus,
    LintViolation, ReplacementEdit,
};
use std::collections::BTreeSet;

/// Rule name for no-trailing-spaces.
pub const NAME: &str = "no-trailing-spaces";

const MESSAGE: &str = "Remove trailing spaces.";

/// Flags spaces and tabs before the end of a line.
#[derive(Debug, Default)]
pub struct NoTrailingSpaces {
    violations: BTreeSet<LintViolation>,
}

impl DescribedRule for NoTrailingSpaces {
    fn descriptor() -> LintRuleDescriptor {
        LintRuleDescriptor::new(NAME, "Checks that there are no trailing spaces on any lines.")
            .with_topic("trailing-spaces")
    }
}

impl LintRule for NoTrailingSpaces {
    fn report(&self) -> LintRuleStatus {
        LintRuleStatus::new(self.violations.clone(), &Self::descriptor())
    }
}

impl LineLintRule for NoTrailingSpaces {
    fn handle_line(&mut self, line: &Line<'_>) {
        // A CR before the newline belongs to the line ending.
        let text = line.text();
        let content = text.strip_suffix('\r').unwrap_or(text);
        let trimmed = content.trim_end_matches([' ', '\t']);
        if trimmed.len() == content.len() {
            return;
        }
        let token = line.sub_token(trimmed.len()..content.len());
        let fix = AutoFix::single(
            "Remove trailing spaces",
            ReplacementEdit::deletion(token.byte_range()),
        );
        self.violations
            .insert(LintViolation::new(token, MESSAGE).with_autofix(fix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdlint_core::text::split_lines;

    fn lint(text: &str) -> LintRuleStatus {
        let mut rule = NoTrailingSpaces::default();
        for line in split_lines(text) {
            rule.handle_line(&line);
        }
        rule.finalize();
        rule.report()
    }

    #[test]
    fn test_clean_lines() {
        assert!(lint("a\n\nb\r\n").is_ok());
    }

    #[test]
    fn test_anchored_at_first_trailing_space() {
        let status = lint("wire a;  \nwire b;\t\nwire c;\n");
        let offsets: Vec<usize> = status.violations.iter().map(LintViolation::offset).collect();
        assert_eq!(offsets, vec![7, 17]);
    }

    #[test]
    fn test_autofix_deletes_whitespace_only() {
        let text = "wire a;  \r\nwire b; \n";
        let status = lint(text);
        let mut fixed = text.to_string();
        for violation in status.violations.iter().rev() {
            fixed = violation.autofixes[0].apply(&fixed);
        }
        assert_eq!(fixed, "wire a;\r\nwire b;\n");
    }

    #[test]
    fn test_whitespace_only_line() {
        let status = lint("   \n");
        let violation = status.violations.iter().next().unwrap();
        assert_eq!(violation.offset(), 0);
        assert_eq!(violation.token.text(), "   ");
    }
}
