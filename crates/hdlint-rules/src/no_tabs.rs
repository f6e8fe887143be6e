//! Rule to forbid tab characters.
//!
//! # Rationale
//!
//! Tabs render at different widths in different editors, so indentation
//! and alignment made with them drift. Only the first tab of a line is
//! reported.

use hdlint_core::{
    DescribedRule, Line, LineLintRule, LintRule, LintRuleDescriptor, LintRuleStatus, LintViolation,
};
use std::collections::BTreeSet;

/// Rule name for no-tabs.
pub const NAME: &str = "no-tabs";

const MESSAGE: &str = "Use spaces, not tabs.";

/// Flags lines containing a tab character.
#[derive(Debug, Default)]
pub struct NoTabs {
    violations: BTreeSet<LintViolation>,
}

impl DescribedRule for NoTabs {
    fn descriptor() -> LintRuleDescriptor {
        LintRuleDescriptor::new(
            NAME,
            "Checks that no tabs are used. Spaces should be used instead of tabs.",
        )
        .with_topic("tabs")
    }
}

impl LintRule for NoTabs {
    fn report(&self) -> LintRuleStatus {
        LintRuleStatus::new(self.violations.clone(), &Self::descriptor())
    }
}

impl LineLintRule for NoTabs {
    fn handle_line(&mut self, line: &Line<'_>) {
        if let Some(column) = line.text().find('\t') {
            self.violations
                .insert(LintViolation::new(line.sub_token(column..column + 1), MESSAGE));
        }
    }
}
