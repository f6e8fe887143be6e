//! Line linter.

use super::{assert_done, assert_idle, LinterState};
use crate::rule::LineLintRule;
use crate::text::Line;
use crate::types::LintRuleStatus;

/// Runs [`LineLintRule`]s over the lines of a file.
#[derive(Default)]
pub struct LineLinter {
    rules: Vec<Box<dyn LineLintRule>>,
    state: LinterState,
}

impl LineLinter {
    /// Creates a linter without rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a configured rule.
    ///
    /// # Panics
    ///
    /// Panics if the linter has already run.
    pub fn add_rule(&mut self, rule: Box<dyn LineLintRule>) {
        assert_idle(self.state, "add a rule");
        self.rules.push(rule);
    }

    /// Number of rules held.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LinterState {
        self.state
    }

    /// Feeds every line to every rule, then finalizes every rule.
    ///
    /// # Panics
    ///
    /// Panics if the linter has already run.
    pub fn lint(&mut self, lines: &[Line<'_>]) {
        assert_idle(self.state, "lint");
        for line in lines {
            for rule in &mut self.rules {
                rule.handle_line(line);
            }
        }
        for rule in &mut self.rules {
            rule.finalize();
        }
        self.state = LinterState::Done;
    }

    /// One status per rule, in the order rules were added.
    ///
    /// # Panics
    ///
    /// Panics if the linter has not run yet.
    #[must_use]
    pub fn report_status(&self) -> Vec<LintRuleStatus> {
        assert_done(self.state);
        self.rules.iter().map(|rule| rule.report()).collect()
    }
}
