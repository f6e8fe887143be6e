//! Whole-file linter.

use super::{assert_done, assert_idle, LinterState};
use crate::rule::TextStructureLintRule;
use crate::text::TextStructureView;
use crate::types::LintRuleStatus;

/// Runs [`TextStructureLintRule`]s, each once, over a whole file.
#[derive(Default)]
pub struct TextStructureLinter {
    rules: Vec<Box<dyn TextStructureLintRule>>,
    state: LinterState,
}

impl TextStructureLinter {
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
    pub fn add_rule(&mut self, rule: Box<dyn TextStructureLintRule>) {
        assert_idle(self.state, "add a rule");
        self.rules.push(rule);
    }

    /// Number of rules held.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Hands the complete file to every rule.
    ///
    /// # Panics
    ///
    /// Panics if the linter has already run.
    pub fn lint(&mut self, text_structure: &TextStructureView, filename: &str) {
        assert_idle(self.state, "lint");
        for rule in &mut self.rules {
            rule.lint(text_structure, filename);
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
