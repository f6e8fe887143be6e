//! Token stream linter.

use super::{assert_done, assert_idle, LinterState};
use crate::rule::TokenStreamLintRule;
use crate::text::TokenInfo;
use crate::types::LintRuleStatus;

/// Runs [`TokenStreamLintRule`]s over a token sequence.
#[derive(Default)]
pub struct TokenStreamLinter {
    rules: Vec<Box<dyn TokenStreamLintRule>>,
    state: LinterState,
}

impl TokenStreamLinter {
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
    pub fn add_rule(&mut self, rule: Box<dyn TokenStreamLintRule>) {
        assert_idle(self.state, "add a rule");
        self.rules.push(rule);
    }

    /// Number of rules held.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Feeds every token to every rule.
    ///
    /// The caller decides which tokens the sequence contains.
    ///
    /// # Panics
    ///
    /// Panics if the linter has already run.
    pub fn lint<'t>(&mut self, tokens: impl IntoIterator<Item = &'t TokenInfo>) {
        assert_idle(self.state, "lint");
        for token in tokens {
            for rule in &mut self.rules {
                rule.handle_token(token);
            }
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
