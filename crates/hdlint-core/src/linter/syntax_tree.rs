//! Syntax tree linter.

use super::{assert_done, assert_idle, LinterState};
use crate::context::SyntaxTreeContext;
use crate::rule::SyntaxTreeLintRule;
use crate::text::Symbol;
use crate::types::LintRuleStatus;

/// Runs [`SyntaxTreeLintRule`]s over a concrete syntax tree.
///
/// The tree is walked once, depth-first in pre-order. Null children are
/// skipped. While a node's subtree is being visited the node is on top of
/// the [`SyntaxTreeContext`].
#[derive(Default)]
pub struct SyntaxTreeLinter {
    rules: Vec<Box<dyn SyntaxTreeLintRule>>,
    state: LinterState,
}

impl SyntaxTreeLinter {
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
    pub fn add_rule(&mut self, rule: Box<dyn SyntaxTreeLintRule>) {
        assert_idle(self.state, "add a rule");
        self.rules.push(rule);
    }

    /// Number of rules held.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Walks `root`, if any. An absent tree completes without callbacks.
    ///
    /// # Panics
    ///
    /// Panics if the linter has already run.
    pub fn lint(&mut self, root: Option<&Symbol>) {
        assert_idle(self.state, "lint");
        if let Some(root) = root {
            let mut context = SyntaxTreeContext::new();
            visit(&mut self.rules, root, &mut context);
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

enum Step<'a> {
    Visit(&'a Symbol),
    Leave,
}

/// Pre-order walk on an explicit work stack, so tree depth is bounded by
/// memory rather than the call stack.
fn visit<'a>(
    rules: &mut [Box<dyn SyntaxTreeLintRule>],
    root: &'a Symbol,
    context: &mut SyntaxTreeContext<'a>,
) {
    let mut steps = vec![Step::Visit(root)];
    while let Some(step) = steps.pop() {
        let symbol = match step {
            Step::Visit(symbol) => symbol,
            Step::Leave => {
                context.pop();
                continue;
            }
        };
        for rule in rules.iter_mut() {
            rule.handle_symbol(symbol, context);
        }
        if let Symbol::Node(node) = symbol {
            context.push(node);
            steps.push(Step::Leave);
            steps.extend(node.children().iter().flatten().rev().map(Step::Visit));
        }
    }
}
