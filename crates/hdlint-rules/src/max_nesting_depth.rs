//! Rule to limit syntax tree nesting.
//!
//! # Rationale
//!
//! Deeply nested constructs are hard to follow and usually hide logic that
//! should be split out.
//!
//! # Configuration
//!
//! - `depth`: deepest accepted node, 1 to 1000 (default 20). The root is at
//!   depth 1.
//!
//! Only the outermost node beyond the limit is reported for each subtree.

use hdlint_core::params::{parse_name_values, set_int_range, NamedParam};
use hdlint_core::text::leftmost_leaf;
use hdlint_core::{
    ConfigError, DescribedRule, LintRule, LintRuleDescriptor, LintRuleStatus, LintViolation,
    Symbol, SyntaxTreeContext, SyntaxTreeLintRule, SyntaxTreeNode,
};
use std::collections::BTreeSet;

/// Rule name for max-nesting-depth.
pub const NAME: &str = "max-nesting-depth";

/// Default depth limit.
pub const DEFAULT_DEPTH: i32 = 20;

/// Flags nodes nested deeper than the configured limit.
#[derive(Debug)]
pub struct MaxNestingDepth {
    depth: i32,
    violations: BTreeSet<LintViolation>,
}

impl Default for MaxNestingDepth {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            violations: BTreeSet::new(),
        }
    }
}

impl DescribedRule for MaxNestingDepth {
    fn descriptor() -> LintRuleDescriptor {
        LintRuleDescriptor::new(NAME, "Checks that syntax is not nested too deeply.")
            .with_param("depth", "20", "Deepest accepted nesting")
    }
}

impl LintRule for MaxNestingDepth {
    fn configure(&mut self, configuration: &str) -> Result<(), ConfigError> {
        parse_name_values(
            configuration,
            &mut [NamedParam::new("depth", set_int_range(&mut self.depth, 1, 1000))],
        )
    }

    fn report(&self) -> LintRuleStatus {
        LintRuleStatus::new(self.violations.clone(), &Self::descriptor())
    }
}

impl SyntaxTreeLintRule for MaxNestingDepth {
    fn handle_node(&mut self, node: &SyntaxTreeNode, context: &SyntaxTreeContext<'_>) {
        let limit = usize::try_from(self.depth).unwrap_or(usize::MAX);
        // Depth of this node is its ancestor count plus one.
        if context.len() != limit {
            return;
        }
        let symbol = Symbol::from(node.clone());
        // Leafless subtrees have nothing to anchor on.
        if leftmost_leaf(&symbol).is_none() {
            return;
        }
        let reason = format!("Nesting depth exceeds max: {}", self.depth);
        self.violations
            .insert(LintViolation::from_symbol(&symbol, reason).with_context(context));
    }
}
