//! Rules registered for unit tests inside this crate.

use crate::config::ConfigError;
use crate::context::SyntaxTreeContext;
use crate::params::{parse_name_values, set_int_range, NamedParam};
use crate::registry::{
    register_line_rule, register_syntax_tree_rule, register_text_structure_rule,
    register_token_stream_rule, set_default_rule_set,
};
use crate::rule::{
    DescribedRule, LineLintRule, LintRule, LintRuleDescriptor, SyntaxTreeLintRule,
    TextStructureLintRule, TokenStreamLintRule,
};
use crate::text::{Line, SyntaxTreeLeaf, TextStructureView, TokenInfo};
use crate::types::{LintRuleStatus, LintViolation};
use std::collections::BTreeSet;
use std::sync::Once;

/// Flags empty lines.
#[derive(Default)]
pub struct TestRule1 {
    violations: BTreeSet<LintViolation>,
}

impl DescribedRule for TestRule1 {
    fn descriptor() -> LintRuleDescriptor {
        LintRuleDescriptor::new("test-rule-1", "Flags empty lines.").with_topic("blank-lines")
    }
}

impl LintRule for TestRule1 {
    fn report(&self) -> LintRuleStatus {
        LintRuleStatus::new(self.violations.clone(), &Self::descriptor())
    }
}

impl LineLintRule for TestRule1 {
    fn handle_line(&mut self, line: &Line<'_>) {
        if line.is_empty() {
            self.violations
                .insert(LintViolation::new(line.to_token(), "empty line"));
        }
    }
}

/// Flags lines longer than `max`.
pub struct TestRule2 {
    max: i32,
    violations: BTreeSet<LintViolation>,
}

impl Default for TestRule2 {
    fn default() -> Self {
        Self {
            max: 80,
            violations: BTreeSet::new(),
        }
    }
}

impl DescribedRule for TestRule2 {
    fn descriptor() -> LintRuleDescriptor {
        LintRuleDescriptor::new("test-rule-2", "Flags long lines.").with_param(
            "max",
            "80",
            "Longest accepted line",
        )
    }
}

impl LintRule for TestRule2 {
    fn configure(&mut self, configuration: &str) -> Result<(), ConfigError> {
        parse_name_values(
            configuration,
            &mut [NamedParam::new("max", set_int_range(&mut self.max, 1, 1000))],
        )
    }

    fn report(&self) -> LintRuleStatus {
        LintRuleStatus::new(self.violations.clone(), &Self::descriptor())
    }
}

impl LineLintRule for TestRule2 {
    fn handle_line(&mut self, line: &Line<'_>) {
        let max = usize::try_from(self.max).unwrap_or(usize::MAX);
        if line.text().len() > max {
            self.violations
                .insert(LintViolation::new(line.to_token(), "line too long"));
        }
    }
}

/// Flags tokens spelled `forbidden`.
#[derive(Default)]
pub struct TestTokenRule {
    violations: BTreeSet<LintViolation>,
}

impl DescribedRule for TestTokenRule {
    fn descriptor() -> LintRuleDescriptor {
        LintRuleDescriptor::new("test-token-rule", "Flags forbidden tokens.")
    }
}

impl LintRule for TestTokenRule {
    fn report(&self) -> LintRuleStatus {
        LintRuleStatus::new(self.violations.clone(), &Self::descriptor())
    }
}

impl TokenStreamLintRule for TestTokenRule {
    fn handle_token(&mut self, token: &TokenInfo) {
        if token.text() == "forbidden" {
            self.violations
                .insert(LintViolation::new(token.clone(), "forbidden token"));
        }
    }
}

/// Flags leaves spelled `bad`.
#[derive(Default)]
pub struct TestTreeRule {
    violations: BTreeSet<LintViolation>,
}

impl DescribedRule for TestTreeRule {
    fn descriptor() -> LintRuleDescriptor {
        LintRuleDescriptor::new("test-tree-rule", "Flags bad leaves.")
    }
}

impl LintRule for TestTreeRule {
    fn report(&self) -> LintRuleStatus {
        LintRuleStatus::new(self.violations.clone(), &Self::descriptor())
    }
}

impl SyntaxTreeLintRule for TestTreeRule {
    fn handle_leaf(&mut self, leaf: &SyntaxTreeLeaf, context: &SyntaxTreeContext<'_>) {
        if leaf.token().text() == "bad" {
            self.violations.insert(
                LintViolation::new(leaf.token().clone(), "bad leaf").with_context(context),
            );
        }
    }
}

/// Flags empty files.
#[derive(Default)]
pub struct TestTextRule {
    violations: BTreeSet<LintViolation>,
}

impl DescribedRule for TestTextRule {
    fn descriptor() -> LintRuleDescriptor {
        LintRuleDescriptor::new("test-text-rule", "Flags empty files.")
    }
}

impl LintRule for TestTextRule {
    fn report(&self) -> LintRuleStatus {
        LintRuleStatus::new(self.violations.clone(), &Self::descriptor())
    }
}

impl TextStructureLintRule for TestTextRule {
    fn lint(&mut self, text_structure: &TextStructureView, _filename: &str) {
        if text_structure.contents().is_empty() {
            self.violations.insert(LintViolation::new(
                text_structure.eof_token().clone(),
                "empty file",
            ));
        }
    }
}

/// Registers the test rules once per test binary.
pub fn register_test_rules() {
    static REGISTER: Once = Once::new();
    REGISTER.call_once(|| {
        register_line_rule::<TestRule1>();
        register_line_rule::<TestRule2>();
        register_token_stream_rule::<TestTokenRule>();
        register_syntax_tree_rule::<TestTreeRule>();
        register_text_structure_rule::<TestTextRule>();
        set_default_rule_set(&["test-rule-1", "test-token-rule"]);
    });
}
