//! Rule interfaces, one per input representation.
//!
//! A rule is a stateful accumulator: it is configured once, fed every unit
//! of its representation by a linter, then asked for its [`LintRuleStatus`].
//!
//! # Example
//!
//! ```ignore
//! use hdlint_core::{
//!     DescribedRule, Line, LineLintRule, LintRule, LintRuleDescriptor, LintRuleStatus,
//!     LintViolation,
//! };
//! use std::collections::BTreeSet;
//!
//! #[derive(Default)]
//! pub struct NoEmptyLines {
//!     violations: BTreeSet<LintViolation>,
//! }
//!
//! impl DescribedRule for NoEmptyLines {
//!     fn descriptor() -> LintRuleDescriptor {
//!         LintRuleDescriptor::new("no-empty-lines", "Flags empty lines.")
//!     }
//! }
//!
//! impl LintRule for NoEmptyLines {
//!     fn report(&self) -> LintRuleStatus {
//!         LintRuleStatus::new(self.violations.clone(), &Self::descriptor())
//!     }
//! }
//!
//! impl LineLintRule for NoEmptyLines {
//!     fn handle_line(&mut self, line: &Line<'_>) {
//!         if line.is_empty() {
//!             self.violations.insert(LintViolation::new(line.to_token(), "empty line"));
//!         }
//!     }
//! }
//! ```

use crate::config::ConfigError;
use crate::context::SyntaxTreeContext;
use crate::text::{Line, Symbol, SyntaxTreeLeaf, SyntaxTreeNode, TextStructureView, TokenInfo};
use crate::types::LintRuleStatus;

/// Describes one configuration parameter of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintConfigParameterDescriptor {
    /// Parameter name, as used in `name:value`.
    pub name: &'static str,
    /// Value used when the parameter is not configured.
    pub default_value: &'static str,
    /// What the parameter controls.
    pub description: &'static str,
}

/// Static documentation of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintRuleDescriptor {
    /// The rule id used in configuration.
    pub name: &'static str,
    /// Style guide topic the rule enforces.
    pub topic: &'static str,
    /// Description of what the rule checks.
    pub desc: &'static str,
    /// Accepted configuration parameters.
    pub param: Vec<LintConfigParameterDescriptor>,
}

impl LintRuleDescriptor {
    /// Creates a descriptor without topic or parameters.
    #[must_use]
    pub fn new(name: &'static str, desc: &'static str) -> Self {
        Self {
            name,
            desc,
            ..Self::default()
        }
    }

    /// Sets the style guide topic.
    #[must_use]
    pub fn with_topic(mut self, topic: &'static str) -> Self {
        self.topic = topic;
        self
    }

    /// Adds a configuration parameter.
    #[must_use]
    pub fn with_param(
        mut self,
        name: &'static str,
        default_value: &'static str,
        description: &'static str,
    ) -> Self {
        self.param.push(LintConfigParameterDescriptor {
            name,
            default_value,
            description,
        });
        self
    }
}

/// Returns the documentation pointer reported with a rule's status.
#[must_use]
pub fn style_guide_citation(topic: &str) -> String {
    if topic.is_empty() {
        String::new()
    } else {
        format!("[Style: {topic}]")
    }
}

/// Implemented by concrete rule types to expose their descriptor for registration.
pub trait DescribedRule {
    /// Returns the rule's descriptor.
    fn descriptor() -> LintRuleDescriptor;
}

/// Behavior shared by all rule kinds.
pub trait LintRule: Send + Sync {
    /// Applies a `name:value;...` configuration string.
    ///
    /// Called once, before any input is handled. The default accepts only
    /// the empty string.
    ///
    /// # Errors
    ///
    /// Returns an error describing the offending key or value.
    fn configure(&mut self, configuration: &str) -> Result<(), ConfigError> {
        if configuration.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::NotConfigurable {
                configuration: configuration.to_string(),
            })
        }
    }

    /// Returns the violations collected so far.
    fn report(&self) -> LintRuleStatus;
}

/// A rule fed one physical line at a time.
pub trait LineLintRule: LintRule {
    /// Called for each line, in file order.
    fn handle_line(&mut self, line: &Line<'_>);

    /// Called exactly once after the last line, even for empty input.
    fn finalize(&mut self) {}
}

/// A rule fed one token at a time.
pub trait TokenStreamLintRule: LintRule {
    /// Called for each token of the stream, in order.
    fn handle_token(&mut self, token: &TokenInfo);
}

/// A rule fed every symbol of the syntax tree, with its ancestor context.
///
/// The context is valid only for the duration of the call.
pub trait SyntaxTreeLintRule: LintRule {
    /// Called for each leaf by the default [`Self::handle_symbol`].
    fn handle_leaf(&mut self, _leaf: &SyntaxTreeLeaf, _context: &SyntaxTreeContext<'_>) {}

    /// Called for each node by the default [`Self::handle_symbol`].
    fn handle_node(&mut self, _node: &SyntaxTreeNode, _context: &SyntaxTreeContext<'_>) {}

    /// Called for each symbol in pre-order.
    fn handle_symbol(&mut self, symbol: &Symbol, context: &SyntaxTreeContext<'_>) {
        match symbol {
            Symbol::Leaf(leaf) => self.handle_leaf(leaf, context),
            Symbol::Node(node) => self.handle_node(node, context),
        }
    }
}

/// A rule that inspects the whole file at once.
pub trait TextStructureLintRule: LintRule {
    /// Called exactly once with every representation of the file.
    fn lint(&mut self, text_structure: &TextStructureView, filename: &str);
}
