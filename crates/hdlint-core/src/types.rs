//! Core types for lint violations and per-rule results.

use crate::autofix::AutoFix;
use crate::context::SyntaxTreeContext;
use crate::rule::{style_guide_citation, LintRuleDescriptor};
use crate::text::{leftmost_leaf, Symbol, SyntaxTreeNode, TokenInfo, WeakSymbol};
use miette::{Diagnostic, SourceSpan};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// One reported instance of a rule's check failing.
///
/// Violations compare and order by the start offset of their anchor token
/// only. Two violations anchored at the same offset are equal, so a
/// violation set keeps just one of them.
///
/// A violation raised against a syntax tree must not outlive that tree:
/// `root` is a weak reference and `context` holds node handles.
#[derive(Debug, Clone)]
pub struct LintViolation {
    /// Subtree the violation was raised against, if any.
    pub root: Option<WeakSymbol>,
    /// Token the violation is anchored to.
    pub token: TokenInfo,
    /// Human-readable explanation.
    pub reason: String,
    /// Ancestors of the offending symbol, root first. Empty for non-tree rules.
    pub context: Vec<SyntaxTreeNode>,
    /// Proposed fixes, alternatives to each other.
    pub autofixes: Vec<AutoFix>,
    /// Other tokens referenced by `@` markers in the reason.
    pub related_tokens: Vec<TokenInfo>,
}

impl LintViolation {
    /// Creates a violation anchored at `token`.
    #[must_use]
    pub fn new(token: TokenInfo, reason: impl Into<String>) -> Self {
        Self {
            root: None,
            token,
            reason: reason.into(),
            context: Vec::new(),
            autofixes: Vec::new(),
            related_tokens: Vec::new(),
        }
    }

    /// Creates a violation against a subtree, anchored at its leftmost leaf.
    ///
    /// # Panics
    ///
    /// Panics if the subtree contains no leaves.
    #[must_use]
    pub fn from_symbol(root: &Symbol, reason: impl Into<String>) -> Self {
        let Some(leaf) = leftmost_leaf(root) else {
            panic!("cannot anchor a violation on a subtree without leaves");
        };
        let mut violation = Self::new(leaf.token().clone(), reason);
        violation.root = Some(root.downgrade());
        violation
    }

    /// Records a copy of the ancestor chain.
    #[must_use]
    pub fn with_context(mut self, context: &SyntaxTreeContext<'_>) -> Self {
        self.context = context.to_vec();
        self
    }

    /// Adds a proposed fix.
    #[must_use]
    pub fn with_autofix(mut self, autofix: AutoFix) -> Self {
        self.autofixes.push(autofix);
        self
    }

    /// Sets the proposed fixes.
    #[must_use]
    pub fn with_autofixes(mut self, autofixes: Vec<AutoFix>) -> Self {
        self.autofixes = autofixes;
        self
    }

    /// Sets the related tokens.
    #[must_use]
    pub fn with_related_tokens(mut self, tokens: Vec<TokenInfo>) -> Self {
        self.related_tokens = tokens;
        self
    }

    /// Byte offset of the anchor token.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.token.left()
    }
}

impl Ord for LintViolation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.token.left().cmp(&other.token.left())
    }
}

impl PartialOrd for LintViolation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for LintViolation {
    fn eq(&self, other: &Self) -> bool {
        self.token.left() == other.token.left()
    }
}

impl Eq for LintViolation {}

/// The result of one rule over one file.
#[derive(Debug, Clone, Default)]
pub struct LintRuleStatus {
    /// Id of the rule that produced this status.
    pub lint_rule_name: String,
    /// Documentation pointer for the rule.
    pub url: String,
    /// Violations, ordered by position.
    pub violations: BTreeSet<LintViolation>,
}

impl LintRuleStatus {
    /// Creates a status for the rule described by `descriptor`.
    #[must_use]
    pub fn new(violations: BTreeSet<LintViolation>, descriptor: &LintRuleDescriptor) -> Self {
        Self {
            lint_rule_name: descriptor.name.to_string(),
            url: style_guide_citation(descriptor.topic),
            violations,
        }
    }

    /// Returns true if there are no violations.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Removes every violation for which `is_waived` returns true.
    pub fn waive_violations(&mut self, mut is_waived: impl FnMut(&LintViolation) -> bool) {
        self.violations.retain(|violation| !is_waived(violation));
    }
}

/// A violation together with the status of the rule that reported it.
#[derive(Debug, Clone, Copy)]
pub struct LintViolationWithStatus<'a> {
    /// The violation.
    pub violation: &'a LintViolation,
    /// The status containing it.
    pub status: &'a LintRuleStatus,
}

/// Merges the violations of all `statuses`, ordered by position.
///
/// Violations of different rules at the same offset are all kept, in the
/// order of `statuses`.
#[must_use]
pub fn sorted_violations(statuses: &[LintRuleStatus]) -> Vec<LintViolationWithStatus<'_>> {
    let mut merged: Vec<LintViolationWithStatus<'_>> = statuses
        .iter()
        .flat_map(|status| {
            status
                .violations
                .iter()
                .map(move |violation| LintViolationWithStatus { violation, status })
        })
        .collect();
    merged.sort_by_key(|v| v.violation.offset());
    merged
}

/// Converts a violation to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<LintViolationWithStatus<'_>> for ViolationDiagnostic {
    fn from(v: LintViolationWithStatus<'_>) -> Self {
        let fix = v
            .violation
            .autofixes
            .first()
            .map(|fix| format!("autofix available: {}", fix.description()));
        let url = (!v.status.url.is_empty()).then(|| v.status.url.clone());
        let help = match (fix, url) {
            (Some(fix), Some(url)) => Some(format!("{fix}\n{url}")),
            (fix, url) => fix.or(url),
        };
        Self {
            message: v.violation.reason.clone(),
            help,
            span: SourceSpan::from((v.violation.token.left(), v.violation.token.text().len())),
            label_message: v.status.lint_rule_name.clone(),
        }
    }
}
