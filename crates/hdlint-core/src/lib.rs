//! # hdlint-core
//!
//! Core framework for lint rules over hardware description languages.
//!
//! This crate provides the foundational traits and types for building
//! HDL linters on top of an external lexer and parser. It includes:
//!
//! - four rule interfaces ([`LineLintRule`], [`TokenStreamLintRule`],
//!   [`SyntaxTreeLintRule`], [`TextStructureLintRule`]) and their linters
//! - a process-wide [`registry`] of rule factories
//! - [`LinterConfiguration`] for choosing and configuring rules per file
//! - in-source and external [`waiver`]s
//! - [`Analyzer`] for orchestrating one file
//! - [`LintStatusFormatter`] for reporting
//!
//! ## Example
//!
//! ```ignore
//! use hdlint_core::{Analyzer, LinterConfiguration, RuleSet, TextStructureView};
//!
//! let mut config = LinterConfiguration::new();
//! config.use_rule_set(RuleSet::Default);
//!
//! let view = TextStructureView::new(source).with_tokens(tokens);
//! let mut analyzer = Analyzer::builder()
//!     .configuration(config)
//!     .filename("rtl/top.sv")
//!     .build()?;
//! analyzer.lint(&view, "rtl/top.sv");
//! for status in analyzer.report_status(&view) {
//!     println!("{}: {}", status.lint_rule_name, status.violations.len());
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod autofix;
mod config;
mod configuration;
mod context;
mod formatter;
mod rule;
mod types;

/// Traversal drivers, one per rule kind.
pub mod linter;
/// Helpers for parsing `name:value` rule configurations.
pub mod params;
/// Process-wide rule registry.
pub mod registry;
/// Text, token and syntax tree representations.
pub mod text;
/// In-source and external waivers.
pub mod waiver;

#[cfg(test)]
mod test_rules;

pub use analyzer::{
    lint_rule_file, lint_text_structure, rule_descriptions_help, rule_descriptions_markdown,
    Analyzer, AnalyzerBuilder, AnalyzerError,
};
pub use autofix::{AutoFix, ReplacementEdit};
pub use config::{Config, ConfigError, RuleConfigFailure};
pub use configuration::{
    find_rules_config, LinterConfiguration, LinterOptions, ProjectPolicy, RuleBundle, RuleSet,
    RuleSetting, RULES_CONFIG_FILE_NAME,
};
pub use context::SyntaxTreeContext;
pub use formatter::LintStatusFormatter;
pub use rule::{
    style_guide_citation, DescribedRule, LineLintRule, LintConfigParameterDescriptor, LintRule,
    LintRuleDescriptor, SyntaxTreeLintRule, TextStructureLintRule, TokenStreamLintRule,
};
pub use text::{
    Line, LineColumn, LineColumnMap, Symbol, SyntaxTreeLeaf, SyntaxTreeNode, TextStructureView,
    TokenInfo,
};
pub use types::{
    sorted_violations, LintRuleStatus, LintViolation, LintViolationWithStatus, ViolationDiagnostic,
};
