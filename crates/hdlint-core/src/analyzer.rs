//! Per-file lint orchestration.
//!
//! An [`Analyzer`] owns one linter per rule kind plus the waiver builder,
//! configured for a single file:
//!
//! ```ignore
//! let mut analyzer = Analyzer::builder()
//!     .configuration(config)
//!     .filename("rtl/top.sv")
//!     .build()?;
//! analyzer.lint(&view, "rtl/top.sv");
//! let statuses = analyzer.report_status(&view);
//! ```

use crate::config::ConfigError;
use crate::configuration::{LinterConfiguration, RuleBundle, RuleSetting};
use crate::linter::{LineLinter, SyntaxTreeLinter, TextStructureLinter, TokenStreamLinter};
use crate::registry::{all_rule_descriptions, LintRuleDescriptionEntry};
use crate::rule::style_guide_citation;
use crate::text::{LineColumnMap, TextStructureView};
use crate::types::LintRuleStatus;
use crate::waiver::{LintWaiver, LintWaiverBuilder, WaiverError, WaiverSyntax};

use std::fmt::Write;
use thiserror::Error;
use tracing::debug;

/// Width of the rule name column in [`rule_descriptions_help`].
const RULE_NAME_WIDTH: usize = 35;

/// Errors that can occur while setting up an analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The linter configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A waiver file could not be read or applied.
    #[error(transparent)]
    Waiver(#[from] WaiverError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Debug, Default)]
pub struct AnalyzerBuilder {
    configuration: LinterConfiguration,
    filename: String,
    waiver_syntax: WaiverSyntax,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule configuration.
    #[must_use]
    pub fn configuration(mut self, configuration: LinterConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Sets the name of the file being linted, used to match waiver
    /// locations.
    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Sets how in-source waiver directives are recognized.
    #[must_use]
    pub fn waiver_syntax(mut self, syntax: WaiverSyntax) -> Self {
        self.waiver_syntax = syntax;
        self
    }

    /// Creates and configures every enabled rule, then applies the external
    /// waiver files.
    ///
    /// # Errors
    ///
    /// Returns an error if any rule rejects its configuration, or if a
    /// waiver file cannot be read or contains invalid commands.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let configuration = &self.configuration;
        let active_rules = configuration.active_rule_ids();
        for name in &active_rules {
            debug!(rule = %name, "active rule");
        }

        // Create everything first so a bad configuration adds no rule at all.
        let text_rules = configuration.create_text_structure_rules()?;
        let line_rules = configuration.create_line_rules()?;
        let token_rules = configuration.create_token_stream_rules()?;
        let tree_rules = configuration.create_syntax_tree_rules()?;

        let mut analyzer = Analyzer {
            filename: self.filename,
            line_linter: LineLinter::new(),
            text_structure_linter: TextStructureLinter::new(),
            token_stream_linter: TokenStreamLinter::new(),
            syntax_tree_linter: SyntaxTreeLinter::new(),
            waiver_builder: LintWaiverBuilder::new(self.waiver_syntax),
        };
        for rule in text_rules {
            analyzer.text_structure_linter.add_rule(rule);
        }
        for rule in line_rules {
            analyzer.line_linter.add_rule(rule);
        }
        for rule in token_rules {
            analyzer.token_stream_linter.add_rule(rule);
        }
        for rule in tree_rules {
            analyzer.syntax_tree_linter.add_rule(rule);
        }

        for path in configuration.external_waivers() {
            let content = std::fs::read_to_string(path).map_err(|e| WaiverError::Io {
                path: path.clone(),
                source: e,
            })?;
            debug!(waiver_file = %path.display(), "applying external waivers");
            analyzer.waiver_builder.apply_external_waivers(
                &active_rules,
                &analyzer.filename,
                &path.to_string_lossy(),
                &content,
            )?;
        }

        Ok(analyzer)
    }
}

/// Runs every configured rule over one file.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    filename: String,
    line_linter: LineLinter,
    text_structure_linter: TextStructureLinter,
    token_stream_linter: TokenStreamLinter,
    syntax_tree_linter: SyntaxTreeLinter,
    waiver_builder: LintWaiverBuilder,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Name of the file this analyzer was configured for.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the number of rules held, across all kinds.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.line_linter.rule_count()
            + self.text_structure_linter.rule_count()
            + self.token_stream_linter.rule_count()
            + self.syntax_tree_linter.rule_count()
    }

    /// The waivers collected so far.
    #[must_use]
    pub fn lint_waiver(&self) -> &LintWaiver {
        self.waiver_builder.lint_waiver()
    }

    /// Collects in-source waivers, then runs the text structure, line,
    /// token stream and syntax tree linters, in that order. Token stream
    /// rules see only the filtered [`TextStructureView::token_stream_view`].
    ///
    /// # Panics
    ///
    /// Panics if called more than once.
    pub fn lint(&mut self, text_structure: &TextStructureView, filename: &str) {
        debug!(file = filename, rules = self.rule_count(), "linting");
        self.waiver_builder
            .process_token_ranges_by_line(text_structure);
        self.text_structure_linter.lint(text_structure, filename);
        self.line_linter.lint(&text_structure.lines());
        self.token_stream_linter
            .lint(text_structure.token_stream_view());
        self.syntax_tree_linter.lint(text_structure.syntax_tree());
    }

    /// One status per rule, ordered line, text structure, token stream,
    /// then syntax tree rules. Violations whose anchor lies on a line waived
    /// for their rule are removed.
    ///
    /// # Panics
    ///
    /// Panics if [`lint`](Self::lint) has not run.
    #[must_use]
    pub fn report_status(&self, text_structure: &TextStructureView) -> Vec<LintRuleStatus> {
        let waiver = self.waiver_builder.lint_waiver();
        let line_map = text_structure.line_column_map();
        let mut statuses = Vec::with_capacity(self.rule_count());
        for batch in [
            self.line_linter.report_status(),
            self.text_structure_linter.report_status(),
            self.token_stream_linter.report_status(),
            self.syntax_tree_linter.report_status(),
        ] {
            statuses.extend(
                batch
                    .into_iter()
                    .map(|status| waive_status(status, waiver, line_map)),
            );
        }
        statuses
    }
}

fn waive_status(
    mut status: LintRuleStatus,
    waiver: &LintWaiver,
    line_map: &LineColumnMap,
) -> LintRuleStatus {
    let rule = status.lint_rule_name.clone();
    status.waive_violations(|violation| {
        let line = line_map.line_at_offset(violation.offset());
        let waived = waiver.rule_is_waived_on_line(&rule, line);
        if waived {
            debug!(rule = %rule, line = line + 1, "violation waived");
        }
        waived
    });
    status
}

/// Builds an analyzer for `filename`, lints `text_structure` and returns
/// the statuses.
///
/// # Errors
///
/// Returns an error if the analyzer cannot be built.
pub fn lint_text_structure(
    filename: &str,
    configuration: &LinterConfiguration,
    text_structure: &TextStructureView,
) -> Result<Vec<LintRuleStatus>, AnalyzerError> {
    let mut analyzer = Analyzer::builder()
        .configuration(configuration.clone())
        .filename(filename)
        .build()?;
    analyzer.lint(text_structure, filename);
    Ok(analyzer.report_status(text_structure))
}

fn plural(count: usize) -> &'static str {
    if count > 1 {
        "s"
    } else {
        ""
    }
}

fn write_rule_help(out: &mut String, name: &str, entry: &LintRuleDescriptionEntry) {
    let d = &entry.descriptor;
    let _ = writeln!(out, "{name:<RULE_NAME_WIDTH$}{}", d.desc);
    if !d.param.is_empty() {
        let _ = writeln!(
            out,
            "{:<RULE_NAME_WIDTH$}Parameter{}:",
            " ",
            plural(d.param.len())
        );
        for p in &d.param {
            let _ = writeln!(
                out,
                "{:<width$}* `{}` Default: `{}` {}",
                " ",
                p.name,
                p.default_value,
                p.description,
                width = RULE_NAME_WIDTH + 4
            );
        }
    }
    let _ = writeln!(
        out,
        "{:<RULE_NAME_WIDTH$}Enabled by default: {}\n",
        " ", entry.default_enabled
    );
}

/// Plain-text help for one rule, or for every rule when `rule` is `"all"`.
///
/// Unknown names produce a message saying so.
#[must_use]
pub fn rule_descriptions_help(rule: &str) -> String {
    let descriptions = all_rule_descriptions();
    let mut out = String::new();
    if rule == "all" {
        for (name, entry) in &descriptions {
            write_rule_help(&mut out, name, entry);
        }
    } else if let Some(entry) = descriptions.get(rule) {
        write_rule_help(&mut out, rule, entry);
    } else {
        let _ = writeln!(
            out,
            "Rule: '{rule}' not found. Please specify a rule name or \"all\" for help on the rules."
        );
    }
    out
}

/// Markdown documentation of every rule.
#[must_use]
pub fn rule_descriptions_markdown() -> String {
    let mut out = String::new();
    for (name, entry) in all_rule_descriptions() {
        let d = &entry.descriptor;
        let _ = writeln!(out, "### {name}");
        let _ = write!(out, "{}", d.desc);
        let citation = style_guide_citation(d.topic);
        if !citation.is_empty() {
            let _ = write!(out, " See {citation}.");
        }
        out.push_str("\n\n");
        if !d.param.is_empty() {
            let _ = writeln!(out, "##### Parameter{}", plural(d.param.len()));
            for p in &d.param {
                let _ = writeln!(
                    out,
                    "  * `{}` Default: `{}` {}",
                    p.name, p.default_value, p.description
                );
            }
            out.push('\n');
        }
        let _ = writeln!(out, "Enabled by default: {}\n", entry.default_enabled);
    }
    out
}

/// A rules file listing every registered rule: `configuration`'s enabled
/// rules as they are, all others prefixed `-`. Rules without configuration
/// get their non-empty default parameters.
#[must_use]
pub fn lint_rule_file(configuration: &LinterConfiguration) -> String {
    let mut bundle: RuleBundle = configuration.get_rule_bundle();
    for (name, entry) in all_rule_descriptions() {
        let defaults = entry
            .descriptor
            .param
            .iter()
            .filter(|p| !p.default_value.is_empty())
            .map(|p| format!("{}:{}", p.name, p.default_value))
            .collect::<Vec<_>>()
            .join(";");
        let setting = bundle
            .rules
            .entry(name)
            .or_insert_with(|| RuleSetting::off(""));
        if setting.configuration.is_empty() {
            setting.configuration = defaults;
        }
    }
    let mut out = bundle.unparse_configuration('\n', false);
    out.push('\n');
    out
}
