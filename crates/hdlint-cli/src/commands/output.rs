//! Shared output formatting for lint results.

use anyhow::Result;
use hdlint_core::{
    sorted_violations, LineColumnMap, LintRuleStatus, LintStatusFormatter, ViolationDiagnostic,
};
use miette::NamedSource;
use serde::Serialize;
use std::fmt::Write;

use crate::OutputFormat;

/// The statuses of one linted file.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Path as given on the command line or found by the walk.
    pub path: String,
    /// File contents the violation offsets refer to.
    pub contents: String,
    /// One status per rule that ran.
    pub statuses: Vec<LintRuleStatus>,
}

impl FileReport {
    /// Number of violations over all rules.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.statuses.iter().map(|s| s.violations.len()).sum()
    }
}

/// Results of a whole `check` run.
#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    /// Linted files, in path order.
    pub files: Vec<FileReport>,
}

impl CheckResult {
    /// Number of violations over all files.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.files.iter().map(FileReport::violation_count).sum()
    }

    /// Returns true if any file has a violation.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        self.violation_count() > 0
    }
}

/// Print lint results in the specified format.
pub fn print(result: &CheckResult, format: OutputFormat, show_context: bool) -> Result<()> {
    match format {
        OutputFormat::Text => {
            print!("{}", render_text(result, show_context)?);
            let color = if result.has_violations() {
                "\x1b[31m"
            } else {
                "\x1b[32m"
            };
            println!("{color}{}\x1b[0m", summary(result));
        }
        OutputFormat::Compact => print!("{}", render_compact(result)),
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Fancy => print_fancy(result),
    }
    Ok(())
}

/// `Found N violation(s) in M file(s)`.
#[must_use]
pub fn summary(result: &CheckResult) -> String {
    format!(
        "Found {} violation(s) in {} file(s)",
        result.violation_count(),
        result.files.len()
    )
}

/// One line per violation, as `<path>:<line>:<col>: <reason> <url> [<rule>]`.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn render_text(result: &CheckResult, show_context: bool) -> Result<String> {
    let mut out = String::new();
    for file in &result.files {
        LintStatusFormatter::new(&file.contents).format_lint_rule_statuses(
            &mut out,
            &file.statuses,
            &file.path,
            show_context,
        )?;
    }
    Ok(out)
}

/// One line per violation, as `<path>:<line>:<col>: [<rule>] <reason>`.
#[must_use]
pub fn render_compact(result: &CheckResult) -> String {
    let mut out = String::new();
    for file in &result.files {
        let map = LineColumnMap::new(&file.contents);
        for entry in sorted_violations(&file.statuses) {
            let position = map.get_line_col_at_offset(entry.violation.offset());
            let _ = writeln!(
                out,
                "{}:{position}: [{}] {}",
                file.path, entry.status.lint_rule_name, entry.violation.reason
            );
        }
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files_checked: usize,
    violation_count: usize,
    violations: Vec<JsonViolation<'a>>,
}

#[derive(Serialize)]
struct JsonViolation<'a> {
    file: &'a str,
    /// 1-based.
    line: usize,
    /// 1-based, in bytes.
    column: usize,
    rule: &'a str,
    reason: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    autofix: Option<&'a str>,
}

/// The whole result as a JSON document.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(result: &CheckResult) -> Result<String> {
    let mut violations = Vec::new();
    for file in &result.files {
        let map = LineColumnMap::new(&file.contents);
        for entry in sorted_violations(&file.statuses) {
            let position = map.get_line_col_at_offset(entry.violation.offset());
            violations.push(JsonViolation {
                file: &file.path,
                line: position.line + 1,
                column: position.column + 1,
                rule: &entry.status.lint_rule_name,
                reason: &entry.violation.reason,
                url: &entry.status.url,
                autofix: entry.violation.autofixes.first().map(|fix| fix.description()),
            });
        }
    }
    let report = JsonReport {
        files_checked: result.files.len(),
        violation_count: violations.len(),
        violations,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn print_fancy(result: &CheckResult) {
    for file in &result.files {
        for entry in sorted_violations(&file.statuses) {
            let report = miette::Report::new(ViolationDiagnostic::from(entry))
                .with_source_code(NamedSource::new(&file.path, file.contents.clone()));
            println!("{report:?}");
        }
    }
    println!("{}", summary(result));
}

/// One external waiver command per violation.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn render_waivers(result: &CheckResult) -> Result<String> {
    let mut out = String::new();
    for file in &result.files {
        let formatter = LintStatusFormatter::new(&file.contents);
        for entry in sorted_violations(&file.statuses) {
            formatter.format_violation_waiver(
                &mut out,
                entry.violation,
                &entry.status.lint_rule_name,
                &file.path,
            )?;
            out.push('\n');
        }
    }
    Ok(out)
}
