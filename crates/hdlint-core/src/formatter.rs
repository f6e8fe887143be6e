//! Plain-text rendering of rule statuses.
//!
//! A violation renders as `<path>:<line>:<col>: <reason> <url> [<rule>]`,
//! with 1-based line and column of the anchor token.

use crate::text::{LineColumnMap, TokenInfo};
use crate::types::{sorted_violations, LintRuleStatus, LintViolation};
use std::fmt::{self, Write};

/// Formats violations against the contents of one file.
#[derive(Debug, Clone)]
pub struct LintStatusFormatter<'a> {
    contents: &'a str,
    line_column_map: LineColumnMap,
}

impl<'a> LintStatusFormatter<'a> {
    /// Creates a formatter for `contents`.
    #[must_use]
    pub fn new(contents: &'a str) -> Self {
        Self {
            contents,
            line_column_map: LineColumnMap::new(contents),
        }
    }

    /// Writes one violation line, without a trailing newline.
    ///
    /// # Errors
    ///
    /// Propagates errors from `out`.
    pub fn format_violation(
        &self,
        out: &mut impl Write,
        violation: &LintViolation,
        path: &str,
        url: &str,
        rule: &str,
    ) -> fmt::Result {
        let start = self.line_column_map.get_line_col_at_offset(violation.offset());
        write!(
            out,
            "{path}:{start}: {}",
            self.with_related_tokens(&violation.related_tokens, &violation.reason, path)
        )?;
        if !url.is_empty() {
            write!(out, " {url}")?;
        }
        write!(out, " [{rule}]")?;
        if !violation.autofixes.is_empty() {
            out.write_str(" (autofix available)")?;
        }
        Ok(())
    }

    /// Writes every violation of `status`, one per line.
    ///
    /// # Errors
    ///
    /// Propagates errors from `out`.
    pub fn format_lint_rule_status(
        &self,
        out: &mut impl Write,
        status: &LintRuleStatus,
        path: &str,
    ) -> fmt::Result {
        for violation in &status.violations {
            self.format_violation(out, violation, path, &status.url, &status.lint_rule_name)?;
            out.write_char('\n')?;
        }
        Ok(())
    }

    /// Writes the violations of all `statuses` merged by position, one per
    /// line. With `show_context`, each is followed by its source line and a
    /// caret under the anchor column.
    ///
    /// # Errors
    ///
    /// Propagates errors from `out`.
    pub fn format_lint_rule_statuses(
        &self,
        out: &mut impl Write,
        statuses: &[LintRuleStatus],
        path: &str,
        show_context: bool,
    ) -> fmt::Result {
        for entry in sorted_violations(statuses) {
            if show_context {
                self.format_violation_with_context(
                    out,
                    entry.violation,
                    path,
                    &entry.status.url,
                    &entry.status.lint_rule_name,
                )?;
            } else {
                self.format_violation(
                    out,
                    entry.violation,
                    path,
                    &entry.status.url,
                    &entry.status.lint_rule_name,
                )?;
                out.write_char('\n')?;
            }
        }
        Ok(())
    }

    /// Writes the violation line, then the offending source line and a `^`
    /// under the anchor.
    ///
    /// # Errors
    ///
    /// Propagates errors from `out`.
    pub fn format_violation_with_context(
        &self,
        out: &mut impl Write,
        violation: &LintViolation,
        path: &str,
        url: &str,
        rule: &str,
    ) -> fmt::Result {
        self.format_violation(out, violation, path, url, rule)?;
        out.write_char('\n')?;
        let start = self.line_column_map.get_line_col_at_offset(violation.offset());
        if let Some(line) = self.contents.split('\n').nth(start.line) {
            let line = line.strip_suffix('\r').unwrap_or(line);
            // Column in characters so the caret lines up under multi-byte text.
            let prefix = line.get(..start.column).unwrap_or(line);
            writeln!(out, "{line}")?;
            writeln!(out, "{}^", " ".repeat(prefix.chars().count()))?;
        }
        Ok(())
    }

    /// Writes the external waiver command that silences `violation`.
    ///
    /// # Errors
    ///
    /// Propagates errors from `out`.
    pub fn format_violation_waiver(
        &self,
        out: &mut impl Write,
        violation: &LintViolation,
        rule: &str,
        path: &str,
    ) -> fmt::Result {
        let line = self.line_column_map.line_at_offset(violation.offset()) + 1;
        write!(out, "waive --rule={rule} --line={line} --location=\"{path}\"")
    }

    /// Replaces each unescaped `@` in `message` with the location of the
    /// next related token. `\@` stands for a literal `@`.
    fn with_related_tokens(&self, tokens: &[TokenInfo], message: &str, path: &str) -> String {
        if tokens.is_empty() {
            return message.to_string();
        }
        let mut tokens = tokens.iter();
        let mut result = String::with_capacity(message.len());
        let mut chars = message.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' if chars.peek() == Some(&'@') => {
                    chars.next();
                    result.push('@');
                }
                '@' => match tokens.next() {
                    Some(token) => {
                        let location = self.line_column_map.get_line_col_at_offset(token.left());
                        let _ = write!(result, "{path}:{location}");
                    }
                    None => result.push('@'),
                },
                _ => result.push(c),
            }
        }
        result
    }
}
