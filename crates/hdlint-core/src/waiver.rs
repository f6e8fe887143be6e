//! Lint waivers.
//!
//! Violations can be waived in the source itself:
//!
//! ```text
//! // hdlint waive line-length
//! assign very_long_name = ...;   // waived: the comment stands alone above
//! assign x = y;  // hdlint waive no-tabs   (waives this line)
//!
//! // hdlint waive-start no-trailing-spaces
//! ...                            // every line up to the stop is waived
//! // hdlint waive-stop no-trailing-spaces
//! ```
//!
//! or from external waiver files, one command per line:
//!
//! ```text
//! waive --rule=line-length --line=10
//! waive --rule=no-tabs --line=3:9 --location="rtl/.*"
//! waive --rule=posix-eof --regex="^// generated"
//! ```
//!
//! Waived lines are 0-based throughout; the `--line` values in waiver files
//! are 1-based.

use crate::text::{LineColumn, LineColumnMap, TextStructureView, TokenInfo};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Range;
use tracing::{debug, error};

/// Waiver errors.
#[derive(Debug, thiserror::Error)]
pub enum WaiverError {
    /// A waiver regex failed to compile.
    #[error("Invalid regex: {0}")]
    InvalidRegex(String),

    /// A waiver file could not be read.
    #[error("Failed to read waiver file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: std::path::PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// One or more commands in a waiver file were rejected.
    #[error("Errors applying external waivers:\n{}", .0.join("\n"))]
    Commands(Vec<String>),
}

/// A set of line numbers stored as sorted, disjoint half-open ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LineSet {
    ranges: Vec<Range<usize>>,
}

impl LineSet {
    fn add(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let mut merged = range;
        let mut kept = Vec::with_capacity(self.ranges.len() + 1);
        for existing in self.ranges.drain(..) {
            if existing.end < merged.start || merged.end < existing.start {
                kept.push(existing);
            } else {
                merged = merged.start.min(existing.start)..merged.end.max(existing.end);
            }
        }
        kept.push(merged);
        kept.sort_by_key(|r| r.start);
        self.ranges = kept;
    }

    fn contains(&self, line: usize) -> bool {
        let index = self.ranges.partition_point(|r| r.end <= line);
        self.ranges.get(index).is_some_and(|r| r.contains(&line))
    }

    fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Lines on which rules are waived.
#[derive(Debug, Clone, Default)]
pub struct LintWaiver {
    lines: BTreeMap<String, LineSet>,
    regexes: BTreeMap<String, Vec<Regex>>,
    regex_cache: HashMap<String, Regex>,
}

impl LintWaiver {
    /// Creates an empty waiver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waives `rule` on one line.
    pub fn waive_one_line(&mut self, rule: &str, line: usize) {
        self.waive_line_range(rule, line..line + 1);
    }

    /// Waives `rule` on the lines `[range.start, range.end)`.
    pub fn waive_line_range(&mut self, rule: &str, range: Range<usize>) {
        self.lines.entry(rule.to_string()).or_default().add(range);
    }

    /// Waives `rule` on every line where `pattern` matches, once
    /// [`Self::regex_to_lines`] runs.
    ///
    /// # Errors
    ///
    /// Returns [`WaiverError::InvalidRegex`] if `pattern` does not compile.
    pub fn waive_with_regex(&mut self, rule: &str, pattern: &str) -> Result<(), WaiverError> {
        let grouped = format!("({pattern})");
        let regex = match self.regex_cache.get(&grouped) {
            Some(regex) => regex.clone(),
            None => {
                let regex =
                    Regex::new(&grouped).map_err(|e| WaiverError::InvalidRegex(e.to_string()))?;
                self.regex_cache.insert(grouped, regex.clone());
                regex
            }
        };
        self.regexes.entry(rule.to_string()).or_default().push(regex);
        Ok(())
    }

    /// Turns regex waivers into line waivers for `contents`.
    pub fn regex_to_lines(&mut self, contents: &str, line_map: &LineColumnMap) {
        let mut waived = Vec::new();
        for (rule, regexes) in &self.regexes {
            for regex in regexes {
                for found in regex.find_iter(contents) {
                    waived.push((rule.clone(), line_map.line_at_offset(found.start())));
                }
            }
        }
        for (rule, line) in waived {
            self.waive_one_line(&rule, line);
        }
    }

    /// Returns true if `rule` is waived on `line`.
    #[must_use]
    pub fn rule_is_waived_on_line(&self, rule: &str, line: usize) -> bool {
        self.lines.get(rule).is_some_and(|set| set.contains(line))
    }

    /// Returns true if no line is waived for any rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.values().all(LineSet::is_empty)
    }
}

/// How waiver directives are spelled in a language's comments.
#[derive(Debug, Clone, Copy)]
pub struct WaiverSyntax {
    /// Returns true for comment tokens.
    pub is_comment: fn(&TokenInfo) -> bool,
    /// Returns true for whitespace tokens, including newlines.
    pub is_space: fn(&TokenInfo) -> bool,
    /// First word of every directive.
    pub trigger: &'static str,
    /// Waives the current or next non-blank line.
    pub waive_one_line: &'static str,
    /// Opens a waived range.
    pub waive_range_start: &'static str,
    /// Closes a waived range.
    pub waive_range_stop: &'static str,
}

fn is_c_style_comment(token: &TokenInfo) -> bool {
    let text = token.text();
    text.starts_with("//") || text.starts_with("/*")
}

fn is_whitespace(token: &TokenInfo) -> bool {
    token.text().chars().all(char::is_whitespace)
}

impl Default for WaiverSyntax {
    fn default() -> Self {
        Self {
            is_comment: is_c_style_comment,
            is_space: is_whitespace,
            trigger: "hdlint",
            waive_one_line: "waive",
            waive_range_start: "waive-start",
            waive_range_stop: "waive-stop",
        }
    }
}

/// Removes `//`, or `/*` and `*/`, and the surrounding whitespace.
fn strip_comment(text: &str) -> &str {
    let body = if let Some(rest) = text.strip_prefix("//") {
        rest
    } else if let Some(rest) = text.strip_prefix("/*") {
        rest.strip_suffix("*/").unwrap_or(rest)
    } else {
        text
    };
    body.trim()
}

enum Directive<'t> {
    OneLine(&'t str),
    RangeStart(&'t str),
    RangeStop(&'t str),
}

/// Collects waivers from in-source directives and waiver files.
#[derive(Debug, Clone)]
pub struct LintWaiverBuilder {
    syntax: WaiverSyntax,
    unapplied_one_line: BTreeSet<String>,
    open_ranges: BTreeMap<String, usize>,
    lint_waiver: LintWaiver,
}

impl Default for LintWaiverBuilder {
    fn default() -> Self {
        Self::new(WaiverSyntax::default())
    }
}

impl LintWaiverBuilder {
    /// Creates a builder recognizing directives spelled as in `syntax`.
    #[must_use]
    pub fn new(syntax: WaiverSyntax) -> Self {
        Self {
            syntax,
            unapplied_one_line: BTreeSet::new(),
            open_ranges: BTreeMap::new(),
            lint_waiver: LintWaiver::new(),
        }
    }

    /// The waivers collected so far.
    #[must_use]
    pub fn lint_waiver(&self) -> &LintWaiver {
        &self.lint_waiver
    }

    fn directive<'t>(&self, comment: &'t str) -> Option<Directive<'t>> {
        let mut words = strip_comment(comment).split_whitespace();
        let (trigger, command, rule) = (words.next()?, words.next()?, words.next()?);
        if trigger != self.syntax.trigger {
            return None;
        }
        if command == self.syntax.waive_one_line {
            Some(Directive::OneLine(rule))
        } else if command == self.syntax.waive_range_start {
            Some(Directive::RangeStart(rule))
        } else if command == self.syntax.waive_range_stop {
            Some(Directive::RangeStop(rule))
        } else {
            None
        }
    }

    /// Processes the tokens starting on `line`.
    pub fn process_line(&mut self, tokens: &[TokenInfo], line: usize) {
        let is_space = self.syntax.is_space;
        let is_comment = self.syntax.is_comment;

        if tokens.iter().all(is_space) {
            self.unapplied_one_line.clear();
            return;
        }

        let line_has_tokens = tokens.iter().any(|t| !(is_space(t) || is_comment(t)));
        if line_has_tokens {
            for rule in std::mem::take(&mut self.unapplied_one_line) {
                self.lint_waiver.waive_one_line(&rule, line);
            }
        }

        for token in tokens.iter().filter(|t| is_comment(t)) {
            match self.directive(token.text()) {
                Some(Directive::OneLine(rule)) => {
                    if line_has_tokens {
                        self.lint_waiver.waive_one_line(rule, line);
                    } else {
                        self.unapplied_one_line.insert(rule.to_string());
                    }
                }
                Some(Directive::RangeStart(rule)) => {
                    self.open_ranges.entry(rule.to_string()).or_insert(line);
                }
                Some(Directive::RangeStop(rule)) => {
                    if let Some(start) = self.open_ranges.remove(rule) {
                        self.lint_waiver.waive_line_range(rule, start..line);
                    }
                }
                None => {}
            }
        }
    }

    /// Processes every line of `text_structure`, then applies regex waivers
    /// and closes open ranges at the end of the file.
    pub fn process_token_ranges_by_line(&mut self, text_structure: &TextStructureView) {
        let total_lines = text_structure.line_count();
        for line in 0..total_lines {
            self.process_line(text_structure.token_range_on_line(line), line);
        }

        self.lint_waiver
            .regex_to_lines(text_structure.contents(), text_structure.line_column_map());

        for (rule, start) in std::mem::take(&mut self.open_ranges) {
            debug!(rule = %rule, start, "waiver range left open until end of file");
            self.lint_waiver.waive_line_range(&rule, start..total_lines);
        }
    }

    /// Applies the commands of a waiver file to `lintee_filename`.
    ///
    /// Every command is processed; the rejected ones are reported together.
    ///
    /// # Errors
    ///
    /// Returns [`WaiverError::Commands`] with one
    /// `<file>:<line>:<col>: command error: ...` message per bad command.
    pub fn apply_external_waivers(
        &mut self,
        active_rules: &BTreeSet<String>,
        lintee_filename: &str,
        waiver_filename: &str,
        waiver_content: &str,
    ) -> Result<(), WaiverError> {
        let line_map = LineColumnMap::new(waiver_content);
        let mut errors = Vec::new();

        for (offset, line) in line_offsets(waiver_content) {
            let words = split_command(line, offset);
            let Some(first) = words.first() else {
                continue;
            };
            if first.text.starts_with('#') {
                continue;
            }
            let command = WaiveCommand {
                waiver_filename,
                line_map: &line_map,
                end_of_line: offset + line.len(),
            };
            let result = if first.text == "waive" {
                command.apply(
                    &words[1..],
                    lintee_filename,
                    active_rules,
                    &mut self.lint_waiver,
                )
            } else {
                Err(command.error(first.offset, &format!("Command not supported: {}", first.text)))
            };
            if let Err(message) = result {
                error!("{message}");
                errors.push(message);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(WaiverError::Commands(errors))
        }
    }
}

fn line_offsets(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content.split('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len() + 1;
        Some((start, line.trim_end_matches('\r')))
    })
}

struct Word {
    offset: usize,
    text: String,
}

/// Splits a command line into words at whitespace outside double quotes.
/// Quotes are removed. Everything from a `#` outside quotes is dropped,
/// except at the start of the line.
fn split_command(line: &str, line_offset: usize) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current: Option<Word> = None;
    let mut in_quotes = false;
    for (index, c) in line.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
            current.get_or_insert_with(|| Word {
                offset: line_offset + index,
                text: String::new(),
            });
        } else if c.is_whitespace() && !in_quotes {
            words.extend(current.take());
        } else if c == '#' && !in_quotes && current.is_none() && !words.is_empty() {
            break;
        } else {
            current
                .get_or_insert_with(|| Word {
                    offset: line_offset + index,
                    text: String::new(),
                })
                .text
                .push(c);
        }
    }
    words.extend(current);
    words
}

struct WaiveCommand<'a> {
    waiver_filename: &'a str,
    line_map: &'a LineColumnMap,
    end_of_line: usize,
}

enum LineSelection {
    Lines(Range<usize>),
    Pattern { pattern: String, offset: usize },
    WholeFile,
}

impl WaiveCommand<'_> {
    fn error(&self, offset: usize, message: &str) -> String {
        let LineColumn { line, column } = self.line_map.get_line_col_at_offset(offset);
        format!(
            "{}:{}:{}: command error: {message}",
            self.waiver_filename,
            line + 1,
            column + 1
        )
    }

    fn apply(
        &self,
        args: &[Word],
        lintee_filename: &str,
        active_rules: &BTreeSet<String>,
        waiver: &mut LintWaiver,
    ) -> Result<(), String> {
        let mut rule: Option<&str> = None;
        let mut lines: Option<Range<usize>> = None;
        let mut regex: Option<(String, usize)> = None;
        let mut location_match = true;

        for arg in args {
            let Some((option, value)) = arg
                .text
                .strip_prefix("--")
                .and_then(|flag| flag.split_once('='))
            else {
                return Err(self.error(arg.offset, &format!("Unsupported argument: {}", arg.text)));
            };
            match option {
                "rule" => match active_rules.get(value) {
                    Some(active) => rule = Some(active.as_str()),
                    None => return Err(self.error(arg.offset, &format!("Invalid rule: {value}"))),
                },
                "line" => lines = Some(self.parse_lines(value, arg.offset)?),
                "regex" => regex = Some((value.to_string(), arg.offset)),
                "location" => {
                    let location = Regex::new(value)
                        .map_err(|_| self.error(arg.offset, "--location regex is invalid"))?;
                    location_match = location.is_match(lintee_filename);
                }
                _ => {
                    return Err(self.error(arg.offset, &format!("Unsupported flag: {option}")));
                }
            }
        }

        if !location_match {
            return Ok(());
        }
        let Some(rule) = rule else {
            return Err(self.error(self.end_of_line, "Insufficient waiver configuration"));
        };
        let selection = match (lines, regex) {
            (Some(_), Some(_)) => {
                return Err(self.error(
                    self.end_of_line,
                    "Regex and line flags are mutually exclusive",
                ));
            }
            (Some(lines), None) => LineSelection::Lines(lines),
            (None, Some((pattern, offset))) => LineSelection::Pattern { pattern, offset },
            (None, None) => LineSelection::WholeFile,
        };
        match selection {
            LineSelection::Lines(lines) => waiver.waive_line_range(rule, lines),
            LineSelection::Pattern { pattern, offset } => waiver
                .waive_with_regex(rule, &pattern)
                .map_err(|e| self.error(offset, &e.to_string()))?,
            LineSelection::WholeFile => waiver.waive_line_range(rule, 0..usize::MAX),
        }
        Ok(())
    }

    /// Parses `N` or `A:B` (1-based, inclusive) into a 0-based half-open range.
    fn parse_lines(&self, value: &str, offset: usize) -> Result<Range<usize>, String> {
        let (start, end) = match value.split_once(':') {
            Some((start, end)) => match (start.parse::<i64>(), end.parse::<i64>()) {
                (Ok(start), Ok(end)) => (start, end),
                _ => return Err(self.error(offset, &format!("Unable to parse range: {value}"))),
            },
            None => match value.parse::<i64>() {
                Ok(line) => (line, line),
                Err(_) => {
                    return Err(self.error(offset, &format!("Unable to parse line number: {value}")))
                }
            },
        };
        if start < 1 {
            return Err(self.error(offset, &format!("Invalid line number: {value}")));
        }
        if start > end {
            return Err(self.error(offset, &format!("Invalid line range: {value}")));
        }
        let to_usize = |n: i64| usize::try_from(n).unwrap_or(usize::MAX);
        Ok(to_usize(start - 1)..to_usize(end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    /// Builds a view with one token per whitespace-separated word, one per
    /// `//` comment, and one per newline.
    fn view(contents: &str) -> TextStructureView {
        let mut tokens = Vec::new();
        let mut offset = 0;
        for line in contents.split_inclusive('\n') {
            let body = line.trim_end_matches('\n');
            let (code, comment) = match body.find("//") {
                Some(at) => (&body[..at], Some((at, &body[at..]))),
                None => (body, None),
            };
            let mut cursor = 0;
            for word in code.split_whitespace() {
                let at = cursor + code[cursor..].find(word).unwrap();
                tokens.push(TokenInfo::new(1, offset + at, word));
                cursor = at + word.len();
            }
            if let Some((at, text)) = comment {
                tokens.push(TokenInfo::new(2, offset + at, text));
            }
            if line.ends_with('\n') {
                tokens.push(TokenInfo::new(3, offset + body.len(), "\n"));
            }
            offset += line.len();
        }
        TextStructureView::new(contents).with_tokens(tokens)
    }

    fn waiver_for(contents: &str) -> LintWaiver {
        let mut builder = LintWaiverBuilder::default();
        builder.process_token_ranges_by_line(&view(contents));
        builder.lint_waiver().clone()
    }

    #[test]
    fn test_line_set_merges_ranges() {
        let mut set = LineSet::default();
        set.add(5..7);
        set.add(1..2);
        set.add(2..5);
        assert_eq!(set.ranges, vec![1..7]);
        assert!(set.contains(1));
        assert!(set.contains(6));
        assert!(!set.contains(7));
        assert!(!set.contains(0));
        set.add(3..3);
        assert_eq!(set.ranges, vec![1..7]);
    }

    #[test]
    fn test_waive_one_line_and_range() {
        let mut waiver = LintWaiver::new();
        assert!(waiver.is_empty());
        waiver.waive_one_line("rule-a", 3);
        waiver.waive_line_range("rule-b", 10..12);
        assert!(!waiver.is_empty());
        assert!(waiver.rule_is_waived_on_line("rule-a", 3));
        assert!(!waiver.rule_is_waived_on_line("rule-a", 4));
        assert!(!waiver.rule_is_waived_on_line("rule-b", 9));
        assert!(waiver.rule_is_waived_on_line("rule-b", 11));
        assert!(!waiver.rule_is_waived_on_line("rule-b", 12));
        assert!(!waiver.rule_is_waived_on_line("rule-c", 3));
    }

    #[test]
    fn test_regex_waivers() {
        let contents = "abc\nfoo bar\nxyz foo\n";
        let mut waiver = LintWaiver::new();
        waiver.waive_with_regex("rule-a", "foo").unwrap();
        waiver.waive_with_regex("rule-a", "foo").unwrap();
        waiver.regex_to_lines(contents, &LineColumnMap::new(contents));
        assert!(!waiver.rule_is_waived_on_line("rule-a", 0));
        assert!(waiver.rule_is_waived_on_line("rule-a", 1));
        assert!(waiver.rule_is_waived_on_line("rule-a", 2));
        assert_eq!(waiver.regex_cache.len(), 1);

        let err = waiver.waive_with_regex("rule-a", "(").unwrap_err();
        assert!(err.to_string().starts_with("Invalid regex: "));
    }

    #[test]
    fn test_empty_regex_match_does_not_loop() {
        let contents = "a\nb\n";
        let mut waiver = LintWaiver::new();
        waiver.waive_with_regex("rule", "x*").unwrap();
        waiver.regex_to_lines(contents, &LineColumnMap::new(contents));
        assert!(waiver.rule_is_waived_on_line("rule", 0));
        assert!(waiver.rule_is_waived_on_line("rule", 2));
    }

    #[test]
    fn test_directive_on_same_line() {
        let waiver = waiver_for("a = b; // hdlint waive rule-x\nc = d;\n");
        assert!(waiver.rule_is_waived_on_line("rule-x", 0));
        assert!(!waiver.rule_is_waived_on_line("rule-x", 1));
    }

    #[test]
    fn test_directive_applies_to_next_line() {
        let waiver = waiver_for("// hdlint waive rule-x\n// other comment\nc = d;\ne;\n");
        assert!(!waiver.rule_is_waived_on_line("rule-x", 0));
        assert!(!waiver.rule_is_waived_on_line("rule-x", 1));
        assert!(waiver.rule_is_waived_on_line("rule-x", 2));
        assert!(!waiver.rule_is_waived_on_line("rule-x", 3));
    }

    #[test]
    fn test_blank_line_cancels_pending_waiver() {
        let waiver = waiver_for("// hdlint waive rule-x\n\nc = d;\n");
        assert!(waiver.is_empty());
    }

    #[test]
    fn test_block_comment_directive() {
        let mut builder = LintWaiverBuilder::default();
        let tokens = [
            TokenInfo::new(1, 0, "x"),
            TokenInfo::new(2, 2, "/* hdlint waive rule-y */"),
        ];
        builder.process_line(&tokens, 4);
        assert!(builder.lint_waiver().rule_is_waived_on_line("rule-y", 4));
    }

    #[test]
    fn test_unrelated_comments_are_ignored() {
        let waiver = waiver_for("a; // hdlint\nb; // hdlint waive\nc; // lint waive rule\n");
        assert!(waiver.is_empty());
    }

    #[test]
    fn test_range_waiver() {
        let contents = "a;\n// hdlint waive-start r\nb;\nc;\n// hdlint waive-stop r\nd;\n";
        let waiver = waiver_for(contents);
        assert!(!waiver.rule_is_waived_on_line("r", 0));
        for line in 1..4 {
            assert!(waiver.rule_is_waived_on_line("r", line), "line {line}");
        }
        assert!(!waiver.rule_is_waived_on_line("r", 4));
        assert!(!waiver.rule_is_waived_on_line("r", 5));
    }

    #[test]
    fn test_first_range_start_wins_and_unbalanced_stop_ignored() {
        let contents = "// hdlint waive-stop r\n\
                        a;\n\
                        // hdlint waive-start r\n\
                        b;\n\
                        // hdlint waive-start r\n\
                        c;\n\
                        // hdlint waive-stop r\n\
                        d;\n";
        let waiver = waiver_for(contents);
        assert!(!waiver.rule_is_waived_on_line("r", 1));
        assert!(waiver.rule_is_waived_on_line("r", 2));
        assert!(waiver.rule_is_waived_on_line("r", 5));
        assert!(!waiver.rule_is_waived_on_line("r", 7));
    }

    #[test]
    fn test_open_range_runs_to_end_of_file() {
        let waiver = waiver_for("a;\n// hdlint waive-start r\nb;\nc;");
        assert!(!waiver.rule_is_waived_on_line("r", 0));
        assert!(waiver.rule_is_waived_on_line("r", 3));
    }

    #[test]
    fn test_external_line_waivers() {
        let mut builder = LintWaiverBuilder::default();
        let content = "# comment\n\
                       waive --rule=rule-a --line=3\n\
                       \n\
                       waive --rule=rule-b --line=5:7\n";
        builder
            .apply_external_waivers(&rules(&["rule-a", "rule-b"]), "top.sv", "w.txt", content)
            .unwrap();
        let waiver = builder.lint_waiver();
        assert!(waiver.rule_is_waived_on_line("rule-a", 2));
        assert!(!waiver.rule_is_waived_on_line("rule-a", 3));
        assert!(!waiver.rule_is_waived_on_line("rule-b", 3));
        assert!(waiver.rule_is_waived_on_line("rule-b", 4));
        assert!(waiver.rule_is_waived_on_line("rule-b", 6));
        assert!(!waiver.rule_is_waived_on_line("rule-b", 7));
    }

    #[test]
    fn test_external_regex_and_whole_file_waivers() {
        let mut builder = LintWaiverBuilder::default();
        let content = "waive --rule=rule-a --regex=\"foo bar\"\nwaive --rule=rule-b\n";
        builder
            .apply_external_waivers(&rules(&["rule-a", "rule-b"]), "top.sv", "w.txt", content)
            .unwrap();
        builder.process_token_ranges_by_line(&view("x;\ny = foo bar;\n"));
        let waiver = builder.lint_waiver();
        assert!(!waiver.rule_is_waived_on_line("rule-a", 0));
        assert!(waiver.rule_is_waived_on_line("rule-a", 1));
        assert!(waiver.rule_is_waived_on_line("rule-b", 0));
        assert!(waiver.rule_is_waived_on_line("rule-b", 1000));
    }

    #[test]
    fn test_external_location_filter() {
        let mut builder = LintWaiverBuilder::default();
        let content = "waive --rule=rule-a --line=1 --location=\"rtl/.*\\.sv\"\n";
        builder
            .apply_external_waivers(&rules(&["rule-a"]), "dv/tb.sv", "w.txt", content)
            .unwrap();
        assert!(builder.lint_waiver().is_empty());
        builder
            .apply_external_waivers(&rules(&["rule-a"]), "rtl/top.sv", "w.txt", content)
            .unwrap();
        assert!(builder.lint_waiver().rule_is_waived_on_line("rule-a", 0));
    }

    #[test]
    fn test_external_command_errors() {
        let content = "waive --rule=unknown --line=1\n\
                       waive --rule=rule-a --line=x\n\
                       waive --rule=rule-a --line=0\n\
                       waive --rule=rule-a --line=5:2\n\
                       waive --rule=rule-a --line=1 --regex=a\n\
                       waive --line=1\n\
                       waive --rule=rule-a --color=red\n\
                       waive rule-a\n\
                       ignore --rule=rule-a\n\
                       waive --rule=rule-a --line=1:z\n\
                       waive --rule=rule-a --regex=(\n";
        let mut builder = LintWaiverBuilder::default();
        let WaiverError::Commands(errors) = builder
            .apply_external_waivers(&rules(&["rule-a"]), "top.sv", "w.txt", content)
            .unwrap_err()
        else {
            panic!("expected command errors");
        };
        let expected_prefixes = [
            "w.txt:1:7: command error: Invalid rule: unknown",
            "w.txt:2:21: command error: Unable to parse line number: x",
            "w.txt:3:21: command error: Invalid line number: 0",
            "w.txt:4:21: command error: Invalid line range: 5:2",
            "w.txt:5:39: command error: Regex and line flags are mutually exclusive",
            "w.txt:6:15: command error: Insufficient waiver configuration",
            "w.txt:7:21: command error: Unsupported flag: color",
            "w.txt:8:7: command error: Unsupported argument: rule-a",
            "w.txt:9:1: command error: Command not supported: ignore",
            "w.txt:10:21: command error: Unable to parse range: 1:z",
            "w.txt:11:21: command error: Invalid regex: ",
        ];
        assert_eq!(errors.len(), expected_prefixes.len());
        for (error, prefix) in errors.iter().zip(expected_prefixes) {
            assert!(error.starts_with(prefix), "{error:?} vs {prefix:?}");
        }
        assert!(builder.lint_waiver().is_empty());
    }
}
