//! The per-file bundle of representations handed to the linters.

use super::line_column::LineColumnMap;
use super::token::{TokenInfo, TokenSequence, TK_OTHER};
use super::tree::Symbol;
use std::ops::Range;

/// One physical line of the source, without its newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Line<'a> {
    /// Creates a line whose text starts at byte `offset` of the buffer.
    #[must_use]
    pub fn new(text: &'a str, offset: usize) -> Self {
        Self { text, offset }
    }

    /// The line text.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Byte offset of the line start in the buffer.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns true for an empty line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the whole line as a token.
    #[must_use]
    pub fn to_token(&self) -> TokenInfo {
        TokenInfo::new(TK_OTHER, self.offset, self.text)
    }

    /// Returns a token covering the columns `range` of this line.
    ///
    /// # Panics
    ///
    /// Panics if `range` is not within the line or not on character boundaries.
    #[must_use]
    pub fn sub_token(&self, range: Range<usize>) -> TokenInfo {
        let start = range.start;
        TokenInfo::new(TK_OTHER, self.offset + start, &self.text[range])
    }
}

/// Splits `contents` on `\n`. A trailing newline yields a final empty line.
#[must_use]
pub fn split_lines(contents: &str) -> Vec<Line<'_>> {
    let mut offset = 0;
    contents
        .split('\n')
        .map(|text| {
            let line = Line::new(text, offset);
            offset += text.len() + 1;
            line
        })
        .collect()
}

/// Contents, lines, tokens and (optionally) the syntax tree of one file.
#[derive(Debug, Clone)]
pub struct TextStructureView {
    contents: String,
    line_ranges: Vec<Range<usize>>,
    line_column_map: LineColumnMap,
    tokens: TokenSequence,
    token_stream_view: Vec<usize>,
    syntax_tree: Option<Symbol>,
}

impl TextStructureView {
    /// Creates a view with no tokens (other than end-of-file) and no tree.
    #[must_use]
    pub fn new(contents: impl Into<String>) -> Self {
        let contents = contents.into();
        let line_ranges = split_lines(&contents)
            .iter()
            .map(|line| line.offset()..line.offset() + line.text().len())
            .collect();
        let line_column_map = LineColumnMap::new(&contents);
        let tokens = vec![TokenInfo::eof(&contents)];
        Self {
            contents,
            line_ranges,
            line_column_map,
            tokens,
            token_stream_view: Vec::new(),
            syntax_tree: None,
        }
    }

    /// Sets the token sequence. An end-of-file token is appended if missing.
    ///
    /// Tokens must be sorted by start offset. The token stream view is reset
    /// to every non-EOF token.
    #[must_use]
    pub fn with_tokens(mut self, tokens: impl IntoIterator<Item = TokenInfo>) -> Self {
        self.tokens = tokens.into_iter().collect();
        if !self.tokens.last().is_some_and(TokenInfo::is_eof) {
            self.tokens.push(TokenInfo::eof(&self.contents));
        }
        self.filter_tokens(|_| true);
        self
    }

    /// Sets the concrete syntax tree.
    #[must_use]
    pub fn with_syntax_tree(mut self, tree: Symbol) -> Self {
        self.syntax_tree = Some(tree);
        self
    }

    /// Rebuilds the token stream view from the non-EOF tokens that satisfy `keep`.
    pub fn filter_tokens(&mut self, keep: impl Fn(&TokenInfo) -> bool) {
        self.token_stream_view = self
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_eof() && keep(t))
            .map(|(i, _)| i)
            .collect();
    }

    /// Raw file contents.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// The lines of the file, in order.
    #[must_use]
    pub fn lines(&self) -> Vec<Line<'_>> {
        self.line_ranges
            .iter()
            .map(|r| Line::new(&self.contents[r.clone()], r.start))
            .collect()
    }

    /// Number of lines (see [`split_lines`]).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_ranges.len()
    }

    /// The full token sequence, ending with the end-of-file token.
    #[must_use]
    pub fn token_stream(&self) -> &[TokenInfo] {
        &self.tokens
    }

    /// The filtered token stream view.
    pub fn token_stream_view(&self) -> impl Iterator<Item = &TokenInfo> + '_ {
        self.token_stream_view.iter().map(|&i| &self.tokens[i])
    }

    /// The end-of-file token.
    #[must_use]
    pub fn eof_token(&self) -> &TokenInfo {
        // with_tokens keeps the EOF token last.
        &self.tokens[self.tokens.len() - 1]
    }

    /// The concrete syntax tree, if one was parsed.
    #[must_use]
    pub fn syntax_tree(&self) -> Option<&Symbol> {
        self.syntax_tree.as_ref()
    }

    /// Offset-to-position map for this file.
    #[must_use]
    pub fn line_column_map(&self) -> &LineColumnMap {
        &self.line_column_map
    }

    /// The tokens that start on 0-based line `line`, excluding end-of-file.
    #[must_use]
    pub fn token_range_on_line(&self, line: usize) -> &[TokenInfo] {
        let Some(range) = self.line_ranges.get(line) else {
            return &[];
        };
        let next_start = self
            .line_ranges
            .get(line + 1)
            .map_or(usize::MAX, |next| next.start);
        let tokens = &self.tokens[..self.tokens.len() - 1];
        let begin = tokens.partition_point(|t| t.left() < range.start);
        let end = tokens.partition_point(|t| t.left() < next_start);
        &tokens[begin..end]
    }
}
