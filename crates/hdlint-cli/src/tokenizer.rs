//! A generic C-style tokenizer.
//!
//! Splits HDL source into whitespace, newlines, `//` and `/* */` comments,
//! words (including `$system` names and `` `macro `` references), numbers,
//! string literals and single-character punctuation. It knows no keywords
//! and builds no syntax tree; that is enough for line, token stream and
//! text structure rules and for in-source waiver comments.

use hdlint_core::waiver::WaiverSyntax;
use hdlint_core::{TextStructureView, TokenInfo};

/// Token categories produced by [`tokenize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum TokenKind {
    /// Spaces, tabs and carriage returns.
    Space = 1,
    /// A single `\n`.
    Newline = 2,
    /// A line or block comment.
    Comment = 3,
    /// Identifiers, keywords, system names and macro references.
    Word = 4,
    /// Numeric literals, including based literals such as `8'hff`.
    Number = 5,
    /// A double-quoted string.
    String = 6,
    /// Any other single character.
    Punctuation = 7,
}

impl TokenKind {
    /// The `token_enum` value used in [`TokenInfo`].
    #[must_use]
    pub const fn id(self) -> i32 {
        self as i32
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '\'' || c == '.'
}

/// Byte length of the prefix of `rest` whose characters satisfy `keep`.
fn run_length(rest: &str, keep: impl Fn(char) -> bool) -> usize {
    rest.find(|c: char| !keep(c)).unwrap_or(rest.len())
}

fn string_length(rest: &str) -> usize {
    let mut escaped = false;
    for (i, c) in rest.char_indices().skip(1) {
        match c {
            '\n' => return i,
            '"' if !escaped => return i + 1,
            '\\' => escaped = !escaped,
            _ => escaped = false,
        }
    }
    rest.len()
}

fn next_token(rest: &str) -> (TokenKind, usize) {
    let mut chars = rest.chars();
    let Some(first) = chars.next() else {
        return (TokenKind::Space, 0);
    };
    match first {
        '\n' => (TokenKind::Newline, 1),
        c if c.is_whitespace() => (
            TokenKind::Space,
            run_length(rest, |c| c.is_whitespace() && c != '\n'),
        ),
        '/' if rest.starts_with("//") => (
            TokenKind::Comment,
            rest.find('\n').unwrap_or(rest.len()),
        ),
        // Unterminated block comments run to end of file.
        '/' if rest.starts_with("/*") => (
            TokenKind::Comment,
            rest[2..].find("*/").map_or(rest.len(), |end| end + 4),
        ),
        '"' => (TokenKind::String, string_length(rest)),
        c if c.is_ascii_digit() => (TokenKind::Number, run_length(rest, is_number_char)),
        '`' | '$' => (
            TokenKind::Word,
            first.len_utf8() + run_length(chars.as_str(), is_word_char),
        ),
        c if is_word_char(c) => (TokenKind::Word, run_length(rest, is_word_char)),
        c => (TokenKind::Punctuation, c.len_utf8()),
    }
}

/// Splits `contents` into tokens, without the end-of-file token.
#[must_use]
pub fn tokenize(contents: &str) -> Vec<TokenInfo> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    while offset < contents.len() {
        let rest = &contents[offset..];
        let (kind, length) = next_token(rest);
        tokens.push(TokenInfo::new(kind.id(), offset, &rest[..length]));
        offset += length;
    }
    tokens
}

/// Builds the view the linters consume. The token stream view holds no
/// whitespace or comments.
#[must_use]
pub fn text_structure(contents: impl Into<String>) -> TextStructureView {
    let contents = contents.into();
    let tokens = tokenize(&contents);
    let mut view = TextStructureView::new(contents).with_tokens(tokens);
    view.filter_tokens(|t| !is_space(t) && !is_comment(t));
    view
}

fn is_comment(token: &TokenInfo) -> bool {
    token.token_enum() == TokenKind::Comment.id()
}

fn is_space(token: &TokenInfo) -> bool {
    let kind = token.token_enum();
    kind == TokenKind::Space.id() || kind == TokenKind::Newline.id()
}

/// Waiver directives as spelled in this tokenizer's comments.
#[must_use]
pub fn waiver_syntax() -> WaiverSyntax {
    WaiverSyntax {
        is_comment,
        is_space,
        ..WaiverSyntax::default()
    }
}
