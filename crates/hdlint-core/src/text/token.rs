//! Tokens produced by a lexer and consumed by the linters.

use std::fmt;
use std::ops::Range;

/// Token kind reserved for the end-of-file token.
pub const TK_EOF: i32 = 0;

/// Token kind for tokens synthesized outside of the lexer, such as whole lines.
pub const TK_OTHER: i32 = -1;

/// An ordered sequence of tokens, terminated by an end-of-file token.
pub type TokenSequence = Vec<TokenInfo>;

/// A token: a language-specific kind plus the text it spans in the original buffer.
///
/// Tokens are identified by their position: `left` is the byte offset of the
/// first byte of `text` in the buffer the token was lexed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenInfo {
    token_enum: i32,
    left: usize,
    text: String,
}

impl TokenInfo {
    /// Creates a token of kind `token_enum` whose text starts at byte `left`.
    #[must_use]
    pub fn new(token_enum: i32, left: usize, text: impl Into<String>) -> Self {
        Self {
            token_enum,
            left,
            text: text.into(),
        }
    }

    /// Creates the end-of-file token for `contents`.
    #[must_use]
    pub fn eof(contents: &str) -> Self {
        Self::new(TK_EOF, contents.len(), "")
    }

    /// Returns the language-specific token kind.
    #[must_use]
    pub fn token_enum(&self) -> i32 {
        self.token_enum
    }

    /// Byte offset of the start of this token.
    #[must_use]
    pub fn left(&self) -> usize {
        self.left
    }

    /// Byte offset one past the end of this token.
    #[must_use]
    pub fn right(&self) -> usize {
        self.left + self.text.len()
    }

    /// Half-open byte range covered by this token.
    #[must_use]
    pub fn byte_range(&self) -> Range<usize> {
        self.left..self.right()
    }

    /// Returns the token text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true for the end-of-file token.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.token_enum == TK_EOF
    }
}

impl fmt::Display for TokenInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(#{} @{}-{}: \"{}\")",
            self.token_enum,
            self.left,
            self.right(),
            self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_range() {
        let token = TokenInfo::new(5, 3, "wire");
        assert_eq!(token.left(), 3);
        assert_eq!(token.right(), 7);
        assert_eq!(token.byte_range(), 3..7);
        assert!(!token.is_eof());
    }

    #[test]
    fn test_eof_token() {
        let eof = TokenInfo::eof("module m;\n");
        assert!(eof.is_eof());
        assert_eq!(eof.left(), 10);
        assert_eq!(eof.text(), "");
    }

    #[test]
    fn test_display() {
        let token = TokenInfo::new(7, 0, "foo");
        assert_eq!(token.to_string(), "(#7 @0-3: \"foo\")");
    }
}
