//! Representations of one parsed file, as supplied by the lexer and parser.

mod line_column;
mod text_structure;
mod token;
mod tree;

pub use line_column::{LineColumn, LineColumnMap};
pub use text_structure::{split_lines, Line, TextStructureView};
pub use token::{TokenInfo, TokenSequence, TK_EOF, TK_OTHER};
pub use tree::{
    leftmost_leaf, rightmost_leaf, Symbol, SymbolKind, SymbolTag, SyntaxTreeLeaf, SyntaxTreeNode,
    WeakSymbol,
};
