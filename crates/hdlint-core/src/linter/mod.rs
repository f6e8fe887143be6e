//! Traversal drivers, one per rule kind.
//!
//! Each linter owns the rules of its kind and makes exactly one pass over
//! its input representation. At every unit of input all rules are invoked,
//! in the order they were added, before the linter advances.

mod line;
mod syntax_tree;
mod text_structure;
mod token_stream;

pub use line::LineLinter;
pub use syntax_tree::SyntaxTreeLinter;
pub use text_structure::TextStructureLinter;
pub use token_stream::TokenStreamLinter;

/// Lifecycle of a linter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinterState {
    /// Accepting rules; not yet run.
    #[default]
    Idle,
    /// The pass has completed; statuses may be reported.
    Done,
}

fn assert_idle(state: LinterState, action: &str) {
    assert_eq!(
        state,
        LinterState::Idle,
        "cannot {action} after the linter has run"
    );
}

fn assert_done(state: LinterState) {
    assert_eq!(
        state,
        LinterState::Done,
        "cannot report status before the linter has run"
    );
}
