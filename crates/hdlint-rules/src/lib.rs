//! # hdlint-rules
//!
//! Built-in lint rules for hdlint.
//!
//! ## Available Rules
//!
//! | Name | Kind | Configuration |
//! |------|------|---------------|
//! | `no-tabs` | line | none |
//! | `no-trailing-spaces` | line | none, autofix available |
//! | `line-length` | line | `length:<40..1000>` |
//! | `posix-eof` | text structure | none, autofix available |
//! | `forbidden-token-text` | token stream | `pattern:<regex>` |
//! | `max-nesting-depth` | syntax tree | `depth:<1..1000>` |
//!
//! ## Usage
//!
//! ```
//! use hdlint_core::{LinterConfiguration, RuleSet};
//!
//! hdlint_rules::register_builtin_rules();
//!
//! let mut config = LinterConfiguration::new();
//! config.use_rule_set(RuleSet::Default);
//! assert!(config.rule_is_on("no-tabs"));
//! assert!(!config.rule_is_on("max-nesting-depth"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod forbidden_token_text;
mod line_length;
mod max_nesting_depth;
mod no_tabs;
mod no_trailing_spaces;
mod posix_eof;
mod presets;

pub use forbidden_token_text::ForbiddenTokenText;
pub use line_length::LineLength;
pub use max_nesting_depth::MaxNestingDepth;
pub use no_tabs::NoTabs;
pub use no_trailing_spaces::NoTrailingSpaces;
pub use posix_eof::PosixEof;
pub use presets::Preset;

use hdlint_core::registry::{
    register_line_rule, register_syntax_tree_rule, register_text_structure_rule,
    register_token_stream_rule, set_default_rule_set,
};
use std::sync::Once;

/// Rules enabled by the `default` rule set.
pub const DEFAULT_RULE_SET: &[&str] = &[
    line_length::NAME,
    no_tabs::NAME,
    no_trailing_spaces::NAME,
    posix_eof::NAME,
];

/// Registers every built-in rule and the default rule set.
///
/// Safe to call any number of times; only the first call registers.
pub fn register_builtin_rules() {
    static REGISTER: Once = Once::new();
    REGISTER.call_once(|| {
        register_line_rule::<NoTabs>();
        register_line_rule::<NoTrailingSpaces>();
        register_line_rule::<LineLength>();
        register_text_structure_rule::<PosixEof>();
        register_token_stream_rule::<ForbiddenTokenText>();
        register_syntax_tree_rule::<MaxNestingDepth>();
        set_default_rule_set(DEFAULT_RULE_SET);
        tracing::debug!("registered built-in rules");
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdlint_core::registry::{all_registered_lint_rule_names, default_rule_set};

    #[test]
    fn test_register_is_idempotent() {
        register_builtin_rules();
        register_builtin_rules();
        let names: Vec<String> = all_registered_lint_rule_names().into_iter().collect();
        assert_eq!(
            names,
            vec![
                "forbidden-token-text",
                "line-length",
                "max-nesting-depth",
                "no-tabs",
                "no-trailing-spaces",
                "posix-eof",
            ]
        );
        assert_eq!(default_rule_set().len(), DEFAULT_RULE_SET.len());
    }
}
