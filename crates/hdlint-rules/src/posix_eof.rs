//! Rule to require a newline at the end of a file.
//!
//! # Rationale
//!
//! POSIX defines a line as ending with a newline; many tools mishandle a
//! final line without one.
//!
//! # Autofix
//!
//! Appends `\n`.

use hdlint_core::{
    AutoFix, DescribedRule, LintRule, LintRuleDescriptor, LintRuleStatus, LintViolation,
    ReplacementEdit, TextStructureLintRule, TextStructureView,
};
use std::collections::BTreeSet;

/// Rule name for posix-eof.
pub const NAME: &str = "posix-eof";

const MESSAGE: &str = "File must end with a newline.";

/// Flags non-empty files that do not end with a newline.
#[derive(Debug, Default)]
pub struct PosixEof {
    violations: BTreeSet<LintViolation>,
}

impl DescribedRule for PosixEof {
    fn descriptor() -> LintRuleDescriptor {
        LintRuleDescriptor::new(NAME, "Checks that the file ends with a newline.")
            .with_topic("posix-file-endings")
    }
}

impl LintRule for PosixEof {
    fn report(&self) -> LintRuleStatus {
        LintRuleStatus::new(self.violations.clone(), &Self::descriptor())
    }
}

impl TextStructureLintRule for PosixEof {
    fn lint(&mut self, text_structure: &TextStructureView, _filename: &str) {
        let contents = text_structure.contents();
        if contents.is_empty() || contents.ends_with('\n') {
            return;
        }
        let eof = text_structure.eof_token();
        let fix = AutoFix::single("Add newline", ReplacementEdit::insertion(eof.left(), "\n"));
        self.violations
            .insert(LintViolation::new(eof.clone(), MESSAGE).with_autofix(fix));
    }
}
