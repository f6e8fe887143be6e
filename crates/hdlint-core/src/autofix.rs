//! Automatic fixes: named sets of non-overlapping source-text edits.

use crate::text::TokenInfo;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::ops::Range;

/// Replaces a byte range of the original text with new text.
///
/// An empty fragment is a pure insertion; an empty replacement is a pure
/// deletion.
///
/// Edits order by position: `a < b` iff `a` ends at or before the start of
/// `b`. Edits whose fragments intersect compare as equal, so a
/// [`BTreeSet`] of edits refuses to hold two overlapping edits.
#[derive(Debug, Clone)]
pub struct ReplacementEdit {
    fragment: Range<usize>,
    replacement: String,
}

impl ReplacementEdit {
    /// Creates an edit replacing `fragment` with `replacement`.
    ///
    /// # Panics
    ///
    /// Panics if the fragment ends before it starts.
    #[must_use]
    pub fn new(fragment: Range<usize>, replacement: impl Into<String>) -> Self {
        assert!(
            fragment.start <= fragment.end,
            "Invalid edit fragment {fragment:?}"
        );
        Self {
            fragment,
            replacement: replacement.into(),
        }
    }

    /// Creates an edit replacing the text of `token`.
    #[must_use]
    pub fn for_token(token: &TokenInfo, replacement: impl Into<String>) -> Self {
        Self::new(token.byte_range(), replacement)
    }

    /// Creates an edit inserting `text` at `offset`.
    #[must_use]
    pub fn insertion(offset: usize, text: impl Into<String>) -> Self {
        Self::new(offset..offset, text)
    }

    /// Creates an edit deleting `fragment`.
    #[must_use]
    pub fn deletion(fragment: Range<usize>) -> Self {
        Self::new(fragment, "")
    }

    /// The replaced byte range of the original text.
    #[must_use]
    pub fn fragment(&self) -> Range<usize> {
        self.fragment.clone()
    }

    /// The replacement text.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

impl Ord for ReplacementEdit {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.fragment == other.fragment {
            Ordering::Equal
        } else if self.fragment.end <= other.fragment.start {
            Ordering::Less
        } else if other.fragment.end <= self.fragment.start {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl PartialOrd for ReplacementEdit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ReplacementEdit {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ReplacementEdit {}

/// A described set of edits that together fix one violation.
#[derive(Debug, Clone, Default)]
pub struct AutoFix {
    description: String,
    edits: BTreeSet<ReplacementEdit>,
}

impl AutoFix {
    /// Creates a fix from `edits`.
    ///
    /// # Panics
    ///
    /// Panics if any two edits overlap.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        edits: impl IntoIterator<Item = ReplacementEdit>,
    ) -> Self {
        let mut set = BTreeSet::new();
        for edit in edits {
            assert!(set.insert(edit), "Edits must not overlap.");
        }
        Self {
            description: description.into(),
            edits: set,
        }
    }

    /// Creates a fix consisting of a single edit.
    #[must_use]
    pub fn single(description: impl Into<String>, edit: ReplacementEdit) -> Self {
        Self::new(description, [edit])
    }

    /// Human-readable description of the fix.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The edits, in ascending position.
    #[must_use]
    pub fn edits(&self) -> &BTreeSet<ReplacementEdit> {
        &self.edits
    }

    /// Merges `new_edits` into this fix.
    ///
    /// Returns `false`, leaving the fix unchanged, if any new edit overlaps
    /// an existing one.
    pub fn add_edits(&mut self, new_edits: &BTreeSet<ReplacementEdit>) -> bool {
        if new_edits.iter().any(|edit| self.edits.contains(edit)) {
            return false;
        }
        self.edits.extend(new_edits.iter().cloned());
        true
    }

    /// Applies the edits to `base`, the text the edit offsets refer to.
    ///
    /// # Panics
    ///
    /// Panics if an edit lies outside of `base` or splits a UTF-8 character.
    #[must_use]
    pub fn apply(&self, base: &str) -> String {
        let mut result = String::with_capacity(base.len());
        let mut cursor = 0;
        for edit in &self.edits {
            assert!(
                edit.fragment.end <= base.len(),
                "Edit {:?} is outside of the {}-byte text",
                edit.fragment,
                base.len()
            );
            result.push_str(&base[cursor..edit.fragment.start]);
            result.push_str(&edit.replacement);
            cursor = edit.fragment.end;
        }
        result.push_str(&base[cursor..]);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_edits_is_identity() {
        let fix = AutoFix::default();
        assert_eq!(fix.apply("module m; endmodule"), "module m; endmodule");
    }

    #[test]
    fn test_replace_insert_delete() {
        let text = "wire  a ;";
        let fix = AutoFix::new(
            "tidy",
            [
                ReplacementEdit::insertion(0, "  "),
                ReplacementEdit::new(4..6, " "),
                ReplacementEdit::deletion(7..8),
            ],
        );
        assert_eq!(fix.apply(text), "  wire a;");
    }

    #[test]
    fn test_edits_applied_in_order_regardless_of_input_order() {
        let fix = AutoFix::new(
            "swap",
            [
                ReplacementEdit::new(4..5, "y"),
                ReplacementEdit::new(0..1, "x"),
            ],
        );
        assert_eq!(fix.apply("a + b"), "x + y");
        let starts: Vec<usize> = fix.edits().iter().map(|e| e.fragment().start).collect();
        assert_eq!(starts, vec![0, 4]);
    }

    #[test]
    fn test_adjacent_edits_do_not_overlap() {
        let fix = AutoFix::new(
            "adjacent",
            [
                ReplacementEdit::new(0..2, "A"),
                ReplacementEdit::insertion(2, "-"),
                ReplacementEdit::new(2..4, "B"),
            ],
        );
        assert_eq!(fix.apply("aabb"), "A-B");
    }

    #[test]
    fn test_edit_for_token() {
        let token = TokenInfo::new(1, 4, "foo");
        let fix = AutoFix::single("rename", ReplacementEdit::for_token(&token, "bar"));
        assert_eq!(fix.apply("reg foo;"), "reg bar;");
        assert_eq!(fix.description(), "rename");
    }

    #[test]
    #[should_panic(expected = "Edits must not overlap.")]
    fn test_duplicate_edits_rejected() {
        let _ = AutoFix::new(
            "dup",
            [
                ReplacementEdit::new(1..3, "x"),
                ReplacementEdit::new(1..3, "y"),
            ],
        );
    }

    #[test]
    #[should_panic(expected = "Edits must not overlap.")]
    fn test_partial_overlap_rejected() {
        let _ = AutoFix::new(
            "partial",
            [
                ReplacementEdit::new(1..4, "x"),
                ReplacementEdit::new(3..6, "y"),
            ],
        );
    }

    #[test]
    #[should_panic(expected = "Edits must not overlap.")]
    fn test_insertion_inside_replacement_rejected() {
        let _ = AutoFix::new(
            "inside",
            [
                ReplacementEdit::new(1..4, "x"),
                ReplacementEdit::insertion(2, "y"),
            ],
        );
    }

    #[test]
    #[should_panic(expected = "Edits must not overlap.")]
    fn test_duplicate_insertions_rejected() {
        let _ = AutoFix::new(
            "inserts",
            [
                ReplacementEdit::insertion(2, "x"),
                ReplacementEdit::insertion(2, "y"),
            ],
        );
    }

    #[test]
    fn test_overlap_detected_against_any_existing_edit() {
        let mut set = BTreeSet::new();
        for edit in [
            ReplacementEdit::new(0..2, ""),
            ReplacementEdit::new(4..6, ""),
            ReplacementEdit::new(8..10, ""),
        ] {
            assert!(set.insert(edit));
        }
        assert!(set.contains(&ReplacementEdit::new(1..9, "")));
        assert!(set.contains(&ReplacementEdit::new(5..7, "")));
        assert!(!set.contains(&ReplacementEdit::new(6..8, "")));
    }

    #[test]
    fn test_add_edits() {
        let mut fix = AutoFix::single("base", ReplacementEdit::new(2..4, "x"));

        let conflicting: BTreeSet<_> = [
            ReplacementEdit::new(6..7, "z"),
            ReplacementEdit::new(3..5, "y"),
        ]
        .into_iter()
        .collect();
        assert!(!fix.add_edits(&conflicting));
        assert_eq!(fix.edits().len(), 1);

        let compatible: BTreeSet<_> = [ReplacementEdit::new(0..1, "w")].into_iter().collect();
        assert!(fix.add_edits(&compatible));
        assert_eq!(fix.apply("abcdef"), "wbxef");
    }

    #[test]
    #[should_panic(expected = "outside of the")]
    fn test_apply_out_of_bounds_panics() {
        let fix = AutoFix::single("oob", ReplacementEdit::new(3..9, ""));
        let _ = fix.apply("abc");
    }
}
