//! Byte offset to line/column translation, used for reporting.

use std::fmt;

/// A 0-based line and byte column. Displays 1-based as `line:column`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineColumn {
    /// 0-based line number.
    pub line: usize,
    /// 0-based byte column within the line.
    pub column: usize,
}

impl fmt::Display for LineColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Maps byte offsets of a text to line/column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineColumnMap {
    beginning_of_line_offsets: Vec<usize>,
}

impl LineColumnMap {
    /// Scans `text` for line starts.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut offsets = vec![0];
        offsets.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            beginning_of_line_offsets: offsets,
        }
    }

    /// Byte offsets at which each line begins. The first entry is always 0.
    #[must_use]
    pub fn beginning_of_lines(&self) -> &[usize] {
        &self.beginning_of_line_offsets
    }

    /// Number of lines, counting the piece after a final newline.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.beginning_of_line_offsets.len()
    }

    /// Returns the 0-based line containing `offset`.
    #[must_use]
    pub fn line_at_offset(&self, offset: usize) -> usize {
        self.beginning_of_line_offsets
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    /// Returns the 0-based line and column of `offset`.
    #[must_use]
    pub fn get_line_col_at_offset(&self, offset: usize) -> LineColumn {
        let line = self.line_at_offset(offset);
        LineColumn {
            line,
            column: offset - self.beginning_of_line_offsets[line],
        }
    }
}

impl Default for LineColumnMap {
    fn default() -> Self {
        Self::new("")
    }
}
