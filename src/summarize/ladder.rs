//! Delimiter ladder: the ordered splitting rungs, coarsest first.
//!
//! The ladder is an immutable value. Recursion walks it by index, so the
//! "nothing finer left to try" state is an explicit `None` from [`Ladder::rung`]
//! rather than an empty slice discovered by accident.

use regex_lite::Regex;

/// Start of a file section in a unified diff.
pub const DIFF_HEADER_PATTERN: &str = r"(?m)^diff ";

/// A run of two or more newlines, i.e. at least one blank line.
pub const BLANK_LINE_PATTERN: &str = r"\n{2,}";

/// A single newline.
pub const NEWLINE_PATTERN: &str = r"\n";

/// Where a matched delimiter ends up after splitting.
///
/// Either way, concatenating the parts in order gives back the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// The delimiter opens the part that follows it (`diff --git ...` headers).
    Leading,
    /// The delimiter closes the part that precedes it (blank lines, newlines).
    Trailing,
}

/// One ladder entry: a pattern and where its matches are attached.
#[derive(Debug, Clone)]
pub struct Rung {
    pattern: Regex,
    mode: SplitMode,
}

impl Rung {
    pub fn new(pattern: &str, mode: SplitMode) -> Result<Self, regex_lite::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            mode,
        })
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn mode(&self) -> SplitMode {
        self.mode
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Ordered splitting rungs from coarse to fine.
#[derive(Debug, Clone)]
pub struct Ladder {
    rungs: Vec<Rung>,
}

impl Ladder {
    pub fn new(rungs: Vec<Rung>) -> Self {
        Self { rungs }
    }

    /// The rung at `index`, or `None` once the ladder is exhausted.
    pub fn rung(&self, index: usize) -> Option<&Rung> {
        self.rungs.get(index)
    }

    pub fn len(&self) -> usize {
        self.rungs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rungs.is_empty()
    }
}

impl Default for Ladder {
    /// File boundaries, then blank lines, then single lines.
    fn default() -> Self {
        Self::new(vec![
            Rung::new(DIFF_HEADER_PATTERN, SplitMode::Leading).expect("Invalid regex"),
            Rung::new(BLANK_LINE_PATTERN, SplitMode::Trailing).expect("Invalid regex"),
            Rung::new(NEWLINE_PATTERN, SplitMode::Trailing).expect("Invalid regex"),
        ])
    }
}
