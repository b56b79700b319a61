//! Splitting text at every match of one ladder rung.

use super::ladder::{Rung, SplitMode};

/// Split `text` at every match of `rung`.
///
/// Matched delimiters stay in the output, attached to the following part
/// ([`SplitMode::Leading`]) or the preceding part ([`SplitMode::Trailing`]).
/// No part is empty, zero-width matches are ignored, and
/// `split_text(text, rung).concat() == text` for every input.
pub fn split_text<'t>(text: &'t str, rung: &Rung) -> Vec<&'t str> {
    let mut parts = Vec::new();
    let mut start = 0;

    for m in rung.pattern().find_iter(text) {
        if m.start() == m.end() {
            continue;
        }

        let cut = match rung.mode() {
            SplitMode::Leading => m.start(),
            SplitMode::Trailing => m.end(),
        };

        if cut > start {
            parts.push(&text[start..cut]);
            start = cut;
        }
    }

    if start < text.len() {
        parts.push(&text[start..]);
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::ladder::{BLANK_LINE_PATTERN, DIFF_HEADER_PATTERN, NEWLINE_PATTERN};

    fn leading(pattern: &str) -> Rung {
        Rung::new(pattern, SplitMode::Leading).unwrap()
    }

    fn trailing(pattern: &str) -> Rung {
        Rung::new(pattern, SplitMode::Trailing).unwrap()
    }

    const TWO_FILE_DIFF: &str = "diff --git a/a.rs b/a.rs\n+one\ndiff --git a/b.rs b/b.rs\n-two\n";

    #[test]
    fn test_diff_header_reattached_to_following_part() {
        let parts = split_text(TWO_FILE_DIFF, &leading(DIFF_HEADER_PATTERN));
        assert_eq!(
            parts,
            vec![
                "diff --git a/a.rs b/a.rs\n+one\n",
                "diff --git a/b.rs b/b.rs\n-two\n",
            ]
        );
    }

    #[test]
    fn test_preamble_before_first_header_is_its_own_part() {
        let text = format!("From: someone\n\n{TWO_FILE_DIFF}");
        let parts = split_text(&text, &leading(DIFF_HEADER_PATTERN));
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "From: someone\n\n");
        assert!(parts[1].starts_with("diff --git a/a.rs"));
    }

    #[test]
    fn test_blank_lines_stay_with_preceding_part() {
        let parts = split_text("one\n\ntwo\n\n\nthree", &trailing(BLANK_LINE_PATTERN));
        assert_eq!(parts, vec!["one\n\n", "two\n\n\n", "three"]);
    }

    #[test]
    fn test_newline_split_keeps_newlines() {
        let parts = split_text("a\nb\nc\n", &trailing(NEWLINE_PATTERN));
        assert_eq!(parts, vec!["a\n", "b\n", "c\n"]);
    }

    #[test]
    fn test_no_match_returns_whole_text() {
        let parts = split_text("no delimiters here", &leading(DIFF_HEADER_PATTERN));
        assert_eq!(parts, vec!["no delimiters here"]);
    }

    #[test]
    fn test_empty_text_has_no_parts() {
        assert!(split_text("", &trailing(NEWLINE_PATTERN)).is_empty());
    }

    #[test]
    fn test_zero_width_matches_ignored() {
        let parts = split_text("a\n\nb", &trailing("(?m)^$"));
        assert_eq!(parts, vec!["a\n\nb"]);
    }

    #[test]
    fn test_concatenation_reconstructs_text_for_every_rung() {
        let samples = [
            TWO_FILE_DIFF,
            "",
            "\n",
            "\n\n\n",
            "diff \ndiff \n",
            "trailing text without newline",
            "lead\n\n\ndiff --git a b\n\n+x\n\n",
            "ünïcödé\n\nlines\nhere\n",
        ];
        let rungs = [
            leading(DIFF_HEADER_PATTERN),
            trailing(BLANK_LINE_PATTERN),
            trailing(NEWLINE_PATTERN),
        ];

        for rung in &rungs {
            for sample in samples {
                let parts = split_text(sample, rung);
                assert_eq!(parts.concat(), sample, "rung {} on {:?}", rung.as_str(), sample);
                assert!(parts.iter().all(|p| !p.is_empty()), "empty part for {:?}", sample);
            }
        }
    }
}
