//! Prompt text for the three kinds of request the summarizer makes.
//!
//! Every prompt ends with a blank line so the text it is prepended to
//! starts on its own paragraph.

/// Final request: turn a diff, or summaries of one, into a commit message.
pub const DEFAULT_COMMIT_PROMPT: &str = "Write a git commit message for the following. The message \
starts with a one-line summary of 60 characters, followed by a blank line, followed by a longer \
but concise description of the change.\n\n";

/// Per-chunk request on raw diff text.
pub const DETAIL_PROMPT: &str =
    "Make an unordered list of the effects of every change in this diff.\n\n";

/// Per-chunk request on a list of summaries.
pub const COMPRESS_PROMPT: &str =
    "Make an unordered list that summarizes the changes described below.\n\n";

/// Normalize a user-supplied prompt.
///
/// Runs of whitespace collapse to single spaces and a blank line is appended,
/// matching the shape of the built-in prompts.
pub fn normalize_prompt(prompt: &str) -> String {
    let collapsed = prompt.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{collapsed}\n\n")
}
