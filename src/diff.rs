//! Diff collection: staged changes through git2, or raw text from a reader.

use std::io::Read;
use std::path::Path;

use git2::{DiffFormat, ErrorCode, Repository, Tree};
use tracing::debug;

use crate::error::DiffError;

/// Diffs shorter than this many bytes are treated as empty.
pub const MIN_DIFF_LENGTH: usize = 5;

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found),
/// so the staged diff is taken against the empty tree.
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, DiffError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(DiffError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(DiffError::DiffFailed)?;
    Ok(Some(tree))
}

/// Staged changes of `repo` as a unified patch, like `git diff --cached`.
pub fn staged_diff(repo: &Repository) -> Result<String, DiffError> {
    let head_tree = resolve_head_tree(repo)?;
    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(DiffError::DiffFailed)?;

    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        // Header and hunk lines carry their own text; content lines need the origin.
        let origin = line.origin();
        if origin == '+' || origin == '-' || origin == ' ' {
            text.push(origin);
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })
    .map_err(DiffError::DiffFailed)?;

    debug!("Collected staged diff: {} bytes", text.len());
    Ok(text)
}

/// Staged changes of the repository containing `path`.
pub fn staged_diff_at(path: impl AsRef<Path>) -> Result<String, DiffError> {
    let repo = Repository::discover(path).map_err(DiffError::OpenRepository)?;
    staged_diff(&repo)
}

/// Read a whole diff from `reader`, replacing invalid UTF-8.
pub fn read_diff<R: Read>(mut reader: R) -> Result<String, DiffError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(DiffError::ReadStdin)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Whether `diff` is too short to describe.
pub fn is_empty_diff(diff: &str) -> bool {
    diff.len() < MIN_DIFF_LENGTH
}
