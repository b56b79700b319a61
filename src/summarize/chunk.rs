//! Greedy grouping of adjacent parts into budget-sized chunks.

/// A contiguous run of parts and their summed token count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub tokens: usize,
    /// Number of parts joined into this chunk.
    pub parts: usize,
}

impl Chunk {
    fn start(part: &str, tokens: usize) -> Self {
        Self {
            text: part.to_string(),
            tokens,
            parts: 1,
        }
    }

    fn push(&mut self, part: &str, tokens: usize) {
        self.text.push_str(part);
        self.tokens += tokens;
        self.parts += 1;
    }
}

/// Group `parts` into chunks whose token totals stay under `budget`.
///
/// Parts are added to the current chunk while `current + next < budget`.
/// Once adding the next part would reach or exceed the budget, the current
/// chunk is closed and the part starts a new one. A part that is over budget
/// on its own still becomes a one-part chunk; re-splitting it is the
/// summarizer's job.
///
/// `counts[i]` is the token count of `parts[i]`.
pub fn assemble_chunks(parts: &[&str], counts: &[usize], budget: usize) -> Vec<Chunk> {
    debug_assert_eq!(parts.len(), counts.len(), "one token count per part");

    let mut chunks: Vec<Chunk> = Vec::new();
    let mut current: Option<Chunk> = None;

    for (part, &tokens) in parts.iter().zip(counts) {
        if let Some(chunk) = current.as_mut()
            && chunk.tokens + tokens < budget
        {
            chunk.push(part, tokens);
            continue;
        }
        chunks.extend(current.replace(Chunk::start(part, tokens)));
    }

    chunks.extend(current);
    chunks
}
