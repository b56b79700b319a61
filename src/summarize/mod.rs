//! Recursive diff summarization under a token budget.
//!
//! Leaves first: [`ladder`] holds the splitting rungs, [`split`] cuts text at
//! one rung, [`chunk`] regroups the parts under the budget, [`summarizer`]
//! recurses down the ladder, and [`compress`] layers summaries until the final
//! request fits.

pub mod chunk;
pub mod compress;
pub mod config;
pub mod ladder;
pub mod prompt;
pub mod split;
pub mod summarizer;

pub use chunk::{Chunk, assemble_chunks};
pub use compress::{LayeredDocument, MORE_DETAIL_HEADER, SECTION_SEPARATOR, commit_message};
pub use config::{DEFAULT_MAX_COMPRESSION_PASSES, SummarizeConfig};
pub use ladder::{Ladder, Rung, SplitMode};
pub use split::split_text;
pub use summarizer::Summarizer;
