//! Recursive compression: from a diff of any size to one commit message.
//!
//! The diff is summarized chunk by chunk. While the joined summaries are
//! still too large for the final request, they are summarized again. Each new,
//! more abstract layer goes on top of the document, and a "## More Detail"
//! heading separates it from the older layers below.

use tracing::{debug, info, warn};

use crate::error::SummarizeError;
use crate::llm::LlmClient;

use super::config::SummarizeConfig;
use super::summarizer::Summarizer;

/// Heading placed below each layer of summaries.
pub const MORE_DETAIL_HEADER: &str = "## More Detail";

/// Separator between summaries and between document sections.
pub const SECTION_SEPARATOR: &str = "\n\n";

/// Sections of the final message, most abstract first.
///
/// Starts as `[header, details...]`; every compression pass turns it into
/// `[summaries..., header, previous sections...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayeredDocument {
    sections: Vec<String>,
}

impl LayeredDocument {
    /// Document holding the per-chunk summaries of the diff under one header.
    pub fn from_details(summaries: &[String]) -> Self {
        let mut sections = Vec::with_capacity(summaries.len() + 1);
        sections.push(MORE_DETAIL_HEADER.to_string());
        sections.extend_from_slice(summaries);
        Self { sections }
    }

    /// Put a more abstract layer above everything so far.
    pub fn push_coarser(&mut self, summaries: &[String]) {
        let mut sections = Vec::with_capacity(summaries.len() + 1 + self.sections.len());
        sections.extend_from_slice(summaries);
        sections.push(MORE_DETAIL_HEADER.to_string());
        sections.append(&mut self.sections);
        self.sections = sections;
    }

    /// Number of "## More Detail" headings, one per summarization pass.
    pub fn layers(&self) -> usize {
        self.sections
            .iter()
            .filter(|section| section.as_str() == MORE_DETAIL_HEADER)
            .count()
    }

    /// Render with `top` as the first section.
    pub fn render(mut self, top: String) -> String {
        self.sections.insert(0, top);
        self.sections.join(SECTION_SEPARATOR)
    }
}

/// Fail before any request if a prompt leaves no room for text.
fn check_prompts<C: LlmClient + ?Sized>(
    client: &C,
    config: &SummarizeConfig,
) -> Result<(), SummarizeError> {
    for prompt in [
        &config.final_prompt,
        &config.detail_prompt,
        &config.compress_prompt,
    ] {
        let tokens = client.get_num_tokens(prompt);
        if tokens >= config.budget {
            return Err(SummarizeError::PromptTooLarge {
                tokens,
                budget: config.budget,
            });
        }
    }
    Ok(())
}

/// Write a commit message for `diff`.
///
/// A diff that fits the budget together with the final prompt takes exactly
/// one request. Larger diffs are summarized, and the summaries compressed,
/// until they fit; the answer to the final prompt then heads a document that
/// keeps every layer of summaries.
pub async fn commit_message<C: LlmClient + ?Sized>(
    client: &C,
    diff: &str,
    config: &SummarizeConfig,
) -> Result<String, SummarizeError> {
    check_prompts(client, config)?;

    let query = format!("{}{}", config.final_prompt, diff);
    let tokens = client.get_num_tokens(&query);
    info!("tokens: {tokens}");

    if tokens <= config.budget {
        debug!("Sending prompt + diff:\n{query}");
        return Ok(client.ask(&query).await?);
    }

    warn!("diff too long. {tokens} tokens. Summarizing...");
    let summarizer = Summarizer::new(client, config);

    let mut summaries = summarizer.summarize(diff, &config.detail_prompt).await?;
    let mut document = LayeredDocument::from_details(&summaries);
    let mut overall = summaries.join(SECTION_SEPARATOR);

    let mut passes = 0;
    loop {
        let tokens = client.get_num_tokens(&format!("{}{}", config.final_prompt, overall));
        if tokens <= config.budget {
            break;
        }
        if passes >= config.max_compression_passes {
            return Err(SummarizeError::CompressionStalled { passes });
        }
        passes += 1;

        warn!("summaries too long. {tokens} tokens. Compressing (pass {passes})...");
        summaries = summarizer.summarize(&overall, &config.compress_prompt).await?;
        document.push_coarser(&summaries);
        overall = summaries.join(SECTION_SEPARATOR);
    }

    info!(
        "Summarized into {} layers; sending final prompt",
        document.layers()
    );
    let top = client
        .ask(&format!("{}{}", config.final_prompt, overall))
        .await?;

    Ok(document.render(top))
}
