//! Per-model token budgets.
//!
//! A budget is the largest combined token count of prompt plus text that a
//! single request to the model may carry. Every request-shaping decision in
//! the summarizer is made against one of these numbers.

use crate::error::SummarizeError;

/// Known model budgets in tokens.
pub const KNOWN_MODEL_BUDGETS: &[(&str, usize)] = &[
    ("gpt-4", 8_192),
    ("gpt-4-32k", 32_768),
    ("gpt-3.5-turbo", 4_097),
    ("gpt-3.5-turbo-16k", 16_385),
];

/// Model used when nothing else is requested.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Model selected by the `--gpt4` flag.
pub const LARGE_MODEL: &str = "gpt-4";

/// Look up the token budget for a model.
pub fn budget_for(model: &str) -> Result<usize, SummarizeError> {
    KNOWN_MODEL_BUDGETS
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, budget)| *budget)
        .ok_or_else(|| SummarizeError::UnknownModel(model.to_string()))
}

/// Names of every registered model, in table order.
pub fn known_models() -> Vec<&'static str> {
    KNOWN_MODEL_BUDGETS.iter().map(|(name, _)| *name).collect()
}
