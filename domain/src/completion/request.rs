//! Provider-neutral streaming completion request.

use crate::prompt::PromptMessage;
use serde::{Deserialize, Serialize};

/// Parameters for one streaming completion call.
///
/// Temperature and the completion cap are passed through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<PromptMessage>,
    pub temperature: f64,
    /// `None` means no cap is sent.
    pub max_completion_tokens: Option<u32>,
    /// Ask the provider to report usage totals in the terminal chunk.
    pub include_usage: bool,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<PromptMessage>, temperature: f64) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature,
            max_completion_tokens: None,
            include_usage: true,
        }
    }

    /// Set the completion cap. Zero leaves the request uncapped.
    pub fn with_max_completion_tokens(mut self, max: u32) -> Self {
        self.max_completion_tokens = (max > 0).then_some(max);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::PromptMessage;

    #[test]
    fn test_requests_usage_by_default() {
        let req = CompletionRequest::new("gpt-x", vec![PromptMessage::user("hi")], 0.7);
        assert!(req.include_usage);
        assert_eq!(req.max_completion_tokens, None);
        assert_eq!(req.temperature, 0.7);
    }

    #[test]
    fn test_zero_cap_is_omitted() {
        let req = CompletionRequest::new("gpt-x", vec![], 1.0).with_max_completion_tokens(0);
        assert_eq!(req.max_completion_tokens, None);

        let req = req.with_max_completion_tokens(256);
        assert_eq!(req.max_completion_tokens, Some(256));
    }
}
