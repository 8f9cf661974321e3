//! Chunk accumulator.
//!
//! Folds a sequence of [`ChatChunk`]s into the final response text and usage
//! totals. Each choice index carries a small state machine so the caller can
//! tell when a choice's content has just finished, which is distinct from the
//! end of the whole stream.

use super::chunk::{ChatChunk, TokenUsage};

/// What a choice was producing as of its latest chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChoiceState {
    /// No chunk seen yet for this choice.
    #[default]
    Idle,
    Content,
    Refusal,
    /// Streaming arguments for the tool call at this index.
    ToolCall(u32),
    Finished,
}

impl ChoiceState {
    fn after(chunk: &ChatChunk) -> Self {
        let Some(choice) = chunk.choices.first() else {
            return ChoiceState::Finished;
        };
        let delta = &choice.delta;
        if delta.content.is_some() {
            ChoiceState::Content
        } else if delta.refusal.is_some() {
            ChoiceState::Refusal
        } else if let Some(call) = delta.tool_calls.as_ref().and_then(|calls| calls.first()) {
            ChoiceState::ToolCall(call.index)
        } else {
            ChoiceState::Finished
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ChoiceText {
    content: String,
    refusal: String,
    finish_reason: Option<String>,
}

/// Request-scoped fold of a completion stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionAccumulator {
    id: String,
    model: String,
    choices: Vec<ChoiceText>,
    states: Vec<ChoiceState>,
    usage: TokenUsage,
    just_finished: ChoiceState,
}

impl CompletionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one chunk and return the updated accumulator.
    ///
    /// Text is concatenated per choice index and usage is summed across
    /// chunks. Only the first choice of a chunk drives the state machine;
    /// chunks without choices never produce a transition.
    pub fn merge(mut self, chunk: &ChatChunk) -> Self {
        self.just_finished = ChoiceState::Idle;

        if self.id.is_empty() && !chunk.id.is_empty() {
            self.id = chunk.id.clone();
        }
        if self.model.is_empty() && !chunk.model.is_empty() {
            self.model = chunk.model.clone();
        }
        if let Some(usage) = &chunk.usage {
            self.usage.add(usage);
        }

        for choice in &chunk.choices {
            let slot = self.slot(choice.index as usize);
            if let Some(content) = &choice.delta.content {
                slot.content.push_str(content);
            }
            if let Some(refusal) = &choice.delta.refusal {
                slot.refusal.push_str(refusal);
            }
            if choice.finish_reason.is_some() {
                slot.finish_reason = choice.finish_reason.clone();
            }
        }

        let Some(first) = chunk.choices.first() else {
            return self;
        };
        let index = first.index as usize;
        if self.states.len() <= index {
            self.states.resize(index + 1, ChoiceState::Idle);
        }
        let previous = self.states[index];
        let next = ChoiceState::after(chunk);
        if previous != next {
            self.just_finished = previous;
        }
        self.states[index] = next;
        self
    }

    fn slot(&mut self, index: usize) -> &mut ChoiceText {
        if self.choices.len() <= index {
            self.choices.resize_with(index + 1, ChoiceText::default);
        }
        &mut self.choices[index]
    }

    /// True when the chunk just merged ended a run of content.
    pub fn just_finished_content(&self) -> bool {
        self.just_finished == ChoiceState::Content
    }

    /// State the last merged chunk transitioned away from.
    #[cfg(test)]
    fn just_finished(&self) -> ChoiceState {
        self.just_finished
    }

    /// Accumulated text of the first choice.
    pub fn content(&self) -> &str {
        self.choices.first().map(|c| c.content.as_str()).unwrap_or("")
    }

    #[cfg(test)]
    fn content_of(&self, index: usize) -> Option<&str> {
        self.choices.get(index).map(|c| c.content.as_str())
    }

    pub fn refusal(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|c| c.refusal.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.finish_reason.as_deref())
    }

    #[cfg(test)]
    fn choice_count(&self) -> usize {
        self.choices.len()
    }

    pub fn usage(&self) -> TokenUsage {
        self.usage
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}
