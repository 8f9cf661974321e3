//! History window selection.
//!
//! Storage returns the most recent messages newest-first. The window caps how
//! many are used and restores chronological order for prompt assembly.

use super::entities::Message;

/// Number of prior turns (user + assistant pairs) replayed to the provider.
///
/// The message budget is `2 * turns`. It is a cap, not a guarantee of whole
/// pairs: an odd boundary may cut a turn in half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryWindow {
    turns: u32,
}

impl HistoryWindow {
    pub fn new(turns: u32) -> Self {
        Self { turns }
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Maximum number of messages to fetch.
    pub fn message_limit(&self) -> usize {
        self.turns as usize * 2
    }

    /// A zero-turn window sends only the new question.
    pub fn is_empty(&self) -> bool {
        self.turns == 0
    }

    /// Cap `newest_first` to the budget and return it oldest-first.
    pub fn select(&self, mut newest_first: Vec<Message>) -> Vec<Message> {
        newest_first.truncate(self.message_limit());
        newest_first.reverse();
        newest_first
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::entities::Role;
    use crate::core::id::{ConversationId, MessageId};
    use chrono::Utc;

    fn msg(id: i64, role: Role) -> Message {
        Message {
            id: MessageId::new(id),
            conversation_id: ConversationId::new(1),
            role,
            content: format!("m{id}"),
            created_at: Utc::now(),
        }
    }

    fn newest_first(count: i64) -> Vec<Message> {
        (1..=count)
            .rev()
            .map(|id| {
                let role = if id % 2 == 1 { Role::User } else { Role::Assistant };
                msg(id, role)
            })
            .collect()
    }

    #[test]
    fn test_limit_is_twice_turns() {
        assert_eq!(HistoryWindow::new(3).message_limit(), 6);
        assert_eq!(HistoryWindow::new(0).message_limit(), 0);
        assert!(HistoryWindow::new(0).is_empty());
    }

    #[test]
    fn test_select_reverses_to_chronological() {
        let selected = HistoryWindow::new(5).select(newest_first(4));
        let ids: Vec<i64> = selected.iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_select_keeps_most_recent_within_budget() {
        let selected = HistoryWindow::new(2).select(newest_first(9));
        let ids: Vec<i64> = selected.iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![6, 7, 8, 9]);
    }

    #[test]
    fn test_zero_window_selects_nothing() {
        assert!(HistoryWindow::new(0).select(newest_first(4)).is_empty());
    }
}
