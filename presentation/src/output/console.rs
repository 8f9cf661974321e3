//! Console output formatter for stored records

use colored::Colorize;
use grove_application::Page;
use grove_domain::core::string::preview;
use grove_domain::{CloudLlmModel, Conversation, Message, Role, Setting};
use serde::Serialize;

const CONTENT_PREVIEW_CHARS: usize = 100;

/// Formats models, conversations, messages and settings for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Pretty JSON for `--json`; API keys are never serialized.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize output: {e}\"}}"))
    }

    pub fn models(page: &Page<CloudLlmModel>) -> String {
        let mut output = Self::header(&format!("Models ({} total)", page.total));
        if page.items.is_empty() {
            output.push_str(&format!("{}\n", "No models registered.".dimmed()));
            return output;
        }
        for model in &page.items {
            output.push_str(&Self::model_row(model));
        }
        output
    }

    pub fn model(model: &CloudLlmModel) -> String {
        let endpoint = if model.endpoint.is_empty() {
            "(default)"
        } else {
            model.endpoint.as_str()
        };
        format!(
            "{} {}\n{} {}\n{} {}\n{} {}\n{} {}\n{} {}\n",
            "Id:".cyan().bold(),
            model.id,
            "Name:".cyan().bold(),
            model.name,
            "Provider:".cyan().bold(),
            model.provider,
            "Endpoint:".cyan().bold(),
            endpoint,
            "Enabled:".cyan().bold(),
            Self::enabled(model.enabled),
            "Updated:".cyan().bold(),
            model.updated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        )
    }

    fn model_row(model: &CloudLlmModel) -> String {
        format!(
            "{:>5}  {:<20} {:<12} {}\n",
            model.id.to_string().yellow(),
            model.name,
            model.provider,
            Self::enabled(model.enabled),
        )
    }

    fn enabled(enabled: bool) -> String {
        if enabled {
            "enabled".green().to_string()
        } else {
            "disabled".red().to_string()
        }
    }

    pub fn conversations(page: &Page<Conversation>) -> String {
        let mut output = Self::header(&format!("Conversations ({} total)", page.total));
        if page.items.is_empty() {
            output.push_str(&format!("{}\n", "No conversations.".dimmed()));
            return output;
        }
        for conversation in &page.items {
            output.push_str(&Self::conversation(conversation));
        }
        output
    }

    pub fn conversation(conversation: &Conversation) -> String {
        let title = conversation
            .title
            .as_deref()
            .map(|t| t.normal())
            .unwrap_or_else(|| "(untitled)".dimmed());
        format!(
            "{:>5}  {}  {}\n",
            conversation.id.to_string().yellow(),
            conversation.updated_at.format("%Y-%m-%d %H:%M"),
            title,
        )
    }

    /// Messages are listed newest first by storage; print them oldest first.
    pub fn messages(messages: &[Message]) -> String {
        if messages.is_empty() {
            return format!("{}\n", "No messages.".dimmed());
        }
        let mut output = String::new();
        for message in messages.iter().rev() {
            let role = match &message.role {
                Role::User => "user".blue().bold(),
                Role::Assistant => "assistant".green().bold(),
                Role::Other(other) => other.as_str().normal(),
            };
            output.push_str(&format!(
                "{:>6} {:<10} {}\n",
                format!("#{}", message.id).dimmed(),
                role,
                preview(&message.content, CONTENT_PREVIEW_CHARS),
            ));
        }
        output
    }

    pub fn settings(settings: &[Setting]) -> String {
        if settings.is_empty() {
            return format!("{}\n", "No settings.".dimmed());
        }
        settings
            .iter()
            .map(|s| format!("{} = {}\n", s.key.cyan(), s.value))
            .collect()
    }

    pub fn setting(key: &str, value: Option<&str>) -> String {
        match value {
            Some(value) => format!("{value}\n"),
            None => format!("{}\n", format!("{key} is not set").dimmed()),
        }
    }

    fn header(title: &str) -> String {
        format!("{}\n", title.cyan().bold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use grove_domain::{ConversationId, MessageId, ModelId};

    fn model(secret: &str) -> CloudLlmModel {
        CloudLlmModel {
            id: ModelId::new(7),
            name: "openai".to_string(),
            provider: "openai".to_string(),
            endpoint: String::new(),
            api_key: secret.to_string(),
            enabled: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn message(id: i64, role: Role, content: &str) -> Message {
        Message {
            id: MessageId::new(id),
            conversation_id: ConversationId::new(1),
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_api_key_never_printed() {
        colored::control::set_override(false);
        let page = Page {
            total: 1,
            items: vec![model("sk-secret")],
        };
        assert!(!ConsoleFormatter::models(&page).contains("sk-secret"));
        assert!(!ConsoleFormatter::model(&page.items[0]).contains("sk-secret"));
        assert!(!ConsoleFormatter::json(&page).contains("sk-secret"));
        assert!(ConsoleFormatter::model(&page.items[0]).contains("(default)"));
    }

    #[test]
    fn test_messages_printed_oldest_first() {
        colored::control::set_override(false);
        let newest_first = vec![
            message(2, Role::Assistant, "answer"),
            message(1, Role::User, "question\nwith newline"),
        ];
        let output = ConsoleFormatter::messages(&newest_first);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("question with newline"));
        assert!(lines[1].contains("answer"));
    }

    #[test]
    fn test_empty_listings() {
        colored::control::set_override(false);
        assert!(ConsoleFormatter::conversations(&Page::empty()).contains("No conversations."));
        assert_eq!(ConsoleFormatter::settings(&[]), "No settings.\n");
        assert_eq!(ConsoleFormatter::setting("theme", None), "theme is not set\n");
        assert_eq!(ConsoleFormatter::setting("theme", Some("dark")), "dark\n");
    }
}
