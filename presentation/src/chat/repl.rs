//! REPL (Read-Eval-Print Loop) for interactive chat

use super::turn::run_turn;
use colored::Colorize;
use grove_application::{ChatDefaults, SendMessageUseCase};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;

/// Outcome of a slash command
#[derive(Debug, PartialEq, Eq)]
enum CommandResult {
    Continue,
    Exit,
}

/// Interactive chat REPL
///
/// Keeps the conversation id across turns so each question sees the
/// previous ones as history.
pub struct ChatRepl {
    use_case: SendMessageUseCase,
    defaults: ChatDefaults,
    conversation_id: i64,
    show_progress: bool,
    history_path: Option<PathBuf>,
}

impl ChatRepl {
    pub fn new(use_case: SendMessageUseCase, defaults: ChatDefaults) -> Self {
        Self {
            use_case,
            defaults,
            conversation_id: 0,
            show_progress: true,
            history_path: None,
        }
    }

    // ==================== Builder Methods ====================

    /// Continue an existing conversation instead of starting a new one
    pub fn with_conversation(mut self, conversation_id: i64) -> Self {
        self.conversation_id = conversation_id;
        self
    }

    /// Set whether to show the waiting spinner
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = Some(path.into());
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(path) = &self.history_path {
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline(&self.prompt()) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        match self.handle_command(line) {
                            CommandResult::Exit => break,
                            CommandResult::Continue => continue,
                        }
                    }

                    let _ = rl.add_history_entry(line);
                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err:?}");
                    break;
                }
            }
        }

        if let Some(path) = &self.history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn prompt(&self) -> String {
        if self.conversation_id > 0 {
            format!("[{}]> ", self.conversation_id)
        } else {
            "> ".to_string()
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "grove chat".cyan().bold());
        if let Some(name) = &self.defaults.model_name {
            println!("{} {}", "Model:".bold(), name);
        }
        if self.conversation_id > 0 {
            println!("{} {}", "Conversation:".bold(), self.conversation_id);
        }
        println!("Type /help for commands, Ctrl-C cancels an answer, Ctrl-D exits.");
        println!();
    }

    /// Handle slash commands
    fn handle_command(&mut self, cmd: &str) -> CommandResult {
        match cmd {
            "/exit" | "/quit" | "/q" => {
                println!("Bye!");
                CommandResult::Exit
            }
            "/new" => {
                self.conversation_id = 0;
                println!("{}", "Started a new conversation.".dimmed());
                CommandResult::Continue
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /new              - Start a new conversation");
                println!("  /help, /h, /?     - Show this help");
                println!("  /exit, /quit, /q  - Exit chat");
                println!();
                CommandResult::Continue
            }
            _ => {
                println!("Unknown command: {cmd}");
                println!("Type /help for available commands");
                CommandResult::Continue
            }
        }
    }

    async fn process_question(&mut self, question: &str) {
        println!();
        let input = self.defaults.input_for(question, self.conversation_id);

        match run_turn(&self.use_case, input, self.show_progress).await {
            Ok(output) => {
                self.conversation_id = output.conversation_id.get();
                eprintln!(
                    "{}",
                    format!(
                        "[conversation {} | {} tokens]",
                        output.conversation_id, output.total_tokens
                    )
                    .dimmed()
                );
            }
            Err(e) if e.is_cancelled() => {
                println!();
                eprintln!("{}", "Cancelled.".yellow());
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
            }
        }
        println!();
    }
}
