//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use grove_application::{ChatDefaults, ModelDraft};
use std::path::PathBuf;

/// CLI arguments for grove
#[derive(Parser, Debug)]
#[command(name = "grove")]
#[command(author, version, about = "Persistent chat with OpenAI-compatible models")]
#[command(long_about = r#"
grove keeps conversations with chat-completion providers in a local SQLite
database. Answers stream to stdout as they arrive; recent turns are replayed
as context for follow-up questions.

Configuration files are loaded from (in priority order):
1. GROVE_* environment variables (GROVE_CHAT__TEMPERATURE=0.2)
2. --config <path>                Explicit config file
3. ./grove.toml                   Project-level config
4. ~/.config/grove/config.toml    Global config

Example:
  grove models add --name openai --provider openai --api-key sk-...
  grove ask -m 1 --model-name gpt-4o-mini "What is a B-tree?"
  grove chat -c 12
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress the waiting spinner
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask a single question and stream the answer
    Ask(AskArgs),
    /// Start an interactive chat (the default)
    Chat(ChatArgs),
    /// Manage registered provider models
    Models {
        #[command(subcommand)]
        action: ModelsCommand,
    },
    /// Browse and rename conversations
    Conversations {
        #[command(subcommand)]
        action: ConversationsCommand,
    },
    /// Page through the messages of a conversation
    Messages(MessagesArgs),
    /// Read and write stored settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
}

/// Per-request overrides shared by `ask` and `chat`
#[derive(Args, Debug, Clone, Default)]
pub struct RequestArgs {
    /// Registered model id
    #[arg(short, long, value_name = "ID")]
    pub model: Option<i64>,

    /// Provider-side model name, e.g. gpt-4o-mini
    #[arg(long, value_name = "NAME")]
    pub model_name: Option<String>,

    /// Sampling temperature (must be > 0)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Prior turns replayed as context (0 disables history)
    #[arg(long, value_name = "TURNS")]
    pub history: Option<u32>,

    /// Cap on generated tokens (0 = provider default)
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<u32>,

    /// Continue an existing conversation
    #[arg(short, long, value_name = "ID")]
    pub conversation: Option<i64>,
}

impl RequestArgs {
    /// Overlay the flags that were given onto configured defaults.
    pub fn apply(&self, mut defaults: ChatDefaults) -> ChatDefaults {
        if let Some(id) = self.model {
            defaults = defaults.with_model_id(id);
        }
        if let Some(name) = &self.model_name {
            defaults = defaults.with_model_name(name.clone());
        }
        if let Some(t) = self.temperature {
            defaults = defaults.with_temperature(t);
        }
        if let Some(turns) = self.history {
            defaults = defaults.with_history_length(turns);
        }
        if let Some(max) = self.max_tokens {
            defaults = defaults.with_max_completion_tokens(max);
        }
        defaults
    }

    /// Conversation to continue, `0` for a new one.
    pub fn conversation_id(&self) -> i64 {
        self.conversation.unwrap_or(0)
    }
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question; read from stdin when omitted
    pub question: Option<String>,

    #[command(flatten)]
    pub request: RequestArgs,
}

#[derive(Args, Debug, Default)]
pub struct ChatArgs {
    #[command(flatten)]
    pub request: RequestArgs,
}

#[derive(Subcommand, Debug)]
pub enum ModelsCommand {
    /// List registered models
    List(PageArgs),
    /// Show one model
    Show { id: i64 },
    /// Register a model
    Add(ModelArgs),
    /// Replace every field of a model
    Update {
        id: i64,
        #[command(flatten)]
        model: ModelArgs,
    },
    /// Allow a model to be used for requests
    Enable { id: i64 },
    /// Stop a model from being used for requests
    Disable { id: i64 },
    /// Delete a model
    Remove { id: i64 },
}

#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Provider name, e.g. openai
    #[arg(long)]
    pub provider: String,

    /// Base URL; the configured default endpoint when omitted
    #[arg(long, default_value = "")]
    pub endpoint: String,

    /// Secret API key sent as a bearer token
    #[arg(long)]
    pub api_key: String,

    /// Register the model disabled
    #[arg(long)]
    pub disabled: bool,
}

impl From<ModelArgs> for ModelDraft {
    fn from(args: ModelArgs) -> Self {
        ModelDraft {
            name: args.name,
            provider: args.provider,
            endpoint: args.endpoint,
            api_key: args.api_key,
            enabled: !args.disabled,
        }
    }
}

/// 1-based page selection; values below 1 fall back to the defaults
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1)]
    pub page: i64,

    #[arg(long, default_value_t = 0)]
    pub size: i64,
}

#[derive(Subcommand, Debug)]
pub enum ConversationsCommand {
    /// List conversations, newest first
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Case-insensitive title filter
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Set or clear a conversation title
    Rename {
        id: i64,
        /// New title; omit to clear
        title: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct MessagesArgs {
    /// Conversation id
    pub conversation: i64,

    /// Only messages with an id below this one
    #[arg(long, default_value_t = 0)]
    pub before: i64,

    /// Messages per page (default 20)
    #[arg(long, default_value_t = 0)]
    pub size: i64,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print one setting
    Get { key: String },
    /// Insert or overwrite a setting
    Set { key: String, value: String },
    /// Print every setting
    List,
}
