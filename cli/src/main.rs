//! CLI entrypoint for grove
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use grove_application::{
    BrowseConversationsUseCase, ChatDefaults, ManageModelsUseCase, ManageSettingsUseCase,
    SendMessageUseCase,
};
use grove_infrastructure::{ConfigLoader, DataPaths, FileConfig, OpenAiGateway, SqliteStorage};
use grove_presentation::{AdminConsole, AskArgs, ChatArgs, ChatRepl, Cli, Command, run_turn};
use std::io::{IsTerminal, Read};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Exit status after Ctrl-C, as shells report for SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    let paths = DataPaths::resolve(&config)?;
    paths.ensure()?;

    // Held until exit so buffered log lines are flushed
    let _log_guard = init_logging(cli.verbose, config.debug_mode, &paths.logs_dir());
    info!(data_path = %paths.root().display(), "Starting grove");

    for issue in config.validate() {
        warn!("Config: {issue}");
    }
    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let storage = Arc::new(
        SqliteStorage::open(paths.database())
            .with_context(|| format!("Failed to open {}", paths.database().display()))?,
    );
    let gateway = Arc::new(
        OpenAiGateway::new(&config.provider).context("Failed to create provider client")?,
    );
    let send_message =
        SendMessageUseCase::new(storage.clone(), storage.clone(), storage.clone(), gateway);
    let show_progress = !cli.quiet && config.repl.show_progress;

    let output = match cli.command {
        Some(Command::Ask(args)) => {
            return ask(&send_message, args, config.chat_defaults(), show_progress).await;
        }
        Some(Command::Chat(args)) => {
            chat(send_message, args, &config, &paths, show_progress).await?;
            return Ok(ExitCode::SUCCESS);
        }
        None => {
            chat(send_message, ChatArgs::default(), &config, &paths, show_progress).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Command::Models { action }) => admin_console(&storage, cli.json).models(action).await?,
        Some(Command::Conversations { action }) => {
            admin_console(&storage, cli.json).conversations(action).await?
        }
        Some(Command::Messages(args)) => admin_console(&storage, cli.json).messages(args).await?,
        Some(Command::Settings { action }) => {
            admin_console(&storage, cli.json).settings(action).await?
        }
    };

    print!("{output}");
    Ok(ExitCode::SUCCESS)
}

fn admin_console(storage: &Arc<SqliteStorage>, json: bool) -> AdminConsole {
    AdminConsole::new(
        ManageModelsUseCase::new(storage.clone()),
        BrowseConversationsUseCase::new(storage.clone(), storage.clone()),
        ManageSettingsUseCase::new(storage.clone()),
    )
    .with_json(json)
}

fn init_logging(verbose: u8, debug_mode: bool, logs_dir: &Path) -> WorkerGuard {
    let level = match verbose {
        0 if debug_mode => "debug",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_appender = tracing_appender::rolling::daily(logs_dir, "grove.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .init();

    guard
}

async fn ask(
    use_case: &SendMessageUseCase,
    args: AskArgs,
    defaults: ChatDefaults,
    show_progress: bool,
) -> Result<ExitCode> {
    let question = match args.question {
        Some(q) => Some(q),
        None if !std::io::stdin().is_terminal() => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read question from stdin")?;
            piped_question(&buf)
        }
        None => None,
    };
    let Some(question) = question else {
        bail!("Question is required. Pass it as an argument or pipe it on stdin.");
    };

    let input = args
        .request
        .apply(defaults)
        .input_for(question, args.request.conversation_id());

    match run_turn(use_case, input, show_progress).await {
        Ok(output) => {
            eprintln!(
                "{}",
                format!(
                    "[conversation {} | {} tokens]",
                    output.conversation_id, output.total_tokens
                )
                .dimmed()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_cancelled() => {
            eprintln!("\n{}", "Cancelled.".yellow());
            Ok(ExitCode::from(EXIT_INTERRUPTED))
        }
        Err(e) => Err(e.into()),
    }
}

/// Strip the trailing line endings of piped input. Blank input is no question.
fn piped_question(raw: &str) -> Option<String> {
    let question = raw.trim_end_matches(['\r', '\n']);
    if question.trim().is_empty() {
        None
    } else {
        Some(question.to_string())
    }
}

async fn chat(
    use_case: SendMessageUseCase,
    args: ChatArgs,
    config: &FileConfig,
    paths: &DataPaths,
    show_progress: bool,
) -> Result<()> {
    let defaults = args.request.apply(config.chat_defaults());
    let history_file = config
        .repl
        .history_file
        .clone()
        .unwrap_or_else(|| paths.history_file());

    let mut repl = ChatRepl::new(use_case, defaults)
        .with_conversation(args.request.conversation_id())
        .with_progress(show_progress)
        .with_history_file(history_file);

    repl.run().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piped_question_drops_trailing_newline() {
        assert_eq!(piped_question("hi\n").as_deref(), Some("hi"));
        assert_eq!(piped_question("hi\r\n").as_deref(), Some("hi"));
        assert_eq!(
            piped_question("first line\nsecond line\n\n").as_deref(),
            Some("first line\nsecond line")
        );
    }

    #[test]
    fn test_piped_question_blank_is_none() {
        assert_eq!(piped_question(""), None);
        assert_eq!(piped_question("  \n\t\r\n"), None);
    }
}
