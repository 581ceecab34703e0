use std::path::PathBuf;

use anyhow::bail;
use anyhow::Result;
use arama_term::application::cli;
use arama_term::destruct_terminal_for_panic;
use arama_term::start_loop;
use arama_term::ChatBackendBox;
use arama_term::ChatBackendManager;
use arama_term::Config;
use arama_term::ConfigKey;
use arama_term::Dispatcher;
use arama_term::Message;
use arama_term::Session;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;

/// Logs go to a file so the terminal UI stays clean.
fn init_logging(level: &str) -> Result<WorkerGuard> {
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("arama");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "arama.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let level = level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);

    tracing_subscriber::fmt()
        .json()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(guard)
}

fn format_reply(message: &Message) -> String {
    let mut out = message.content.to_string();

    if message.used_search {
        out.push_str("\n\n[web search used]");
    }

    if !message.sources().is_empty() {
        out.push_str("\n\nSources:");
        for (idx, source) in message.sources().iter().enumerate() {
            out.push_str(&format!("\n[{}] {}", idx + 1, source.title));
            if !source.snippet.is_empty() {
                out.push_str(&format!("\n    {}", source.snippet));
            }
            out.push_str(&format!("\n    {}", source.url));
        }
    }

    out
}

/// Sends one message and prints whatever the conversation ends with: the reply or
/// the fallback notice.
async fn run_ask_mode(backend: ChatBackendBox, question: &str) -> Result<()> {
    let mut dispatcher = Dispatcher::new(Session::new());
    tracing::info!(session_id = %dispatcher.session_id(), "ask mode");

    if !dispatcher.send(backend.as_ref(), question).await {
        bail!("Nothing to send, the message is empty");
    }

    let history = dispatcher.snapshot();
    let Some(reply) = history.last().filter(|m| !m.is_user()) else {
        bail!("The conversation ended without a reply");
    };
    println!("{}", format_reply(reply));

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli::build().get_matches();
    Config::load(cli::build(), vec![&matches]).await?;

    if let Some(("config", subcmd)) = matches.subcommand() {
        match subcmd.subcommand() {
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(cli::build()));
            }
            Some(("path", _)) => {
                println!("{}", Config::get(ConfigKey::ConfigFile));
            }
            _ => {}
        }
        return Ok(());
    }

    let _log_guard = init_logging(&Config::get(ConfigKey::LogLevel))?;
    let backend = ChatBackendManager::from_config()?;

    if let Some(question) = matches.get_one::<String>("ask") {
        return run_ask_mode(backend, question).await;
    }

    std::panic::set_hook(Box::new(|panic_info| {
        destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let result = start_loop(backend).await;
    if result.is_err() {
        destruct_terminal_for_panic();
    }

    result
}
