mod backend;
mod store;

use std::io::{self, BufRead, Write};

use chiku_client::state::message::Message;
use chiku_client::state::session::ChatSession;
use clap::{Parser, Subcommand};

use crate::backend::HttpBackend;
use crate::store::FileStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("terminal io failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("nothing to retry")]
    NothingToRetry,
}

#[derive(Parser, Debug)]
#[command(name = "chiku", about = "Terminal chat client for the Chiku relay")]
struct Cli {
    #[arg(long, env = "CHIKU_RELAY_URL", default_value = "http://127.0.0.1:3000/api/chiku-chat")]
    relay_url: String,

    #[arg(long, env = "CHIKU_COMMANDS_URL", help = "Media command endpoint; slash commands fail without it")]
    commands_url: Option<String>,

    #[arg(long, env = "CHIKU_CACHE_DIR", default_value = ".chiku")]
    cache_dir: String,

    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Interactive session. `/clear` resets, `/retry` resends the last failure.
    Chat,
    /// Send one message and print the reply.
    Send { text: String },
    /// Print the cached conversation.
    Show {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Erase the cached conversation.
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut session = ChatSession::initialize(FileStore::new(&cli.cache_dir));
    tracing::debug!(cache_dir = %session.store().dir().display(), "session restored");

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => {
            let backend = HttpBackend::new(cli.relay_url, cli.commands_url, cli.timeout_secs)?;
            run_repl(&mut session, &backend).await
        }
        Command::Send { text } => {
            let backend = HttpBackend::new(cli.relay_url, cli.commands_url, cli.timeout_secs)?;
            session.send_text(&backend, &text).await;
            print_latest(&session);
            Ok(())
        }
        Command::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(session.messages())?);
            } else {
                session.messages().iter().for_each(print_message);
            }
            Ok(())
        }
        Command::Clear => {
            session.clear();
            println!("cleared");
            Ok(())
        }
    }
}

async fn run_repl(session: &mut ChatSession<FileStore>, backend: &HttpBackend) -> Result<(), CliError> {
    session.messages().iter().for_each(print_message);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };

        match line.trim() {
            "" => {}
            "/quit" | "/exit" => break,
            "/clear" => {
                session.clear();
                session.messages().iter().for_each(print_message);
            }
            "/retry" => match session.latest_retryable().map(str::to_owned) {
                Some(id) => {
                    session.retry_message(backend, &id).await;
                    print_latest(session);
                }
                None => eprintln!("{}", CliError::NothingToRetry),
            },
            _ => {
                session.send_text(backend, &line).await;
                print_latest(session);
            }
        }
    }
    Ok(())
}

fn print_latest(session: &ChatSession<FileStore>) {
    if let Some(message) = session.messages().last() {
        print_message(message);
    }
}

fn print_message(message: &Message) {
    println!("{}", render_message(message));
}

fn render_message(message: &Message) -> String {
    let speaker = if message.is_user { "you" } else { "chiku" };
    let mut out = format!("{speaker}> {}", message.content);
    if let Some(url) = &message.generated_image {
        out.push_str(&format!("\n  [image] {url}"));
    }
    if message.audio_url.is_some() {
        let text = message.audio_text.as_deref().unwrap_or_default();
        out.push_str(&format!("\n  [audio] {text}"));
    }
    if message.is_retryable() {
        out.push_str("\n  (type /retry to resend)");
    }
    out
}
