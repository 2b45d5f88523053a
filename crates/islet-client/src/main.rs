//! islet-chat: terminal frontend for the persona chat.
//!
//! A thin rendering layer over `SessionClient`: prints turns with role
//! labels and timestamps, reads lines from stdin, and keeps input disabled
//! (by virtue of the blocking loop) while a request is in flight.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use islet_client::{HistoryStore, HttpTransport, SessionClient};
use islet_common::{Role, Turn};

#[derive(Parser)]
#[command(name = "islet-chat", about = "Terminal client for the islet persona chat")]
struct Args {
    /// Base URL of the islet server.
    #[arg(short, long, default_value = "http://127.0.0.1:3000")]
    server: String,

    /// History file path (defaults to the platform data dir).
    #[arg(long)]
    history: Option<PathBuf>,

    /// Display name for the assistant.
    #[arg(long, default_value = "沈屿")]
    name: String,
}

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}

fn render(turn: &Turn, assistant_name: &str) {
    let label = match turn.role {
        Role::User => "我",
        Role::Assistant => assistant_name,
        Role::System => return,
    };
    println!("[{}] {}: {}", timestamp(), label, turn.content);
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "islet_client=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let store_path = match &args.history {
        Some(path) => path.clone(),
        None => match HistoryStore::default_path() {
            Ok(path) => path,
            Err(e) => {
                eprintln!("cannot resolve history path: {e}");
                std::process::exit(1);
            }
        },
    };

    let mut session = SessionClient::new(HistoryStore::new(store_path));
    let transport = HttpTransport::new(&args.server);

    // Replay what we have; on a first run, open with the greeting.
    for turn in session.history() {
        render(turn, &args.name);
    }
    if session.seed_greeting() {
        render(session.history().last().unwrap(), &args.name);
    }

    println!("(/reset 重新开始，/quit 退出)");
    prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match line.trim() {
            "/quit" | "/exit" => break,
            "/reset" => match session.reset(&transport).await {
                Ok(greeting) => {
                    println!("（对话已重置）");
                    render(&Turn::assistant(greeting), &args.name);
                }
                Err(e) => eprintln!("{e}"),
            },
            text => match session.submit(&transport, text).await {
                Ok(Some(reply)) => render(&Turn::assistant(reply), &args.name),
                Ok(None) => {}
                Err(e) => eprintln!("{e}"),
            },
        }
        prompt();
    }
}
