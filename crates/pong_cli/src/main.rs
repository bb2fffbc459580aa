//! `pong` command line client.
//!
//! Talks to a running pong server over HTTP and keeps a little local
//! state (credential, fetch history) under `~/.pong/`.

mod client;
mod github_login;
mod history;
mod token_store;

use chrono::Local;
use clap::{Parser, Subcommand};

const MAX_MESSAGE_CHARS: usize = 140;

/// Leave a note. Check your notes. That's it.
#[derive(Parser)]
#[command(name = "pong", version, about)]
struct Cli {
    /// Base URL of the pong server.
    #[arg(
        long,
        global = true,
        env = "PONG_SERVER",
        default_value = "http://localhost:8080"
    )]
    server: String,

    /// With no subcommand, fetches and displays your waiting pongs.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate with GitHub and store the credential locally.
    Login {
        /// OAuth client id of the pong application.
        #[arg(long, env = "PONG_GITHUB_CLIENT_ID")]
        client_id: String,
    },
    /// Send a pong to someone.
    Send {
        /// Recipient's GitHub username.
        username: String,
        /// Message text; multiple words are joined with spaces.
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Show your local pong history.
    History,
    /// Clear your local pong history.
    ClearHistory,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = dispatch(cli).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn dispatch(cli: Cli) -> Result<(), String> {
    match cli.command {
        None => fetch_inbox(&cli.server).await,
        Some(Commands::Login { client_id }) => login(&client_id).await,
        Some(Commands::Send { username, message }) => {
            send(&cli.server, &username, &message.join(" ")).await
        }
        Some(Commands::History) => show_history(),
        Some(Commands::ClearHistory) => clear_history(),
    }
}

async fn fetch_inbox(server: &str) -> Result<(), String> {
    let token = token_store::load_token()?;
    let notes = client::fetch_notes(server, &token).await?;

    if notes.is_empty() {
        println!("No pongs waiting for you!");
        return Ok(());
    }

    // The server forgets these notes the moment they are handed out;
    // record them before showing them.
    if let Err(err) = history::append_fetch(&history::default_history_path()?, &notes) {
        eprintln!("Warning: failed to save history: {err}");
    }

    let plural = if notes.len() == 1 { "" } else { "s" };
    println!("You have {} pong{plural}:\n", notes.len());
    for note in &notes {
        println!("📝 {}: {}", note.from_user, note.message);
    }
    Ok(())
}

async fn login(client_id: &str) -> Result<(), String> {
    println!("Starting GitHub authentication...");
    let token = github_login::device_flow_login(client_id).await?;
    token_store::save_token(&token)?;
    println!("✓ Authentication successful!");
    Ok(())
}

async fn send(server: &str, username: &str, message: &str) -> Result<(), String> {
    let chars = message.chars().count();
    if chars > MAX_MESSAGE_CHARS {
        return Err(format!(
            "message too long ({chars} chars), limit is {MAX_MESSAGE_CHARS}"
        ));
    }

    let token = token_store::load_token()?;
    client::send_note(server, &token, username, message).await?;
    println!("✓ Pong sent to {username}: {message}");
    Ok(())
}

fn show_history() -> Result<(), String> {
    let entries = history::load_history(&history::default_history_path()?)?;
    if entries.is_empty() {
        println!("No pong history found.");
        return Ok(());
    }

    println!("Your pong history ({} pongs):\n", entries.len());
    for entry in entries.iter().rev() {
        let time = entry
            .fetched_at
            .with_timezone(&Local)
            .format("%b %-d, %-I:%M %p");
        println!("📝 {} ({}): {}", entry.from_user, time, entry.message);
    }
    Ok(())
}

fn clear_history() -> Result<(), String> {
    match history::clear(&history::default_history_path()?)? {
        true => println!("✓ History cleared!"),
        false => println!("No history file to clear."),
    }
    Ok(())
}
