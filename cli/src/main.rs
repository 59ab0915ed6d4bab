//! Command-line interface for the Evernote API client.
//!
//! Commands:
//! - auth: OAuth credential exchange
//! - user: current account profile
//! - notebooks: list, create, and rename notebooks
//! - share: notebook sharing and the shared-notebook handshake
//! - notes: search, create, and rename notes
//! - thumbnail: fetch a note's thumbnail image
//!
//! Configuration via environment:
//! - EVERNOTE_CONSUMER_KEY / EVERNOTE_CONSUMER_SECRET: application credentials
//! - EVERNOTE_CALLBACK_URL: OAuth callback URL
//! - EVERNOTE_TOKEN: access token for store operations
//! - EVERNOTE_SERVICE_URL: host override (defaults to the sandbox host)

mod commands;

use clap::{Parser, Subcommand};
use evernote_client::{Client, ClientConfig};

use commands::{
    auth::AuthArgs, notebooks::NotebooksArgs, notes::NotesArgs, share::ShareArgs,
    thumbnail::ThumbnailArgs, user::UserArgs,
};

/// Evernote API command-line client
///
/// Talks to the sandbox environment unless --production is given. Output is
/// JSON by default; pass --human for formatted text.
#[derive(Parser)]
#[command(name = "evernote")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Use the production host instead of the sandbox
    #[arg(long, global = true)]
    production: bool,

    /// Access token for store operations
    #[arg(long, env = "EVERNOTE_TOKEN", global = true)]
    token: Option<String>,

    /// Service URL override, e.g. for a local test service
    #[arg(long, env = "EVERNOTE_SERVICE_URL", global = true)]
    service_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// OAuth credential exchange
    Auth(AuthArgs),

    /// Show the current account profile
    User(UserArgs),

    /// List, create, and rename notebooks
    Notebooks(NotebooksArgs),

    /// Notebook sharing and shared-notebook authentication
    Share(ShareArgs),

    /// Search, create, and rename notes
    Notes(NotesArgs),

    /// Fetch a note thumbnail
    Thumbnail(ThumbnailArgs),
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if cli.production {
        config.sandbox = false;
    }
    if cli.service_url.is_some() {
        config.service_url = cli.service_url.clone();
    }

    let client = Client::new(config);
    let token = cli.token.clone().unwrap_or_default();

    let result = match cli.command {
        Commands::Auth(args) => commands::auth::execute(&client, cli.human, args).await,
        Commands::User(args) => commands::user::execute(&client, &token, cli.human, args).await,
        Commands::Notebooks(args) => {
            commands::notebooks::execute(&client, &token, cli.human, args).await
        }
        Commands::Share(args) => commands::share::execute(&client, &token, cli.human, args).await,
        Commands::Notes(args) => commands::notes::execute(&client, &token, cli.human, args).await,
        Commands::Thumbnail(args) => commands::thumbnail::execute(&client, &token, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the tracing subscriber; quiet unless RUST_LOG says otherwise.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
