//! Scryfall Sync - filtered card store
//!
//! Fetches cards that are rare or better on Arena but common/uncommon on
//! paper and MTGO, and stores them in SQLite for browsing.

use clap::{Parser, Subcommand};
use rusqlite::Connection;
use scryfall_sync::config::{API_BASE_URL, DEFAULT_APP_NAME};
use scryfall_sync::formatters::{format_card_detail, format_set};
use scryfall_sync::menu::{fetch_and_populate, list_stored_cards, run_menu, search_scryfall};
use scryfall_sync::{default_db_path, open_database, ClientConfig, ScryfallClient};
use std::path::PathBuf;

/// Scryfall card sync - stores cards with no common/uncommon Arena printing
#[derive(Parser, Debug)]
#[command(name = "scryfall_sync")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    #[arg(short, long, default_value_os_t = default_db_path())]
    database: PathBuf,

    /// Application name sent in the User-Agent header
    #[arg(long, default_value = DEFAULT_APP_NAME)]
    app_name: String,

    /// Scryfall API base URL
    #[arg(long, default_value = API_BASE_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the fixed search and store the filtered cards
    Fetch,
    /// Print the stored cards with their rarities per platform
    List,
    /// Free-text Scryfall search
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Show one card by Scryfall id
    Card { id: String },
    /// Show one set by code
    Set { code: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let db_path = args.database.clone();

    log::info!("Starting scryfall_sync...");
    log::info!("Database path: {}", db_path.display());

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::error!("Failed to create database directory: {}", e);
                std::process::exit(1);
            }
            log::info!("Created directory: {}", parent.display());
        }
    }

    let is_new = !db_path.exists();

    let conn = match open_database(&db_path) {
        Ok(conn) => {
            log::info!("Opened database: {}", db_path.display());
            conn
        }
        Err(e) => {
            log::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    let client =
        ScryfallClient::new(ClientConfig::for_app(&args.app_name).with_api_url(&args.api_url));

    if let Err(e) = run(args.command, &client, &conn, is_new).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(
    command: Option<Command>,
    client: &ScryfallClient,
    conn: &Connection,
    is_new: bool,
) -> scryfall_sync::Result<()> {
    match command {
        Some(Command::Fetch) => println!("{}", fetch_and_populate(client, conn).await?),
        Some(Command::List) => println!("{}", list_stored_cards(conn)?),
        Some(Command::Search { query }) => {
            println!("{}", search_scryfall(client, &query.join(" ")).await?)
        }
        Some(Command::Card { id }) => print!("{}", format_card_detail(&client.get_card(&id).await?)),
        Some(Command::Set { code }) => print!("{}", format_set(&client.get_set(&code).await?)),
        None if is_new => {
            log::info!("Database is new, fetching and inserting cards...");
            println!("{}", fetch_and_populate(client, conn).await?);
        }
        None => run_menu(client, conn).await,
    }
    Ok(())
}
