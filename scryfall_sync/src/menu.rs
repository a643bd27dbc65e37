//! Interactive menu and the actions behind it
//!
//! The actions are also what the CLI subcommands call, so each one returns
//! its output instead of printing directly.

use crate::client::ScryfallClient;
use crate::database::load_card_views;
use crate::error::Result;
use crate::formatters::{format_card_table, format_search_results, format_sync_report};
use crate::sync::{run_sync, DEFAULT_QUERY};
use inquire::{InquireError, Select, Text};
use rusqlite::Connection;
use std::fmt;

/// Search results printed per query
pub const SEARCH_RESULT_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Fetch,
    List,
    Search,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 4] = [
        MenuChoice::Fetch,
        MenuChoice::List,
        MenuChoice::Search,
        MenuChoice::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Fetch => "Fetch and populate database",
            MenuChoice::List => "List stored cards",
            MenuChoice::Search => "Search Scryfall",
            MenuChoice::Exit => "Exit",
        }
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Prompt until the user exits. Action failures are reported and the menu
/// is shown again.
pub async fn run_menu(client: &ScryfallClient, conn: &Connection) {
    loop {
        let choice = match Select::new("What would you like to do?", MenuChoice::ALL.to_vec())
            .prompt()
        {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => {
                log::error!("Menu prompt failed: {}", e);
                break;
            }
        };

        let outcome = match choice {
            MenuChoice::Fetch => fetch_and_populate(client, conn).await,
            MenuChoice::List => list_stored_cards(conn),
            MenuChoice::Search => match Text::new("Search query:").prompt() {
                Ok(query) if query.trim().is_empty() => continue,
                Ok(query) => search_scryfall(client, &query).await,
                Err(e) => {
                    log::warn!("No query entered: {}", e);
                    continue;
                }
            },
            MenuChoice::Exit => break,
        };

        match outcome {
            Ok(output) => println!("{}", output),
            Err(e) => log::error!("{} failed: {}", choice, e),
        }
    }
}

/// Run the fixed sync pass and summarize it
pub async fn fetch_and_populate(client: &ScryfallClient, conn: &Connection) -> Result<String> {
    let report = run_sync(client, conn, DEFAULT_QUERY).await?;
    Ok(format_sync_report(&report))
}

/// Table of every stored card with its rarities per platform
pub fn list_stored_cards(conn: &Connection) -> Result<String> {
    let views = load_card_views(conn)?;
    log::info!("Loaded {} cards from database", views.len());
    Ok(format_card_table(&views))
}

/// First page of a free-text search. A blank query sends no request.
pub async fn search_scryfall(client: &ScryfallClient, query: &str) -> Result<String> {
    let query = query.trim();
    if query.is_empty() {
        return Ok("No query entered.\n".to_string());
    }

    let list = client.search_cards(query).await?;

    let mut output = match list.total_cards {
        Some(total) => format!("Found {} cards for \"{}\"\n", total, query),
        None => format!("Results for \"{}\"\n", query),
    };
    output.push_str(&format_search_results(&list.data, SEARCH_RESULT_LIMIT));
    Ok(output)
}
